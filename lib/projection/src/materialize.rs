//! Construction of the per-field graph a SELECT query runs against.

use crate::binder::bind;
use crate::error::StoreError;
use crate::store::{GraphStore, TransientGraph};
use tracing::{debug, warn};

/// The graph built from a field's CONSTRUCT queries.
pub struct Materialized {
    /// The triples accumulated so far. Partial if `failure` is set.
    pub graph: TransientGraph,
    /// The error that stopped the materialization early, if any.
    pub failure: Option<StoreError>,
}

/// Evaluates `construct_queries` in order against `store` and accumulates their triples into a
/// fresh [`TransientGraph`].
///
/// The CONSTRUCT queries always read from `store`, never from the graph they populate. The first
/// failing query stops the materialization: the triples gathered until then are kept and the
/// error is returned alongside them.
///
/// Only the creation of the empty graph itself can fail hard.
pub fn materialize(
    subject: &str,
    construct_queries: &[String],
    prologue: &str,
    store: &(impl GraphStore + ?Sized),
) -> Result<Materialized, StoreError> {
    let graph = TransientGraph::new()?;
    for template in construct_queries {
        let query = bind(prologue, template, subject);
        debug!(subject, query = %query, "CONSTRUCT into transient graph");
        match store.construct(&query, &graph) {
            Ok(count) => debug!(subject, count, "CONSTRUCT produced triples"),
            Err(error) => {
                warn!(subject, query = %query, %error, "CONSTRUCT query failed");
                return Ok(Materialized {
                    graph,
                    failure: Some(error),
                });
            }
        }
    }
    if matches!(graph.is_empty(), Ok(true)) {
        debug!(subject, "CONSTRUCT queries produced an empty transient graph");
    }
    Ok(Materialized {
        graph,
        failure: None,
    })
}
