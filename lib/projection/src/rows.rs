//! Extraction of SELECT solutions as rows of document values.

use crate::coercion::coerce;
use crate::error::{CoercionError, StoreError};
use crate::store::{GraphStore, SolutionIter, TransientGraph};
use oxigraph::sparql::QuerySolution;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// One solution of a SELECT query, keyed by variable name.
///
/// Unbound variables are absent from the map.
pub type ResultRow = BTreeMap<String, String>;

/// The graph a SELECT query is evaluated against.
#[derive(Clone, Copy)]
pub enum RowSource<'a> {
    /// The persistent store.
    Store(&'a dyn GraphStore),
    /// A graph materialized for the current field.
    Transient(&'a TransientGraph),
}

impl RowSource<'_> {
    /// The kind of this source.
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Store(_) => SourceKind::Store,
            Self::Transient(_) => SourceKind::Transient,
        }
    }

    fn select(&self, query: &str) -> Result<SolutionIter<'_>, StoreError> {
        match self {
            Self::Store(store) => store.select(query),
            Self::Transient(graph) => graph.select(query),
        }
    }
}

/// Identifies the kind of [`RowSource`] without borrowing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Store,
    Transient,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Store => "store",
            Self::Transient => "transient graph",
        })
    }
}

/// The rows of a SELECT query.
pub struct Extracted {
    /// The rows, in solution order. Empty if `failure` is set.
    pub rows: Vec<ResultRow>,
    /// The error that aborted the query, if any.
    pub failure: Option<StoreError>,
}

/// Evaluates `query` against `source` and converts every solution into a [`ResultRow`].
///
/// Rows read from a transient graph are kept even when no variable is bound. Rows read from the
/// store are dropped when every variable is unbound.
///
/// A query that fails to parse or evaluate yields no rows. The error is logged and returned in
/// [`Extracted::failure`]. Only values the document model cannot represent abort the extraction
/// with an error.
pub fn extract_rows(query: &str, source: RowSource<'_>) -> Result<Extracted, CoercionError> {
    let keep_empty = source.kind() == SourceKind::Transient;
    debug!(source = %source.kind(), query = %query, "SELECT");
    let solutions = match source.select(query) {
        Ok(solutions) => solutions,
        Err(error) => return Ok(failed(query, source.kind(), error)),
    };

    let mut rows = Vec::new();
    for solution in solutions {
        let solution = match solution {
            Ok(solution) => solution,
            Err(error) => return Ok(failed(query, source.kind(), error)),
        };
        let row = to_row(&solution)?;
        if keep_empty || !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(Extracted {
        rows,
        failure: None,
    })
}

fn failed(query: &str, source: SourceKind, error: StoreError) -> Extracted {
    warn!(source = %source, query = %query, %error, "SELECT query failed");
    Extracted {
        rows: Vec::new(),
        failure: Some(error),
    }
}

/// Converts the bound variables of `solution` into a row.
pub fn to_row(solution: &QuerySolution) -> Result<ResultRow, CoercionError> {
    let mut row = ResultRow::new();
    for (variable, term) in solution.iter() {
        match coerce(term)? {
            Some(value) => {
                row.insert(variable.as_str().to_owned(), value);
            }
            None => debug!(variable = variable.as_str(), "Skipping blank node value"),
        }
    }
    Ok(row)
}
