//! Access to the graphs queries are evaluated against.
//!
//! The [`GraphStore`] trait is the capability a host hands to the
//! [`Projector`](crate::engine::Projector): it evaluates SELECT queries and materializes CONSTRUCT
//! results into a [`TransientGraph`]. [`MemoryGraphStore`] implements it on top of an in-memory
//! Oxigraph store.
//!
//! Usage example:
//! ```
//! use rdf_projection::io::RdfFormat;
//! use rdf_projection::store::{GraphStore, MemoryGraphStore, TransientGraph};
//!
//! let store = MemoryGraphStore::new()?;
//! store.load_from_reader(
//!     RdfFormat::Turtle,
//!     "<http://example.com/s> <http://example.com/p> \"o\" .".as_bytes(),
//! )?;
//!
//! let solutions = store.select("SELECT ?o WHERE { ?s ?p ?o }")?.collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(solutions.len(), 1);
//!
//! let graph = TransientGraph::new()?;
//! assert_eq!(store.construct("CONSTRUCT WHERE { ?s ?p ?o }", &graph)?, 1);
//! assert_eq!(graph.len()?, 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::error::StoreError;
use oxigraph::io::RdfParser;
use oxigraph::model::GraphName;
use oxigraph::sparql::{QueryResults, QuerySolution};
use oxigraph::store::Store;
use std::io::Read;

/// A cursor over the solutions of a SELECT query.
pub type SolutionIter<'a> = Box<dyn Iterator<Item = Result<QuerySolution, StoreError>> + 'a>;

/// A graph store able to evaluate SPARQL queries.
///
/// Failures are reported as [`StoreError`] and never panic, the caller decides how to recover.
pub trait GraphStore {
    /// Evaluates a SPARQL SELECT query and returns its solutions.
    fn select(&self, query: &str) -> Result<SolutionIter<'_>, StoreError>;

    /// Evaluates a SPARQL CONSTRUCT query and inserts the resulting triples into `target`.
    ///
    /// Returns the number of triples produced by the query.
    fn construct(&self, query: &str, target: &TransientGraph) -> Result<usize, StoreError>;
}

impl<T: GraphStore + ?Sized> GraphStore for &T {
    fn select(&self, query: &str) -> Result<SolutionIter<'_>, StoreError> {
        (**self).select(query)
    }

    fn construct(&self, query: &str, target: &TransientGraph) -> Result<usize, StoreError> {
        (**self).construct(query, target)
    }
}

/// A [`GraphStore`] backed by an in-memory Oxigraph store.
///
/// Cloning is cheap, clones share the same data.
#[derive(Clone)]
pub struct MemoryGraphStore {
    inner: Store,
}

impl MemoryGraphStore {
    /// Creates an empty store.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            inner: Store::new()?,
        })
    }

    /// Loads an RDF file into the store.
    pub fn load_from_reader(
        &self,
        parser: impl Into<RdfParser>,
        reader: impl Read,
    ) -> Result<(), StoreError> {
        self.inner.load_from_reader(parser, reader)?;
        Ok(())
    }

    /// Returns the number of quads in the store.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.inner.len()?)
    }

    /// Returns if the store is empty.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.inner.is_empty()?)
    }
}

impl GraphStore for MemoryGraphStore {
    fn select(&self, query: &str) -> Result<SolutionIter<'_>, StoreError> {
        select_from(&self.inner, query)
    }

    fn construct(&self, query: &str, target: &TransientGraph) -> Result<usize, StoreError> {
        construct_into(&self.inner, query, target)
    }
}

/// A short-lived in-memory graph holding the output of CONSTRUCT queries.
///
/// Each instance is owned by the resolution of a single field and dropped afterward.
pub struct TransientGraph {
    inner: Store,
}

impl TransientGraph {
    /// Creates an empty graph.
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self {
            inner: Store::new()?,
        })
    }

    /// Inserts triples into the default graph.
    ///
    /// Returns the number of triples that were not already present.
    pub fn extend(
        &self,
        triples: impl IntoIterator<Item = oxigraph::model::Triple>,
    ) -> Result<usize, StoreError> {
        let mut inserted = 0;
        for triple in triples {
            if self
                .inner
                .insert(&triple.in_graph(GraphName::DefaultGraph))?
            {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Evaluates a SPARQL SELECT query against this graph.
    pub fn select(&self, query: &str) -> Result<SolutionIter<'_>, StoreError> {
        select_from(&self.inner, query)
    }

    /// Returns the number of triples in the graph.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.inner.len()?)
    }

    /// Returns if the graph is empty.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.inner.is_empty()?)
    }
}

fn select_from<'a>(store: &'a Store, query: &str) -> Result<SolutionIter<'a>, StoreError> {
    match store.query(query)? {
        QueryResults::Solutions(solutions) => {
            Ok(Box::new(solutions.map(|solution| solution.map_err(StoreError::from))))
        }
        _ => Err(StoreError::UnexpectedResults {
            expected: "solutions",
        }),
    }
}

fn construct_into(store: &Store, query: &str, target: &TransientGraph) -> Result<usize, StoreError> {
    let QueryResults::Graph(triples) = store.query(query)? else {
        return Err(StoreError::UnexpectedResults { expected: "a graph" });
    };
    let triples = triples.collect::<Result<Vec<_>, _>>()?;
    let count = triples.len();
    target.extend(triples)?;
    Ok(count)
}
