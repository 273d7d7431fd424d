use oxigraph::model::Term;
use oxigraph::sparql::{EvaluationError, SparqlSyntaxError};
use oxigraph::store::{LoaderError, StorageError};
use std::io;
use std::path::PathBuf;

/// An error raised while reading or decoding a field-mapping configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Unable to read the configuration file {}: {source}", path.display())]
    Io {
        /// The path of the configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The configuration text is not a valid field-mapping document.
    #[error("Invalid field-mapping configuration: {0}")]
    Decode(#[from] serde_yaml::Error),
}

/// An error raised by a [`GraphStore`](crate::store::GraphStore) or a
/// [`TransientGraph`](crate::store::TransientGraph).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The query text is not valid SPARQL.
    #[error(transparent)]
    Parse(SparqlSyntaxError),
    /// The query failed during evaluation.
    #[error(transparent)]
    Evaluation(EvaluationError),
    /// The underlying storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// A data file could not be loaded.
    #[error(transparent)]
    Loader(#[from] LoaderError),
    /// The query returned another kind of results than the one requested.
    #[error("The query does not return {expected}")]
    UnexpectedResults {
        /// The kind of results that were requested.
        expected: &'static str,
    },
}

impl From<EvaluationError> for StoreError {
    #[inline]
    fn from(error: EvaluationError) -> Self {
        match error {
            EvaluationError::Parsing(error) => Self::Parse(error),
            EvaluationError::Storage(error) => Self::Storage(error),
            error => Self::Evaluation(error),
        }
    }
}

/// A query result value that cannot be converted into a document value.
#[derive(Debug, thiserror::Error)]
pub enum CoercionError {
    #[error("The term {0} is neither a literal nor a resource")]
    UnexpectedTerm(Term),
}

/// An error aborting a whole projection.
///
/// Query failures never surface here, they are isolated to their field and reported in the
/// [`ProjectionReport`](crate::engine::ProjectionReport).
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    /// The field `field` received a value the document model has no representation for.
    #[error("Field '{field}' received an unsupported value: {source}")]
    Coercion {
        field: String,
        #[source]
        source: CoercionError,
    },
}
