//! Projection of a subject into a search document.
//!
//! Usage example:
//! ```
//! use rdf_projection::config::Config;
//! use rdf_projection::document::SearchDocument;
//! use rdf_projection::engine::Projector;
//! use rdf_projection::io::RdfFormat;
//! use rdf_projection::store::MemoryGraphStore;
//!
//! let store = MemoryGraphStore::new()?;
//! store.load_from_reader(
//!     RdfFormat::Turtle,
//!     "<http://ex.org/s1> <http://ex.org/hasLabel> \"Hello\" .".as_bytes(),
//! )?;
//! let config = Config::from_yaml_str(r#"
//! prefixes: "PREFIX ex: <http://ex.org/> "
//! fields:
//!   - name: label
//!     select: "SELECT ?label WHERE { ?subject ex:hasLabel ?label }"
//! "#)?;
//!
//! let mut document = SearchDocument::new();
//! Projector::new(store).project("http://ex.org/s1", &config, &mut document)?;
//! assert_eq!(document.fields(), [("label".to_owned(), "Hello".to_owned())]);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

use crate::binder::bind;
use crate::config::{Config, ConfigSource, FieldSpec};
use crate::document::DocumentSink;
use crate::emission::emit_row;
use crate::error::{ProjectionError, StoreError};
use crate::materialize::materialize;
use crate::rows::{extract_rows, RowSource, SourceKind};
use crate::store::GraphStore;
use tracing::{debug, info, warn};

/// Projects subjects of a [`GraphStore`] into documents.
///
/// The projector holds no state besides the store, so a single instance can serve any number
/// of projections.
#[derive(Clone)]
pub struct Projector<S> {
    store: S,
}

impl<S: GraphStore> Projector<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Writes the fields of `config` for `subject` into `sink`.
    ///
    /// Fields are processed in declaration order. A failing query only affects its own field and
    /// is recorded in the returned report. The projection itself fails only when a query returns
    /// a value that has no document representation.
    pub fn project(
        &self,
        subject: &str,
        config: &Config,
        sink: &mut (impl DocumentSink + ?Sized),
    ) -> Result<ProjectionReport, ProjectionError> {
        let mut report = ProjectionReport {
            subject: subject.to_owned(),
            fields: Vec::with_capacity(config.fields.len()),
        };
        for field in &config.fields {
            report
                .fields
                .push(self.project_field(subject, &config.prologue, field, sink)?);
        }
        debug!(
            subject,
            fields = report.fields.len(),
            emitted = report.emitted(),
            failures = report.failures().count(),
            "Projection done"
        );
        Ok(report)
    }

    /// Like [`Self::project`] but reads the configuration from `source` first.
    ///
    /// A configuration that cannot be read or decoded projects no field.
    pub fn project_with_source(
        &self,
        subject: &str,
        source: &(impl ConfigSource + ?Sized),
        sink: &mut (impl DocumentSink + ?Sized),
    ) -> Result<ProjectionReport, ProjectionError> {
        self.project(subject, &Config::load(source), sink)
    }

    fn project_field(
        &self,
        subject: &str,
        prologue: &str,
        field: &FieldSpec,
        sink: &mut (impl DocumentSink + ?Sized),
    ) -> Result<FieldReport, ProjectionError> {
        let query = bind(prologue, &field.select, subject);
        let mut report = FieldReport {
            name: field.name.clone(),
            source: SourceKind::Store,
            rows: 0,
            emitted: 0,
            failure: None,
        };

        let extracted = if field.construct.is_empty() {
            extract_rows(&query, RowSource::Store(&self.store))
        } else {
            report.source = SourceKind::Transient;
            let materialized =
                match materialize(subject, &field.construct, prologue, &self.store) {
                    Ok(materialized) => materialized,
                    Err(error) => {
                        warn!(field = %field.name, subject, %error, "Unable to create the transient graph");
                        report.failure = Some(error.to_string());
                        return Ok(report);
                    }
                };
            report.failure = materialized.failure.as_ref().map(StoreError::to_string);
            extract_rows(&query, RowSource::Transient(&materialized.graph))
        };
        let extracted = extracted.map_err(|source| ProjectionError::Coercion {
            field: field.name.clone(),
            source,
        })?;

        if let Some(error) = &extracted.failure {
            debug!(field = %field.name, subject, %error, "No rows for field");
            report.failure.get_or_insert_with(|| error.to_string());
        }
        report.rows = extracted.rows.len();
        for row in extracted.rows {
            if let Some(value) = emit_row(&field.name, row, sink) {
                report.emitted += 1;
                if value.is_structured() {
                    info!(field = %field.name, subject, "Indexed structured field value");
                }
            }
        }
        Ok(report)
    }
}

/// What a projection wrote, field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionReport {
    pub subject: String,
    /// One entry per configured field, in declaration order.
    pub fields: Vec<FieldReport>,
}

impl ProjectionReport {
    /// The total number of values written to the document.
    pub fn emitted(&self) -> usize {
        self.fields.iter().map(|field| field.emitted).sum()
    }

    /// The fields whose queries failed.
    pub fn failures(&self) -> impl Iterator<Item = &FieldReport> {
        self.fields.iter().filter(|field| field.failure.is_some())
    }
}

/// The outcome of a single field specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub name: String,
    /// The graph the SELECT query was evaluated against.
    pub source: SourceKind,
    /// The number of extracted rows.
    pub rows: usize,
    /// The number of values written to the document.
    pub emitted: usize,
    /// The first query error of this field, if any.
    pub failure: Option<String>,
}
