#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod binder;
pub mod coercion;
pub mod config;
pub mod document;
pub mod emission;
pub mod engine;
pub mod error;
pub mod materialize;
pub mod rows;
pub mod store;

pub use config::{Config, ConfigSource, FieldSpec, FileConfigSource, InlineConfigSource};
pub use document::{DocumentSink, SearchDocument};
pub use engine::{FieldReport, ProjectionReport, Projector};
pub use error::{CoercionError, ConfigError, ProjectionError, StoreError};
pub use store::{GraphStore, MemoryGraphStore, TransientGraph};

pub mod model {
    pub use oxigraph::model::*;
}

pub mod io {
    pub use oxigraph::io::{RdfFormat, RdfParser};
}

pub mod sparql {
    pub use oxigraph::sparql::{QuerySolution, Variable};
}
