use clap::{Parser, Subcommand, ValueHint};
use rdf_projection::config::DEFAULT_CONFIG_FILE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "rdf-projection")]
/// Projects RDF resources into search-index documents
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prints the search document of one or more subjects as JSON
    ///
    /// One JSON object is written per line and subject, in the order the subjects are given.
    Project {
        /// RDF file the documents are projected from
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        data: PathBuf,
        /// The format of the data file
        ///
        /// It can be an extension like "ttl" or a MIME type like "text/turtle".
        ///
        /// By default the format is guessed from the data file extension.
        #[arg(long)]
        format: Option<String>,
        /// Base IRI of the data file
        #[arg(long, value_hint = ValueHint::Url)]
        base: Option<String>,
        /// Field-mapping configuration
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, value_hint = ValueHint::FilePath)]
        config: PathBuf,
        /// IRI of a resource to project
        #[arg(short, long, required = true, value_hint = ValueHint::Url)]
        subject: Vec<String>,
        /// Pretty-print the documents
        #[arg(long)]
        pretty: bool,
        /// Fail if a field query cannot be evaluated
        #[arg(long)]
        strict: bool,
    },
    /// Lists the fields of a field-mapping configuration
    Fields {
        /// Field-mapping configuration
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE, value_hint = ValueHint::FilePath)]
        config: PathBuf,
    },
}
