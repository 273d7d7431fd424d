#![allow(clippy::print_stdout, reason = "command line tool")]
use crate::cli::{Args, Command};
use anyhow::{bail, Context};
use clap::Parser;
use rdf_projection::io::{RdfFormat, RdfParser};
use rdf_projection::{
    Config, ConfigSource, FileConfigSource, MemoryGraphStore, Projector, SearchDocument,
};
use serde_json::json;
use std::ffi::OsStr;
use std::fs::File;
use std::io::{self, stdout, BufReader, Write};
use std::path::Path;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let matches = Args::parse();
    match matches.command {
        Command::Project {
            data,
            format,
            base,
            config,
            subject,
            pretty,
            strict,
        } => {
            let format = if let Some(format) = format {
                rdf_format_from_name(&format)?
            } else {
                rdf_format_from_path(&data)?
            };
            let mut parser = RdfParser::from_format(format);
            if let Some(base) = base {
                parser = parser
                    .with_base_iri(&base)
                    .with_context(|| format!("Invalid base IRI {base}"))?;
            }
            let store = MemoryGraphStore::new()?;
            let reader = BufReader::new(
                File::open(&data)
                    .with_context(|| format!("Unable to open {}", data.display()))?,
            );
            store
                .load_from_reader(parser, reader)
                .with_context(|| format!("Unable to load {}", data.display()))?;
            if store.is_empty()? {
                warn!(data = %data.display(), "The data file contains no triples");
            } else {
                debug!(data = %data.display(), quads = store.len()?, "Data loaded");
            }

            let config = load_config(&config)?;
            let projector = Projector::new(store);
            let mut stdout = stdout().lock();
            for subject in subject {
                let mut document = SearchDocument::new();
                let report = projector.project(&subject, &config, &mut document)?;
                if strict {
                    if let Some(field) = report.failures().next() {
                        bail!(
                            "The field '{}' of {subject} failed: {}",
                            field.name,
                            field.failure.as_deref().unwrap_or_default()
                        );
                    }
                }
                let output = json!({
                    "subject": subject,
                    "fields": document.to_json(),
                });
                if pretty {
                    serde_json::to_writer_pretty(&mut stdout, &output)?;
                } else {
                    serde_json::to_writer(&mut stdout, &output)?;
                }
                writeln!(stdout)?;
            }
            stdout.flush()?;
            Ok(())
        }
        Command::Fields { config } => {
            let config = load_config(&config)?;
            let mut stdout = stdout().lock();
            for field in &config.fields {
                if field.construct.is_empty() {
                    writeln!(stdout, "{}", field.name)?;
                } else {
                    writeln!(
                        stdout,
                        "{} ({} CONSTRUCT)",
                        field.name,
                        field.construct.len()
                    )?;
                }
            }
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    let yaml = FileConfigSource::new(path).read_config()?;
    Config::from_yaml_str(&yaml).with_context(|| format!("Invalid configuration {}", path.display()))
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    format_from_path(path, |ext| {
        RdfFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}
