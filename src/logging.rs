//! Tracing subscriber setup
//!
//! Logs go to stderr: stdout carries the JSON response.

use anyhow::Context;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level used when `RUST_LOG` is unset or invalid
const DEFAULT_DIRECTIVE: &str = "info";

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Build the level filter from `RUST_LOG`-style directives
fn env_filter(directives: Option<&str>) -> Result<EnvFilter, ParseError> {
    match directives.filter(|d| !d.is_empty()) {
        Some(d) => EnvFilter::try_new(d).or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE)),
        None => EnvFilter::try_new(DEFAULT_DIRECTIVE),
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init(format: LogFormat) -> anyhow::Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter_layer = env_filter(directives.as_deref()).context("building log filter")?;

    let registry = tracing_subscriber::registry().with(filter_layer);
    match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
