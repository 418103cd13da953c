//! Error types emitted by the daytour CLI.

use camino::Utf8PathBuf;
use thiserror::Error;

use daytour_core::{InvalidConfigurationError, SolveError};
use daytour_data::DataError;

/// Errors emitted by the daytour CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Reading or validating the snapshot directory failed.
    #[error("failed to load snapshot data: {0}")]
    Data(#[from] DataError),
    /// The assembled request failed optimizer validation.
    #[error(transparent)]
    InvalidConfiguration(#[from] InvalidConfigurationError),
    /// The time limit was negative or not a number.
    #[error("time limit must be a non-negative number of seconds, got {seconds}")]
    InvalidTimeLimit {
        /// The rejected figure.
        seconds: f64,
    },
    /// The optimization run itself failed.
    #[error("optimization failed: {0}")]
    Solve(#[from] SolveError),
    /// Results could not be serialized to JSON.
    #[error("failed to serialise results: {0}")]
    Serialise(#[from] serde_json::Error),
    /// Results could not be written to the requested destination.
    #[error("failed to write results to {destination}: {source}")]
    WriteOutput {
        /// `stdout` or the output file path.
        destination: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub(crate) fn write_output(destination: Option<&Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::WriteOutput {
            destination: destination
                .map_or_else(|| "stdout".to_owned(), ToString::to_string),
            source,
        }
    }
}
