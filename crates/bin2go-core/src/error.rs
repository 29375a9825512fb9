//! Error types for the bin2go-core library.
//!
//! Rendering itself never fails; every variant here wraps an I/O failure on
//! one of the two endpoints of a run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bin2go operations
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit code for a successful run
pub const EXIT_OK: u8 = 0;
/// Process exit code for a usage error
pub const EXIT_USAGE: u8 = 1;
/// Process exit code when the input could not be read
pub const EXIT_INPUT_FAIL: u8 = 2;
/// Process exit code when the output could not be written
pub const EXIT_OUTPUT_FAIL: u8 = 3;

/// Error type for all bin2go operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read the input file or standard input
    #[error("failed to read input {}: {source}", describe(.path.as_ref(), "<stdin>"))]
    InputRead {
        /// Input file, `None` for standard input
        path: Option<PathBuf>,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to create, write or flush the output
    #[error("failed to write output {}: {source}", describe(.path.as_ref(), "<stdout>"))]
    OutputWrite {
        /// Output file, `None` for standard output
        path: Option<PathBuf>,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

fn describe(path: Option<&PathBuf>, stream: &str) -> String {
    match path {
        Some(path) => format!("'{}'", path.display()),
        None => stream.to_string(),
    }
}

impl Error {
    /// Creates a new input read error
    pub fn input_read(path: Option<PathBuf>, source: std::io::Error) -> Self {
        Self::InputRead { path, source }
    }

    /// Creates a new output write error
    pub fn output_write(path: Option<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWrite { path, source }
    }

    /// Returns the process exit code this error maps to
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputRead { .. } => EXIT_INPUT_FAIL,
            Self::OutputWrite { .. } => EXIT_OUTPUT_FAIL,
        }
    }
}
