//! Input and output endpoints of a run.
//!
//! Both ends are either a named file or the process's standard stream.

use crate::error::{Error, Result};
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Where the binary data comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Input {
    /// Standard input
    #[default]
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl Input {
    /// Reads the whole input into memory
    pub fn read_all(&self) -> Result<Vec<u8>> {
        match self {
            Input::Stdin => {
                let mut data = Vec::new();
                io::stdin()
                    .lock()
                    .read_to_end(&mut data)
                    .map_err(|e| Error::input_read(None, e))?;
                trace!("Read {} bytes from stdin", data.len());
                Ok(data)
            }
            Input::File(path) => {
                let data = fs::read(path).map_err(|e| Error::input_read(Some(path.clone()), e))?;
                trace!("Read {} bytes from {}", data.len(), path.display());
                Ok(data)
            }
        }
    }
}

impl From<Option<PathBuf>> for Input {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Input::Stdin, Input::File)
    }
}

/// Where the generated source goes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Output {
    /// Standard output
    #[default]
    Stdout,
    /// A file on disk, created or truncated when opened
    File(PathBuf),
}

impl Output {
    /// Opens a buffered writer on the destination
    pub fn open(&self) -> Result<Box<dyn Write>> {
        match self {
            Output::Stdout => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
            Output::File(path) => {
                let file = fs::File::create(path).map_err(|e| self.error(e))?;
                trace!("Created {}", path.display());
                Ok(Box::new(BufWriter::new(file)))
            }
        }
    }

    /// Wraps an I/O failure on this destination
    pub fn error(&self, source: io::Error) -> Error {
        Error::output_write(self.path().map(Path::to_path_buf), source)
    }

    /// Returns the file path, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Output::Stdout => None,
            Output::File(path) => Some(path),
        }
    }
}

impl From<Option<PathBuf>> for Output {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Output::Stdout, Output::File)
    }
}
