//! # bin2go-core
//!
//! A library for rendering binary data as Go `[]byte` literal declarations.
//!
//! This crate provides the core functionality for:
//! - Rendering a byte sequence as a line-wrapped hex literal
//! - Optionally prefixing the declaration with a `package` clause
//! - Reading the input and writing the output from files or standard streams
//!
//! ## Architecture
//!
//! - [`transcoder`]: The pure text renderer and its configuration
//! - [`endpoint`]: Input and output selection
//! - [`job`]: A single read-render-write run
//! - [`error`]: Error types and exit code mapping
//!
//! ## Example
//!
//! ```
//! use bin2go_core::{format, RenderConfig, Transcoder};
//!
//! assert_eq!(format(&[0x00, 0x01], "b"), "var b = []byte{\n\t0x00, 0x01\n}\n");
//!
//! let transcoder = Transcoder::with_config(RenderConfig::new().trailing_comma(true));
//! let text = transcoder.format_document(&[0xff], "blob", Some("assets"));
//! assert_eq!(text, "package assets\n\nvar blob = []byte{\n\t0xff,\n}\n");
//! ```
//!
//! Running a whole job:
//!
//! ```no_run
//! use bin2go_core::{run, Job};
//! use std::path::PathBuf;
//!
//! let job = Job::new("logo")
//!     .input(Some(PathBuf::from("logo.png")))
//!     .output(Some(PathBuf::from("logo.go")))
//!     .package(Some("assets".to_string()));
//! let summary = run(&job)?;
//! println!("{} bytes in, {} lines out", summary.input_bytes, summary.output_lines);
//! # Ok::<(), bin2go_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod endpoint;
pub mod error;
pub mod job;
pub mod transcoder;

// Re-export primary types for convenience
pub use endpoint::{Input, Output};
pub use error::{Error, Result, EXIT_INPUT_FAIL, EXIT_OK, EXIT_OUTPUT_FAIL, EXIT_USAGE};
pub use job::{run, Job, JobSummary};
pub use transcoder::{format, format_with_width, RenderConfig, StatsWriter, Transcoder};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
