//! One end-to-end conversion: read the input, render it, write the output.

use crate::endpoint::{Input, Output};
use crate::error::Result;
use crate::transcoder::{RenderConfig, StatsWriter, Transcoder};
use std::io;
use tracing::debug;

/// Everything needed for a single run
#[derive(Debug, Clone)]
pub struct Job {
    /// Source of the binary data
    pub input: Input,
    /// Destination of the generated source
    pub output: Output,
    /// Package clause to prepend, if any
    pub package: Option<String>,
    /// Name of the generated variable
    pub identifier: String,
    /// Presentation settings
    pub render: RenderConfig,
}

impl Job {
    /// Creates a stdin-to-stdout job with the default style
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            input: Input::Stdin,
            output: Output::Stdout,
            package: None,
            identifier: identifier.into(),
            render: RenderConfig::default(),
        }
    }

    /// Sets the input
    pub fn input(mut self, input: impl Into<Input>) -> Self {
        self.input = input.into();
        self
    }

    /// Sets the output
    pub fn output(mut self, output: impl Into<Output>) -> Self {
        self.output = output.into();
        self
    }

    /// Sets the package clause; an empty name means none
    pub fn package(mut self, package: Option<String>) -> Self {
        self.package = package.filter(|name| !name.is_empty());
        self
    }

    /// Sets the presentation settings
    pub fn render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}

/// Counts reported after a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobSummary {
    /// Bytes read from the input
    pub input_bytes: usize,
    /// Bytes of source text written
    pub output_bytes: usize,
    /// Lines of source text written
    pub output_lines: usize,
}

/// Runs a job to completion
///
/// The input is read in full before the output is opened, so a failed read
/// never creates or truncates the destination file. A failed write may leave
/// partial output behind.
pub fn run(job: &Job) -> Result<JobSummary> {
    let data = job.input.read_all()?;
    debug!("Loaded {} input bytes", data.len());

    let sink = job.output.open()?;
    emit(job, &data, sink)
}

/// Renders `data` into an already opened sink and flushes it once
fn emit<W: io::Write>(job: &Job, data: &[u8], sink: W) -> Result<JobSummary> {
    let mut writer = StatsWriter::new(sink);

    let transcoder = Transcoder::with_config(job.render.clone());
    transcoder
        .stream_document(&mut writer, data, &job.identifier, job.package.as_deref())
        .map_err(|e| job.output.error(e))?;
    writer.flush().map_err(|e| job.output.error(e))?;

    let summary = JobSummary {
        input_bytes: data.len(),
        output_bytes: writer.bytes_written(),
        output_lines: writer.lines_written(),
    };
    debug!(
        "Wrote {} bytes in {} lines for '{}'",
        summary.output_bytes, summary.output_lines, job.identifier
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, EXIT_INPUT_FAIL, EXIT_OUTPUT_FAIL};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_run_file_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.bin");
        let output = temp_dir.path().join("out.go");
        fs::write(&input, [0x00u8, 0x01]).unwrap();

        let job = Job::new("b")
            .input(Some(input))
            .output(Some(output.clone()))
            .package(Some("assets".to_string()));
        let summary = run(&job).unwrap();

        let expected = "package assets\n\nvar b = []byte{\n\t0x00, 0x01\n}\n";
        assert_eq!(fs::read_to_string(&output).unwrap(), expected);
        assert_eq!(
            summary,
            JobSummary {
                input_bytes: 2,
                output_bytes: expected.len(),
                output_lines: 5,
            }
        );
    }

    #[test]
    fn test_run_empty_input() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("empty.bin");
        let output = temp_dir.path().join("out.go");
        fs::write(&input, b"").unwrap();

        run(&Job::new("x").input(Some(input)).output(Some(output.clone()))).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "var x = []byte{\n\t\n}\n");
    }

    #[test]
    fn test_missing_input_leaves_output_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.bin");
        let fresh = temp_dir.path().join("fresh.go");
        let existing = temp_dir.path().join("existing.go");
        fs::write(&existing, "keep me").unwrap();

        let err = run(&Job::new("v").input(Some(missing.clone())).output(Some(fresh.clone())))
            .unwrap_err();
        assert!(matches!(err, Error::InputRead { .. }));
        assert_eq!(err.exit_code(), EXIT_INPUT_FAIL);
        assert!(!fresh.exists());

        let err = run(&Job::new("v").input(Some(missing)).output(Some(existing.clone())))
            .unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT_FAIL);
        assert_eq!(fs::read_to_string(&existing).unwrap(), "keep me");
    }

    #[test]
    fn test_unwritable_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.bin");
        fs::write(&input, [1u8, 2, 3]).unwrap();

        // a directory cannot be opened as the output file
        let err = run(&Job::new("v").input(Some(input)).output(Some(temp_dir.path().to_path_buf())))
            .unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
        assert_eq!(err.exit_code(), EXIT_OUTPUT_FAIL);
    }

    /// Sink that fails after `limit` bytes, or only when flushed
    struct FailingSink {
        limit: usize,
        written: usize,
        fail_flush: bool,
    }

    impl io::Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written >= self.limit {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "no space left"));
            }
            let n = buf.len().min(self.limit - self.written);
            self.written += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            if self.fail_flush {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "flush failed"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_mid_stream() {
        let job = Job::new("v")
            .output(Some(PathBuf::from("out.go")))
            .package(Some("main".to_string()));
        let sink = FailingSink {
            limit: 40,
            written: 0,
            fail_flush: false,
        };

        let err = emit(&job, &[0xab; 100], sink).unwrap_err();
        match &err {
            Error::OutputWrite { path, source } => {
                assert_eq!(path.as_deref(), Some(std::path::Path::new("out.go")));
                assert_eq!(source.kind(), io::ErrorKind::WriteZero);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.exit_code(), EXIT_OUTPUT_FAIL);
    }

    #[test]
    fn test_flush_failure() {
        let sink = FailingSink {
            limit: usize::MAX,
            written: 0,
            fail_flush: true,
        };

        let err = emit(&Job::new("v"), &[1, 2, 3], sink).unwrap_err();
        assert!(matches!(err, Error::OutputWrite { path: None, .. }));
        assert_eq!(err.exit_code(), EXIT_OUTPUT_FAIL);
        assert!(err.to_string().contains("<stdout>"));
    }

    #[test]
    fn test_emit_into_memory() {
        let mut sink = Vec::new();
        let summary = emit(&Job::new("b"), &[0x00, 0x01], &mut sink).unwrap();

        assert_eq!(String::from_utf8(sink).unwrap(), "var b = []byte{\n\t0x00, 0x01\n}\n");
        assert_eq!(summary.input_bytes, 2);
        assert_eq!(summary.output_lines, 3);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_run_into_full_device() {
        let full = PathBuf::from("/dev/full");
        if !full.exists() {
            return;
        }
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.bin");
        fs::write(&input, [0x61u8, 0x62]).unwrap();

        let err = run(&Job::new("v").input(Some(input)).output(Some(full)))
            .unwrap_err();
        assert!(matches!(err, Error::OutputWrite { .. }));
        assert_eq!(err.exit_code(), EXIT_OUTPUT_FAIL);
    }

    #[test]
    fn test_render_config_is_applied() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.bin");
        let output = temp_dir.path().join("out.go");
        fs::write(&input, [0xcau8, 0xfe]).unwrap();

        let job = Job::new("c")
            .input(Some(input))
            .output(Some(output.clone()))
            .render(RenderConfig::new().trailing_comma(true));
        run(&job).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "var c = []byte{\n\t0xca, 0xfe,\n}\n"
        );
    }

    #[test]
    fn test_job_builder() {
        let job = Job::new("name")
            .input(Some(PathBuf::from("in.bin")))
            .package(Some(String::new()));

        assert_eq!(job.identifier, "name");
        assert_eq!(job.input, Input::File(PathBuf::from("in.bin")));
        assert_eq!(job.output, Output::Stdout);
        assert_eq!(job.package, None);
        assert_eq!(job.render, RenderConfig::default());
    }
}
