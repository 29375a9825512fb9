//! Bridge from the text renderer to byte sinks.
//!
//! [`StatsWriter`] implements [`std::fmt::Write`] on top of any
//! [`std::io::Write`], counting what passes through and keeping the first
//! I/O error so it can be reported instead of the opaque [`std::fmt::Error`].

use std::fmt;
use std::io;

/// A writer that forwards text to an I/O sink and collects statistics
#[derive(Debug)]
pub struct StatsWriter<W> {
    inner: W,
    bytes_written: usize,
    lines_written: usize,
    error: Option<io::Error>,
}

impl<W: io::Write> StatsWriter<W> {
    /// Wraps an I/O sink
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
            lines_written: 0,
            error: None,
        }
    }

    /// Number of bytes handed to the sink so far
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Number of complete lines handed to the sink so far
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Converts the outcome of a render pass into an I/O result
    ///
    /// A formatting failure is replaced by the I/O error that caused it.
    pub fn check(&mut self, result: fmt::Result) -> io::Result<()> {
        match (result, self.error.take()) {
            (_, Some(err)) => Err(err),
            (Ok(()), None) => Ok(()),
            (Err(_), None) => Err(io::Error::other("formatter error")),
        }
    }

    /// Flushes the underlying sink
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> fmt::Write for StatsWriter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.error.is_some() {
            return Err(fmt::Error);
        }
        match self.inner.write_all(s.as_bytes()) {
            Ok(()) => {
                self.bytes_written += s.len();
                self.lines_written += s.bytes().filter(|&b| b == b'\n').count();
                Ok(())
            }
            Err(err) => {
                self.error = Some(err);
                Err(fmt::Error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    /// Sink that accepts a fixed number of bytes, then fails
    struct ShortSink {
        remaining: usize,
    }

    impl io::Write for ShortSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.remaining == 0 {
                return Err(io::Error::new(io::ErrorKind::WriteZero, "sink full"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_stats_writer_counts() {
        let mut writer = StatsWriter::new(Vec::new());
        writer.write_str("var x\n").unwrap();
        writer.write_str("\t0x00\n}\n").unwrap();

        assert_eq!(writer.bytes_written(), 14);
        assert_eq!(writer.lines_written(), 3);
        assert_eq!(writer.into_inner(), b"var x\n\t0x00\n}\n");
    }

    #[test]
    fn test_stats_writer_keeps_io_error() {
        let mut writer = StatsWriter::new(ShortSink { remaining: 4 });
        let result = writer.write_str("0x00, 0x01");
        assert!(result.is_err());

        // further writes are refused without touching the sink
        assert!(writer.write_str("more").is_err());

        let err = writer.check(result).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        assert_eq!(writer.bytes_written(), 0);
    }

    #[test]
    fn test_check_ok() {
        let mut writer = StatsWriter::new(io::sink());
        let result = writer.write_str("fine");
        assert!(writer.check(result).is_ok());
    }
}
