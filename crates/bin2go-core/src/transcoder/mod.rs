//! Byte-slice literal rendering.
//!
//! [`Transcoder`] turns a byte sequence into a Go declaration of the form
//!
//! ```text
//! var name = []byte{
//! 	0x00, 0x01, 0x02
//! }
//! ```
//!
//! ## Line wrapping
//!
//! A running column counter starts at the indentation width (8 for a tab).
//! Every byte but the last adds [`TOKEN_WIDTH`] after it is written; once the
//! counter reaches the configured width the line is broken and the counter
//! reset. The budget is therefore soft: a line may overshoot it by at most
//! one token.
//!
//! The renderer is written against [`std::fmt::Write`]. Use
//! [`StatsWriter`] to drive it into an [`std::io::Write`] sink.

mod writer;

use std::fmt::Write as FmtWrite;
use std::io;

pub use writer::StatsWriter;

/// Default soft line width budget
pub const DEFAULT_LINE_WIDTH: usize = 78;

/// Default indentation of body lines
pub const DEFAULT_INDENT: &str = "\t";

/// Column count charged for [`DEFAULT_INDENT`]
pub const DEFAULT_INDENT_WIDTH: usize = 8;

/// Column count charged per emitted `0xNN,` token
pub const TOKEN_WIDTH: usize = 6;

/// Presentation settings for rendered literals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Soft line width budget
    pub line_width: usize,
    /// Indentation written at the start of every body line
    pub indent: String,
    /// Column count the indentation is charged as
    pub indent_width: usize,
    /// Write a `,` after the final byte as well
    pub trailing_comma: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            indent: DEFAULT_INDENT.to_string(),
            indent_width: DEFAULT_INDENT_WIDTH,
            trailing_comma: false,
        }
    }
}

impl RenderConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the soft line width budget
    pub fn line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }

    /// Sets the indentation string and the column count it occupies
    pub fn indent(mut self, indent: impl Into<String>, width: usize) -> Self {
        self.indent = indent.into();
        self.indent_width = width;
        self
    }

    /// Sets whether the final byte is followed by a comma
    pub fn trailing_comma(mut self, trailing: bool) -> Self {
        self.trailing_comma = trailing;
        self
    }
}

/// Renders byte sequences as `[]byte` literal declarations
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    config: RenderConfig,
}

impl Transcoder {
    /// Creates a transcoder with the default style
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcoder with a custom style
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Renders the literal declaration into a new string
    pub fn format(&self, bytes: &[u8], identifier: &str) -> String {
        let mut output = String::with_capacity(self.estimate_len(bytes.len(), identifier));
        self.write_to(&mut output, bytes, identifier)
            .expect("String write cannot fail");
        output
    }

    /// Renders the optional package clause followed by the literal declaration
    pub fn format_document(&self, bytes: &[u8], identifier: &str, package: Option<&str>) -> String {
        let mut output = String::with_capacity(self.estimate_len(bytes.len(), identifier));
        self.write_document(&mut output, bytes, identifier, package)
            .expect("String write cannot fail");
        output
    }

    /// Writes the optional package clause followed by the literal declaration
    ///
    /// An empty package name is treated the same as `None`.
    pub fn write_document(
        &self,
        w: &mut impl FmtWrite,
        bytes: &[u8],
        identifier: &str,
        package: Option<&str>,
    ) -> std::fmt::Result {
        if let Some(name) = package.filter(|name| !name.is_empty()) {
            writeln!(w, "package {}\n", name)?;
        }
        self.write_to(w, bytes, identifier)
    }

    /// Streams the literal declaration into an I/O sink
    pub fn write_literal<W: io::Write>(&self, sink: W, bytes: &[u8], identifier: &str) -> io::Result<()> {
        let mut writer = StatsWriter::new(sink);
        let rendered = self.write_to(&mut writer, bytes, identifier);
        writer.check(rendered)
    }

    /// Streams the optional package clause and the literal declaration into
    /// a counting writer, surfacing the sink's I/O error on failure
    pub fn stream_document<W: io::Write>(
        &self,
        writer: &mut StatsWriter<W>,
        bytes: &[u8],
        identifier: &str,
        package: Option<&str>,
    ) -> io::Result<()> {
        let rendered = self.write_document(writer, bytes, identifier, package);
        writer.check(rendered)
    }

    /// Writes the literal declaration
    pub fn write_to(&self, w: &mut impl FmtWrite, bytes: &[u8], identifier: &str) -> std::fmt::Result {
        let indent = self.config.indent.as_str();
        write!(w, "var {} = []byte{{\n{}", identifier, indent)?;

        let last = bytes.len().saturating_sub(1);
        let mut column = self.config.indent_width;

        for (i, byte) in bytes.iter().enumerate() {
            write!(w, "0x{:02x}", byte)?;

            if i == last {
                if self.config.trailing_comma {
                    w.write_char(',')?;
                }
                break;
            }

            w.write_char(',')?;
            column += TOKEN_WIDTH;

            if column >= self.config.line_width {
                w.write_char('\n')?;
                w.write_str(indent)?;
                column = self.config.indent_width;
            } else {
                w.write_char(' ')?;
            }
        }

        w.write_str("\n}\n")
    }

    fn estimate_len(&self, count: usize, identifier: &str) -> usize {
        let budget = self.config.line_width.saturating_sub(self.config.indent_width);
        let per_line = budget.div_ceil(TOKEN_WIDTH).max(1);
        let lines = count / per_line + 1;
        32 + identifier.len() + count * TOKEN_WIDTH + lines * self.config.indent.len()
    }
}

/// Renders `bytes` with the default style
pub fn format(bytes: &[u8], identifier: &str) -> String {
    Transcoder::new().format(bytes, identifier)
}

/// Renders `bytes` with the default style and a custom line width budget
pub fn format_with_width(bytes: &[u8], identifier: &str, line_width: usize) -> String {
    Transcoder::with_config(RenderConfig::new().line_width(line_width)).format(bytes, identifier)
}
