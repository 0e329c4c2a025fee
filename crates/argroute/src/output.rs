//! Help output format and destination.
//!
//! [`ListFormat`] selects how the command listing is rendered, from the
//! fixed plain-text layout to structured serialization.
//!
//! [`HelpSink`] is where [`Dispatcher::list_commands`](crate::Dispatcher::list_commands)
//! writes the rendered listing.

use std::io::Write;

/// Controls how the command listing is rendered.
///
/// # Variants
///
/// - `Text` - The fixed `Available commands:` / `Default handlers:` layout
/// - `Json`, `Yaml`, `Xml`, `Csv` - Serialize the listing directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    /// Plain text listing
    #[default]
    Text,
    /// Serialize the listing as JSON
    Json,
    /// Serialize the listing as YAML
    Yaml,
    /// Serialize the listing as XML
    Xml,
    /// Serialize the listing as flat CSV rows
    Csv,
}

impl ListFormat {
    /// Returns true if this is a structured format (JSON, YAML, XML, CSV).
    pub fn is_structured(&self) -> bool {
        !matches!(self, ListFormat::Text)
    }
}

/// Destination for the rendered command listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpSink {
    /// Write to standard output
    #[default]
    Stdout,
    /// Write to standard error
    Stderr,
}

impl HelpSink {
    /// Writes text content to this destination.
    ///
    /// A trailing newline is added when the content does not end with one.
    pub fn write_text(&self, content: &str) -> std::io::Result<()> {
        match self {
            HelpSink::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                write_terminated(&mut handle, content)
            }
            HelpSink::Stderr => {
                let stderr = std::io::stderr();
                let mut handle = stderr.lock();
                write_terminated(&mut handle, content)
            }
        }
    }
}

fn write_terminated<W: Write>(w: &mut W, content: &str) -> std::io::Result<()> {
    w.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        w.write_all(b"\n")?;
    }
    w.flush()
}
