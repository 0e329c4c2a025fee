//! Help listing of the registered surface.
//!
//! [`CommandListing`] is a serializable snapshot of a dispatcher's two
//! tables. It renders either to the fixed text layout:
//!
//! ```text
//! Available commands:
//!   <name>: <description>
//! Default handlers:
//!   Default for <N> args: <name> - <description>
//! ```
//!
//! or to one of the structured [`ListFormat`]s.
//!
//! The `Default handlers:` section is only written when at least one default
//! handler carries a name or a description. When it is written, every default
//! handler gets a line, with missing fields rendered empty.

use serde::Serialize;
use std::fmt;

use crate::serialize::{serialize_listing, SerializeError};
use crate::ListFormat;

/// Header line for the named command section.
pub const COMMANDS_HEADER: &str = "Available commands:";

/// Header line for the default handler section.
pub const DEFAULTS_HEADER: &str = "Default handlers:";

/// A named command as advertised in help output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandEntry {
    pub name: String,
    pub description: String,
}

/// A default handler as advertised in help output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultEntry {
    pub arg_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DefaultEntry {
    /// Returns true if the entry has a name or a description to show.
    pub fn is_advertised(&self) -> bool {
        self.name.is_some() || self.description.is_some()
    }
}

/// Snapshot of everything a dispatcher can route to.
///
/// Commands are ordered by name, default handlers by argument count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename = "listing")]
pub struct CommandListing {
    pub commands: Vec<CommandEntry>,
    pub defaults: Vec<DefaultEntry>,
}

impl CommandListing {
    /// Returns true if any default handler should appear in the text listing.
    pub fn has_advertised_defaults(&self) -> bool {
        self.defaults.iter().any(DefaultEntry::is_advertised)
    }

    /// Renders the listing in the given format.
    pub fn render(&self, format: ListFormat) -> Result<String, SerializeError> {
        match format {
            ListFormat::Text => Ok(self.to_string()),
            structured => serialize_listing(self, structured),
        }
    }

    /// Flattens the listing into uniform rows for tabular formats.
    pub fn rows(&self) -> Vec<ListingRow> {
        let commands = self.commands.iter().map(|c| ListingRow {
            kind: "command",
            key: c.name.clone(),
            name: c.name.clone(),
            description: c.description.clone(),
        });
        let defaults = self.defaults.iter().map(|d| ListingRow {
            kind: "default",
            key: d.arg_count.to_string(),
            name: d.name.clone().unwrap_or_default(),
            description: d.description.clone().unwrap_or_default(),
        });
        commands.chain(defaults).collect()
    }
}

impl fmt::Display for CommandListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", COMMANDS_HEADER)?;
        for cmd in &self.commands {
            writeln!(f, "  {}: {}", cmd.name, cmd.description)?;
        }

        if self.has_advertised_defaults() {
            writeln!(f, "{}", DEFAULTS_HEADER)?;
            for d in &self.defaults {
                writeln!(
                    f,
                    "  Default for {} args: {} - {}",
                    d.arg_count,
                    d.name.as_deref().unwrap_or_default(),
                    d.description.as_deref().unwrap_or_default()
                )?;
            }
        }

        Ok(())
    }
}

/// One flattened line of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    /// `command` or `default`
    pub kind: &'static str,
    /// Command name, or the argument count of a default handler
    pub key: String,
    pub name: String,
    pub description: String,
}

impl ListingRow {
    /// Column names, in the order of [`ListingRow::fields`].
    pub const HEADERS: [&'static str; 4] = ["kind", "key", "name", "description"];

    /// Returns the row's values in column order.
    pub fn fields(&self) -> [&str; 4] {
        [self.kind, &self.key, &self.name, &self.description]
    }
}
