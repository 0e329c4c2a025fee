//! Route argument vectors to named commands or arity-based default handlers.
//!
//! `argroute` is a small dispatcher an application embeds to decide which
//! piece of code handles a list of textual arguments. It does no flag parsing
//! and no type coercion: arguments are opaque strings.
//!
//! # Features
//!
//! - **Named commands**: the first argument selects a command, which receives
//!   the remaining arguments
//! - **Default handlers**: when no name matches, the total argument count
//!   selects a handler, which receives every argument
//! - **Help listing**: plain text, or JSON/YAML/XML/CSV via [`ListFormat`]
//! - **Process shim**: [`Dispatcher::execute_process_args`] reads `argv`,
//!   reports errors on stderr and exits non-zero
//!
//! # Routing
//!
//! ```text
//! ["greet", "world"]  → named command "greet" gets ["world"]
//! ["a", "b"]          → default handler for 2 gets ["a", "b"]
//! ["x"]               → DispatchError::NoHandler { arg_count: 1 }
//! []                  → DispatchError::NoArguments
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use argroute::Dispatcher;
//!
//! let dispatcher = Dispatcher::builder()
//!     .command("greet", "Say hello", |args: &[String]| {
//!         println!("Hello, {}!", args.join(" "));
//!     })?
//!     .named_default_handler(1, "show", "Show a file", |args: &[String]| {
//!         println!("showing {}", args[0]);
//!     })
//!     .build();
//!
//! dispatcher.execute_process_args();
//! # Ok::<(), argroute::RegistrationError>(())
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events (registration and routing at `debug`,
//! failed process dispatch at `warn`) and never installs a subscriber.

mod action;
mod builder;
mod dispatch;
mod error;
mod listing;
mod output;
mod process;
mod serialize;

pub use action::{Action, ActionRef, FnAction};

pub use builder::{DispatchConfig, DispatcherBuilder, DEFAULT_EXIT_CODE};

pub use dispatch::{DefaultHandler, Dispatched, Dispatcher, NamedCommand};

pub use error::{DispatchError, RegistrationError};

pub use listing::{
    CommandEntry, CommandListing, DefaultEntry, ListingRow, COMMANDS_HEADER, DEFAULTS_HEADER,
};

pub use output::{HelpSink, ListFormat};

pub use process::process_args;

pub use serialize::{serialize_listing, to_csv, to_json, to_xml, to_yaml, SerializeError};
