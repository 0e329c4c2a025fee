//! Dispatcher configuration and builder.
//!
//! [`DispatchConfig`] holds the few policy knobs the dispatcher has.
//! [`DispatcherBuilder`] chains registration and configuration:
//!
//! ```rust
//! use argroute::{Dispatcher, ListFormat};
//!
//! let dispatcher = Dispatcher::builder()
//!     .command("list", "List items", |_args: &[String]| {})?
//!     .named_default_handler(1, "show", "Show one item", |_args: &[String]| {})
//!     .help_format(ListFormat::Yaml)
//!     .build();
//!
//! assert!(dispatcher.has_command("list"));
//! # Ok::<(), argroute::RegistrationError>(())
//! ```

use std::num::NonZeroI32;

use crate::action::ActionRef;
use crate::dispatch::Dispatcher;
use crate::error::RegistrationError;
use crate::output::{HelpSink, ListFormat};

/// Exit status used when dispatch fails and no other code is configured.
pub const DEFAULT_EXIT_CODE: NonZeroI32 = match NonZeroI32::new(1) {
    Some(code) => code,
    None => unreachable!(),
};

/// Dispatcher policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Route an empty argument vector to the default handler for 0 arguments,
    /// when one exists, instead of failing with `NoArguments`.
    pub empty_uses_zero_arity: bool,
    /// Exit status for failed dispatches in [`Dispatcher::execute`].
    pub exit_code: NonZeroI32,
    /// Format used by [`Dispatcher::list_commands`].
    pub help_format: ListFormat,
    /// Destination used by [`Dispatcher::list_commands`].
    pub help_sink: HelpSink,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            empty_uses_zero_arity: false,
            exit_code: DEFAULT_EXIT_CODE,
            help_format: ListFormat::default(),
            help_sink: HelpSink::default(),
        }
    }
}

/// Builder for [`Dispatcher`].
#[derive(Debug, Default)]
pub struct DispatcherBuilder {
    dispatcher: Dispatcher,
}

impl DispatcherBuilder {
    /// Creates a builder for an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a closure as a named command.
    pub fn command<F>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        action: F,
    ) -> Result<Self, RegistrationError>
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.dispatcher.register_named_command(name, description, action)?;
        Ok(self)
    }

    /// Registers a shared action as a named command.
    pub fn command_action(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        action: ActionRef,
    ) -> Result<Self, RegistrationError> {
        self.dispatcher.register_named_action(name, description, action)?;
        Ok(self)
    }

    /// Registers an anonymous default handler for `arg_count` arguments.
    pub fn default_handler<F>(mut self, arg_count: usize, action: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.dispatcher.register_default_handler(arg_count, action);
        self
    }

    /// Registers an advertised default handler for `arg_count` arguments.
    pub fn named_default_handler<F>(
        mut self,
        arg_count: usize,
        name: impl Into<String>,
        description: impl Into<String>,
        action: F,
    ) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.dispatcher.register_named_default_handler(arg_count, name, description, action);
        self
    }

    /// Registers a shared action as the default handler for `arg_count` arguments.
    pub fn default_action(
        mut self,
        arg_count: usize,
        name: Option<String>,
        description: Option<String>,
        action: ActionRef,
    ) -> Self {
        self.dispatcher.register_default_action(arg_count, name, description, action);
        self
    }

    /// Routes an empty argument vector to the 0-argument default handler.
    pub fn empty_uses_zero_arity(mut self, enabled: bool) -> Self {
        self.dispatcher.config_mut().empty_uses_zero_arity = enabled;
        self
    }

    /// Sets the exit status used when dispatch fails.
    ///
    /// A failed dispatch never reports success: 0 falls back to
    /// [`DEFAULT_EXIT_CODE`].
    pub fn exit_code(mut self, code: i32) -> Self {
        let code = NonZeroI32::new(code).unwrap_or_else(|| {
            tracing::warn!(fallback = %DEFAULT_EXIT_CODE, "ignoring exit code 0");
            DEFAULT_EXIT_CODE
        });
        self.dispatcher.config_mut().exit_code = code;
        self
    }

    /// Sets the format used by `list_commands`.
    pub fn help_format(mut self, format: ListFormat) -> Self {
        self.dispatcher.config_mut().help_format = format;
        self
    }

    /// Sets the destination used by `list_commands`.
    pub fn help_sink(mut self, sink: HelpSink) -> Self {
        self.dispatcher.config_mut().help_sink = sink;
        self
    }

    /// Finishes the dispatcher.
    pub fn build(self) -> Dispatcher {
        self.dispatcher
    }
}
