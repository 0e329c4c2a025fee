//! Error types for registration and dispatch.
//!
//! [`DispatchError`] is the only failure [`Dispatcher::run`](crate::Dispatcher::run)
//! produces. Its `Display` strings are stable tokens that embedding
//! applications may match on, so they must not be reworded.

use thiserror::Error;

/// Errors returned by [`Dispatcher::run`](crate::Dispatcher::run).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// The argument vector was empty.
    #[error("no arguments provided")]
    NoArguments,

    /// No named command matched the first argument and no default handler
    /// is registered for the observed argument count.
    #[error("no command or default handler for {arg_count} arguments")]
    NoHandler {
        /// Length of the full argument vector that was dispatched.
        arg_count: usize,
    },
}

impl DispatchError {
    /// Returns the observed argument count for [`DispatchError::NoHandler`].
    pub fn arg_count(&self) -> Option<usize> {
        match self {
            DispatchError::NoHandler { arg_count } => Some(*arg_count),
            DispatchError::NoArguments => None,
        }
    }
}

/// Errors raised while registering commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Named commands are looked up by the first argument and must have a name.
    #[error("command name must not be empty")]
    EmptyName,
}
