//! Process integration.
//!
//! This is the only part of the crate that touches process-global state: it
//! reads the process argument vector, writes failures to standard error and
//! terminates with a non-zero status. Everything here is a thin shim over
//! [`Dispatcher::run`]; applications that want their own policy can call
//! [`Dispatcher::execute_to`] and decide what to do with the status.

use std::io::{self, Write};

use crate::dispatch::Dispatcher;

/// Returns the process arguments without the program name.
///
/// Arguments that are not valid UTF-8 are converted lossily.
pub fn process_args() -> Vec<String> {
    std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

impl Dispatcher {
    /// Dispatches `args` and reports a failure to `sink`.
    ///
    /// Returns 0 on success, or the configured exit code after writing the
    /// error message and a newline to `sink`. The configured code is never 0,
    /// and a failure to write to `sink` does not change it.
    pub fn execute_to<I, S, W>(&self, args: I, sink: &mut W) -> i32
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        W: Write,
    {
        match self.run_from(args) {
            Ok(_) => 0,
            Err(err) => {
                tracing::warn!(error = %err, "dispatch failed");
                let _ = writeln!(sink, "{}", err);
                let _ = sink.flush();
                self.config().exit_code.get()
            }
        }
    }

    /// Dispatches `args`, exiting the process if dispatch fails.
    ///
    /// On failure the error message goes to standard error and the process
    /// exits with the configured exit code. On success this returns normally.
    pub fn execute<I, S>(&self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let code = self.execute_to(args, &mut io::stderr());
        if code != 0 {
            std::process::exit(code);
        }
    }

    /// Dispatches the process arguments (minus the program name), exiting the
    /// process if dispatch fails.
    pub fn execute_process_args(&self) {
        self.execute(process_args());
    }
}
