//! Command dispatch logic.
//!
//! The [`Dispatcher`] owns two independent tables:
//!
//! - named commands, keyed by the exact string of the first argument
//! - default handlers, keyed by the total number of arguments
//!
//! [`Dispatcher::run`] consults the named table first. On a hit the command's
//! action receives the arguments after the name. On a miss the whole vector is
//! treated as data and handed to the default handler registered for its
//! length, if there is one.
//!
//! ```text
//! args ──► args[0] is a named command? ──yes──► action(args[1..])
//!                    │ no
//!                    ▼
//!          default handler for args.len()? ──yes──► action(args)
//!                    │ no
//!                    ▼
//!          DispatchError::NoHandler
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use crate::action::{ActionRef, FnAction};
use crate::builder::{DispatchConfig, DispatcherBuilder};
use crate::error::{DispatchError, RegistrationError};
use crate::listing::{CommandEntry, CommandListing, DefaultEntry};

/// A registered named command.
#[derive(Clone)]
pub struct NamedCommand {
    pub name: String,
    pub description: String,
    pub action: ActionRef,
}

/// A registered default handler, selected by argument count.
#[derive(Clone)]
pub struct DefaultHandler {
    pub arg_count: usize,
    pub name: Option<String>,
    pub description: Option<String>,
    pub action: ActionRef,
}

impl fmt::Debug for NamedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedCommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for DefaultHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultHandler")
            .field("arg_count", &self.arg_count)
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// The route a successful [`Dispatcher::run`] took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// A named command ran with the arguments after its name.
    Command(String),
    /// The default handler for this argument count ran with all arguments.
    Default(usize),
}

impl Dispatched {
    /// Returns true if a named command handled the arguments.
    pub fn is_command(&self) -> bool {
        matches!(self, Dispatched::Command(_))
    }

    /// Returns true if a default handler handled the arguments.
    pub fn is_default(&self) -> bool {
        matches!(self, Dispatched::Default(_))
    }

    /// Returns the command name if a named command ran.
    pub fn command(&self) -> Option<&str> {
        match self {
            Dispatched::Command(name) => Some(name.as_str()),
            Dispatched::Default(_) => None,
        }
    }
}

/// Routes argument vectors to named commands or default handlers.
///
/// Register everything first, then dispatch. Registration needs `&mut self`,
/// dispatch only `&self`, so a fully registered dispatcher can be shared
/// behind an `Arc` and run from several threads.
///
/// # Example
///
/// ```rust
/// use argroute::{Dispatched, Dispatcher};
///
/// let mut dispatcher = Dispatcher::new();
/// dispatcher
///     .register_named_command("greet", "Say hello", |args: &[String]| {
///         println!("Hello, {}!", args.join(" "));
///     })
///     .unwrap();
/// dispatcher.register_default_handler(1, |args: &[String]| {
///     println!("showing {}", args[0]);
/// });
///
/// let args = vec!["greet".to_string(), "world".to_string()];
/// assert_eq!(dispatcher.run(&args), Ok(Dispatched::Command("greet".into())));
/// ```
#[derive(Clone, Default)]
pub struct Dispatcher {
    commands: BTreeMap<String, NamedCommand>,
    defaults: BTreeMap<usize, DefaultHandler>,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Creates an empty dispatcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dispatcher with the given configuration.
    pub fn with_config(config: DispatchConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns a builder for chained registration and configuration.
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Returns the dispatcher's configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Returns a mutable reference to the dispatcher's configuration.
    pub fn config_mut(&mut self) -> &mut DispatchConfig {
        &mut self.config
    }

    /// Registers a closure as a named command.
    ///
    /// Re-registering a name replaces the earlier command.
    pub fn register_named_command<F>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        action: F,
    ) -> Result<(), RegistrationError>
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.register_named_action(name, description, FnAction::shared(action))
    }

    /// Registers a shared [`Action`](crate::Action) as a named command.
    pub fn register_named_action(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        action: ActionRef,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }

        let command = NamedCommand {
            name: name.clone(),
            description: description.into(),
            action,
        };
        if self.commands.insert(name.clone(), command).is_some() {
            tracing::debug!(command = %name, "replaced named command");
        } else {
            tracing::debug!(command = %name, "registered named command");
        }
        Ok(())
    }

    /// Registers an anonymous default handler for `arg_count` arguments.
    ///
    /// Anonymous handlers route normally. [`list_commands`](Self::list_commands)
    /// only shows them when some other default handler is advertised.
    pub fn register_default_handler<F>(&mut self, arg_count: usize, action: F)
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.register_default_action(arg_count, None, None, FnAction::shared(action));
    }

    /// Registers a default handler with a name and description for help output.
    pub fn register_named_default_handler<F>(
        &mut self,
        arg_count: usize,
        name: impl Into<String>,
        description: impl Into<String>,
        action: F,
    ) where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.register_default_action(
            arg_count,
            Some(name.into()),
            Some(description.into()),
            FnAction::shared(action),
        );
    }

    /// Registers a shared [`Action`](crate::Action) as the default handler for
    /// `arg_count` arguments.
    ///
    /// Re-registering an argument count replaces the earlier handler.
    pub fn register_default_action(
        &mut self,
        arg_count: usize,
        name: Option<String>,
        description: Option<String>,
        action: ActionRef,
    ) {
        let handler = DefaultHandler {
            arg_count,
            name,
            description,
            action,
        };
        if self.defaults.insert(arg_count, handler).is_some() {
            tracing::debug!(arg_count, "replaced default handler");
        } else {
            tracing::debug!(arg_count, "registered default handler");
        }
    }

    /// Dispatches an argument vector.
    ///
    /// Exactly one action runs on success and none on failure. Errors are
    /// returned, never printed; see [`execute_to`](Self::execute_to) for the
    /// reporting variant.
    pub fn run(&self, args: &[String]) -> Result<Dispatched, DispatchError> {
        tracing::trace!(arg_count = args.len(), "dispatching");

        let Some((head, tail)) = args.split_first() else {
            return self.run_empty();
        };

        if let Some(command) = self.commands.get(head) {
            tracing::debug!(command = %command.name, "routing to named command");
            command.action.call(tail);
            return Ok(Dispatched::Command(command.name.clone()));
        }

        self.run_default(args)
    }

    /// Collects any iterator of strings and dispatches it.
    pub fn run_from<I, S>(&self, args: I) -> Result<Dispatched, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        self.run(&args)
    }

    fn run_empty(&self) -> Result<Dispatched, DispatchError> {
        if self.config.empty_uses_zero_arity && self.defaults.contains_key(&0) {
            return self.run_default(&[]);
        }
        Err(DispatchError::NoArguments)
    }

    fn run_default(&self, args: &[String]) -> Result<Dispatched, DispatchError> {
        let arg_count = args.len();
        match self.defaults.get(&arg_count) {
            Some(handler) => {
                tracing::debug!(arg_count, "routing to default handler");
                handler.action.call(args);
                Ok(Dispatched::Default(arg_count))
            }
            None => Err(DispatchError::NoHandler { arg_count }),
        }
    }

    /// Returns true if a named command is registered under `name`.
    pub fn has_command(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns true if a default handler is registered for `arg_count`.
    pub fn has_default_handler(&self, arg_count: usize) -> bool {
        self.defaults.contains_key(&arg_count)
    }

    /// Returns the registered command names in lexicographic order.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Returns the registered default handler arities in ascending order.
    pub fn default_arities(&self) -> impl Iterator<Item = usize> + '_ {
        self.defaults.keys().copied()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.defaults.is_empty()
    }

    /// Returns a snapshot of the registered surface for help output.
    pub fn listing(&self) -> CommandListing {
        CommandListing {
            commands: self
                .commands
                .values()
                .map(|c| CommandEntry {
                    name: c.name.clone(),
                    description: c.description.clone(),
                })
                .collect(),
            defaults: self
                .defaults
                .values()
                .map(|d| DefaultEntry {
                    arg_count: d.arg_count,
                    name: d.name.clone(),
                    description: d.description.clone(),
                })
                .collect(),
        }
    }

    /// Writes the text listing to `w`.
    pub fn write_commands<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write!(w, "{}", self.listing())
    }

    /// Writes the listing to the configured help sink in the configured format.
    ///
    /// Defaults to plain text on standard output.
    pub fn list_commands(&self) -> io::Result<()> {
        let rendered = self
            .listing()
            .render(self.config.help_format)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.config.help_sink.write_text(&rendered)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("defaults", &self.defaults.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<(&'static str, Vec<String>)>>>;

    fn recorder(
        calls: &Calls,
        label: &'static str,
    ) -> impl Fn(&[String]) + Send + Sync + 'static {
        let calls = calls.clone();
        move |args: &[String]| calls.lock().unwrap().push((label, args.to_vec()))
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_new_dispatcher_is_empty() {
        let dispatcher = Dispatcher::new();
        assert!(dispatcher.is_empty());
        assert_eq!(dispatcher.command_names().count(), 0);
        assert_eq!(dispatcher.default_arities().count(), 0);
    }

    #[test]
    fn test_named_command_gets_tail() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register_named_command("greet", "", recorder(&calls, "greet"))
            .unwrap();

        let result = dispatcher.run(&args(&["greet", "a", "b"]));

        assert_eq!(result, Ok(Dispatched::Command("greet".into())));
        assert_eq!(*calls.lock().unwrap(), vec![("greet", args(&["a", "b"]))]);
    }

    #[test]
    fn test_default_handler_gets_full_vector() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_default_handler(3, recorder(&calls, "three"));

        let result = dispatcher.run(&args(&["x", "y", "z"]));

        assert_eq!(result, Ok(Dispatched::Default(3)));
        assert_eq!(
            *calls.lock().unwrap(),
            vec![("three", args(&["x", "y", "z"]))]
        );
    }

    #[test]
    fn test_no_handler_runs_nothing() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register_named_command("greet", "", recorder(&calls, "greet"))
            .unwrap();
        dispatcher.register_default_handler(1, recorder(&calls, "one"));

        let result = dispatcher.run(&args(&["a", "b"]));

        assert_eq!(result, Err(DispatchError::NoHandler { arg_count: 2 }));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_args_ignore_zero_arity_by_default() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_default_handler(0, recorder(&calls, "zero"));

        assert_eq!(dispatcher.run(&[]), Err(DispatchError::NoArguments));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_args_use_zero_arity_when_enabled() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::with_config(DispatchConfig {
            empty_uses_zero_arity: true,
            ..DispatchConfig::default()
        });
        dispatcher.register_default_handler(0, recorder(&calls, "zero"));

        assert_eq!(dispatcher.run(&[]), Ok(Dispatched::Default(0)));
        assert_eq!(*calls.lock().unwrap(), vec![("zero", vec![])]);
    }

    #[test]
    fn test_empty_args_without_zero_arity_still_fail_when_enabled() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.config_mut().empty_uses_zero_arity = true;

        assert_eq!(dispatcher.run(&[]), Err(DispatchError::NoArguments));
    }

    #[test]
    fn test_numeric_name_wins_over_default() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register_named_command("5", "", recorder(&calls, "five"))
            .unwrap();
        dispatcher.register_default_handler(1, recorder(&calls, "one"));

        let result = dispatcher.run(&args(&["5"]));

        assert_eq!(result, Ok(Dispatched::Command("5".into())));
        assert_eq!(*calls.lock().unwrap(), vec![("five", vec![])]);
    }

    #[test]
    fn test_reregistering_name_replaces_action() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register_named_command("go", "old", recorder(&calls, "old"))
            .unwrap();
        dispatcher
            .register_named_command("go", "new", recorder(&calls, "new"))
            .unwrap();

        dispatcher.run(&args(&["go"])).unwrap();

        assert_eq!(*calls.lock().unwrap(), vec![("new", vec![])]);
        assert_eq!(dispatcher.listing().commands[0].description, "new");
    }

    #[test]
    fn test_reregistering_arity_replaces_handler() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_named_default_handler(1, "old", "", recorder(&calls, "old"));
        dispatcher.register_default_handler(1, recorder(&calls, "new"));

        dispatcher.run(&args(&["x"])).unwrap();

        assert_eq!(*calls.lock().unwrap(), vec![("new", args(&["x"]))]);
        assert!(!dispatcher.listing().has_advertised_defaults());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let mut dispatcher = Dispatcher::new();
        let result = dispatcher.register_named_command("", "nothing", |_args: &[String]| {});

        assert_eq!(result, Err(RegistrationError::EmptyName));
        assert!(dispatcher.is_empty());
    }

    #[test]
    fn test_shared_action_is_kept_alive() {
        let calls = Calls::default();
        let action = FnAction::shared(recorder(&calls, "shared"));

        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register_named_action("a", "", action.clone())
            .unwrap();
        dispatcher.register_default_action(2, None, None, action.clone());

        assert_eq!(Arc::strong_count(&action), 3);

        dispatcher.run(&args(&["a"])).unwrap();
        dispatcher.run(&args(&["p", "q"])).unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![("shared", vec![]), ("shared", args(&["p", "q"]))]
        );
    }

    #[test]
    fn test_run_from_accepts_str_iterators() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_default_handler(2, recorder(&calls, "two"));

        let result = dispatcher.run_from(["a", "b"]);

        assert_eq!(result, Ok(Dispatched::Default(2)));
    }

    #[test]
    fn test_inspection() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register_named_command("beta", "", |_args: &[String]| {})
            .unwrap();
        dispatcher
            .register_named_command("alpha", "", |_args: &[String]| {})
            .unwrap();
        dispatcher.register_default_handler(2, |_args: &[String]| {});
        dispatcher.register_default_handler(0, |_args: &[String]| {});

        assert!(dispatcher.has_command("alpha"));
        assert!(!dispatcher.has_command("gamma"));
        assert!(dispatcher.has_default_handler(0));
        assert!(!dispatcher.has_default_handler(1));
        assert_eq!(
            dispatcher.command_names().collect::<Vec<_>>(),
            vec!["alpha", "beta"]
        );
        assert_eq!(dispatcher.default_arities().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_write_commands_text() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register_named_command("greet", "Say hello", |_args: &[String]| {})
            .unwrap();
        dispatcher.register_named_default_handler(
            1,
            "show",
            "Show an item",
            |_args: &[String]| {},
        );

        let mut out = Vec::new();
        dispatcher.write_commands(&mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            concat!(
                "Available commands:\n",
                "  greet: Say hello\n",
                "Default handlers:\n",
                "  Default for 1 args: show - Show an item\n",
            )
        );
    }

    #[test]
    fn test_list_commands_writes_to_standard_streams() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register_named_command("greet", "Say hello", |_args: &[String]| {})
            .unwrap();

        dispatcher.list_commands().unwrap();

        dispatcher.config_mut().help_format = crate::ListFormat::Json;
        dispatcher.config_mut().help_sink = crate::HelpSink::Stderr;
        dispatcher.list_commands().unwrap();
    }

    #[test]
    fn test_clone_shares_actions_and_config() {
        let calls = Calls::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.config_mut().help_format = crate::ListFormat::Yaml;
        dispatcher
            .register_named_command("greet", "", recorder(&calls, "greet"))
            .unwrap();

        let snapshot = dispatcher.clone();
        dispatcher
            .register_named_command("later", "", |_args: &[String]| {})
            .unwrap();

        assert!(!snapshot.has_command("later"));
        assert_eq!(snapshot.config().help_format, crate::ListFormat::Yaml);
        snapshot.run(&args(&["greet", "x"])).unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![("greet", args(&["x"]))]);
    }

    #[test]
    fn test_dispatched_accessors() {
        let command = Dispatched::Command("go".into());
        assert!(command.is_command());
        assert!(!command.is_default());
        assert_eq!(command.command(), Some("go"));

        let default = Dispatched::Default(2);
        assert!(default.is_default());
        assert_eq!(default.command(), None);
    }

    #[test]
    fn test_debug_lists_keys() {
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register_named_command("greet", "", |_args: &[String]| {})
            .unwrap();
        let debug = format!("{:?}", dispatcher);
        assert!(debug.contains("greet"));
    }
}
