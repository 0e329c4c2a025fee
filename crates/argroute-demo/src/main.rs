//! A small greeter built on argroute.
//!
//! clap handles the demo's own flags; everything after them is handed to the
//! dispatcher untouched:
//!
//! ```text
//! argroute-demo greet ana bo     → Hello, ana! / Hello, bo!
//! argroute-demo notes.txt        → showing notes.txt       (default for 1 arg)
//! argroute-demo left right       → left and right          (default for 2 args)
//! argroute-demo --format json help
//! ```

use anyhow::Result;
use argroute::{Dispatcher, ListFormat};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the `-v` log level.
const LOG_ENV: &str = "ARGROUTE_LOG";

#[derive(Debug, Parser)]
#[command(name = "argroute-demo", version, about = "Greets people, shows things")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Format for the `help` command listing
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Command name and arguments, or free-form arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
    Xml,
    Csv,
}

impl From<Format> for ListFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ListFormat::Text,
            Format::Json => ListFormat::Json,
            Format::Yaml => ListFormat::Yaml,
            Format::Xml => ListFormat::Xml,
            Format::Csv => ListFormat::Csv,
        }
    }
}

/// Maps a `-v` count to a tracing directive.
fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .with_writer(std::io::stderr)
        .try_init();
}

fn greet(args: &[String]) {
    if args.is_empty() {
        println!("Hello, world!");
    }
    for who in args {
        println!("Hello, {}!", who);
    }
}

fn build_dispatcher(format: ListFormat) -> Result<Dispatcher> {
    let mut dispatcher = Dispatcher::builder()
        .command("greet", "Say hello to someone", greet)?
        .command("echo", "Print the arguments", |args: &[String]| {
            println!("{}", args.join(" "));
        })?
        .command("help", "List the available commands", |_args: &[String]| {})?
        .named_default_handler(1, "show", "Show a single item", |args: &[String]| {
            println!("showing {}", args[0]);
        })
        .default_handler(2, |args: &[String]| {
            println!("{} and {}", args[0], args[1]);
        })
        .help_format(format)
        .build();

    // `help` lists a snapshot taken once everything else is registered.
    let catalog = dispatcher.clone();
    dispatcher.register_named_command(
        "help",
        "List the available commands",
        move |_args: &[String]| {
            if let Err(err) = catalog.list_commands() {
                tracing::warn!(error = %err, "failed to list commands");
            }
        },
    )?;

    Ok(dispatcher)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!(?cli, "parsed demo flags");

    let dispatcher = build_dispatcher(cli.format.into())?;
    dispatcher.execute(cli.args);
    Ok(())
}
