//! CLI entrypoint for tag writes.

#[path = "tagset/cli.rs"]
mod cli;
#[path = "tagset/commands.rs"]
mod commands;
#[path = "tagset/prompt.rs"]
mod prompt;
#[path = "tagset/style.rs"]
mod style;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    if let Err(err) = run() {
        eprintln!("{}", style::error(format!("Error: {err}")));
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::WARN.as_str()));
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Encode { kind, value, size } => commands::run_encode(kind.into(), &value, size),
        Command::Inspect { value, size } => commands::run_inspect(&value, size),
        Command::Completions { shell } => commands::run_completions(shell),
        Command::Set {
            tag,
            kind,
            value,
            size,
        } => {
            let config = commands::load_config(cli.config, cli.endpoint)?;
            commands::run_set(&config, &tag, kind.into(), &value, size)
        }
        Command::Get { tag } => {
            let config = commands::load_config(cli.config, cli.endpoint)?;
            commands::run_get(&config, &tag)
        }
        Command::Click {
            widget,
            value,
            refresh,
        } => {
            let config = commands::load_config(cli.config, cli.endpoint)?;
            commands::run_click(config, &widget, value.as_deref(), refresh)
        }
        Command::Widgets => {
            let config = commands::load_config(cli.config, cli.endpoint)?;
            commands::run_widgets(&config)
        }
    }
}
