//! Muxsmith CLI entry point.
//!
//! This binary provides the `muxsmith` command for building tmux sessions
//! from stored TOML configs.

use clap::{CommandFactory, Parser};
use muxsmith::cli::{Cli, Command, write_completions};
use muxsmith::config::Config;
use muxsmith::error::Result;
use muxsmith::loader::ConfigStore;
use muxsmith::tmux::SystemRunner;
use muxsmith::{MuxsmithError, editor, session};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the level picked by `--debug`.
fn init_logging(debug: bool) {
    let default = if debug { "muxsmith=debug" } else { "muxsmith=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

/// Main application logic.
fn run(cli: &Cli) -> Result<()> {
    let Some(action) = cli.action() else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Command::Completions { shell } = action {
        write_completions(shell, &mut std::io::stdout());
        return Ok(());
    }

    let store = ConfigStore::open_default()?;

    match action {
        Command::New { name } => {
            if store.exists(&name) {
                return Err(MuxsmithError::ConfigExists(name));
            }
            let path = store.write(&Config::template(&name))?;
            println!("{}", path.display());
            Err(editor::edit(&path))
        }
        Command::Edit { name } => {
            if !store.exists(&name) {
                return Err(MuxsmithError::ConfigNotFound(name));
            }
            Err(editor::edit(&store.path(&name)))
        }
        Command::Delete { name } => store.delete(&name),
        Command::Start { name } => session::start(&store, &name, &home_dir()?, cli.debug),
        Command::Stop { name } => session::stop(&mut SystemRunner, name.as_deref()),
        Command::List => {
            for name in store.list()? {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Completions { .. } => Ok(()),
    }
}

/// Home directory with a trailing slash, for `~/` expansion.
fn home_dir() -> Result<String> {
    let home = dirs::home_dir().ok_or(MuxsmithError::NoConfigDir)?;
    let mut home = home.to_string_lossy().into_owned();
    if !home.ends_with('/') {
        home.push('/');
    }
    Ok(home)
}
