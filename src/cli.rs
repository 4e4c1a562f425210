//! Command-line interface for muxsmith.
//!
//! Parses arguments using clap and provides the [`Cli`] struct containing
//! all user-specified options.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io::Write;

/// Command-line arguments for muxsmith.
///
/// # Examples
///
/// ```bash
/// # Create a config from the starter template and open it in $EDITOR
/// muxsmith new myproject
///
/// # Build the session (or attach if it is already running)
/// muxsmith myproject
///
/// # Kill the session the current client is attached to
/// muxsmith stop
///
/// # Install bash completions
/// muxsmith completions bash > ~/.local/share/bash-completion/completions/muxsmith
/// ```
#[derive(Parser, Debug)]
#[command(name = "muxsmith")]
#[command(version)]
#[command(about = "Tmux session manager - build sessions from config")]
#[command(long_about = "Muxsmith builds tmux sessions, windows and panes from TOML configs\n\
    stored in ~/.config/muxsmith, one file per session.")]
pub struct Cli {
    /// Log every tmux command before running it.
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config to start when no subcommand is given.
    #[arg(value_name = "CONFIG")]
    pub name: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a new config and open it in $EDITOR.
    New {
        #[arg(value_name = "CONFIG")]
        name: String,
    },
    /// Open an existing config in $EDITOR.
    Edit {
        #[arg(value_name = "CONFIG")]
        name: String,
    },
    /// Delete a config.
    #[command(alias = "remove")]
    Delete {
        #[arg(value_name = "CONFIG")]
        name: String,
    },
    /// Start a tmux session from a config.
    Start {
        #[arg(value_name = "CONFIG")]
        name: String,
    },
    /// Kill a tmux session (the current one if no name is given).
    Stop {
        #[arg(value_name = "SESSION")]
        name: Option<String>,
    },
    /// List all configs.
    #[command(alias = "ls")]
    List,
    /// Print a shell completion script.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// The subcommand to run, with a bare config name meaning `start`.
    ///
    /// Returns `None` when there is nothing to do and help should be shown.
    pub fn action(&self) -> Option<Command> {
        match (&self.command, &self.name) {
            (Some(command), _) => Some(command.clone()),
            (None, Some(name)) => Some(Command::Start { name: name.clone() }),
            (None, None) => None,
        }
    }
}

/// Write the completion script for `shell` to `out`.
///
/// Config and session names complete from `muxsmith list`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "muxsmith", out);
    if shell == Shell::Bash {
        // Static scripts cannot know stored configs; wrap the generated
        // function so positional words complete from the store.
        let _ = out.write_all(BASH_CONFIG_COMPLETION.as_bytes());
    }
}

const BASH_CONFIG_COMPLETION: &str = r#"
_muxsmith_configs() {
    local cur="${COMP_WORDS[COMP_CWORD]}"
    case "${COMP_WORDS[1]}" in
        edit|delete|remove|start|stop)
            if [[ ${COMP_CWORD} -eq 2 ]]; then
                COMPREPLY=( $(compgen -W "$(muxsmith list 2>/dev/null)" -- "${cur}") )
                return 0
            fi
            ;;
    esac
    _muxsmith "$@"
}
complete -F _muxsmith_configs -o bashdefault -o default muxsmith
"#;
