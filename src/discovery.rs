//! Index-base discovery.
//!
//! tmux numbers windows from `base-index` and panes from `pane-base-index`,
//! both user preferences with no safe default. The options can only be read
//! with a session attached to the server, and the session we are about to
//! build does not exist yet, so discovery creates a throwaway session with a
//! random name, reads both options, and kills it again.

use crate::error::{DiscoveryError, DiscoveryStage};
use crate::tmux::{self, Invocation, Runner};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

static TRAILING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)$").expect("valid regex"));

/// Numbering bases of the tmux server.
///
/// Request-scoped: read once per run and passed by value into the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexBases {
    pub window: u32,
    pub pane: u32,
}

impl IndexBases {
    pub fn new(window: u32, pane: u32) -> Self {
        Self { window, pane }
    }
}

/// Name for a disposable session that cannot clash with a user's.
pub fn probe_session_name() -> String {
    format!("muxsmith-probe-{}", Uuid::new_v4())
}

/// Read both index bases from the tmux server.
///
/// Once the disposable session exists it is always killed, whether or not
/// the queries succeed. A failure to kill it after both bases were read is
/// logged and does not fail discovery.
pub fn discover<R: Runner>(runner: &mut R) -> Result<IndexBases, DiscoveryError> {
    discover_with_name(runner, &probe_session_name())
}

/// [`discover`] with a caller-chosen disposable session name.
pub fn discover_with_name<R: Runner>(
    runner: &mut R,
    probe: &str,
) -> Result<IndexBases, DiscoveryError> {
    checked(
        runner,
        &tmux::new_detached_session(probe),
        DiscoveryStage::Create,
    )?;

    let bases = query_bases(runner);
    let teardown = checked(runner, &tmux::kill_session(probe), DiscoveryStage::Teardown);

    let bases = bases?;
    if let Err(err) = teardown {
        tracing::warn!(session = probe, "{}", err);
    }
    tracing::debug!(window = bases.window, pane = bases.pane, "discovered index bases");
    Ok(bases)
}

fn query_bases<R: Runner>(runner: &mut R) -> Result<IndexBases, DiscoveryError> {
    let out = checked(
        runner,
        &tmux::show_global_option("base-index"),
        DiscoveryStage::QueryWindowBase,
    )?;
    let window = parse_base(&out, "base-index")
        .ok_or_else(|| unparsable(DiscoveryStage::ParseWindowBase, &out))?;

    let out = checked(
        runner,
        &tmux::show_global_window_option("pane-base-index"),
        DiscoveryStage::QueryPaneBase,
    )?;
    let pane = parse_base(&out, "pane-base-index")
        .ok_or_else(|| unparsable(DiscoveryStage::ParsePaneBase, &out))?;

    Ok(IndexBases { window, pane })
}

/// Run `invocation`, returning its stdout, or a stage error on failure.
fn checked<R: Runner>(
    runner: &mut R,
    invocation: &Invocation,
    stage: DiscoveryStage,
) -> Result<String, DiscoveryError> {
    let outcome = runner
        .run(invocation)
        .map_err(|e| DiscoveryError::new(stage, format!("`{}`: {}", invocation, e)))?;
    if !outcome.success() {
        return Err(DiscoveryError::new(
            stage,
            format!("`{}` failed: {}", invocation, outcome.stderr.trim()),
        ));
    }
    Ok(outcome.stdout)
}

fn unparsable(stage: DiscoveryStage, output: &str) -> DiscoveryError {
    DiscoveryError::new(stage, format!("no index in option output {:?}", output.trim()))
}

/// Extract the trailing number of the line naming `option`.
///
/// Lines for other options (e.g. `pane-base-index` when asking for
/// `base-index`) are skipped. If no line names the option, the last
/// non-empty line is used.
pub fn parse_base(output: &str, option: &str) -> Option<u32> {
    let lines: Vec<&str> = output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let line = lines
        .iter()
        .find(|l| l.split_whitespace().next() == Some(option))
        .or_else(|| lines.last())?;
    TRAILING_DIGITS
        .captures(line)
        .and_then(|c| c[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedRunner};

    #[test]
    fn test_parse_base() {
        assert_eq!(parse_base("base-index 1\n", "base-index"), Some(1));
        assert_eq!(parse_base("pane-base-index 0", "pane-base-index"), Some(0));
        assert_eq!(parse_base("base-index 10", "base-index"), Some(10));
        assert_eq!(
            parse_base("pane-base-index 1\nbase-index 0\n", "base-index"),
            Some(0)
        );
        assert_eq!(parse_base("base-index", "base-index"), None);
        assert_eq!(parse_base("", "base-index"), None);
        assert_eq!(parse_base("base-index 99999999999", "base-index"), None);
    }

    #[test]
    fn test_probe_names_are_unique() {
        let a = probe_session_name();
        let b = probe_session_name();
        assert!(a.starts_with("muxsmith-probe-"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_discover_reads_both_bases_and_tears_down() {
        let mut runner = ScriptedRunner::with_replies([
            Reply::ok(),
            Reply::stdout("base-index 1\n"),
            Reply::stdout("pane-base-index 1\n"),
            Reply::ok(),
        ]);

        let bases = discover_with_name(&mut runner, "probe").unwrap();

        assert_eq!(bases, IndexBases::new(1, 1));
        assert_eq!(
            runner.calls,
            vec![
                tmux::new_detached_session("probe"),
                tmux::show_global_option("base-index"),
                tmux::show_global_window_option("pane-base-index"),
                tmux::kill_session("probe"),
            ]
        );
    }

    #[test]
    fn test_create_failure_skips_teardown() {
        let mut runner = ScriptedRunner::with_replies([Reply::fail(1, "no server")]);

        let err = discover_with_name(&mut runner, "probe").unwrap_err();

        assert_eq!(err.stage, DiscoveryStage::Create);
        assert_eq!(runner.calls.len(), 1);
    }

    #[test]
    fn test_parse_failure_still_tears_down_probe() {
        let mut runner = ScriptedRunner::with_replies([
            Reply::ok(),
            Reply::stdout("base-index\n"),
            Reply::ok(),
        ]);

        let err = discover_with_name(&mut runner, "probe").unwrap_err();

        assert_eq!(err.stage, DiscoveryStage::ParseWindowBase);
        assert_eq!(runner.subcommands(), ["new-session", "show-options", "kill-session"]);
        assert_eq!(runner.calls[2], tmux::kill_session("probe"));
    }

    #[test]
    fn test_pane_base_parse_failure() {
        let mut runner = ScriptedRunner::with_replies([
            Reply::ok(),
            Reply::stdout("base-index 0\n"),
            Reply::stdout("pane-base-index x\n"),
        ]);

        let err = discover_with_name(&mut runner, "probe").unwrap_err();

        assert_eq!(err.stage, DiscoveryStage::ParsePaneBase);
        assert_eq!(runner.calls.last(), Some(&tmux::kill_session("probe")));
    }

    #[test]
    fn test_teardown_failure_is_not_fatal() {
        let mut runner = ScriptedRunner::with_replies([
            Reply::ok(),
            Reply::stdout("base-index 0\n"),
            Reply::stdout("pane-base-index 1\n"),
            Reply::fail(1, "session not found"),
        ]);

        let bases = discover_with_name(&mut runner, "probe").unwrap();

        assert_eq!(bases, IndexBases::new(0, 1));
    }

    #[test]
    fn test_missing_tmux_is_create_error() {
        let mut runner =
            ScriptedRunner::with_replies([Reply::SpawnError(std::io::ErrorKind::NotFound)]);

        let err = discover(&mut runner).unwrap_err();

        assert_eq!(err.stage, DiscoveryStage::Create);
    }
}
