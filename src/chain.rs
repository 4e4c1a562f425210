//! Command chains and their executor.
//!
//! A [`CommandChain`] is the flat list of tmux invocations compiled from a
//! session config. Running it is all-or-nothing in one direction only: the
//! first invocation that fails stops the chain, and whatever the earlier
//! invocations did to the tmux server stays done. Nothing is rolled back.
//!
//! Invocations run one at a time with no timeout; a hung tmux call blocks
//! the whole chain.

use crate::error::ExecError;
use crate::tmux::{Invocation, Runner};

/// Ordered tmux invocations for one session build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandChain {
    invocations: Vec<Invocation>,
    /// Log each invocation before running it.
    pub debug: bool,
}

impl CommandChain {
    pub fn new(debug: bool) -> Self {
        Self {
            invocations: Vec::new(),
            debug,
        }
    }

    pub fn push(&mut self, invocation: Invocation) {
        self.invocations.push(invocation);
    }

    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    /// Run every invocation in order, stopping at the first failure.
    ///
    /// Consumes the chain; a chain is run at most once.
    ///
    /// # Errors
    ///
    /// - [`ExecError::Spawn`] if an invocation could not be started
    /// - [`ExecError::Failed`] if an invocation exited non-zero
    pub fn run<R: Runner>(self, runner: &mut R) -> Result<(), ExecError> {
        let total = self.invocations.len();
        for (i, invocation) in self.invocations.into_iter().enumerate() {
            if self.debug {
                tracing::info!(step = i + 1, total, "{}", invocation);
            }

            let outcome = match runner.run(&invocation) {
                Ok(outcome) => outcome,
                Err(source) => return Err(ExecError::Spawn { invocation, source }),
            };

            if !outcome.success() {
                tracing::error!(
                    command = %invocation,
                    status = ?outcome.status,
                    stderr = %outcome.stderr.trim(),
                    "invocation failed, aborting chain"
                );
                return Err(ExecError::Failed {
                    invocation,
                    status: outcome.status,
                    stderr: outcome.stderr,
                });
            }
        }
        Ok(())
    }
}

impl Extend<Invocation> for CommandChain {
    fn extend<T: IntoIterator<Item = Invocation>>(&mut self, iter: T) {
        self.invocations.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Reply, ScriptedRunner};
    use crate::tmux;
    use tracing_test::traced_test;

    fn five_step_chain(debug: bool) -> CommandChain {
        let mut chain = CommandChain::new(debug);
        for i in 1..=5 {
            chain.push(tmux::select_window(&format!("proj:{}", i)));
        }
        chain
    }

    #[test]
    fn test_runs_everything_in_order() {
        let mut runner = ScriptedRunner::new();
        let chain = five_step_chain(false);
        let expected = chain.invocations().to_vec();

        chain.run(&mut runner).unwrap();

        assert_eq!(runner.calls, expected);
    }

    #[test]
    fn test_aborts_on_first_failure() {
        let mut runner = ScriptedRunner::with_replies([
            Reply::ok(),
            Reply::ok(),
            Reply::fail(1, "can't find window: 3"),
        ]);

        let err = five_step_chain(true).run(&mut runner).unwrap_err();

        assert_eq!(runner.calls.len(), 3);
        assert_eq!(err.invocation(), &tmux::select_window("proj:3"));
        match err {
            ExecError::Failed { status, stderr, .. } => {
                assert_eq!(status, Some(1));
                assert_eq!(stderr, "can't find window: 3");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    #[traced_test]
    fn test_debug_logs_each_invocation_before_running() {
        let mut runner = ScriptedRunner::with_replies([Reply::ok(), Reply::fail(1, "boom")]);

        let _ = five_step_chain(true).run(&mut runner);

        assert!(logs_contain("tmux select-window -t proj:1"));
        assert!(logs_contain("tmux select-window -t proj:2"));
        assert!(!logs_contain("tmux select-window -t proj:3"));
    }

    #[test]
    #[traced_test]
    fn test_quiet_without_debug() {
        let mut runner = ScriptedRunner::new();

        five_step_chain(false).run(&mut runner).unwrap();

        assert!(!logs_contain("select-window"));
    }

    #[test]
    fn test_spawn_error_stops_chain() {
        let mut runner =
            ScriptedRunner::with_replies([Reply::SpawnError(std::io::ErrorKind::NotFound)]);

        let err = five_step_chain(false).run(&mut runner).unwrap_err();

        assert_eq!(runner.calls.len(), 1);
        assert!(matches!(err, ExecError::Spawn { .. }));
    }

    #[test]
    fn test_empty_chain_succeeds() {
        let mut runner = ScriptedRunner::new();
        assert!(CommandChain::new(false).run(&mut runner).is_ok());
        assert!(runner.calls.is_empty());
    }
}
