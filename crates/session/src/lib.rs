//! Command submission for dmscript.
//!
//! A [`Session`] wraps a [`Submit`] implementation owned by the caller. It
//! logs every command, submits it exactly once, and turns a failure into a
//! [`SessionError`] carrying the literal command. Nothing is retried: the
//! application's commands are not idempotent.
mod config;
mod dry_run;
mod error;
mod script;

pub use config::SessionConfig;
pub use dry_run::{DEFAULT_HISTORY_LIMIT, DryRun};
pub use error::{SessionError, SubmitError};
pub use script::ScriptFile;

use std::io::Write;

// ── Traits ──────────────────────────────────────────────────────────────

/// Hand a finished command string to the application.
pub trait Submit {
    /// Run one command.
    fn submit(&mut self, command: &str) -> Result<(), SubmitError>;
}

impl<S: Submit + ?Sized> Submit for Box<S> {
    fn submit(&mut self, command: &str) -> Result<(), SubmitError> {
        (**self).submit(command)
    }
}

// ── Session ─────────────────────────────────────────────────────────────

/// A caller-owned handle that submits commands.
pub struct Session<S: Submit> {
    submitter: S,
    config: SessionConfig,
    echo: DryRun<Box<dyn Write>>,
    submitted: usize,
}

impl<S: Submit> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("submitted", &self.submitted)
            .field("echoed", &self.echo.history().len())
            .finish_non_exhaustive()
    }
}

impl<S: Submit> Session<S> {
    /// A session over `submitter`.
    ///
    /// In dry-run mode commands are recorded but not echoed anywhere until
    /// [`Session::with_echo`] supplies a writer.
    pub fn new(submitter: S, config: SessionConfig) -> Self {
        Self {
            submitter,
            config,
            echo: DryRun::new(Box::new(std::io::sink())),
            submitted: 0,
        }
    }

    /// Echo dry-run commands to `out`.
    pub fn with_echo(mut self, out: impl Write + 'static) -> Self {
        self.echo = DryRun::new(Box::new(out));
        self
    }

    /// Submit one command.
    ///
    /// In dry-run mode the command is echoed instead.
    pub fn run(&mut self, command: &str) -> Result<(), SessionError> {
        if self.config.dry_run {
            tracing::info!(command, "dry run");
            return self.echo.submit(command).map_err(SessionError::EchoFailed);
        }

        tracing::info!(command, "submitting command");
        match self.submitter.submit(command) {
            Ok(()) => {
                self.submitted += 1;
                Ok(())
            }
            Err(source) => {
                tracing::error!(command, error = %source, "command failed");
                Err(SessionError::SubmissionFailed {
                    command: command.to_string(),
                    log_file: self.config.log_file.clone(),
                    source,
                })
            }
        }
    }

    /// Submit commands in order, stopping at the first failure.
    ///
    /// Returns how many commands ran.
    pub fn run_all<I>(&mut self, commands: I) -> Result<usize, SessionError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut count = 0;
        for command in commands {
            self.run(command.as_ref())?;
            count += 1;
        }
        Ok(count)
    }

    /// Number of commands successfully submitted (dry-run echoes excluded).
    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Most recent commands echoed in dry-run mode, up to
    /// [`DEFAULT_HISTORY_LIMIT`].
    pub fn dry_run_history(&self) -> &[String] {
        self.echo.history()
    }

    /// The session settings.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The wrapped submitter.
    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Consume the session and return the submitter.
    pub fn into_inner(self) -> S {
        self.submitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockSubmitter {
        sent: Vec<String>,
        fail_on: Option<usize>,
    }

    impl MockSubmitter {
        fn new(fail_on: Option<usize>) -> Self {
            Self {
                sent: Vec::new(),
                fail_on,
            }
        }
    }

    impl Submit for MockSubmitter {
        fn submit(&mut self, command: &str) -> Result<(), SubmitError> {
            if Some(self.sent.len()) == self.fail_on {
                return Err(SubmitError::Rejected {
                    message: "mock error".into(),
                });
            }
            self.sent.push(command.to_string());
            Ok(())
        }
    }

    #[test]
    fn run_submits_once() {
        let mut session = Session::new(MockSubmitter::new(None), SessionConfig::default());
        session.run("COPY &IN=A &OUT=B").unwrap();
        assert_eq!(session.submitted(), 1);
        assert_eq!(session.into_inner().sent, ["COPY &IN=A &OUT=B"]);
    }

    #[test]
    fn failure_carries_command_and_log() {
        let config = SessionConfig::default().with_log_file("dms.log");
        let mut session = Session::new(MockSubmitter::new(Some(0)), config);
        let err = session.run("COPY &IN=A").unwrap_err();
        match err {
            SessionError::SubmissionFailed {
                command, log_file, ..
            } => {
                assert_eq!(command, "COPY &IN=A");
                assert_eq!(log_file, Some("dms.log".into()));
            }
            other => panic!("expected SubmissionFailed, got {other:?}"),
        }
        assert_eq!(session.submitted(), 0);
    }

    #[test]
    fn failure_is_not_retried() {
        let mut session = Session::new(MockSubmitter::new(Some(1)), SessionConfig::default());
        let result = session.run_all(["ONE", "TWO", "THREE"]);
        assert!(result.is_err());
        assert_eq!(session.submitter().sent, ["ONE"]);
    }

    #[test]
    fn run_all_counts() {
        let mut session = Session::new(MockSubmitter::new(None), SessionConfig::default());
        let n = session
            .run_all(vec!["A".to_string(), "B".to_string()])
            .unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn dry_run_bypasses_submitter() {
        let config = SessionConfig::default().with_dry_run(true);
        let mut session = Session::new(MockSubmitter::new(Some(0)), config);
        session.run("COPY &IN=A").unwrap();
        assert_eq!(session.dry_run_history(), ["COPY &IN=A"]);
        assert_eq!(session.submitted(), 0);
        assert!(session.submitter().sent.is_empty());
    }

    #[test]
    fn boxed_submitter() {
        let boxed: Box<dyn Submit> = Box::new(DryRun::silent());
        let mut session = Session::new(boxed, SessionConfig::default());
        session.run("HELP").unwrap();
        assert_eq!(session.submitted(), 1);
    }
}
