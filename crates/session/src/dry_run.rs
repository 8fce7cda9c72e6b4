use std::io::{self, Write};

use crate::{Submit, SubmitError};

/// Number of echoed commands a [`DryRun`] keeps unless told otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Writes each command on its own line instead of running it.
///
/// The most recent commands, up to the history limit, are also kept in
/// [`DryRun::history`].
#[derive(Debug)]
pub struct DryRun<W: Write> {
    out: W,
    history: Vec<String>,
    limit: usize,
}

impl DryRun<io::Sink> {
    /// A dry-run sink that only records history.
    pub fn silent() -> Self {
        Self::new(io::sink())
    }
}

impl<W: Write> DryRun<W> {
    /// Echo commands to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            history: Vec::new(),
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Keep at most `limit` commands; `0` keeps none.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        let excess = self.history.len().saturating_sub(limit);
        self.history.drain(..excess);
        self
    }

    /// Most recent commands, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Submit for DryRun<W> {
    fn submit(&mut self, command: &str) -> Result<(), SubmitError> {
        writeln!(self.out, "{command}")
            .and_then(|()| self.out.flush())
            .map_err(SubmitError::WriteFailed)?;
        if self.limit == 0 {
            return Ok(());
        }
        if self.history.len() >= self.limit {
            let excess = self.history.len() + 1 - self.limit;
            self.history.drain(..excess);
        }
        self.history.push(command.to_string());
        Ok(())
    }
}
