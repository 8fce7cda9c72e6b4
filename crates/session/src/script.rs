use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Submit, SubmitError};

/// Appends each command to a macro script for the application to run
/// later.
#[derive(Debug)]
pub struct ScriptFile {
    path: PathBuf,
    file: File,
}

impl ScriptFile {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SubmitError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| SubmitError::OpenFailed {
                path: path.clone(),
                source,
            })?;
        Ok(Self { path, file })
    }

    /// The script path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Submit for ScriptFile {
    fn submit(&mut self, command: &str) -> Result<(), SubmitError> {
        writeln!(self.file, "{command}")
            .and_then(|()| self.file.flush())
            .map_err(SubmitError::WriteFailed)
    }
}
