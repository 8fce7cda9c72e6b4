//! Session settings.

use std::path::PathBuf;

use dmscript_profile::Profile;

/// Settings for a [`Session`](crate::Session).
#[non_exhaustive]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Echo commands to the dry-run sink instead of submitting them.
    pub dry_run: bool,
    /// Log file named in submission errors.
    pub log_file: Option<PathBuf>,
}

impl SessionConfig {
    /// Settings taken from a profile.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            dry_run: profile.dry_run,
            log_file: profile.log_file.clone(),
        }
    }

    /// Set dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the log file named in errors.
    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = Some(log_file.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_profile_copies_submission_settings() {
        let profile = Profile {
            dry_run: true,
            log_file: Some("run.log".into()),
            ..Profile::default()
        };
        let cfg = SessionConfig::from_profile(&profile);
        assert!(cfg.dry_run);
        assert_eq!(cfg.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn default_submits() {
        assert!(!SessionConfig::default().dry_run);
    }
}
