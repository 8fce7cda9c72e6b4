//! Session profiles for dmscript.
//!
//! A profile carries the per-user settings that shape translation and
//! submission: where the log goes, whether commands are only echoed, the
//! float tolerance of the default-diff filter, extra irregular names, and the
//! description token of the file-import command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative tolerance used when a profile does not set one (0.1%).
pub const DEFAULT_FLOAT_TOLERANCE: f64 = 0.001;

/// Import description used when a profile does not set one.
pub const DEFAULT_IMPORT_DESCRIPTION: &str = "csvfile";

/// Longest import description the external command accepts.
pub const MAX_IMPORT_DESCRIPTION_LEN: usize = 8;

/// Errors that can occur when loading or validating a profile.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileError {
    /// JSON deserialization failed.
    #[error("invalid profile JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A field value is out of its valid range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        /// The name of the field that failed validation.
        field: String,
        /// A human-readable explanation of why the field value is invalid.
        reason: String,
    },
}

/// Per-user settings.
///
/// Every field is optional in JSON; an empty object gives
/// [`Profile::default`].
///
/// # Example
/// ```
/// let profile = dmscript_profile::load_profile_from_str(
///     r#"{ "dry_run": true, "irregular_names": { "x_or_y": "X/Y" } }"#,
/// )
/// .unwrap();
/// assert!(profile.dry_run);
/// assert_eq!(profile.float_tolerance, dmscript_profile::DEFAULT_FLOAT_TOLERANCE);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Profile {
    /// Log file. Logs go to stderr when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Echo commands instead of submitting them.
    pub dry_run: bool,
    /// Relative tolerance for float defaults, in `(0, 1)`.
    pub float_tolerance: f64,
    /// Extra stem → external name entries, consulted before the built-in
    /// irregular-name table.
    pub irregular_names: BTreeMap<String, String>,
    /// Description token of the file-import command.
    pub import_description: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            log_file: None,
            dry_run: false,
            float_tolerance: DEFAULT_FLOAT_TOLERANCE,
            irregular_names: BTreeMap::new(),
            import_description: DEFAULT_IMPORT_DESCRIPTION.to_string(),
        }
    }
}

/// Load and validate a [`Profile`] from a JSON string.
///
/// Performs structural validation after deserialization:
/// - `float_tolerance` must be finite and strictly between 0 and 1
/// - `import_description` must be 1–8 characters without single quotes
/// - `irregular_names` keys must be non-empty lower-case stems without a
///   class suffix, values non-empty
/// - `log_file`, if present, must not be empty
pub fn load_profile_from_str(s: &str) -> Result<Profile, ProfileError> {
    let profile: Profile = serde_json::from_str(s)?;

    // -- Tolerance --
    let tol = profile.float_tolerance;
    if !tol.is_finite() || tol <= 0.0 || tol >= 1.0 {
        return Err(ProfileError::InvalidField {
            field: "float_tolerance".into(),
            reason: format!("{tol} must be greater than 0 and less than 1"),
        });
    }

    // -- Import description --
    let desc = &profile.import_description;
    if desc.trim().is_empty() {
        return Err(ProfileError::InvalidField {
            field: "import_description".into(),
            reason: "must not be empty".into(),
        });
    }
    if desc.chars().count() > MAX_IMPORT_DESCRIPTION_LEN {
        return Err(ProfileError::InvalidField {
            field: "import_description".into(),
            reason: format!(
                "'{desc}' exceeds {MAX_IMPORT_DESCRIPTION_LEN} characters"
            ),
        });
    }
    if desc.contains('\'') {
        return Err(ProfileError::InvalidField {
            field: "import_description".into(),
            reason: "must not contain a single quote".into(),
        });
    }

    // -- Irregular names --
    for (stem, name) in &profile.irregular_names {
        let field = format!("irregular_names.{stem}");
        if stem.is_empty() {
            return Err(ProfileError::InvalidField {
                field: "irregular_names".into(),
                reason: "stem must not be empty".into(),
            });
        }
        if stem.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(ProfileError::InvalidField {
                field,
                reason: "stems are lower-case".into(),
            });
        }
        if ["_i", "_o", "_f", "_p"].iter().any(|s| stem.ends_with(s)) {
            return Err(ProfileError::InvalidField {
                field,
                reason: "give the stem without its class suffix".into(),
            });
        }
        if name.trim().is_empty() {
            return Err(ProfileError::InvalidField {
                field,
                reason: "external name must not be empty".into(),
            });
        }
    }

    // -- Log file --
    if let Some(ref path) = profile.log_file
        && path.as_os_str().is_empty()
    {
        return Err(ProfileError::InvalidField {
            field: "log_file".into(),
            reason: "must not be empty".into(),
        });
    }

    Ok(profile)
}
