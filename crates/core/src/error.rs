//! Error types for argument translation and file specifications.

use std::path::PathBuf;

/// Errors raised while translating call arguments into command tokens.
///
/// All of these are detected before a command string is produced, so a
/// failed translation never yields a partial command.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// The identifier is neither a reserved free-form name nor ends in one
    /// of the four class suffixes.
    #[error(
        "argument '{identifier}' does not have a valid suffix; valid suffixes are '_i', '_o', '_f' and '_p'"
    )]
    InvalidSuffix {
        /// The identifier as supplied by the caller.
        identifier: String,
    },

    /// A range argument was given more values than its declared series holds.
    #[error("range argument '{identifier}' has {len} values, exceeding the maximum of {max}")]
    ArgumentOverflow {
        /// The range identifier.
        identifier: String,
        /// Number of values supplied.
        len: usize,
        /// Capacity of the declared series (`high - low + 1`).
        max: usize,
    },

    /// The identifier names a numeric series whose bounds are not numbers
    /// the series can hold.
    #[error("range argument '{identifier}' has a bound that is out of range")]
    InvalidRange {
        /// The range identifier.
        identifier: String,
    },

    /// A value of the wrong shape was bound to an argument.
    #[error("argument '{identifier}' was given a {found} value, expected {expected}")]
    TypeMismatch {
        /// The identifier as supplied by the caller.
        identifier: String,
        /// Kind of value that was supplied.
        found: &'static str,
        /// What the argument accepts.
        expected: &'static str,
    },

    /// The call supplied an argument the command signature does not declare.
    #[error("command {command} has no parameter '{identifier}'")]
    UnknownArgument {
        /// Command name.
        command: String,
        /// The undeclared identifier.
        identifier: String,
    },

    /// A parameter without a default was not supplied.
    #[error("command {command} requires '{identifier}'")]
    MissingRequiredArgument {
        /// Command name.
        command: String,
        /// The missing identifier.
        identifier: String,
    },
}

/// Errors raised while reading tables or building file specifications.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FileSpecError {
    /// A supplied specification lacks one of the five descriptor attributes.
    #[error(
        "file specification is missing the '{column}' attribute; 'Field Name', 'Field Type', 'Length', 'Keep' and 'Default' are required"
    )]
    MissingFieldSpecColumn {
        /// Name of the missing attribute.
        column: String,
    },

    /// An attribute value could not be interpreted.
    #[error("field '{field}': invalid {attribute} '{value}'")]
    InvalidAttribute {
        /// Field the descriptor belongs to.
        field: String,
        /// Attribute name (e.g. `"Field Type"`).
        attribute: &'static str,
        /// The offending text.
        value: String,
    },

    /// A delimited file could not be read.
    #[error("failed to read table '{}'", .path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// The underlying reader error.
        #[source]
        source: csv::Error,
    },

    /// Delimited data from a reader was malformed.
    #[error("malformed table data: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON field definition could not be parsed.
    #[error("invalid field definition JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_message_names_identifier_and_bounds() {
        let err = EncodeError::ArgumentOverflow {
            identifier: "f1_to_3_f".into(),
            len: 5,
            max: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("f1_to_3_f"), "{msg}");
        assert!(msg.contains('5'), "{msg}");
        assert!(msg.contains('3'), "{msg}");
    }

    #[test]
    fn missing_column_message() {
        let err = FileSpecError::MissingFieldSpecColumn {
            column: "Keep".into(),
        };
        assert!(err.to_string().contains("'Keep'"));
    }
}
