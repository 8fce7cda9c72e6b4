//! Command signatures.
//!
//! A signature lists a command's parameters in declaration order together
//! with their defaults. The default-diff filter compares call arguments
//! against these defaults, so a signature is what lets a caller write only
//! the arguments they actually changed.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;
use thiserror::Error;

use crate::class::ArgClass;
use crate::value::ArgValue;

/// Current format version for the catalogue JSON schema.
pub const CATALOG_FORMAT_VERSION: &str = "0.1.0";

/// Errors that can occur when loading or validating a command catalogue.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// JSON deserialization failed.
    #[error("invalid catalog JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A command entry is structurally invalid.
    #[error("invalid command '{command}': {reason}")]
    InvalidEntry {
        /// The command name as written in the catalogue.
        command: String,
        /// A human-readable explanation of the problem.
        reason: String,
    },
}

/// One declared parameter of a command.
///
/// A parameter is required when it is marked `required` or declares no
/// `default` at all. `"default": null` is a real default of `Null`, distinct
/// from an absent key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter identifier, including its class suffix (e.g. `"in_i"`).
    pub name: String,
    /// Explicitly required; may not be combined with a default.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Declared default, `None` when the key is absent.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<ArgValue>,
}

/// Wrap any present value, `null` included, in `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<ArgValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    ArgValue::deserialize(deserializer).map(Some)
}

impl ParamSpec {
    /// A parameter without a default.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
        }
    }

    /// A parameter with a default value.
    pub fn with_default(name: impl Into<String>, default: impl Into<ArgValue>) -> Self {
        Self {
            name: name.into(),
            required: false,
            default: Some(default.into()),
        }
    }

    /// Whether a call must supply this parameter.
    pub fn is_required(&self) -> bool {
        self.required || self.default.is_none()
    }

    /// The default, or `None` for a required parameter.
    pub fn default_value(&self) -> Option<&ArgValue> {
        if self.required {
            None
        } else {
            self.default.as_ref()
        }
    }
}

/// The declared parameters of a single command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandSignature {
    /// External command name (e.g. `"COPY"`).
    pub name: String,
    /// Optional one-line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters in declaration order.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl CommandSignature {
    /// An empty signature for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: Vec::new(),
        }
    }

    /// Append a parameter (builder style).
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Look up a declared parameter by identifier.
    pub fn find(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// A set of command signatures keyed by command name.
///
/// Lookups are case-insensitive: command names are external identifiers and
/// the external application does not distinguish case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Catalogue format version.
    #[serde(default = "default_format_version")]
    pub format_version: String,
    /// All command signatures.
    pub commands: Vec<CommandSignature>,

    /// Cached map from upper-cased command name → index into `commands`.
    #[serde(skip)]
    index: OnceLock<HashMap<String, usize>>,
}

fn default_format_version() -> String {
    CATALOG_FORMAT_VERSION.to_string()
}

impl Catalog {
    /// Build a catalogue from a list of signatures.
    pub fn new(commands: Vec<CommandSignature>) -> Self {
        Self {
            format_version: default_format_version(),
            commands,
            index: OnceLock::new(),
        }
    }

    fn index(&self) -> &HashMap<String, usize> {
        self.index.get_or_init(|| {
            self.commands
                .iter()
                .enumerate()
                .map(|(i, c)| (c.name.to_ascii_uppercase(), i))
                .collect()
        })
    }

    /// Look up a signature by command name.
    pub fn get(&self, name: &str) -> Option<&CommandSignature> {
        self.index()
            .get(&name.to_ascii_uppercase())
            .map(|&i| &self.commands[i])
    }

    /// Number of commands in the catalogue.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the catalogue has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Load and validate a [`Catalog`] from a JSON string.
///
/// Checks after deserialization:
/// - command names are non-empty and unique (ignoring case)
/// - parameter names are unique within a command
/// - every parameter is either a reserved free-form name or carries a
///   recognized class suffix
pub fn load_catalog_from_str(s: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = serde_json::from_str(s)?;

    let mut seen = HashSet::new();
    for cmd in &catalog.commands {
        if cmd.name.trim().is_empty() {
            return Err(CatalogError::InvalidEntry {
                command: cmd.name.clone(),
                reason: "name must not be empty".into(),
            });
        }
        if !seen.insert(cmd.name.to_ascii_uppercase()) {
            return Err(CatalogError::InvalidEntry {
                command: cmd.name.clone(),
                reason: "declared more than once".into(),
            });
        }

        let mut params = HashSet::new();
        for p in &cmd.params {
            if !params.insert(p.name.as_str()) {
                return Err(CatalogError::InvalidEntry {
                    command: cmd.name.clone(),
                    reason: format!("parameter '{}' declared more than once", p.name),
                });
            }
            if p.required && p.default.is_some() {
                return Err(CatalogError::InvalidEntry {
                    command: cmd.name.clone(),
                    reason: format!("parameter '{}' is required but declares a default", p.name),
                });
            }
            if ArgClass::classify(&p.name).is_none() {
                return Err(CatalogError::InvalidEntry {
                    command: cmd.name.clone(),
                    reason: format!(
                        "parameter '{}' has no class suffix (_i, _o, _f, _p) and is not a reserved name",
                        p.name
                    ),
                });
            }
        }
    }

    Ok(catalog)
}
