//! dmscript core library.
//!
//! Translates named-parameter calls into command strings for a
//! command-driven modelling application. The main entry points are
//! [`Invoker::invoke`] for a full call against a [`CommandSignature`],
//! [`build`] and [`synthesize`] for the individual pipeline stages, and
//! [`import_command`] for the file-import command.
//!
//! [`CommandSignature`]: dmscript_tables::CommandSignature

#![warn(missing_docs)]

use std::collections::BTreeMap;

use dmscript_tables::ArgValue;

/// Argument list builder: class routing, sorting, free-form encodings.
pub mod builder;
/// Name codec: identifier → external argument tokens.
pub mod codec;
/// End-to-end invocation against command signatures.
pub mod command;
/// Error types.
pub mod error;
/// File specifications, tabular ingestion and the import command.
pub mod filespec;
/// Default-diff filter.
pub mod filter;
/// Command synthesizer.
pub mod synth;

/// Call arguments keyed by parameter identifier.
pub type Arguments = BTreeMap<String, ArgValue>;

// ── Convenience re-exports ──────────────────────────────────────────────────

// Codec
pub use codec::{Decoded, NameCodec, RangeSpec, Resolution};

// Pipeline
pub use builder::{EncodedArg, build, build_with, encode_argument};
pub use command::{Invoker, xrun};
pub use filter::{DEFAULT_FLOAT_TOLERANCE, robust_equals, select_changed, select_changed_with};
pub use synth::synthesize;

// File specifications
pub use filespec::{
    Cell, Column, FieldDescriptor, FieldType, FileSpec, ImportOptions, SPEC_COLUMNS, Table,
    import_command,
};

// Errors
pub use error::{EncodeError, FileSpecError};
