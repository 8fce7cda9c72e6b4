//! Static lookup data and catalogue types for dmscript.
//!
//! Everything the translation engine treats as convention rather than logic
//! lives here: the argument classes with their markers and sort ranks, the
//! irregular-name table and structural substitution rules, the lists of
//! fields that receive fixed overrides during file import, and the command
//! catalogue model that records each command's parameters and defaults.
//!
//! All tables are read-only process-wide data; nothing here holds state.

#![warn(missing_docs)]

/// Argument classes, their external markers, and sort ranks.
pub mod class;
/// Command signatures and catalogue loading.
pub mod catalog;
/// Field-name lists that receive fixed overrides during file import.
pub mod fields;
/// Irregular-name table and structural substitution rules.
pub mod names;
/// Typed argument values.
pub mod value;

pub use catalog::{Catalog, CatalogError, CommandSignature, ParamSpec, load_catalog_from_str};
pub use class::{ArgClass, Encoding};
pub use fields::{CHAR8_FIELDS, IMPLICIT_FIELDS, is_char8_field, is_implicit_field};
pub use names::{IRREGULAR_NAMES, SUBSTITUTIONS, Substitution, irregular_name};
pub use value::ArgValue;
