//! The file-import (`INPFIL`) command.
//!
//! Field order here is the physical column order of the source file, so the
//! command is assembled directly instead of going through the class sorter.

pub use dmscript_profile::DEFAULT_IMPORT_DESCRIPTION;
use dmscript_profile::Profile;
use dmscript_tables::ArgValue;

use super::{FileSpec, Table};
use crate::builder::quote;
use crate::codec::NameCodec;
use crate::error::EncodeError;
use crate::synth::synthesize;

/// Attributes are cut to this many characters.
const ATTRIBUTE_WIDTH: usize = 8;

/// Settings for the import command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Free-text description token that precedes the field list.
    pub description: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            description: DEFAULT_IMPORT_DESCRIPTION.to_string(),
        }
    }
}

impl ImportOptions {
    /// Options taken from a profile.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            description: profile.import_description.clone(),
        }
    }
}

/// Build the import command for `source`, writing file `output`.
///
/// Without `spec` the specification is inferred from `table`; a supplied
/// specification still receives the known-field overrides. The field list is
/// followed by the end-of-specification marker `'!'`, the confirmation `'Y'`
/// and the quoted source path, in that order.
pub fn import_command(
    source: &str,
    output: &str,
    table: &Table,
    spec: Option<&FileSpec>,
    options: &ImportOptions,
) -> Result<String, EncodeError> {
    let spec = match spec {
        Some(supplied) => {
            let mut spec = supplied.clone();
            spec.apply_known_field_overrides(table);
            spec
        }
        None => FileSpec::from_table(table),
    };

    let mut tokens = NameCodec::default().encode("out_o", &ArgValue::from(output))?;
    tokens.push(quote(truncate(&options.description)));
    for field in spec.fields() {
        tokens.extend(field.attributes().iter().map(|a| quote(truncate(a))));
    }
    tokens.push(quote("!".to_string()));
    tokens.push(quote("Y".to_string()));
    tokens.push(quote(source.to_string()));

    tracing::debug!(fields = spec.len(), source, "import specification assembled");
    Ok(synthesize("INPFIL", &tokens))
}

fn truncate(text: &str) -> String {
    text.trim().chars().take(ATTRIBUTE_WIDTH).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filespec::{Cell, Column, FieldDescriptor, FieldType};

    fn table() -> Table {
        Table::new(vec![
            Column::new("GRADE", [1.2, 3.4]),
            Column::new("NAME", ["A", "BB"]),
        ])
    }

    #[test]
    fn inferred_import() {
        let cmd = import_command("data.csv", "ASSAYS", &table(), None, &ImportOptions::default())
            .unwrap();
        assert_eq!(
            cmd,
            "INPFIL &OUT=ASSAYS 'csvfile' 'GRADE' 'N' '' 'Y' '' 'NAME' 'A' '4' 'Y' '' '!' 'Y' 'data.csv'"
        );
    }

    #[test]
    fn attributes_truncated_to_eight() {
        let spec = FileSpec::from_fields(vec![
            FieldDescriptor::new("  LONGFIELDNAME ", FieldType::Alphanumeric)
                .with_length(12)
                .with_default("defaultvalue"),
        ]);
        let cmd = import_command(
            "x.csv",
            "OUT",
            &Table::default(),
            Some(&spec),
            &ImportOptions::default(),
        )
        .unwrap();
        assert!(cmd.contains("'LONGFIEL' 'A' '12' 'Y' 'defaultv'"), "{cmd}");
    }

    #[test]
    fn supplied_spec_gets_implicit_default() {
        let table = Table::new(vec![Column::new("NX", [Cell::Int(10), Cell::Int(20)])]);
        let spec = FileSpec::from_fields(vec![FieldDescriptor::new("NX", FieldType::Numeric)]);
        let cmd = import_command(
            "grid.csv",
            "PROTO",
            &table,
            Some(&spec),
            &ImportOptions {
                description: "model".into(),
            },
        )
        .unwrap();
        assert_eq!(
            cmd,
            "INPFIL &OUT=PROTO 'model' 'NX' 'N' '' 'N' '10' '!' 'Y' 'grid.csv'"
        );
    }
}
