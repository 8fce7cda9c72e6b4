//! File specifications for the file-import command.
//!
//! A [`FileSpec`] is an ordered list of field descriptors, each carrying the
//! five attributes the import command expects: field name, field type,
//! length, keep flag and default. Specifications are built empty, from
//! explicit descriptors, from attribute records (JSON or CSV definition
//! files), or inferred from a [`Table`].

mod import;
mod infer;
mod table;

pub use import::{DEFAULT_IMPORT_DESCRIPTION, ImportOptions, import_command};
pub use infer::alphanumeric_length;
pub use table::{Cell, Column, Table};

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use dmscript_tables::{is_char8_field, is_implicit_field};
use serde::Serialize;

use crate::error::FileSpecError;

/// Descriptor attribute names, in emission order.
pub const SPEC_COLUMNS: [&str; 5] = ["Field Name", "Field Type", "Length", "Keep", "Default"];

/// Field type of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    /// Numeric (`N`).
    #[serde(rename = "N")]
    Numeric,
    /// Alphanumeric (`A`).
    #[serde(rename = "A")]
    Alphanumeric,
}

impl FieldType {
    /// Single-letter code used by the import command.
    pub fn code(self) -> &'static str {
        match self {
            FieldType::Numeric => "N",
            FieldType::Alphanumeric => "A",
        }
    }

    /// Parse `N` / `A` (any case, surrounding whitespace ignored).
    pub fn parse(text: &str) -> Option<FieldType> {
        match text.trim().to_ascii_uppercase().as_str() {
            "N" => Some(FieldType::Numeric),
            "A" => Some(FieldType::Alphanumeric),
            _ => None,
        }
    }
}

/// One field of a file specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Numeric or alphanumeric.
    pub field_type: FieldType,
    /// Declared length; `None` writes an empty length.
    pub length: Option<u32>,
    /// Whether the field is kept as row data.
    pub keep: bool,
    /// Default value text.
    pub default: String,
}

impl FieldDescriptor {
    /// A descriptor with empty length, kept, and no default.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            length: None,
            keep: true,
            default: String::new(),
        }
    }

    /// Set the length.
    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the keep flag.
    pub fn with_keep(mut self, keep: bool) -> Self {
        self.keep = keep;
        self
    }

    /// Set the default.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = default.into();
        self
    }

    /// The five attributes as text, in [`SPEC_COLUMNS`] order.
    pub fn attributes(&self) -> [String; 5] {
        [
            self.name.clone(),
            self.field_type.code().to_string(),
            self.length.map(|l| l.to_string()).unwrap_or_default(),
            if self.keep { "Y" } else { "N" }.to_string(),
            self.default.clone(),
        ]
    }

    fn from_record(record: &BTreeMap<String, String>) -> Result<Self, FileSpecError> {
        // Presence of every attribute is checked by the caller.
        let get = |column: &str| record.get(column).map(String::as_str).unwrap_or_default();

        let name = get(SPEC_COLUMNS[0]).trim().to_string();
        let invalid = |attribute: &'static str, value: &str| FileSpecError::InvalidAttribute {
            field: name.clone(),
            attribute,
            value: value.to_string(),
        };

        let raw_type = get(SPEC_COLUMNS[1]);
        let field_type =
            FieldType::parse(raw_type).ok_or_else(|| invalid(SPEC_COLUMNS[1], raw_type))?;

        let raw_length = get(SPEC_COLUMNS[2]).trim();
        let length = if raw_length.is_empty() {
            None
        } else {
            Some(parse_length(raw_length).ok_or_else(|| invalid(SPEC_COLUMNS[2], raw_length))?)
        };

        let raw_keep = get(SPEC_COLUMNS[3]);
        let keep = match raw_keep.trim().to_ascii_uppercase().as_str() {
            "Y" | "YES" => true,
            "N" | "NO" => false,
            _ => return Err(invalid(SPEC_COLUMNS[3], raw_keep)),
        };

        Ok(FieldDescriptor {
            name,
            field_type,
            length,
            keep,
            default: get(SPEC_COLUMNS[4]).to_string(),
        })
    }
}

/// Accepts `8` and also `8.0`, which spreadsheet exports tend to write.
fn parse_length(text: &str) -> Option<u32> {
    text.parse::<u32>().ok().or_else(|| {
        let f = text.parse::<f64>().ok()?;
        (f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX)).then_some(f as u32)
    })
}

/// An ordered list of field descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FileSpec {
    fields: Vec<FieldDescriptor>,
}

impl FileSpec {
    /// An empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// A specification from explicit descriptors.
    pub fn from_fields(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Infer a specification from table columns.
    pub fn from_table(table: &Table) -> Self {
        infer::infer(table)
    }

    /// Read a delimited file and infer its specification.
    pub fn from_text(path: impl AsRef<Path>) -> Result<Self, FileSpecError> {
        Ok(Self::from_table(&Table::from_path(path)?))
    }

    /// Build from attribute records (attribute name → text).
    ///
    /// Every record must carry all five [`SPEC_COLUMNS`]; the first missing
    /// attribute is reported before any field is interpreted.
    pub fn from_records(records: &[BTreeMap<String, String>]) -> Result<Self, FileSpecError> {
        for record in records {
            if let Some(column) = SPEC_COLUMNS.iter().find(|c| !record.contains_key(**c)) {
                return Err(FileSpecError::MissingFieldSpecColumn {
                    column: (*column).to_string(),
                });
            }
        }

        let fields = records
            .iter()
            .map(FieldDescriptor::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { fields })
    }

    /// Build from a CSV definition whose header row names the attributes.
    ///
    /// The header is checked even when there are no data rows.
    pub fn from_definition_csv<R: io::Read>(reader: R) -> Result<Self, FileSpecError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        if let Some(column) = SPEC_COLUMNS
            .iter()
            .find(|c| !headers.iter().any(|h| h == **c))
        {
            return Err(FileSpecError::MissingFieldSpecColumn {
                column: (*column).to_string(),
            });
        }

        let records = rdr
            .records()
            .map(|row| {
                let row = row?;
                Ok(headers
                    .iter()
                    .zip(row.iter())
                    .map(|(h, v)| (h.to_string(), v.to_string()))
                    .collect())
            })
            .collect::<Result<Vec<BTreeMap<String, String>>, FileSpecError>>()?;

        Self::from_records(&records)
    }

    /// Build from a JSON array of attribute objects.
    ///
    /// Attribute values may be strings, numbers or `null` (empty).
    pub fn from_json_str(json: &str) -> Result<Self, FileSpecError> {
        let raw: Vec<BTreeMap<String, serde_json::Value>> = serde_json::from_str(json)?;
        let records: Vec<BTreeMap<String, String>> = raw
            .into_iter()
            .map(|record| {
                record
                    .into_iter()
                    .map(|(k, v)| {
                        let text = match v {
                            serde_json::Value::Null => String::new(),
                            serde_json::Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (k, text)
                    })
                    .collect()
            })
            .collect();
        Self::from_records(&records)
    }

    /// Append a field with empty length, kept, and no default.
    ///
    /// Returns the new descriptor so the caller can adjust it.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        field_type: FieldType,
    ) -> &mut FieldDescriptor {
        self.fields.push(FieldDescriptor::new(name, field_type));
        let last = self.fields.len() - 1;
        &mut self.fields[last]
    }

    /// Append a prepared descriptor.
    pub fn push(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    /// Descriptors in order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name.trim() == name.trim())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Attribute records, the inverse of [`FileSpec::from_records`].
    pub fn to_records(&self) -> Vec<BTreeMap<String, String>> {
        self.fields
            .iter()
            .map(|f| {
                SPEC_COLUMNS
                    .iter()
                    .map(|c| (*c).to_string())
                    .zip(f.attributes())
                    .collect()
            })
            .collect()
    }

    /// Force the fixed overrides for known field names.
    ///
    /// 8-character fields become alphanumeric with length 8. Implicit fields
    /// become numeric and not kept, with their default taken from the first
    /// row of the matching `table` column; without such a column the default
    /// is left as it is.
    pub fn apply_known_field_overrides(&mut self, table: &Table) {
        for field in &mut self.fields {
            if is_char8_field(&field.name) {
                field.field_type = FieldType::Alphanumeric;
                field.length = Some(8);
            }
            if is_implicit_field(&field.name) {
                field.field_type = FieldType::Numeric;
                field.keep = false;
                let first = table
                    .columns()
                    .iter()
                    .find(|c| c.name.trim() == field.name.trim())
                    .and_then(Column::first);
                if let Some(cell) = first {
                    field.default = cell.to_string();
                }
            }
        }
    }
}
