use super::{FieldDescriptor, FieldType, FileSpec, Table};

/// Length declared for an alphanumeric field whose longest value has
/// `max_len` characters: the next multiple of 4 that holds it, never less
/// than 4.
pub fn alphanumeric_length(max_len: usize) -> u32 {
    let words = max_len.saturating_sub(1) / 4 + 1;
    u32::try_from(words * 4).unwrap_or(u32::MAX)
}

/// Describe each column in file order, then force the known-field
/// overrides.
pub(super) fn infer(table: &Table) -> FileSpec {
    let fields = table
        .columns()
        .iter()
        .map(|column| {
            if column.is_numeric() {
                FieldDescriptor::new(column.name.as_str(), FieldType::Numeric)
            } else {
                FieldDescriptor::new(column.name.as_str(), FieldType::Alphanumeric)
                    .with_length(alphanumeric_length(column.max_text_len()))
            }
        })
        .collect();

    let mut spec = FileSpec::from_fields(fields);
    spec.apply_known_field_overrides(table);
    spec
}
