//! Field names that receive fixed overrides when importing a file.

/// Fields that are always declared alphanumeric with length 8.
pub static CHAR8_FIELDS: &[&str] = &[
    "VALUE_IN", "VALUE_OU", "NUMSAM_F", "SVOL_F", "VAR_F", "MINDIS_F",
];

/// Fields that describe file geometry rather than row data.
///
/// They are declared numeric, not kept, with their default taken from the
/// first row of the source table.
pub static IMPLICIT_FIELDS: &[&str] = &[
    "XMORIG", "YMORIG", "ZMORIG", "NX", "NY", "NZ", "X0", "Y0", "Z0", "ANGLE1", "ANGLE2",
    "ANGLE3", "ROTAXIS1", "ROTAXIS2", "ROTAXIS3",
];

/// Whether `name` is one of [`CHAR8_FIELDS`].
pub fn is_char8_field(name: &str) -> bool {
    CHAR8_FIELDS.contains(&name.trim())
}

/// Whether `name` is one of [`IMPLICIT_FIELDS`].
pub fn is_implicit_field(name: &str) -> bool {
    IMPLICIT_FIELDS.contains(&name.trim())
}
