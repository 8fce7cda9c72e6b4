//! Default-diff filter: keep only the arguments a caller actually changed.
//!
//! External commands accept dozens of optional parameters. Emitting only the
//! ones that differ from their declared default keeps command strings short
//! and lets the external application apply its own defaults.

use dmscript_tables::{ArgValue, CommandSignature};

use crate::Arguments;

/// Relative tolerance for comparing floating-point values with their
/// defaults (0.1%).
pub const DEFAULT_FLOAT_TOLERANCE: f64 = dmscript_profile::DEFAULT_FLOAT_TOLERANCE;

/// Compare a supplied value with a declared default.
///
/// Two floats are equal when `|value - default| < tolerance * |default|`
/// (or when they are exactly equal, which covers a zero default). An
/// integer and a float compare numerically. Everything else uses exact
/// equality.
pub fn robust_equals(default: &ArgValue, value: &ArgValue, tolerance: f64) -> bool {
    match (default, value) {
        (ArgValue::Float(d), ArgValue::Float(v)) => d == v || (v - d).abs() < tolerance * d.abs(),
        (ArgValue::Int(d), ArgValue::Float(v)) | (ArgValue::Float(v), ArgValue::Int(d)) => {
            *d as f64 == *v
        }
        (d, v) => d == v,
    }
}

/// Select the changed arguments of a call, using [`DEFAULT_FLOAT_TOLERANCE`].
///
/// See [`select_changed_with`].
pub fn select_changed(call: &Arguments, signature: &CommandSignature) -> Arguments {
    select_changed_with(call, signature, DEFAULT_FLOAT_TOLERANCE)
}

/// Select the changed arguments of a call.
///
/// A required parameter is kept whenever it is supplied. A defaulted
/// parameter is kept only when its supplied value differs from the default
/// under [`robust_equals`]. Arguments the signature does not declare are not
/// returned; callers that want to reject them check beforehand.
pub fn select_changed_with(
    call: &Arguments,
    signature: &CommandSignature,
    tolerance: f64,
) -> Arguments {
    signature
        .params
        .iter()
        .filter_map(|param| {
            let value = call.get(&param.name)?;
            match param.default_value() {
                None => Some((param.name.clone(), value.clone())),
                Some(default) if robust_equals(default, value, tolerance) => None,
                Some(_) => Some((param.name.clone(), value.clone())),
            }
        })
        .collect()
}
