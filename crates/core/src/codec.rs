//! Name codec: converts parameter identifiers into external argument tokens.
//!
//! An identifier is a *stem* plus a two-character class suffix: `in_i`,
//! `out_o`, `x_or_y_or_z_f`, `f1_to_10_f`, `tol_p`. Decoding splits off the
//! suffix to find the [`ArgClass`] and resolves the stem to an external name:
//!
//! 1. a stem with an embedded numeric series (`<low>_to_<high>`) becomes a
//!    [`RangeSpec`] that expands into numbered names;
//! 2. otherwise the irregular-name table (profile overrides first, then the
//!    built-in [`IRREGULAR_NAMES`](dmscript_tables::IRREGULAR_NAMES)) is
//!    consulted;
//! 3. otherwise the ordered structural [`SUBSTITUTIONS`] are applied;
//! 4. otherwise the stem is upper-cased verbatim.
//!
//! Encoding then writes one `<marker><NAME>=<value>` token per external name.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use dmscript_profile::Profile;
use dmscript_tables::{ArgClass, ArgValue, IRREGULAR_NAMES, SUBSTITUTIONS, irregular_name};
use regex::Regex;

use crate::error::EncodeError;

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<low>[0-9]+)_to_(?P<high>[0-9]+)").expect("range pattern is a valid regex")
});

// ── Range stems ─────────────────────────────────────────────────────────

/// A numeric series embedded in a stem, e.g. `f1_to_10` → `F1`..`F10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeSpec {
    /// The stem with the series marker removed (`"f"` for `f1_to_10`).
    pub base: String,
    /// First number of the series.
    pub low: u32,
    /// Last number of the series.
    pub high: u32,
}

impl RangeSpec {
    /// Detect a `<low>_to_<high>` series in `stem`.
    pub fn parse(stem: &str) -> Option<RangeSpec> {
        let caps = RANGE_PATTERN.captures(stem)?;
        let low = caps.name("low")?.as_str().parse().ok()?;
        let high = caps.name("high")?.as_str().parse().ok()?;
        let base = RANGE_PATTERN.replace(stem, "").into_owned();
        Some(RangeSpec { base, low, high })
    }

    /// Number of arguments the series can hold (`high - low + 1`).
    pub fn capacity(&self) -> usize {
        if self.high < self.low {
            0
        } else {
            (self.high - self.low) as usize + 1
        }
    }

    /// External name of the `index`-th element (0-based), numbered from `low`.
    pub fn name(&self, index: usize) -> String {
        format!("{}{}", self.base.to_uppercase(), self.low as usize + index)
    }
}

// ── Resolution ──────────────────────────────────────────────────────────

/// How a stem maps onto the external naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Numbered series; one external name per value.
    Range(RangeSpec),
    /// Found in the irregular-name table.
    Irregular(String),
    /// Rewritten by one or more structural substitutions.
    Substituted(String),
    /// No markers present; upper-cased as written.
    Verbatim(String),
}

impl Resolution {
    /// The single external name, or `None` for a range.
    pub fn external_name(&self) -> Option<&str> {
        match self {
            Resolution::Range(_) => None,
            Resolution::Irregular(n) | Resolution::Substituted(n) | Resolution::Verbatim(n) => {
                Some(n)
            }
        }
    }

    /// Short label for the resolution strategy.
    pub fn strategy(&self) -> &'static str {
        match self {
            Resolution::Range(_) => "range",
            Resolution::Irregular(_) => "irregular",
            Resolution::Substituted(_) => "substituted",
            Resolution::Verbatim(_) => "verbatim",
        }
    }
}

/// A decoded typed identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Identifier as supplied.
    pub identifier: String,
    /// Identifier without its class suffix.
    pub stem: String,
    /// Argument class selected by the suffix.
    pub class: ArgClass,
    /// External marker for `class`.
    pub marker: char,
    /// How the stem resolves to an external name.
    pub resolution: Resolution,
}

// ── Codec ───────────────────────────────────────────────────────────────

/// Translates typed identifiers and their values into command tokens.
///
/// The codec holds only read-only lookup data and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct NameCodec {
    overrides: BTreeMap<String, String>,
}

impl NameCodec {
    /// A codec using only the built-in irregular-name table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A codec with extra stem → external name entries, consulted before
    /// the built-in table.
    pub fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }

    /// A codec configured from a profile's `irregular_names`.
    pub fn from_profile(profile: &Profile) -> Self {
        Self::with_overrides(profile.irregular_names.clone())
    }

    /// Resolve a stem to its external form.
    pub fn resolve(&self, stem: &str) -> Resolution {
        if let Some(range) = RangeSpec::parse(stem) {
            return Resolution::Range(range);
        }

        let irregular = self
            .overrides
            .get(stem)
            .map(String::as_str)
            .or_else(|| irregular_name(stem));
        if let Some(name) = irregular {
            return Resolution::Irregular(name.to_uppercase());
        }

        if SUBSTITUTIONS.iter().any(|rule| rule.matches(stem)) {
            let rewritten = SUBSTITUTIONS
                .iter()
                .fold(stem.to_string(), |acc, rule| rule.apply(&acc));
            return Resolution::Substituted(rewritten.to_uppercase());
        }

        Resolution::Verbatim(stem.to_uppercase())
    }

    /// Split a typed identifier into stem and class and resolve the stem.
    ///
    /// Fails with [`EncodeError::InvalidSuffix`] when the identifier does not
    /// end in `_i`, `_o`, `_f` or `_p`, or has nothing before the suffix, and
    /// with [`EncodeError::InvalidRange`] when a series bound overflows.
    pub fn decode(&self, identifier: &str) -> Result<Decoded, EncodeError> {
        let invalid = || EncodeError::InvalidSuffix {
            identifier: identifier.to_string(),
        };

        let split = identifier.len().checked_sub(2).ok_or_else(invalid)?;
        if split == 0 || !identifier.is_char_boundary(split) {
            return Err(invalid());
        }
        let (stem, suffix) = identifier.split_at(split);
        let class = ArgClass::from_suffix(suffix).ok_or_else(invalid)?;
        let marker = class.marker().ok_or_else(invalid)?;

        // A series marker with unparseable bounds must not fall through to
        // the `_to_` substitution.
        if RANGE_PATTERN.is_match(stem) && RangeSpec::parse(stem).is_none() {
            return Err(EncodeError::InvalidRange {
                identifier: identifier.to_string(),
            });
        }

        Ok(Decoded {
            identifier: identifier.to_string(),
            stem: stem.to_string(),
            class,
            marker,
            resolution: self.resolve(stem),
        })
    }

    /// Decode `identifier` and encode `value` into one or more tokens.
    ///
    /// Range stems expand a list into numbered tokens starting at the
    /// series' lower bound; a scalar yields a single token numbered at the
    /// lower bound. Every other stem takes exactly one scalar.
    pub fn encode(&self, identifier: &str, value: &ArgValue) -> Result<Vec<String>, EncodeError> {
        let decoded = self.decode(identifier)?;
        let marker = decoded.marker;

        let tokens = match &decoded.resolution {
            Resolution::Range(range) => match value {
                ArgValue::List(items) => {
                    if items.len() > range.capacity() {
                        return Err(EncodeError::ArgumentOverflow {
                            identifier: identifier.to_string(),
                            len: items.len(),
                            max: range.capacity(),
                        });
                    }
                    items
                        .iter()
                        .enumerate()
                        .map(|(i, item)| {
                            let v = render_scalar(identifier, item, "a list of scalars")?;
                            Ok(format!("{marker}{}={v}", range.name(i)))
                        })
                        .collect::<Result<Vec<_>, EncodeError>>()?
                }
                v if v.is_scalar() => {
                    let v = render_scalar(identifier, v, "a scalar or a list")?;
                    vec![format!("{marker}{}={v}", range.name(0))]
                }
                other => {
                    return Err(EncodeError::TypeMismatch {
                        identifier: identifier.to_string(),
                        found: other.kind(),
                        expected: "a scalar or a list",
                    });
                }
            },
            resolved => {
                // Non-range resolutions always carry a name.
                let name = resolved.external_name().unwrap_or_default();
                let v = render_scalar(identifier, value, "a scalar")?;
                vec![format!("{marker}{name}={v}")]
            }
        };

        tracing::debug!(
            identifier,
            strategy = decoded.resolution.strategy(),
            tokens = ?tokens,
            "argument translated"
        );
        Ok(tokens)
    }

    /// Reverse direction: the identifier that encodes to `external` in
    /// `class`.
    ///
    /// Returns `None` for free-form classes and for names that cannot be
    /// written back as an identifier that resolves to the same name (for
    /// example names containing spaces that are not in the irregular table).
    pub fn identifier_for(&self, external: &str, class: ArgClass) -> Option<String> {
        let suffix = class.suffix()?;
        let wanted = external.to_uppercase();

        let listed = self
            .overrides
            .iter()
            .find(|(_, v)| v.to_uppercase() == wanted)
            .map(|(k, _)| k.clone())
            .or_else(|| {
                IRREGULAR_NAMES
                    .iter()
                    .find(|(_, v)| v.to_uppercase() == wanted)
                    .map(|(k, _)| (*k).to_string())
            });

        let stem = match listed {
            Some(stem) => stem,
            None => {
                if wanted.is_empty()
                    || !wanted
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || "_/().-".contains(c))
                {
                    return None;
                }
                let mut stem = String::with_capacity(wanted.len() * 2);
                if wanted.starts_with(|c: char| c.is_ascii_digit()) {
                    stem.push_str("_py_");
                }
                for c in wanted.to_lowercase().chars() {
                    match c {
                        '/' => stem.push_str("_or_"),
                        '-' => stem.push_str("_to_"),
                        '.' => stem.push_str("_dot_"),
                        '(' => stem.push_str("_popen_"),
                        ')' => stem.push_str("_pclose_"),
                        c => stem.push(c),
                    }
                }
                stem
            }
        };

        (self.resolve(&stem).external_name() == Some(wanted.as_str()))
            .then(|| format!("{stem}{suffix}"))
    }
}

fn render_scalar(
    identifier: &str,
    value: &ArgValue,
    expected: &'static str,
) -> Result<String, EncodeError> {
    value.render().ok_or_else(|| EncodeError::TypeMismatch {
        identifier: identifier.to_string(),
        found: value.kind(),
        expected,
    })
}
