//! External names that cannot be written as identifiers.
//!
//! Resolution is two-stage. [`IRREGULAR_NAMES`] maps a stem directly to its
//! external spelling and is always consulted first. Stems it does not list
//! fall through to [`SUBSTITUTIONS`], an ordered list of marker rewrites
//! applied in sequence.

/// Stems whose external names contain characters that are illegal in an
/// identifier (slashes, parentheses, embedded spaces, leading digits).
///
/// Keys are stems: the class suffix has already been removed.
pub static IRREGULAR_NAMES: &[(&str, &str)] = &[
    ("x_or_y_or_z", "X/Y/Z"),
    ("x_or_y_or_zpt", "X/Y/ZPT"),
    ("da_axis1_or_2_or_3", "DA_AXIS1/2/3"),
    ("x_or_ygstart", "X/YGSTART"),
    ("modx_popen_y_or_z_pclose_min", "MODX(Y/Z)MIN"),
    ("modx_popen_y_or_z_pclose_max", "MODX(Y/Z)MAX"),
    ("x_or_y_or_zpoints", "X/Y/ZPOINTS"),
    ("xpt_or_ypt_or_zpt", "XPT/YPT/ZPT"),
    ("q1nx_or_y_or_z", "Q1NX/Y/Z"),
    ("q2nx_or_y_or_z", "Q2NX/Y/Z"),
    ("q3nx_or_y_or_z", "Q3NX/Y/Z"),
    ("q4nx_or_y_or_z", "Q4NX/Y/Z"),
    ("angle1_or_2_or_3", "ANGLE1/2/3"),
    ("axis1_or_2_or_3", "AXIS 1/2/3"),
    ("_py_3dmap", "3DMAP"),
    ("_py_1", "1"),
    ("_py_2", "2"),
];

/// Look up a stem in [`IRREGULAR_NAMES`].
pub fn irregular_name(stem: &str) -> Option<&'static str> {
    IRREGULAR_NAMES
        .iter()
        .find(|(k, _)| *k == stem)
        .map(|(_, v)| *v)
}

/// A single structural rewrite rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// Remove the marker when the stem starts with it.
    DropLeading(&'static str),
    /// Replace every occurrence of `marker` with `replacement`.
    Replace {
        /// Encoded marker as written in the stem.
        marker: &'static str,
        /// External text that replaces it.
        replacement: &'static str,
    },
}

impl Substitution {
    /// The marker this rule looks for.
    pub const fn marker(&self) -> &'static str {
        match self {
            Substitution::DropLeading(m) => m,
            Substitution::Replace { marker, .. } => marker,
        }
    }

    /// Whether `stem` contains something this rule would rewrite.
    pub fn matches(&self, stem: &str) -> bool {
        match self {
            Substitution::DropLeading(m) => stem.starts_with(m),
            Substitution::Replace { marker, .. } => stem.contains(marker),
        }
    }

    /// Apply the rule to `stem`.
    pub fn apply(&self, stem: &str) -> String {
        match self {
            Substitution::DropLeading(m) => stem.strip_prefix(m).unwrap_or(stem).to_string(),
            Substitution::Replace {
                marker,
                replacement,
            } => stem.replace(marker, replacement),
        }
    }
}

/// Structural rewrites, applied in order. Adjacent markers share their
/// underscores, so a rule earlier in the list consumes the overlap.
pub static SUBSTITUTIONS: &[Substitution] = &[
    Substitution::DropLeading("_py_"),
    Substitution::Replace {
        marker: "_popen_",
        replacement: "(",
    },
    Substitution::Replace {
        marker: "_pclose_",
        replacement: ")",
    },
    Substitution::Replace {
        marker: "_dot_",
        replacement: ".",
    },
    Substitution::Replace {
        marker: "_to_",
        replacement: "-",
    },
    Substitution::Replace {
        marker: "_or_",
        replacement: "/",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_lookup() {
        assert_eq!(irregular_name("x_or_y_or_z"), Some("X/Y/Z"));
        assert_eq!(irregular_name("axis1_or_2_or_3"), Some("AXIS 1/2/3"));
        assert_eq!(irregular_name("_py_3dmap"), Some("3DMAP"));
        assert_eq!(irregular_name("grade"), None);
    }

    #[test]
    fn irregular_keys_are_unique() {
        for (i, (a, _)) in IRREGULAR_NAMES.iter().enumerate() {
            for (b, _) in &IRREGULAR_NAMES[i + 1..] {
                assert_ne!(a, b, "duplicate irregular stem {a}");
            }
        }
    }

    #[test]
    fn drop_leading_only_at_start() {
        let rule = Substitution::DropLeading("_py_");
        assert!(rule.matches("_py_2d"));
        assert!(!rule.matches("a_py_b"));
        assert_eq!(rule.apply("_py_2d"), "2d");
    }

    #[test]
    fn replace_all_occurrences() {
        let rule = Substitution::Replace {
            marker: "_or_",
            replacement: "/",
        };
        assert_eq!(rule.apply("x_or_y_or_z"), "x/y/z");
    }
}
