//! Argument classes.
//!
//! Every parameter of a command belongs to exactly one class. The four typed
//! classes are selected by a two-character suffix on the parameter identifier
//! (`_i`, `_o`, `_f`, `_p`); the four free-form classes are selected by a
//! reserved parameter name (`expression`, `retrieval`, `arguments`, `test`).
//! Each class carries its external marker, its sort rank, and the rule used
//! to encode its values.

use serde::{Deserialize, Serialize};

/// The class of a command argument.
///
/// Declaration order is emission order: the derived `Ord` agrees with
/// [`ArgClass::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgClass {
    /// Input file (`_i`, marker `&`).
    Input,
    /// Output file (`_o`, marker `&`).
    Output,
    /// Field name (`_f`, marker `*`).
    Field,
    /// Option / numeric parameter (`_p`, marker `@`).
    Parameter,
    /// Expression block, closed by `GO`.
    Expression,
    /// Retrieval criteria, quoted.
    Retrieval,
    /// Variadic passthrough arguments.
    FreeArgument,
    /// Test / validation block, closed by `END`.
    Test,
}

/// How the values of an argument class are written into the command string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// `<marker><NAME>=<value>`, one token per (possibly range-expanded) name.
    Typed {
        /// The external marker character.
        marker: char,
    },
    /// Values written bare and space-joined, followed by a closing keyword.
    Block {
        /// Keyword that closes the block.
        terminator: &'static str,
    },
    /// Every value single-quoted.
    Quoted,
    /// Numbers written bare, everything else single-quoted.
    Passthrough,
}

impl ArgClass {
    /// All classes in emission order.
    pub const ALL: [ArgClass; 8] = [
        ArgClass::Input,
        ArgClass::Output,
        ArgClass::Field,
        ArgClass::Parameter,
        ArgClass::Expression,
        ArgClass::Retrieval,
        ArgClass::FreeArgument,
        ArgClass::Test,
    ];

    /// Sort rank; lower ranks are emitted first.
    pub const fn rank(self) -> u8 {
        match self {
            ArgClass::Input => 1,
            ArgClass::Output => 2,
            ArgClass::Field => 3,
            ArgClass::Parameter => 4,
            ArgClass::Expression => 5,
            ArgClass::Retrieval => 6,
            ArgClass::FreeArgument => 7,
            ArgClass::Test => 8,
        }
    }

    /// Encoding rule for values of this class.
    pub const fn encoding(self) -> Encoding {
        match self {
            ArgClass::Input | ArgClass::Output => Encoding::Typed { marker: '&' },
            ArgClass::Field => Encoding::Typed { marker: '*' },
            ArgClass::Parameter => Encoding::Typed { marker: '@' },
            ArgClass::Expression => Encoding::Block { terminator: "GO" },
            ArgClass::Test => Encoding::Block { terminator: "END" },
            ArgClass::Retrieval => Encoding::Quoted,
            ArgClass::FreeArgument => Encoding::Passthrough,
        }
    }

    /// External marker character, for the typed classes.
    pub const fn marker(self) -> Option<char> {
        match self.encoding() {
            Encoding::Typed { marker } => Some(marker),
            _ => None,
        }
    }

    /// Identifier suffix, for the typed classes.
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            ArgClass::Input => Some("_i"),
            ArgClass::Output => Some("_o"),
            ArgClass::Field => Some("_f"),
            ArgClass::Parameter => Some("_p"),
            _ => None,
        }
    }

    /// Reserved parameter name, for the free-form classes.
    pub const fn reserved_name(self) -> Option<&'static str> {
        match self {
            ArgClass::Expression => Some("expression"),
            ArgClass::Retrieval => Some("retrieval"),
            ArgClass::FreeArgument => Some("arguments"),
            ArgClass::Test => Some("test"),
            _ => None,
        }
    }

    /// `true` for the four suffix-selected classes.
    pub const fn is_typed(self) -> bool {
        matches!(self.encoding(), Encoding::Typed { .. })
    }

    /// Look up a typed class by its two-character suffix (e.g. `"_p"`).
    pub fn from_suffix(suffix: &str) -> Option<ArgClass> {
        ArgClass::ALL
            .into_iter()
            .find(|c| c.suffix() == Some(suffix))
    }

    /// Look up a free-form class by its reserved name (e.g. `"expression"`).
    pub fn from_reserved_name(name: &str) -> Option<ArgClass> {
        ArgClass::ALL
            .into_iter()
            .find(|c| c.reserved_name() == Some(name))
    }

    /// Classify a full parameter identifier.
    ///
    /// Reserved names win over suffixes. Returns `None` when the identifier
    /// is neither a reserved name nor ends in a recognized suffix.
    pub fn classify(identifier: &str) -> Option<ArgClass> {
        if let Some(class) = ArgClass::from_reserved_name(identifier) {
            return Some(class);
        }
        let split = identifier.len().checked_sub(2)?;
        if !identifier.is_char_boundary(split) {
            return None;
        }
        ArgClass::from_suffix(&identifier[split..])
    }
}

impl std::fmt::Display for ArgClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgClass::Input => write!(f, "input"),
            ArgClass::Output => write!(f, "output"),
            ArgClass::Field => write!(f, "field"),
            ArgClass::Parameter => write!(f, "parameter"),
            ArgClass::Expression => write!(f, "expression"),
            ArgClass::Retrieval => write!(f, "retrieval"),
            ArgClass::FreeArgument => write!(f, "arguments"),
            ArgClass::Test => write!(f, "test"),
        }
    }
}
