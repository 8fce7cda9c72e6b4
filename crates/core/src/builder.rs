//! Argument list builder: orders encoded arguments for the external grammar.
//!
//! Every argument is routed by its [`ArgClass`]: typed classes go through the
//! [`NameCodec`], free-form classes (`expression`, `retrieval`, `arguments`,
//! `test`) are encoded here directly. The encoded groups are then sorted by
//! class rank, ties broken by their text, and flattened into the final token
//! list. Tokens produced by one range argument stay together in series order.

use dmscript_tables::{ArgClass, ArgValue, Encoding};

use crate::Arguments;
use crate::codec::NameCodec;
use crate::error::EncodeError;

/// The tokens produced by a single argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArg {
    /// Identifier the tokens came from.
    pub identifier: String,
    /// Class of the argument, which fixes its position in the command.
    pub class: ArgClass,
    /// Tokens in emission order.
    pub tokens: Vec<String>,
}

impl EncodedArg {
    fn sort_key(&self) -> (u8, String) {
        (self.class.rank(), self.tokens.join(" "))
    }
}

/// Encode one argument.
pub fn encode_argument(
    codec: &NameCodec,
    identifier: &str,
    value: &ArgValue,
) -> Result<EncodedArg, EncodeError> {
    let class = ArgClass::classify(identifier).ok_or_else(|| EncodeError::InvalidSuffix {
        identifier: identifier.to_string(),
    })?;

    let tokens = match class.encoding() {
        Encoding::Typed { .. } => codec.encode(identifier, value)?,
        Encoding::Block { terminator } => {
            let mut tokens = free_form_values(identifier, value, |v| v.render())?;
            tokens.push(terminator.to_string());
            tokens
        }
        Encoding::Quoted => free_form_values(identifier, value, |v| v.render().map(quote))?,
        Encoding::Passthrough => free_form_values(identifier, value, |v| {
            if v.is_number() {
                v.render()
            } else {
                v.render().map(quote)
            }
        })?,
    };

    Ok(EncodedArg {
        identifier: identifier.to_string(),
        class,
        tokens,
    })
}

/// Build the ordered token list with the default codec.
pub fn build(args: &Arguments) -> Result<Vec<String>, EncodeError> {
    build_with(&NameCodec::default(), args)
}

/// Build the ordered token list.
///
/// Fails on the first argument that cannot be encoded; nothing is returned
/// for the others.
pub fn build_with(codec: &NameCodec, args: &Arguments) -> Result<Vec<String>, EncodeError> {
    let mut encoded = args
        .iter()
        .map(|(name, value)| encode_argument(codec, name, value))
        .collect::<Result<Vec<_>, _>>()?;

    encoded.sort_by_cached_key(EncodedArg::sort_key);

    let tokens: Vec<String> = encoded.into_iter().flat_map(|e| e.tokens).collect();
    tracing::debug!(arguments = %tokens.join(" "), "sorted arguments");
    Ok(tokens)
}

/// Wrap `text` in single quotes.
pub fn quote(text: String) -> String {
    format!("'{text}'")
}

/// Render a string or a list of scalars for a free-form class.
fn free_form_values<F>(
    identifier: &str,
    value: &ArgValue,
    render: F,
) -> Result<Vec<String>, EncodeError>
where
    F: Fn(&ArgValue) -> Option<String>,
{
    let mismatch = |found: &ArgValue| EncodeError::TypeMismatch {
        identifier: identifier.to_string(),
        found: found.kind(),
        expected: "a scalar or a list of scalars",
    };

    match value {
        ArgValue::List(items) => items
            .iter()
            .map(|item| render(item).ok_or_else(|| mismatch(item)))
            .collect(),
        v => render(v).map(|s| vec![s]).ok_or_else(|| mismatch(v)),
    }
}
