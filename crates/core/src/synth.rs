//! Command synthesizer.

/// Join a command name and its ordered tokens into one command string.
///
/// A command without tokens is just its name.
pub fn synthesize<S: AsRef<str>>(name: &str, tokens: &[S]) -> String {
    let mut out = String::from(name);
    for token in tokens {
        out.push(' ');
        out.push_str(token.as_ref());
    }
    out
}
