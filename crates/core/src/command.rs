//! End-to-end invocation: filter → build → synthesize.

use dmscript_profile::Profile;
use dmscript_tables::CommandSignature;

use crate::Arguments;
use crate::builder::build_with;
use crate::codec::NameCodec;
use crate::error::EncodeError;
use crate::filter::{DEFAULT_FLOAT_TOLERANCE, select_changed_with};
use crate::synth::synthesize;

/// Turns calls against command signatures into command strings.
///
/// Holds only read-only configuration; one invoker can serve any number of
/// calls.
#[derive(Debug, Clone)]
pub struct Invoker {
    codec: NameCodec,
    tolerance: f64,
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new(NameCodec::default(), DEFAULT_FLOAT_TOLERANCE)
    }
}

impl Invoker {
    /// An invoker with an explicit codec and float tolerance.
    pub fn new(codec: NameCodec, tolerance: f64) -> Self {
        Self { codec, tolerance }
    }

    /// An invoker configured from a profile.
    pub fn from_profile(profile: &Profile) -> Self {
        Self::new(NameCodec::from_profile(profile), profile.float_tolerance)
    }

    /// The codec used for typed arguments.
    pub fn codec(&self) -> &NameCodec {
        &self.codec
    }

    /// Build the command string for a call.
    ///
    /// Every supplied argument must be declared by `signature` and every
    /// required parameter must be supplied. Arguments left at their default
    /// are dropped before encoding.
    pub fn invoke(
        &self,
        signature: &CommandSignature,
        call: &Arguments,
    ) -> Result<String, EncodeError> {
        if let Some(name) = call.keys().find(|k| signature.find(k).is_none()) {
            return Err(EncodeError::UnknownArgument {
                command: signature.name.clone(),
                identifier: name.clone(),
            });
        }
        if let Some(param) = signature
            .params
            .iter()
            .find(|p| p.is_required() && !call.contains_key(&p.name))
        {
            return Err(EncodeError::MissingRequiredArgument {
                command: signature.name.clone(),
                identifier: param.name.clone(),
            });
        }

        let changed = select_changed_with(call, signature, self.tolerance);
        let tokens = build_with(&self.codec, &changed)?;
        Ok(synthesize(&signature.name, &tokens))
    }

    /// Build the command string for arguments that have no signature.
    ///
    /// Every argument counts as changed.
    pub fn invoke_unchecked(&self, name: &str, args: &Arguments) -> Result<String, EncodeError> {
        let tokens = build_with(&self.codec, args)?;
        Ok(synthesize(name, &tokens))
    }
}

/// Command that runs macro `name` from `macro_file`.
pub fn xrun(macro_file: &str, name: &str) -> String {
    synthesize("XRUN", &[macro_file, name])
}

#[cfg(test)]
mod tests {
    use super::*;
    use dmscript_tables::{ArgValue, ParamSpec};

    fn copy() -> CommandSignature {
        CommandSignature::new("COPY")
            .param(ParamSpec::required("in_i"))
            .param(ParamSpec::required("out_o"))
            .param(ParamSpec::with_default("retrieval", ArgValue::Null))
            .param(ParamSpec::with_default("some_p", 0))
    }

    fn args(pairs: &[(&str, ArgValue)]) -> Arguments {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn copy_round_trip() {
        let call = args(&[
            ("in_i", "ORE".into()),
            ("out_o", "ORE2".into()),
            ("some_p", 5.into()),
        ]);
        let cmd = Invoker::default().invoke(&copy(), &call).unwrap();
        assert_eq!(cmd, "COPY &IN=ORE &OUT=ORE2 @SOME=5");
    }

    #[test]
    fn defaults_omitted() {
        let call = args(&[
            ("in_i", "ORE".into()),
            ("out_o", "ORE2".into()),
            ("some_p", 0.into()),
            ("retrieval", ArgValue::Null),
        ]);
        let cmd = Invoker::default().invoke(&copy(), &call).unwrap();
        assert_eq!(cmd, "COPY &IN=ORE &OUT=ORE2");
    }

    #[test]
    fn unknown_argument() {
        let call = args(&[
            ("in_i", "ORE".into()),
            ("out_o", "ORE2".into()),
            ("zone_f", "Z".into()),
        ]);
        let err = Invoker::default().invoke(&copy(), &call).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::UnknownArgument { ref identifier, .. } if identifier == "zone_f"
        ));
    }

    #[test]
    fn missing_required() {
        let call = args(&[("in_i", "ORE".into())]);
        let err = Invoker::default().invoke(&copy(), &call).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::MissingRequiredArgument { ref identifier, .. } if identifier == "out_o"
        ));
    }

    #[test]
    fn tolerance_from_invoker() {
        let sig = CommandSignature::new("DEMO").param(ParamSpec::with_default("tol_p", 1.0));
        let call = args(&[("tol_p", 1.005.into())]);
        assert_eq!(Invoker::default().invoke(&sig, &call).unwrap(), "DEMO @TOL=1.005");
        let loose = Invoker::new(NameCodec::new(), 0.01);
        assert_eq!(loose.invoke(&sig, &call).unwrap(), "DEMO");
    }

    #[test]
    fn unchecked_keeps_everything() {
        let call = args(&[("in_i", "A".into()), ("some_p", 0.into())]);
        let cmd = Invoker::default().invoke_unchecked("COPY", &call).unwrap();
        assert_eq!(cmd, "COPY &IN=A @SOME=0");
    }

    #[test]
    fn xrun_command() {
        assert_eq!(xrun("mymacro.mac", "MAIN"), "XRUN mymacro.mac MAIN");
    }
}
