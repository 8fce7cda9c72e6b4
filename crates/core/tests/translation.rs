//! End-to-end translation properties: codec, filter, builder and synthesizer
//! working together.

mod common;

use common::{CATALOG, args};
use dmscript_core::{
    EncodeError, Invoker, NameCodec, Resolution, build, select_changed, synthesize,
};
use dmscript_tables::{
    ArgClass, ArgValue, CommandSignature, IRREGULAR_NAMES, ParamSpec, load_catalog_from_str,
};

// ── Name codec ──────────────────────────────────────────────────────────

#[test]
fn every_irregular_stem_decodes_to_its_table_name() {
    let codec = NameCodec::new();
    for (stem, name) in IRREGULAR_NAMES {
        for class in ArgClass::ALL.into_iter().filter(|c| c.is_typed()) {
            let suffix = class.suffix().unwrap();
            let id = format!("{stem}{suffix}");
            let decoded = codec.decode(&id).unwrap();
            assert_eq!(
                decoded.resolution,
                Resolution::Irregular((*name).to_string()),
                "{id}"
            );
            let tokens = codec.encode(&id, &"v".into()).unwrap();
            assert_eq!(tokens, [format!("{}{name}=v", class.marker().unwrap())]);
        }
    }
}

#[test]
fn range_expansion_numbers_from_low() {
    let codec = NameCodec::new();
    for (low, high) in [(1_u32, 10_u32), (3, 5), (0, 2), (7, 7)] {
        let id = format!("f{low}_to_{high}_f");
        let capacity = (high - low + 1) as usize;
        for k in 1..=capacity {
            let values: Vec<String> = (0..k).map(|i| format!("V{i}")).collect();
            let tokens = codec.encode(&id, &values.into()).unwrap();
            let expected: Vec<String> = (0..k)
                .map(|i| format!("*F{}=V{i}", low as usize + i))
                .collect();
            assert_eq!(tokens, expected, "{id} with {k} values");
        }
    }
}

#[test]
fn range_overflow_is_rejected() {
    let codec = NameCodec::new();
    for (low, high) in [(1_u32, 10_u32), (3, 5), (7, 7)] {
        let id = format!("f{low}_to_{high}_f");
        let too_many = (high - low + 2) as usize;
        let values: Vec<i64> = (0..too_many as i64).collect();
        let err = codec.encode(&id, &values.into()).unwrap_err();
        assert!(
            matches!(err, EncodeError::ArgumentOverflow { len, max, .. } if len == too_many && max == too_many - 1),
            "{id}: {err:?}"
        );
    }
}

// ── Default-diff filter ─────────────────────────────────────────────────

#[test]
fn float_tolerance_boundary() {
    let stats = CATALOG.get("STATS").unwrap();
    // Default is 100.0, so the threshold is an absolute difference of 0.1.
    for (value, changed) in [
        (100.0, false),
        (100.05, false),
        (99.95, false),
        (100.099, false),
        (100.11, true),
        (99.8, true),
        (150.0, true),
    ] {
        let call = args(&[("in_i", "A".into()), ("tol_p", value.into())]);
        let out = select_changed(&call, stats);
        assert_eq!(out.contains_key("tol_p"), changed, "value {value}");
    }
}

#[test]
fn float_tolerance_exact_ratio_is_a_change() {
    let sig = CommandSignature::new("DEMO").param(ParamSpec::with_default("tol_p", 1000.0));
    for (value, changed) in [(1000.999, false), (1001.0, true), (999.0, true)] {
        let call = args(&[("tol_p", value.into())]);
        let out = select_changed(&call, &sig);
        assert_eq!(out.contains_key("tol_p"), changed, "value {value}");
    }
}

// ── Builder ─────────────────────────────────────────────────────────────

#[test]
fn ordering_is_deterministic() {
    let call = args(&[
        ("zeta_p", 1.into()),
        ("alpha_p", 2.into()),
        ("grade_f", "AU".into()),
        ("f1_to_3_f", vec!["X", "Y"].into()),
        ("out_o", "B".into()),
        ("in_i", "A".into()),
        ("retrieval", "AU>0".into()),
    ]);
    let first = build(&call).unwrap();
    assert_eq!(
        first,
        [
            "&IN=A",
            "&OUT=B",
            "*F1=X",
            "*F2=Y",
            "*GRADE=AU",
            "@ALPHA=2",
            "@ZETA=1",
            "'AU>0'"
        ]
    );
    for _ in 0..20 {
        assert_eq!(build(&call).unwrap(), first);
    }
}

// ── Full pipeline ───────────────────────────────────────────────────────

#[test]
fn copy_scenario() {
    let call = args(&[
        ("in_i", "ORE".into()),
        ("out_o", "ORE2".into()),
        ("some_p", 5.into()),
    ]);
    let cmd = Invoker::default()
        .invoke(CATALOG.get("COPY").unwrap(), &call)
        .unwrap();
    assert_eq!(cmd, "COPY &IN=ORE &OUT=ORE2 @SOME=5");
    assert_eq!(cmd.matches('&').count(), 2);
    assert_eq!(cmd.matches('@').count(), 1);
}

#[test]
fn stats_with_range_and_defaults() {
    let call = args(&[
        ("in_i", "ASSAYS".into()),
        ("f1_to_10_f", vec!["AU", "CU"].into()),
        ("tol_p", 100.0.into()),
        ("print_p", 0.into()),
    ]);
    let cmd = Invoker::default()
        .invoke(CATALOG.get("stats").unwrap(), &call)
        .unwrap();
    assert_eq!(cmd, "STATS &IN=ASSAYS *F1=AU *F2=CU @PRINT=0");
}

#[test]
fn expression_block_terminated() {
    let call = args(&[
        ("in_i", "A".into()),
        ("out_o", "B".into()),
        ("expression", vec!["AU2=AU*2", "CU2=CU*2"].into()),
    ]);
    let cmd = Invoker::default()
        .invoke(CATALOG.get("EXTRA").unwrap(), &call)
        .unwrap();
    assert_eq!(cmd, "EXTRA &IN=A &OUT=B AU2=AU*2 CU2=CU*2 GO");
}

#[test]
fn parameter_without_default_is_required() {
    let catalog = load_catalog_from_str(
        r#"{ "commands": [ { "name": "COPY", "params": [
            { "name": "in_i" },
            { "name": "out_o" }
        ] } ] }"#,
    )
    .unwrap();
    let call = args(&[("out_o", "B".into())]);
    let err = Invoker::default()
        .invoke(catalog.get("COPY").unwrap(), &call)
        .unwrap_err();
    assert!(
        matches!(&err, EncodeError::MissingRequiredArgument { identifier, .. } if identifier == "in_i"),
        "{err:?}"
    );
}

#[test]
fn failed_translation_produces_no_command() {
    let call = args(&[
        ("in_i", "A".into()),
        ("out_o", "B".into()),
        ("some_p", ArgValue::Table(Default::default())),
    ]);
    let err = Invoker::default()
        .invoke(CATALOG.get("COPY").unwrap(), &call)
        .unwrap_err();
    assert!(matches!(err, EncodeError::TypeMismatch { found: "table", .. }));
}

#[test]
fn synthesize_matches_build() {
    let call = args(&[("in_i", "A".into()), ("x_or_y_or_z_f", "EAST".into())]);
    let tokens = build(&call).unwrap();
    assert_eq!(synthesize("SORT", &tokens), "SORT &IN=A *X/Y/Z=EAST");
}
