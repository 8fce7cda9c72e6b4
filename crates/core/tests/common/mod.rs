//! Shared test helpers for `dmscript_core` integration tests.

#![allow(unreachable_pub)]

use std::sync::LazyLock;

use dmscript_core::Arguments;
use dmscript_tables::{ArgValue, Catalog, load_catalog_from_str};

/// Catalogue used across tests, parsed once per test binary.
pub static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    load_catalog_from_str(CATALOG_JSON).unwrap_or_else(|e| panic!("bad test catalog: {e}"))
});

const CATALOG_JSON: &str = r#"{
    "commands": [
        {
            "name": "COPY",
            "description": "Copy a file, optionally with retrieval criteria",
            "params": [
                { "name": "in_i", "required": true },
                { "name": "out_o", "required": true },
                { "name": "retrieval", "default": null },
                { "name": "some_p", "default": 0 }
            ]
        },
        {
            "name": "STATS",
            "params": [
                { "name": "in_i", "required": true },
                { "name": "f1_to_10_f", "default": null },
                { "name": "tol_p", "default": 100.0 },
                { "name": "print_p", "default": 1 }
            ]
        },
        {
            "name": "EXTRA",
            "params": [
                { "name": "in_i", "required": true },
                { "name": "out_o", "required": true },
                { "name": "expression", "required": true }
            ]
        }
    ]
}"#;

/// Build call arguments from pairs.
#[allow(dead_code)]
pub fn args(pairs: &[(&str, ArgValue)]) -> Arguments {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}
