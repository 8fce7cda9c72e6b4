//! Output rendering for the `dms` binary.
//!
//! Every subcommand produces either plain text for a terminal or a single
//! JSON document for scripts. The choice follows `--output`, falling back to
//! TTY detection.

use std::io::{self, IsTerminal};

use dmscript_core::{Decoded, FileSpec, SPEC_COLUMNS};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Plain text.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty for a terminal and JSON for pipes.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── File specifications ─────────────────────────────────────────────────

/// Column-aligned table of a specification, header first.
pub(crate) fn spec_table(spec: &FileSpec) -> String {
    let rows: Vec<[String; 5]> = spec.fields().iter().map(|f| f.attributes()).collect();

    let mut widths = SPEC_COLUMNS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: &[&str]| {
        cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = line(&SPEC_COLUMNS);
    for row in &rows {
        out.push('\n');
        out.push_str(&line(&row.each_ref().map(String::as_str)));
    }
    out
}

// ── Identifiers ─────────────────────────────────────────────────────────

/// One line per decoded identifier.
pub(crate) fn decoded_line(d: &Decoded) -> String {
    let target = match d.resolution.external_name() {
        Some(name) => format!("{}{name}", d.marker),
        None => match &d.resolution {
            dmscript_core::Resolution::Range(r) => format!(
                "{m}{}..{m}{} (up to {} values)",
                r.name(0),
                r.name(r.capacity().saturating_sub(1)),
                r.capacity(),
                m = d.marker
            ),
            _ => String::new(),
        },
    };
    format!(
        "{}: {} ({}) -> {target}",
        d.identifier,
        d.class,
        d.resolution.strategy()
    )
}
