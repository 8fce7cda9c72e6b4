mod render;

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dmscript_core::{
    Arguments, FileSpec, ImportOptions, Invoker, NameCodec, Resolution, Table, import_command,
    xrun,
};
use dmscript_profile::{Profile, load_profile_from_str};
use dmscript_session::{ScriptFile, Session, SessionConfig};
use dmscript_tables::{ArgClass, ArgValue, load_catalog_from_str};
use tracing_subscriber::EnvFilter;

use crate::render::{Format, decoded_line, spec_table};

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "DMS_LOG";

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "dms",
    version,
    about = "dmscript: translate named-parameter calls into modelling application commands"
)]
struct Cli {
    /// Output mode: "pretty" for plain text, "json" for machine-readable
    /// JSON. Defaults to "pretty" when stdout is a TTY, "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Session profile (JSON).
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    // ── Command synthesis ───────────────────────────────────────────
    /// Build a command string from named arguments.
    Encode {
        /// Command name (e.g. COPY).
        command: String,
        /// Command catalogue (JSON). Without one every argument counts as
        /// changed and nothing is checked against a signature.
        #[arg(long)]
        catalog: Option<String>,
        /// Argument as NAME=VALUE. VALUE is read as JSON when it parses
        /// (numbers, lists, quoted strings), else as plain text.
        #[arg(long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,
        /// Path to a JSON object of arguments. `--arg` entries override it.
        #[arg(long)]
        args_json: Option<String>,
        /// Append the command to this macro script instead of printing it.
        #[arg(long)]
        submit_to: Option<String>,
    },

    /// Build the file-import command for a CSV file.
    Inpfil {
        /// Source CSV file with a header row.
        csv: String,
        /// Name of the file to create.
        #[arg(long)]
        out: String,
        /// Field definition (JSON array or CSV with the five attribute
        /// columns). Inferred from the data when omitted.
        #[arg(long)]
        spec: Option<String>,
        /// Append the command to this macro script instead of printing it.
        #[arg(long)]
        submit_to: Option<String>,
    },

    /// Build the command that runs a macro.
    Xrun {
        /// Macro file.
        macro_file: String,
        /// Macro name inside the file.
        name: String,
        /// Append the command to this macro script instead of printing it.
        #[arg(long)]
        submit_to: Option<String>,
    },

    // ── Reference / informational ───────────────────────────────────
    /// Infer and print the file specification of a CSV file.
    Filespec {
        /// Source CSV file with a header row.
        csv: String,
    },

    /// Show how parameter identifiers translate.
    Explain {
        /// Identifiers such as `in_i`, `f1_to_10_f` or `expression`.
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());
    let profile = load_profile(cli.profile.as_deref())?;
    init_logging(&profile)?;

    match cli.cmd {
        Cmd::Encode {
            command,
            catalog,
            args,
            args_json,
            submit_to,
        } => cmd_encode(
            &command,
            catalog.as_deref(),
            &args,
            args_json.as_deref(),
            submit_to.as_deref(),
            &profile,
            format,
        )?,
        Cmd::Inpfil {
            csv,
            out,
            spec,
            submit_to,
        } => cmd_inpfil(
            &csv,
            &out,
            spec.as_deref(),
            submit_to.as_deref(),
            &profile,
            format,
        )?,
        Cmd::Xrun {
            macro_file,
            name,
            submit_to,
        } => emit(&xrun(&macro_file, &name), submit_to.as_deref(), &profile, format)?,
        Cmd::Filespec { csv } => cmd_filespec(&csv, format)?,
        Cmd::Explain { identifiers } => cmd_explain(&identifiers, &profile, format)?,
    }

    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_encode(
    command: &str,
    catalog_path: Option<&str>,
    args: &[String],
    args_json: Option<&str>,
    submit_to: Option<&str>,
    profile: &Profile,
    format: Format,
) -> Result<()> {
    let call = collect_arguments(args, args_json)?;
    tracing::debug!(command, arguments = call.len(), "encoding call");
    let invoker = Invoker::from_profile(profile);

    let text = match catalog_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog '{path}'"))?;
            let catalog = load_catalog_from_str(&json)
                .with_context(|| format!("failed to load catalog '{path}'"))?;
            let Some(signature) = catalog.get(command) else {
                bail!("command '{command}' is not in catalog '{path}'");
            };
            invoker.invoke(signature, &call)?
        }
        None => invoker.invoke_unchecked(command, &call)?,
    };

    emit(&text, submit_to, profile, format)
}

fn cmd_inpfil(
    csv: &str,
    out: &str,
    spec_path: Option<&str>,
    submit_to: Option<&str>,
    profile: &Profile,
    format: Format,
) -> Result<()> {
    let table = Table::from_path(csv)?;
    tracing::debug!(csv, columns = table.columns().len(), rows = table.row_count(), "table read");
    let spec = spec_path.map(read_spec).transpose()?;
    let text = import_command(
        csv,
        out,
        &table,
        spec.as_ref(),
        &ImportOptions::from_profile(profile),
    )?;
    emit(&text, submit_to, profile, format)
}

fn cmd_filespec(csv: &str, format: Format) -> Result<()> {
    let spec = FileSpec::from_text(csv)?;
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&spec.to_records())?),
        Format::Pretty => println!("{}", spec_table(&spec)),
    }
    Ok(())
}

fn cmd_explain(identifiers: &[String], profile: &Profile, format: Format) -> Result<()> {
    let codec = NameCodec::from_profile(profile);
    let mut entries = Vec::with_capacity(identifiers.len());

    for id in identifiers {
        if let Some(class) = ArgClass::from_reserved_name(id) {
            match format {
                Format::Json => entries.push(serde_json::json!({
                    "identifier": id,
                    "class": class,
                    "strategy": "free_form",
                })),
                Format::Pretty => println!("{id}: {class} (free-form)"),
            }
            continue;
        }

        let decoded = codec.decode(id)?;
        match format {
            Format::Json => {
                let range = match &decoded.resolution {
                    Resolution::Range(r) => serde_json::json!({
                        "low": r.low,
                        "high": r.high,
                        "capacity": r.capacity(),
                    }),
                    _ => serde_json::Value::Null,
                };
                entries.push(serde_json::json!({
                    "identifier": decoded.identifier,
                    "class": decoded.class,
                    "marker": decoded.marker.to_string(),
                    "strategy": decoded.resolution.strategy(),
                    "external_name": decoded.resolution.external_name(),
                    "range": range,
                }));
            }
            Format::Pretty => println!("{}", decoded_line(&decoded)),
        }
    }

    if format == Format::Json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Print a finished command, or hand it to a script session.
fn emit(command: &str, submit_to: Option<&str>, profile: &Profile, format: Format) -> Result<()> {
    let Some(script_path) = submit_to else {
        match format {
            Format::Json => {
                let out = serde_json::json!({ "command": command });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            Format::Pretty => println!("{command}"),
        }
        return Ok(());
    };

    let script = ScriptFile::open(script_path)?;
    let config = SessionConfig::from_profile(profile);
    let dry_run = config.dry_run;
    let mut session = Session::new(script, config);
    if format == Format::Pretty {
        session = session.with_echo(io::stdout());
    }
    session.run(command)?;

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "command": command,
                "script": script_path,
                "dry_run": dry_run,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            if !dry_run {
                eprintln!("submitted to {script_path}");
            }
        }
    }
    Ok(())
}

/// Merge `--args-json` and `--arg` entries.
fn collect_arguments(args: &[String], args_json: Option<&str>) -> Result<Arguments> {
    let mut call = match args_json {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read arguments '{path}'"))?;
            serde_json::from_str::<Arguments>(&json)
                .with_context(|| format!("'{path}' is not a JSON object of arguments"))?
        }
        None => Arguments::new(),
    };

    for arg in args {
        let Some((name, value)) = arg.split_once('=') else {
            bail!("argument '{arg}' is not NAME=VALUE");
        };
        call.insert(name.trim().to_string(), ArgValue::from_literal(value));
    }
    Ok(call)
}

/// Read a field definition, JSON by extension, CSV otherwise.
fn read_spec(path: &str) -> Result<FileSpec> {
    let is_json = Path::new(path)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let spec = if is_json {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read field definition '{path}'"))?;
        FileSpec::from_json_str(&json)?
    } else {
        let file = fs::File::open(path)
            .with_context(|| format!("failed to read field definition '{path}'"))?;
        FileSpec::from_definition_csv(file)?
    };
    Ok(spec)
}

fn load_profile(path: Option<&str>) -> Result<Profile> {
    let Some(path) = path else {
        return Ok(Profile::default());
    };
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read profile '{path}'"))?;
    load_profile_from_str(&json).with_context(|| format!("invalid profile '{path}'"))
}

/// Install the fmt subscriber: the profile's log file when set, else stderr.
fn init_logging(profile: &Profile) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    // A subscriber may already be installed; keep it.
    match &profile.log_file {
        Some(path) => {
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path.display()))?;
            let _ = builder.with_writer(Mutex::new(file)).try_init();
        }
        None => {
            let _ = builder.with_writer(io::stderr).try_init();
        }
    }
    Ok(())
}
