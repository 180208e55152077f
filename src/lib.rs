pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod processor;
pub mod writer;

use anyhow::{Context, bail};
use log::{error, info};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::writer::scad::EmitOptions;

/// Convert every input named on the command line.
///
/// A failing input is logged and skipped; the others are still written.
/// Logging is not initialised here, that is up to the binary.
pub fn run(args: &cli::Cli) -> anyhow::Result<()> {
    if args.out.is_some() && args.inputs.len() > 1 {
        bail!("--out names a single file but {} inputs were given", args.inputs.len());
    }

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let options = EmitOptions::from(config.with_overrides(args));

    let mut failed = 0;
    for input in &args.inputs {
        match convert_file(input, args, &options) {
            Ok(out) => info!("{} -> {}", input.display(), out.display()),
            Err(e) => {
                error!("{}: {e:#}", input.display());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} inputs failed", args.inputs.len());
    }
    Ok(())
}

fn convert_file(input: &Path, args: &cli::Cli, options: &EmitOptions) -> anyhow::Result<PathBuf> {
    // 1. ── Load ───────────────────────────────────────────────────────
    let svg = loader::load_file(input).with_context(|| format!("Reading {}", input.display()))?;

    // 2. ── Process ────────────────────────────────────────────────────
    if args.dump_ast {
        let docs = processor::resolve_all(&svg).with_context(|| "Resolving path data")?;
        println!("{}", serde_json::to_string_pretty(&docs)?);
    }
    let emitted = processor::convert(&svg, options).with_context(|| "Generating OpenSCAD")?;

    // 3. ── Write output ───────────────────────────────────────────────
    let out = writer::file::output_path(input, args.out_dir.as_deref(), args.out.as_deref());
    writer::file::write_atomic(&out, emitted.text.as_bytes())
        .with_context(|| format!("Writing {}", out.display()))?;

    Ok(out)
}
