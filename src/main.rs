//! PRGKit command line
//!
//! The reference presentation layer over the analysis core: validates
//! input, runs parse -> analyze, prints the report, writes the
//! annotated copy, and persists the last-used G-factor. All policy
//! lives in the library crates; this binary is glue.

use std::path::PathBuf;

use anyhow::{bail, Context};
use prgkit::{
    annotated_path, create_annotated_prg_file, default_config_path, generate_analysis_report,
    init_logging, parse_prg_file, run_path_stress_analysis, Config,
};
use tracing::warn;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let Some(path_arg) = args.next() else {
        eprintln!("Usage: prgkit <file.prg> [g-factor]");
        eprintln!();
        eprintln!("Analyzes the program's curved segments against the G-factor");
        eprintln!("(default: last used, initially 0.5) and writes a speed-");
        eprintln!("corrected copy as <file>_annotated.prg.");
        std::process::exit(2);
    };
    let source = PathBuf::from(path_arg);

    // Input validation happens before the pipeline runs.
    if !source.is_file() {
        bail!("No such file: {}", source.display());
    }

    let config_path = default_config_path();
    let mut config = Config::load_or_default(&config_path);

    let g_factor = match args.next() {
        Some(text) => {
            let value: f64 = text
                .parse()
                .with_context(|| format!("Invalid G-factor '{}'", text))?;
            if value <= 0.0 || !value.is_finite() {
                bail!("G-factor must be a positive number, got {}", value);
            }
            value
        }
        None => config.analysis.g_factor,
    };

    let segments = parse_prg_file(&source)?;
    if segments.is_empty() {
        println!("No motion segments could be parsed from {}.", source.display());
        println!("Nothing to analyze.");
        return Ok(());
    }

    let result = run_path_stress_analysis(&segments, g_factor)?;
    print!("{}", generate_analysis_report(&result, g_factor));

    if result.limiting_speed.is_some() {
        let destination = annotated_path(&source);
        create_annotated_prg_file(&source, &destination, &result)
            .context("Analysis succeeded but saving the annotated file failed")?;
        println!();
        println!("Annotated file saved as: {}", destination.display());
    } else {
        println!();
        println!("No annotated file written: the program has no curvature constraint.");
    }

    config.analysis.g_factor = g_factor;
    if let Err(err) = config.save_to_file(&config_path) {
        warn!(error = %err, "could not persist the last-used G-factor");
    }

    Ok(())
}
