//! cmakegen - CMake build-step generator
//!
//! Invoked by the host build system with a single argument: the path to
//! a YAML generator input file. Runs the configure+build toolchain for
//! the described project and writes a core file (plus staged copies of
//! the declared output files) into the current working directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use cmakegen_core::{Generator, GeneratorInput};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// CMake build-step generator
#[derive(Parser)]
#[command(name = "cmakegen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the generator input file supplied by the host
    input: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();

    let input = match GeneratorInput::from_file(&cli.input) {
        Ok(input) => input,
        Err(e) => {
            error!(path = %cli.input.display(), "failed to read generator input: {e}");
            std::process::exit(1);
        }
    };

    let output_dir = std::env::current_dir().context("cannot determine working directory")?;
    let generator = Generator::new(input, output_dir.clone());

    // A toolchain failure terminates with the external tool's own exit
    // code; every other failure is a generator error and exits 1.
    let core = match generator.run() {
        Ok(core) => core,
        Err(e) => {
            error!("generator run failed: {e}");
            std::process::exit(e.exit_code());
        }
    };

    if let Err(e) = core.write(&output_dir) {
        error!("failed to write core file: {e}");
        std::process::exit(e.exit_code());
    }

    Ok(())
}
