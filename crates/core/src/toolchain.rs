//! External configure/build toolchain driver
//!
//! Owns the build working directory and drives the two-phase native
//! build: one configure invocation, then one build invocation per
//! requested target. Both block until the child exits; the generator
//! issues no overlapping invocations of its own. Output is captured and
//! logged on failure so the host's log carries the tool's diagnostics.
//!
//! Failure is fatal and fail-fast: the first non-zero exit stops the
//! run, carrying the child's own status code so the host sees it.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error, info};

use crate::error::GeneratorError;
use crate::Result;

const CONFIGURE_PROGRAM: &str = "cmake";
const BUILD_PROGRAM: &str = "make";

/// Driver for the external configure+build toolchain.
#[derive(Debug, Clone)]
pub struct Toolchain {
    build_dir: PathBuf,
    configure_program: String,
    build_program: String,
}

impl Toolchain {
    pub fn new(build_dir: PathBuf) -> Self {
        Self::with_programs(build_dir, CONFIGURE_PROGRAM, BUILD_PROGRAM)
    }

    /// Construct a driver with alternate program names. Used by tests to
    /// substitute recording stubs for the real tools.
    pub fn with_programs(build_dir: PathBuf, configure: &str, build: &str) -> Self {
        Self {
            build_dir,
            configure_program: configure.to_string(),
            build_program: build.to_string(),
        }
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Create the build directory, including parents. Idempotent: an
    /// existing directory is not an error.
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.build_dir)?;
        debug!(dir = %self.build_dir.display(), "build directory ready");
        Ok(())
    }

    /// Run the configure step: `cmake .. <args...>` in the build
    /// directory. Arguments must already be placeholder-expanded.
    pub fn configure(&self, args: &[String]) -> Result<()> {
        let mut argv: Vec<&str> = vec![".."];
        argv.extend(args.iter().map(String::as_str));
        self.run(&self.configure_program, &argv)
    }

    /// Run the build step for one target: `make [target] -j <jobs>` in
    /// the build directory. An empty target name means the default
    /// target and passes no target argument.
    pub fn build(&self, target: &str, jobs: usize) -> Result<()> {
        let jobs = jobs.to_string();
        let mut argv: Vec<&str> = Vec::new();
        if !target.is_empty() {
            argv.push(target);
        }
        argv.push("-j");
        argv.push(&jobs);
        self.run(&self.build_program, &argv)
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        info!(program = %program, args = ?args, cwd = %self.build_dir.display(), "invoking toolchain");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.build_dir)
            .output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            if !stdout.is_empty() {
                error!(program = %program, output = %stdout, "toolchain stdout");
            }
            if !stderr.is_empty() {
                error!(program = %program, output = %stderr, "toolchain stderr");
            }
            return Err(GeneratorError::Tool {
                program: program.to_string(),
                code: output.status.code(),
            });
        }

        if !stdout.is_empty() {
            debug!(program = %program, output = %stdout, "toolchain output");
        }

        Ok(())
    }
}
