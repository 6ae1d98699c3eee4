//! Generator pipeline
//!
//! Ties the pieces together in the fixed order the run contract
//! requires: validate configuration, prepare the build directory, expand
//! configure arguments, configure, build each target, export artifacts.
//! Every step returns `Result`, so a host (or a test) can construct a
//! generator, run it, and inspect the outcome without any process-level
//! side effects.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::GeneratorInput;
use crate::corefile::CoreFile;
use crate::export::Exporter;
use crate::jobs::detect_jobs;
use crate::resolver::Resolver;
use crate::toolchain::Toolchain;
use crate::Result;

/// One generator run: read-only input, a computed build directory, and
/// an output directory the staged artifacts and core file land in.
#[derive(Debug)]
pub struct Generator {
    input: GeneratorInput,
    output_dir: PathBuf,
    toolchain: Toolchain,
    jobs: usize,
}

impl Generator {
    /// Construct a generator for `input`, staging output into
    /// `output_dir` (the process working directory in production).
    ///
    /// The build directory is `files_root / build`; build concurrency is
    /// detected from the environment at construction time.
    pub fn new(input: GeneratorInput, output_dir: PathBuf) -> Self {
        let build_dir = input.files_root.join(&input.parameters.build);
        Self {
            toolchain: Toolchain::new(build_dir),
            jobs: detect_jobs(),
            input,
            output_dir,
        }
    }

    /// Substitute the toolchain program names. Used by tests and by
    /// hosts with non-standard tool locations.
    pub fn with_programs(mut self, configure: &str, build: &str) -> Self {
        self.toolchain =
            Toolchain::with_programs(self.toolchain.build_dir().to_path_buf(), configure, build);
        self
    }

    /// Override the detected build concurrency.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn build_dir(&self) -> &Path {
        self.toolchain.build_dir()
    }

    /// Execute the full pipeline and return the outbound core-file
    /// description. Any failure aborts the run with nothing emitted.
    pub fn run(&self) -> Result<CoreFile> {
        // Configuration-shape violations fail before anything runs.
        let rules = self.input.parameters.file_rules()?;

        self.toolchain.prepare()?;

        let resolver = Resolver::new(&self.input.files_root, self.toolchain.build_dir());
        let cmake_args = self
            .input
            .parameters
            .cmake_args
            .iter()
            .map(|arg| resolver.resolve(arg))
            .collect::<Result<Vec<_>>>()?;

        self.toolchain.configure(&cmake_args)?;

        info!(jobs = self.jobs, targets = self.input.parameters.make_targets.len(), "building");
        for target in &self.input.parameters.make_targets {
            self.toolchain.build(target, self.jobs)?;
        }

        let exporter = Exporter::new(self.input.files_root.clone(), self.output_dir.clone());
        let fileset = exporter.export(&rules)?;

        Ok(CoreFile::new(self.input.vlnv.as_deref(), fileset))
    }
}
