//! Artifact validation, registration, and staging
//!
//! Runs only after the toolchain driver has succeeded. Each declared
//! output file is checked for existence under the files root, registered
//! into the `generated_files` fileset under its basename, and copied
//! into the generator's output directory so the host picks it up
//! alongside the core file. A missing file is a fatal mismatch between
//! the declared configuration and the actual build output.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::FileRule;
use crate::corefile::Fileset;
use crate::error::GeneratorError;
use crate::Result;

/// Stages declared output files out of the build tree.
#[derive(Debug, Clone)]
pub struct Exporter {
    files_root: PathBuf,
    output_dir: PathBuf,
}

impl Exporter {
    pub fn new(files_root: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            files_root,
            output_dir,
        }
    }

    /// Validate, register, and copy every declared file, in declaration
    /// order. Fails on the first missing file with nothing emitted.
    pub fn export(&self, rules: &[FileRule]) -> Result<Fileset> {
        let mut fileset = Fileset::default();

        for rule in rules {
            let source = self.files_root.join(&rule.path);
            if !source.exists() {
                return Err(GeneratorError::MissingArtifact(source));
            }

            let basename = rule.basename()?;
            fileset.push(basename, rule.attributes.clone());

            let staged = self.output_dir.join(basename);
            std::fs::copy(&source, &staged)?;
            debug!(from = %source.display(), to = %staged.display(), "artifact staged");
        }

        info!(count = fileset.len(), "artifacts exported");
        Ok(fileset)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
