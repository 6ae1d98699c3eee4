//! Error types for cmakegen-core

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running the generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The configuration violates the generator's input contract.
    /// Detected before any external process is started.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An external toolchain process exited with a non-zero status.
    /// The exit code (if the process was not killed by a signal) is
    /// propagated so the host sees the tool's own status.
    #[error("{program} failed with exit code {code:?}")]
    Tool { program: String, code: Option<i32> },

    /// A declared output file was not present after a successful build.
    #[error("declared output file does not exist: {0}")]
    MissingArtifact(PathBuf),

    /// A placeholder's resolution strategy could not produce a value.
    /// This indicates a defect in the resolver's fixed mapping, not a
    /// problem with user input.
    #[error("placeholder resolution failed: {0}")]
    Resolve(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl GeneratorError {
    /// The exit code the generator process should terminate with.
    ///
    /// Toolchain failures propagate the external tool's own status code;
    /// everything else maps to a generic failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            GeneratorError::Tool { code: Some(code), .. } => *code,
            _ => 1,
        }
    }
}
