//! cmakegen-core: core logic for the cmake build-step generator
//!
//! This crate materializes a build directory for a native CMake/Make
//! project, drives the external configure+build toolchain, and re-exports
//! the produced files as a core-file description (a named fileset plus a
//! default target) for the host build system.

mod config;
mod corefile;
mod error;
mod export;
mod generator;
mod jobs;
mod resolver;
mod toolchain;

pub use config::{Config, FileRule, GeneratorInput};
pub use corefile::{CoreFile, Fileset, Target, GENERATED_FILESET};
pub use error::GeneratorError;
pub use export::Exporter;
pub use generator::Generator;
pub use jobs::{detect_jobs, JobPolicy, JOB_SLOTS_VAR};
pub use resolver::Resolver;
pub use toolchain::Toolchain;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
