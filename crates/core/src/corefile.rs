//! Exported core-file structures
//!
//! After a successful run the generator hands the host a description of
//! what it produced: a named fileset listing each staged output file
//! with its attributes, and a default target referencing that fileset.
//! The description is written as a core file (a `CAPI=2:` header line
//! followed by a YAML document) in the generator's working directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Result;

/// Name of the fileset the generator exports its outputs under.
pub const GENERATED_FILESET: &str = "generated_files";

const DEFAULT_TARGET: &str = "default";
const DEFAULT_CORE_NAME: &str = "::generated:0";
const CORE_FILE_NAME: &str = "generated.core";
const CAPI_HEADER: &str = "CAPI=2:";

/// An ordered collection of output files with per-file attributes.
///
/// Each entry is a single-key mapping from the file's basename to its
/// attribute mapping, preserving the declaration order of the
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fileset {
    pub files: Vec<serde_yaml::Mapping>,
}

impl Fileset {
    pub fn push(&mut self, basename: &str, attributes: serde_yaml::Mapping) {
        let mut entry = serde_yaml::Mapping::new();
        entry.insert(
            serde_yaml::Value::String(basename.to_string()),
            serde_yaml::Value::Mapping(attributes),
        );
        self.files.push(entry);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A named reference to one or more filesets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub filesets: Vec<String>,
}

/// The complete outbound description handed to the host build system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreFile {
    pub name: String,
    pub filesets: BTreeMap<String, Fileset>,
    pub targets: BTreeMap<String, Target>,
}

impl CoreFile {
    /// Assemble the outbound description: the `generated_files` fileset
    /// (possibly empty) and a default target referencing it by name.
    pub fn new(vlnv: Option<&str>, generated: Fileset) -> Self {
        let mut filesets = BTreeMap::new();
        filesets.insert(GENERATED_FILESET.to_string(), generated);

        let mut targets = BTreeMap::new();
        targets.insert(
            DEFAULT_TARGET.to_string(),
            Target {
                filesets: vec![GENERATED_FILESET.to_string()],
            },
        );

        Self {
            name: vlnv.unwrap_or(DEFAULT_CORE_NAME).to_string(),
            filesets,
            targets,
        }
    }

    /// The exported fileset's entries, in declaration order.
    pub fn generated_files(&self) -> &[serde_yaml::Mapping] {
        self.filesets
            .get(GENERATED_FILESET)
            .map(|fs| fs.files.as_slice())
            .unwrap_or(&[])
    }

    /// Write the core file into `dir` and return its path.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CORE_FILE_NAME);
        let body = serde_yaml::to_string(self)?;
        std::fs::write(&path, format!("{CAPI_HEADER}\n{body}"))?;
        info!(path = %path.display(), files = self.generated_files().len(), "core file written");
        Ok(path)
    }
}
