//! Generator input and configuration model
//!
//! The host build system invokes the generator with a single YAML file
//! describing the run: the files root the core file was loaded from, the
//! identity of the core being generated, and the generator-specific
//! parameters. Everything here is read-only for the lifetime of a run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::GeneratorError;
use crate::Result;

/// The top-level YAML document handed to the generator by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorInput {
    /// Base directory against which all configuration-relative paths
    /// resolve. Supplied by the host as an absolute path.
    pub files_root: PathBuf,

    /// Identity of the core being generated, e.g. `::my-core:1.0`.
    #[serde(default)]
    pub vlnv: Option<String>,

    /// Generator-specific parameters.
    #[serde(default)]
    pub parameters: Config,
}

impl GeneratorInput {
    /// Read and parse a generator input file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let input: GeneratorInput = serde_yaml::from_str(&contents)?;

        if !input.files_root.is_absolute() {
            return Err(GeneratorError::Config(format!(
                "files_root must be an absolute path, got '{}'",
                input.files_root.display()
            )));
        }

        Ok(input)
    }
}

/// Recognized generator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Relative subdirectory name for the build tree.
    #[serde(default = "default_build")]
    pub build: String,

    /// Arguments passed to the configure step, in order. May contain
    /// placeholders (see [`crate::Resolver`]).
    #[serde(default)]
    pub cmake_args: Vec<String>,

    /// Build target names, invoked in order. An empty string means the
    /// default target (no target argument passed to make).
    #[serde(default = "default_make_targets")]
    pub make_targets: Vec<String>,

    /// Declared output files: each entry is a mapping with exactly one
    /// key (a path relative to the files root) whose value is the
    /// attribute mapping to register the file with. Kept raw here and
    /// validated by [`Config::file_rules`] since the host's attribute
    /// schema is open-ended.
    #[serde(default)]
    pub files: Vec<serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build: default_build(),
            cmake_args: Vec::new(),
            make_targets: default_make_targets(),
            files: Vec::new(),
        }
    }
}

fn default_build() -> String {
    "build".to_string()
}

fn default_make_targets() -> Vec<String> {
    vec![String::new()]
}

impl Config {
    /// Validate the `files` entries and convert them to [`FileRule`]s.
    ///
    /// Called before any external process runs, so a malformed entry
    /// fails the run without touching the build directory.
    pub fn file_rules(&self) -> Result<Vec<FileRule>> {
        self.files.iter().map(FileRule::from_value).collect()
    }
}

/// One declared output file: a relative path plus the attributes it is
/// registered with in the exported fileset.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRule {
    pub path: PathBuf,
    pub attributes: serde_yaml::Mapping,
}

impl FileRule {
    /// Parse a single `files` entry.
    ///
    /// Each entry must be a mapping with exactly one key; the key is the
    /// path and the value is the attribute mapping (or null for no
    /// attributes). Anything else is a configuration error.
    fn from_value(value: &serde_yaml::Value) -> Result<Self> {
        let mapping = value.as_mapping().ok_or_else(|| {
            GeneratorError::Config("each files entry must be a mapping".to_string())
        })?;

        if mapping.len() != 1 {
            return Err(GeneratorError::Config(format!(
                "each files entry must be a mapping with a single key, got {} keys",
                mapping.len()
            )));
        }

        let (key, attrs) = mapping
            .iter()
            .next()
            .ok_or_else(|| GeneratorError::Config("empty files entry".to_string()))?;

        let path = key.as_str().ok_or_else(|| {
            GeneratorError::Config(format!("files entry key must be a string path: {:?}", key))
        })?;

        let attributes = match attrs {
            serde_yaml::Value::Mapping(m) => m.clone(),
            serde_yaml::Value::Null => serde_yaml::Mapping::new(),
            other => {
                return Err(GeneratorError::Config(format!(
                    "attributes for '{}' must be a mapping: {:?}",
                    path, other
                )))
            }
        };

        Ok(FileRule {
            path: PathBuf::from(path),
            attributes,
        })
    }

    /// The file's name without its leading directories, as registered in
    /// the exported fileset.
    pub fn basename(&self) -> Result<&str> {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                GeneratorError::Config(format!(
                    "files entry has no usable file name: '{}'",
                    self.path.display()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse_config(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn defaults_applied_to_empty_config() {
        let config = parse_config("{}");
        assert_eq!(config.build, "build");
        assert!(config.cmake_args.is_empty());
        assert_eq!(config.make_targets, vec![String::new()]);
        assert!(config.files.is_empty());
    }

    #[test]
    fn build_override() {
        let config = parse_config("build: out");
        assert_eq!(config.build, "out");
    }

    #[test]
    fn unknown_option_rejected() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str("no_such_option: 1");
        assert!(result.is_err());
    }

    #[test]
    fn file_rules_single_key_entry() {
        let config = parse_config(
            r#"
files:
  - out.bin:
      file_type: binary
"#,
        );
        let rules = config.file_rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].path, PathBuf::from("out.bin"));
        assert_eq!(
            rules[0].attributes.get("file_type").unwrap().as_str(),
            Some("binary")
        );
    }

    #[test]
    fn file_rules_null_attributes() {
        let config = parse_config("files:\n  - out.bin:\n");
        let rules = config.file_rules().unwrap();
        assert!(rules[0].attributes.is_empty());
    }

    #[test]
    fn file_rules_rejects_two_keys() {
        let config = parse_config("files:\n  - {a: {}, b: {}}\n");
        let result = config.file_rules();
        assert!(matches!(result, Err(GeneratorError::Config(_))));
    }

    #[test]
    fn file_rules_rejects_non_mapping_entry() {
        let config = parse_config("files:\n  - just-a-string\n");
        let result = config.file_rules();
        assert!(matches!(result, Err(GeneratorError::Config(_))));
    }

    #[test]
    fn basename_strips_directories() {
        let rule = FileRule {
            path: PathBuf::from("sub/dir/out.bin"),
            attributes: serde_yaml::Mapping::new(),
        };
        assert_eq!(rule.basename().unwrap(), "out.bin");
    }

    #[test]
    fn input_from_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(
            temp,
            r#"
files_root: /proj
vlnv: "::generated:0"
parameters:
  cmake_args: ["-DX=1"]
"#
        )
        .unwrap();

        let input = GeneratorInput::from_file(temp.path()).unwrap();
        assert_eq!(input.files_root, PathBuf::from("/proj"));
        assert_eq!(input.vlnv.as_deref(), Some("::generated:0"));
        assert_eq!(input.parameters.cmake_args, vec!["-DX=1"]);
    }

    #[test]
    fn input_rejects_relative_files_root() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "files_root: relative/path").unwrap();

        let result = GeneratorInput::from_file(temp.path());
        assert!(matches!(result, Err(GeneratorError::Config(_))));
    }

    #[test]
    fn input_requires_files_root() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "vlnv: \"::x:0\"").unwrap();

        let result = GeneratorInput::from_file(temp.path());
        assert!(matches!(result, Err(GeneratorError::Yaml(_))));
    }
}
