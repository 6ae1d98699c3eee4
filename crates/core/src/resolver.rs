//! Runtime variable substitution for configuration strings
//!
//! Configurations may reference generator-computed paths without knowing
//! them ahead of time, e.g. an installation prefix relative to the files
//! root:
//!
//! ```yaml
//! cmake_args:
//!   - "-DCMAKE_INSTALL_PREFIX=CMAKE_REPLACE_BUILD_DIR/install"
//! ```
//!
//! Recognized placeholders are a fixed, closed set. Substitution is plain
//! text replacement: every occurrence of a recognized token is replaced,
//! with no escaping mechanism and no word-boundary matching. A token
//! occurring as a substring of unrelated text would also match; keep
//! token names out of literal argument text.

use std::path::Path;

use crate::error::GeneratorError;
use crate::Result;

/// How a placeholder's value is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Look up a named attribute on the generator state.
    Attr(&'static str),

    /// Look up a process environment variable.
    Env(&'static str),
}

/// A placeholder token bound to its resolution strategy.
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub token: &'static str,
    pub lookup: Lookup,
}

/// The fixed placeholder table.
const BINDINGS: &[Binding] = &[
    Binding {
        token: "CMAKE_REPLACE_BUILD_DIR",
        lookup: Lookup::Attr("build_dir"),
    },
    Binding {
        token: "CMAKE_REPLACE_FILES_ROOT",
        lookup: Lookup::Attr("files_root"),
    },
];

/// Expands placeholders against a snapshot of generator state.
///
/// Purely referentially transparent for attribute lookups: the same input
/// always produces the same output for a given resolver.
#[derive(Debug, Clone)]
pub struct Resolver {
    files_root: String,
    build_dir: String,
    bindings: &'static [Binding],
}

impl Resolver {
    pub fn new(files_root: &Path, build_dir: &Path) -> Self {
        Self {
            files_root: files_root.to_string_lossy().into_owned(),
            build_dir: build_dir.to_string_lossy().into_owned(),
            bindings: BINDINGS,
        }
    }

    #[cfg(test)]
    fn with_bindings(files_root: &Path, build_dir: &Path, bindings: &'static [Binding]) -> Self {
        Self {
            bindings,
            ..Self::new(files_root, build_dir)
        }
    }

    /// Replace every recognized placeholder in `input` with its resolved
    /// value, leaving all other text untouched.
    ///
    /// Values for all present tokens are resolved before any substitution
    /// happens, so a resolution failure leaves no partial result behind.
    pub fn resolve(&self, input: &str) -> Result<String> {
        let mut resolved = Vec::new();
        for binding in self.bindings {
            if input.contains(binding.token) {
                resolved.push((binding.token, self.lookup(binding.lookup)?));
            }
        }

        let mut output = input.to_string();
        for (token, value) in resolved {
            output = output.replace(token, &value);
        }
        Ok(output)
    }

    fn lookup(&self, lookup: Lookup) -> Result<String> {
        match lookup {
            Lookup::Attr(name) => self.attribute(name).map(str::to_string).ok_or_else(|| {
                GeneratorError::Resolve(format!("unknown generator attribute: {name}"))
            }),
            Lookup::Env(name) => std::env::var(name).map_err(|_| {
                GeneratorError::Resolve(format!("environment variable not set: {name}"))
            }),
        }
    }

    /// Generator-state attributes exposed for placeholder resolution.
    fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "files_root" => Some(&self.files_root),
            "build_dir" => Some(&self.build_dir),
            _ => None,
        }
    }
}
