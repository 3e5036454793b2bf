use std::path::Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::{AssetsError, Result};

/// File name of a Composer manifest.
pub const MANIFEST_FILE: &str = "composer.json";
/// Install root used when `config.vendor-dir` is not set.
pub const DEFAULT_VENDOR_DIR: &str = "vendor";
/// Name Composer gives a root package that declares none.
pub const ROOT_PACKAGE_NAME: &str = "__root__";

/// The parts of a project's `composer.json` the installer reads.
///
/// Unknown keys are ignored. `require` keeps the declaration order of the file.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RootManifest {
    /// The project's own package name, e.g. `acme/site`.
    #[serde(default = "root_package_name")]
    pub name: String,
    /// Declared dependencies: target → version constraint.
    #[serde(default)]
    pub require: IndexMap<String, String>,
    /// Free-form `extra` section, where `assets-dir` lives.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,
    #[serde(default)]
    pub config: ManifestConfig,
}

/// The `config` section of `composer.json`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ManifestConfig {
    #[serde(rename = "vendor-dir", default = "default_vendor_dir")]
    pub vendor_dir: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self { vendor_dir: default_vendor_dir() }
    }
}

fn root_package_name() -> String {
    ROOT_PACKAGE_NAME.to_string()
}

fn default_vendor_dir() -> String {
    DEFAULT_VENDOR_DIR.to_string()
}

/// One declared requirement of the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Package name, e.g. `acme/widgets`; also its path below the vendor directory.
    pub target: String,
    pub constraint: String,
}

impl Dependency {
    pub fn new(target: impl Into<String>, constraint: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            constraint: constraint.into(),
        }
    }
}

impl RootManifest {
    /// Creates an empty manifest for a project called `name`.
    pub fn new(name: &str) -> RootManifest {
        RootManifest {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Loads a `RootManifest` from a `composer.json` file.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or isn't valid JSON of the expected shape.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<RootManifest> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| AssetsError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AssetsError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Saves the manifest as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| AssetsError::ManifestWrite {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|e| AssetsError::fs(path, e))
    }

    /// Adds a requirement, replacing the constraint if it was already declared.
    pub fn require(&mut self, target: &str, constraint: &str) {
        self.require.insert(target.to_string(), constraint.to_string());
    }

    /// The declared dependencies, in manifest order.
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.require
            .iter()
            .map(|(target, constraint)| Dependency::new(target, constraint))
            .collect()
    }
}

/// Reads and parses a dependency's manifest.
///
/// A missing file is not an error: it yields `Ok(None)`.
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<Option<Value>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|source| AssetsError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| AssetsError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
}
