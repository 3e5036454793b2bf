use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Key of the asset declaration inside a manifest's `extra` section.
pub const ASSETS_DIR_KEY: &str = "assets-dir";
/// Namespace used when `assets-dir` is declared as a plain string.
pub const PUBLIC_NAMESPACE: &str = "public";
/// Destination of the `public` namespace when the project declares nothing.
pub const DEFAULT_PUBLIC_DIR: &str = "public/assets/";

/// An ordered mapping from namespace label (`"public"`, `"js"`, ...) to a relative path.
///
/// For the project this is where each namespace's files land; for a dependency it
/// is the subdirectory holding that namespace's assets. Iteration follows the
/// order in which the manifest declared the entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetNamespaceMap(IndexMap<String, String>);

impl AssetNamespaceMap {
    /// The map used by projects that do not declare `extra.assets-dir`.
    pub fn project_default() -> Self {
        Self::public(DEFAULT_PUBLIC_DIR)
    }

    /// A map with the single `public` namespace pointing at `path`.
    pub fn public(path: impl Into<String>) -> Self {
        let mut map = IndexMap::new();
        map.insert(PUBLIC_NAMESPACE.to_string(), path.into());
        Self(map)
    }

    pub fn get(&self, namespace: &str) -> Option<&str> {
        self.0.get(namespace).map(String::as_str)
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.0.contains_key(namespace)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The two shapes `extra.assets-dir` may take in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AssetsDir {
    /// `"assets-dir": "web"`, shorthand for the `public` namespace.
    Path(String),
    /// `"assets-dir": {"js": "public/js", "css": "css"}`
    Namespaces(IndexMap<String, String>),
}

impl AssetsDir {
    /// Reads the declaration out of a manifest's `extra` section.
    ///
    /// Returns `None` when `extra` is missing, is not an object, has no
    /// `assets-dir` key, or holds a value of neither accepted shape.
    pub fn from_extra(extra: Option<&Value>) -> Option<Self> {
        let value = extra?.as_object()?.get(ASSETS_DIR_KEY)?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Normalizes either shape into an [`AssetNamespaceMap`].
    pub fn into_map(self) -> AssetNamespaceMap {
        match self {
            AssetsDir::Path(path) => AssetNamespaceMap::public(path),
            AssetsDir::Namespaces(map) => AssetNamespaceMap(map),
        }
    }
}

/// Derives the project's namespace → destination map from its root `extra` section.
///
/// Falls back to `{"public": "public/assets/"}` when nothing is declared.
pub fn resolve_project_map(extra: Option<&Value>) -> AssetNamespaceMap {
    AssetsDir::from_extra(extra)
        .map(AssetsDir::into_map)
        .unwrap_or_else(AssetNamespaceMap::project_default)
}

/// Derives a dependency's namespace → source map from its parsed manifest.
///
/// Returns `None` when the manifest does not declare `extra.assets-dir`, or
/// declares it as an empty mapping.
pub fn package_map(manifest: &Value) -> Option<AssetNamespaceMap> {
    AssetsDir::from_extra(manifest.get("extra"))
        .map(AssetsDir::into_map)
        .filter(|map| !map.is_empty())
}
