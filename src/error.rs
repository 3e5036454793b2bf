use std::path::PathBuf;

/// Result type for asset installation operations.
pub type Result<T> = std::result::Result<T, AssetsError>;

/// Errors raised while synchronizing dependency assets.
///
/// Only [`AssetsError::PathDerivation`] aborts a whole run; everything else is
/// caught per dependency (or per namespace) and turned into a status record.
#[derive(Debug, thiserror::Error)]
pub enum AssetsError {
    #[error("package name '{name}' does not occur in its install path '{install_path}'")]
    PathDerivation { name: String, install_path: String },

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize manifest {}: {source}", path.display())]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AssetsError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}
