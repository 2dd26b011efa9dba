//! Domain errors for the orchestration layer.
//!
//! Every fallible operation surfaces a typed error; nothing is swallowed or
//! downgraded to a log line. Resolution failures (`MissingEditor`,
//! `MissingProject`) are raised before any subprocess is spawned.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UeCmdError {
    /// No editor binary could be resolved from the configured install root.
    #[error("Could not find Unreal Engine editor executable")]
    MissingEditor,

    /// No `.uproject` file could be resolved from the configured project
    /// root.
    #[error("Could not find Unreal Engine project file")]
    MissingProject,

    #[error("Failed to read project manifest {path}")]
    ManifestRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse project manifest {path}")]
    ManifestParse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write project manifest {path}")]
    ManifestWrite {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write import spec {path}")]
    SpecWrite {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write engine user settings {path}")]
    ConfigWrite {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An import group with this name already exists in the spec.
    #[error("Import group \"{0}\" already exists")]
    DuplicateGroup(String),

    #[error("Failed to spawn editor process")]
    Spawn(#[source] std::io::Error),
}
