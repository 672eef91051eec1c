//! Error types for pbxgraph-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::ids::ObjectId;

/// All errors that can arise from object-graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A build-phase kind with no factory template.
    #[error("unknown build phase kind '{kind}'")]
    UnknownPhaseKind { kind: String },

    /// A target kind with no factory template.
    #[error("unknown target kind '{kind}'")]
    UnknownTargetKind { kind: String },

    /// A build-phase lookup found no phase of the requested kind.
    #[error("target has no {kind} build phase")]
    NotFound { kind: String },

    /// An identifier that does not resolve in the registry.
    ///
    /// Identifiers are only minted by `Registry::add_object`, so this always
    /// points at an internal-consistency bug in the caller.
    #[error("dangling object identifier {id}")]
    DanglingIdentifier { id: ObjectId },

    /// An identifier resolved to an object of a different variant.
    #[error("object {id} is a {found}, expected {expected}")]
    UnexpectedIsa {
        id: ObjectId,
        expected: String,
        found: String,
    },

    /// An object lacks a reference property it is required to carry.
    #[error("object {id} has no {key} reference")]
    MissingReference { id: ObjectId, key: String },

    /// Underlying I/O failure while reading or writing snapshots and options.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with the offending file path.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`; cannot locate `~/.pbxgraph/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

impl GraphError {
    pub(crate) fn dangling(id: &ObjectId) -> Self {
        GraphError::DanglingIdentifier { id: id.clone() }
    }
}
