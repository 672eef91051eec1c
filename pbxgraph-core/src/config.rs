//! Graph options, loaded from YAML.
//!
//! # Location
//!
//! ```text
//! ~/.pbxgraph/
//!   options.yaml   (optional; every field has a default)
//! ```
//!
//! Same API pattern as the snapshot functions in [`crate::registry`]:
//! `load_at(path)` for an explicit file, `load()` for the home-derived one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::ids::IdStrategy;

/// Tunables for a new object graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GraphOptions {
    pub id_strategy: IdStrategy,
    /// Written as the document's `objectVersion`.
    pub object_version: String,
    pub main_group_name: Option<String>,
    pub products_group_name: String,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Random,
            object_version: "46".to_owned(),
            main_group_name: None,
            products_group_name: "Products".to_owned(),
        }
    }
}

impl GraphOptions {
    /// Deterministic ids; what fixtures and tests want.
    pub fn sequential() -> Self {
        Self {
            id_strategy: IdStrategy::Sequential { prefix: String::new() },
            ..Self::default()
        }
    }

    /// Load options from `path`. A missing file yields the defaults.
    pub fn load_at(path: &Path) -> Result<Self, GraphError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no options file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&contents).map_err(|e| GraphError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `load_at` on `~/.pbxgraph/options.yaml`.
    pub fn load() -> Result<Self, GraphError> {
        Self::load_at(&default_path()?)
    }
}

/// `<home>/.pbxgraph/options.yaml` — pure, no I/O.
pub fn options_path_at(home: &Path) -> PathBuf {
    home.join(".pbxgraph").join("options.yaml")
}

fn default_path() -> Result<PathBuf, GraphError> {
    dirs::home_dir()
        .map(|home| options_path_at(&home))
        .ok_or(GraphError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
