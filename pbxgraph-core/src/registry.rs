//! The object registry: sole owner of every object in the graph.
//!
//! Objects are addressed only by the [`ObjectId`] minted in [`Registry::add_object`];
//! other objects refer to them by id and resolve through here.
//!
//! # Snapshots
//!
//! A registry can be dumped to and restored from a YAML snapshot for
//! inspection. This is not the project-document text format.
//!
//! ```text
//! objects:
//!   <id>:
//!     isa: PBXNativeTarget
//!     properties: { ... }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::ids::{IdGenerator, IdStrategy, ObjectId};
use crate::value::Object;

/// Identifier-addressed store of every object in one graph.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    objects: BTreeMap<ObjectId, Object>,
    ids: IdGenerator,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    objects: BTreeMap<ObjectId, Object>,
}

impl Registry {
    pub fn new(id_strategy: IdStrategy) -> Self {
        Self { objects: BTreeMap::new(), ids: IdGenerator::new(id_strategy) }
    }

    // -----------------------------------------------------------------------
    // 1. Register / resolve
    // -----------------------------------------------------------------------

    /// Store `object` under a freshly minted identifier and return it.
    pub fn add_object(&mut self, object: Object) -> ObjectId {
        let objects = &self.objects;
        let id = self.ids.next(|candidate| objects.contains_key(candidate));
        tracing::debug!(id = %id, isa = object.isa(), "registered object");
        self.objects.insert(id.clone(), object);
        id
    }

    /// The object stored under `id`, if any.
    pub fn resolve(&self, id: &ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    /// Like [`resolve`](Self::resolve), but absence is a
    /// [`GraphError::DanglingIdentifier`].
    pub fn object(&self, id: &ObjectId) -> Result<&Object, GraphError> {
        self.objects.get(id).ok_or_else(|| GraphError::dangling(id))
    }

    pub fn object_mut(&mut self, id: &ObjectId) -> Result<&mut Object, GraphError> {
        self.objects.get_mut(id).ok_or_else(|| GraphError::dangling(id))
    }

    /// Resolve `id` and check its discriminator is one of `expected`.
    pub fn object_of(&self, id: &ObjectId, expected: &[&str]) -> Result<&Object, GraphError> {
        let object = self.object(id)?;
        if expected.contains(&object.isa()) {
            Ok(object)
        } else {
            Err(GraphError::UnexpectedIsa {
                id: id.clone(),
                expected: expected.join(" or "),
                found: object.isa().to_owned(),
            })
        }
    }

    // -----------------------------------------------------------------------
    // 2. Inspection
    // -----------------------------------------------------------------------

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &Object)> {
        self.objects.iter()
    }

    /// Identifiers of every object whose discriminator is `isa`.
    pub fn objects_of(&self, isa: &str) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|(_, object)| object.isa() == isa)
            .map(|(id, _)| id.clone())
            .collect()
    }

    // -----------------------------------------------------------------------
    // 3. Snapshots
    // -----------------------------------------------------------------------

    pub fn to_yaml(&self) -> Result<String, GraphError> {
        let snapshot = Snapshot { objects: self.objects.clone() };
        Ok(serde_yaml::to_string(&snapshot)?)
    }

    pub fn from_yaml(yaml: &str, id_strategy: IdStrategy) -> Result<Self, GraphError> {
        let snapshot: Snapshot = serde_yaml::from_str(yaml)?;
        Ok(Self { objects: snapshot.objects, ids: IdGenerator::new(id_strategy) })
    }

    /// Atomically write a snapshot to `path`.
    ///
    /// Write flow: serialize → `.tmp` sibling → `rename`.
    pub fn save_at(&self, path: &Path) -> Result<(), GraphError> {
        let yaml = self.to_yaml()?;
        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);
        std::fs::write(&tmp_path, yaml)?;
        std::fs::rename(&tmp_path, path)?;
        tracing::debug!(path = %path.display(), objects = self.len(), "saved registry snapshot");
        Ok(())
    }

    pub fn load_at(path: &Path, id_strategy: IdStrategy) -> Result<Self, GraphError> {
        let contents = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_yaml::from_str(&contents).map_err(|e| GraphError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self { objects: snapshot.objects, ids: IdGenerator::new(id_strategy) })
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
