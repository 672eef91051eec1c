//! The owning project: root object, main and products groups, and the
//! registry every target is threaded through.

use pbxgraph_core::{GraphError, GraphOptions, Object, ObjectId, Registry, Value};

use crate::group::{self, Group, GROUP_ISA};
use crate::target::{Target, TargetKind, TargetMut};

pub const PROJECT_ISA: &str = "PBXProject";

/// One project document's object graph.
#[derive(Debug)]
pub struct Project {
    registry: Registry,
    root: ObjectId,
    object_version: String,
}

impl Project {
    /// A fresh project: root object, main group, products group.
    pub fn new(options: &GraphOptions) -> Self {
        let mut registry = Registry::new(options.id_strategy.clone());

        let products = registry.add_object(group::template(Some(&options.products_group_name)));
        let main = registry.add_object(
            group::template(options.main_group_name.as_deref())
                .with("children", vec![products.clone()]),
        );
        let root = registry.add_object(
            Object::new(PROJECT_ISA)
                .with("buildConfigurationList", Value::Unset)
                .with("compatibilityVersion", "Xcode 3.2")
                .with("developmentRegion", "English")
                .with("hasScannedForEncodings", "0")
                .with("mainGroup", main)
                .with("productRefGroup", products)
                .with("projectDirPath", "")
                .with("projectRoot", "")
                .with("targets", Value::empty_list()),
        );
        tracing::debug!(root = %root, "created project");

        Self { registry, root, object_version: options.object_version.clone() }
    }

    /// Reopen a project over an existing registry (e.g. a loaded snapshot).
    pub fn open(
        registry: Registry,
        root: ObjectId,
        options: &GraphOptions,
    ) -> Result<Self, GraphError> {
        let project = registry.object_of(&root, &[PROJECT_ISA])?;
        for key in ["mainGroup", "productRefGroup"] {
            match project.id(key) {
                Some(id) => {
                    registry.object_of(id, &[GROUP_ISA])?;
                }
                None => {
                    return Err(GraphError::MissingReference { id: root, key: key.to_owned() })
                }
            }
        }
        Ok(Self { registry, root, object_version: options.object_version.clone() })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    pub fn root_id(&self) -> &ObjectId {
        &self.root
    }

    pub fn object_version(&self) -> &str {
        &self.object_version
    }

    fn root(&self) -> Result<&Object, GraphError> {
        self.registry.object(&self.root)
    }

    fn root_ref(&self, key: &str) -> Result<ObjectId, GraphError> {
        self.root()?.id(key).cloned().ok_or_else(|| GraphError::MissingReference {
            id: self.root.clone(),
            key: key.to_owned(),
        })
    }

    // -----------------------------------------------------------------------
    // Groups
    // -----------------------------------------------------------------------

    pub fn main_group(&mut self) -> Result<Group<'_>, GraphError> {
        let id = self.root_ref("mainGroup")?;
        Group::new(&mut self.registry, id)
    }

    /// The group built products are filed under.
    pub fn products_group(&mut self) -> Result<Group<'_>, GraphError> {
        let id = self.root_ref("productRefGroup")?;
        Group::new(&mut self.registry, id)
    }

    // -----------------------------------------------------------------------
    // Targets
    // -----------------------------------------------------------------------

    /// Register a target of `kind` named `name` and append it to `targets`.
    pub fn create_target(&mut self, kind: TargetKind, name: &str) -> Result<ObjectId, GraphError> {
        self.root()?;
        let id = self
            .registry
            .add_object(kind.template().with("name", name).with("productName", name));
        self.registry.object_mut(&self.root)?.push_id("targets", id.clone());
        tracing::debug!(id = %id, %kind, name, "created target");
        Ok(id)
    }

    pub fn target_ids(&self) -> Result<Vec<ObjectId>, GraphError> {
        Ok(self.root()?.ids("targets"))
    }

    pub fn target<'a>(&'a self, id: &'a ObjectId) -> Result<Target<'a>, GraphError> {
        Target::new(&self.registry, id)
    }

    pub fn target_mut(&mut self, id: &ObjectId) -> Result<TargetMut<'_>, GraphError> {
        TargetMut::new(self, id.clone())
    }

    /// The first target named `name`, by id.
    pub fn find_target(&self, name: &str) -> Result<Option<ObjectId>, GraphError> {
        for id in self.target_ids()? {
            if Target::new(&self.registry, &id)?.name()? == name {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
