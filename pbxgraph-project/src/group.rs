//! Groups in the project's file tree. Only what targets need lives here.

use pbxgraph_core::{GraphError, Object, ObjectId, Registry, Value};

use crate::file_reference::{self, FileReference};

pub const GROUP_ISA: &str = "PBXGroup";

/// Template for an empty group.
pub fn template(name: Option<&str>) -> Object {
    let group = Object::new(GROUP_ISA)
        .with("children", Value::empty_list())
        .with("sourceTree", "<group>");
    match name {
        Some(name) => group.with("name", name),
        None => group,
    }
}

/// Mutable view of a registered group.
#[derive(Debug)]
pub struct Group<'r> {
    registry: &'r mut Registry,
    id: ObjectId,
}

impl<'r> Group<'r> {
    pub fn new(registry: &'r mut Registry, id: ObjectId) -> Result<Self, GraphError> {
        registry.object_of(&id, &[GROUP_ISA])?;
        Ok(Self { registry, id })
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn children(&self) -> Result<Vec<ObjectId>, GraphError> {
        Ok(self.registry.object(&self.id)?.ids("children"))
    }

    /// Register a file reference for the built product `name` and append it
    /// to this group's children.
    pub fn create_product_reference(&mut self, name: &str) -> Result<FileReference, GraphError> {
        self.registry.object(&self.id)?;
        let id = self.registry.add_object(file_reference::product_reference(name));
        self.registry.object_mut(&self.id)?.push_id("children", id.clone());
        tracing::debug!(group = %self.id, reference = %id, name, "created product reference");
        Ok(FileReference::new(id))
    }
}
