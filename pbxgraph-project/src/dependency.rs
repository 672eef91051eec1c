//! Target dependencies and the container item proxies they carry.

use pbxgraph_core::{GraphError, Object, ObjectId, Registry};

pub const TARGET_DEPENDENCY_ISA: &str = "PBXTargetDependency";
pub const CONTAINER_ITEM_PROXY_ISA: &str = "PBXContainerItemProxy";

/// `proxyType` for a proxy pointing at a target in the same project.
const PROXY_TYPE_TARGET: &str = "1";

/// A registered `PBXTargetDependency`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDependency {
    id: ObjectId,
}

impl TargetDependency {
    pub(crate) fn new(id: ObjectId) -> Self {
        Self { id }
    }

    /// Default template: the discriminator only.
    pub fn default_template() -> Object {
        Object::new(TARGET_DEPENDENCY_ISA)
    }

    /// Template for the proxy that lets the IDE locate the depended-on target.
    pub fn container_item_proxy(
        project_root: &ObjectId,
        target: &ObjectId,
        target_name: &str,
    ) -> Object {
        Object::new(CONTAINER_ITEM_PROXY_ISA)
            .with("containerPortal", project_root.clone())
            .with("proxyType", PROXY_TYPE_TARGET)
            .with("remoteGlobalIDString", target.clone())
            .with("remoteInfo", target_name)
    }

    /// Wrap an existing id, checking it resolves to a target dependency.
    pub fn from_id(registry: &Registry, id: ObjectId) -> Result<Self, GraphError> {
        registry.object_of(&id, &[TARGET_DEPENDENCY_ISA])?;
        Ok(Self { id })
    }

    /// Bind an already-registered dependency to `target`.
    ///
    /// Sets `target` and registers a container item proxy bound as `targetProxy`.
    pub fn create_dependency_on(
        &self,
        registry: &mut Registry,
        project_root: &ObjectId,
        target: &ObjectId,
    ) -> Result<(), GraphError> {
        registry.object_of(&self.id, &[TARGET_DEPENDENCY_ISA])?;
        let target_name = registry.object(target)?.string("name").unwrap_or_default().to_owned();
        let proxy = registry.add_object(Self::container_item_proxy(project_root, target, &target_name));
        let object = registry.object_mut(&self.id)?;
        object.set("target", target.clone());
        object.set("targetProxy", proxy);
        Ok(())
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// The id of the target depended on, once bound.
    pub fn target_id(&self, registry: &Registry) -> Result<Option<ObjectId>, GraphError> {
        Ok(registry.object(&self.id)?.id("target").cloned())
    }

    pub fn proxy_id(&self, registry: &Registry) -> Result<Option<ObjectId>, GraphError> {
        Ok(registry.object(&self.id)?.id("targetProxy").cloned())
    }
}
