//! Build targets: templates for the three kinds, and the read/mutable views
//! through which build phases, dependencies and product references attach.
//!
//! All attachments go through the project's registry and are recorded as ids
//! appended to the target's own lists. `buildPhases` order is the order the
//! IDE runs phases in, so appends land exactly in call order and are never
//! reordered or deduplicated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pbxgraph_core::{GraphError, Object, ObjectId, Registry, Value};

use crate::build_phase::{BuildPhase, BuildPhaseKind};
use crate::dependency::TargetDependency;
use crate::file_reference::FileReference;
use crate::project::Project;

pub const NATIVE_TARGET_ISA: &str = "PBXNativeTarget";
pub const AGGREGATE_TARGET_ISA: &str = "PBXAggregateTarget";
pub const TARGET_ISAS: &[&str] = &[NATIVE_TARGET_ISA, AGGREGATE_TARGET_ISA];

pub const PRODUCT_TYPE_APPLICATION: &str = "com.apple.product-type.application";
pub const PRODUCT_TYPE_BUNDLE: &str = "com.apple.product-type.bundle";

// ---------------------------------------------------------------------------
// Kinds and templates
// ---------------------------------------------------------------------------

/// The three recognised target kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Native,
    Bundle,
    Aggregate,
}

impl TargetKind {
    pub fn template(self) -> Object {
        match self {
            TargetKind::Native => native(),
            TargetKind::Bundle => bundle(),
            TargetKind::Aggregate => aggregate(),
        }
    }

    /// Classify a registered object; `None` if it is not a target.
    pub fn of(object: &Object) -> Option<Self> {
        match object.isa() {
            AGGREGATE_TARGET_ISA => Some(TargetKind::Aggregate),
            NATIVE_TARGET_ISA if object.string("productType") == Some(PRODUCT_TYPE_BUNDLE) => {
                Some(TargetKind::Bundle)
            }
            NATIVE_TARGET_ISA => Some(TargetKind::Native),
            _ => None,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Native => write!(f, "native"),
            TargetKind::Bundle => write!(f, "bundle"),
            TargetKind::Aggregate => write!(f, "aggregate"),
        }
    }
}

impl FromStr for TargetKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" => Ok(TargetKind::Native),
            "bundle" => Ok(TargetKind::Bundle),
            "aggregate" => Ok(TargetKind::Aggregate),
            other => Err(GraphError::UnknownTargetKind { kind: other.to_owned() }),
        }
    }
}

/// Default native (application) target.
pub fn native() -> Object {
    Object::new(NATIVE_TARGET_ISA)
        .with("buildConfigurationList", Value::Unset)
        .with("buildPhases", Value::empty_list())
        .with("buildRules", Value::empty_list())
        .with("dependencies", Value::empty_list())
        .with("name", "")
        .with("productName", "")
        .with("productReference", Value::Unset)
        .with("productType", PRODUCT_TYPE_APPLICATION)
}

/// [`native`] with the product type overridden; nothing else may differ.
pub fn bundle() -> Object {
    native().with("productType", PRODUCT_TYPE_BUNDLE)
}

/// Aggregate targets build nothing themselves: no product, no rules.
pub fn aggregate() -> Object {
    Object::new(AGGREGATE_TARGET_ISA)
        .with("buildConfigurationList", Value::Unset)
        .with("buildPhases", Value::empty_list())
        .with("dependencies", Value::empty_list())
        .with("name", "")
        .with("productName", "")
}

// ---------------------------------------------------------------------------
// Read view
// ---------------------------------------------------------------------------

/// Read-only view of a registered target.
#[derive(Debug, Clone, Copy)]
pub struct Target<'r> {
    registry: &'r Registry,
    id: &'r ObjectId,
}

impl<'r> Target<'r> {
    /// Fails with `UnexpectedIsa` if `id` is not a target.
    pub fn new(registry: &'r Registry, id: &'r ObjectId) -> Result<Self, GraphError> {
        registry.object_of(id, TARGET_ISAS)?;
        Ok(Self { registry, id })
    }

    pub fn id(&self) -> &'r ObjectId {
        self.id
    }

    pub fn object(&self) -> Result<&'r Object, GraphError> {
        self.registry.object(self.id)
    }

    pub fn kind(&self) -> Result<TargetKind, GraphError> {
        let object = self.object()?;
        TargetKind::of(object).ok_or_else(|| GraphError::UnexpectedIsa {
            id: self.id.clone(),
            expected: TARGET_ISAS.join(" or "),
            found: object.isa().to_owned(),
        })
    }

    pub fn name(&self) -> Result<&'r str, GraphError> {
        Ok(self.object()?.string("name").unwrap_or_default())
    }

    pub fn product_name(&self) -> Result<&'r str, GraphError> {
        Ok(self.object()?.string("productName").unwrap_or_default())
    }

    pub fn product_type(&self) -> Result<Option<&'r str>, GraphError> {
        Ok(self.object()?.string("productType"))
    }

    pub fn build_phase_ids(&self) -> Result<Vec<ObjectId>, GraphError> {
        Ok(self.object()?.ids("buildPhases"))
    }

    /// Every build phase, resolved, in `buildPhases` order.
    pub fn build_phases(&self) -> Result<Vec<BuildPhase>, GraphError> {
        self.build_phase_ids()?
            .into_iter()
            .map(|id| BuildPhase::from_id(self.registry, id))
            .collect()
    }

    /// The first phase of `kind`, or [`GraphError::NotFound`].
    pub fn build_phase(&self, kind: BuildPhaseKind) -> Result<BuildPhase, GraphError> {
        for id in self.build_phase_ids()? {
            if self.registry.object(&id)?.isa() == kind.isa() {
                return Ok(BuildPhase::new(id, kind));
            }
        }
        Err(GraphError::NotFound { kind: kind.to_string() })
    }

    pub fn sources_build_phase(&self) -> Result<BuildPhase, GraphError> {
        self.build_phase(BuildPhaseKind::Sources)
    }

    pub fn resources_build_phase(&self) -> Result<BuildPhase, GraphError> {
        self.build_phase(BuildPhaseKind::Resources)
    }

    pub fn frameworks_build_phase(&self) -> Result<BuildPhase, GraphError> {
        self.build_phase(BuildPhaseKind::Frameworks)
    }

    pub fn run_script_build_phase(&self) -> Result<BuildPhase, GraphError> {
        self.build_phase(BuildPhaseKind::RunScript)
    }

    pub fn copy_headers_build_phase(&self) -> Result<BuildPhase, GraphError> {
        self.build_phase(BuildPhaseKind::CopyHeaders)
    }

    pub fn dependency_ids(&self) -> Result<Vec<ObjectId>, GraphError> {
        Ok(self.object()?.ids("dependencies"))
    }

    pub fn dependencies(&self) -> Result<Vec<TargetDependency>, GraphError> {
        self.dependency_ids()?
            .into_iter()
            .map(|id| TargetDependency::from_id(self.registry, id))
            .collect()
    }

    pub fn product_reference_id(&self) -> Result<Option<&'r ObjectId>, GraphError> {
        Ok(self.object()?.id("productReference"))
    }
}

// ---------------------------------------------------------------------------
// Mutable view
// ---------------------------------------------------------------------------

/// Mutable view of a registered target, borrowing its owning [`Project`].
#[derive(Debug)]
pub struct TargetMut<'p> {
    project: &'p mut Project,
    id: ObjectId,
}

impl<'p> TargetMut<'p> {
    pub(crate) fn new(project: &'p mut Project, id: ObjectId) -> Result<Self, GraphError> {
        project.registry().object_of(&id, TARGET_ISAS)?;
        Ok(Self { project, id })
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Reborrow as a read-only view.
    pub fn as_target(&self) -> Target<'_> {
        Target { registry: self.project.registry(), id: &self.id }
    }

    pub fn registry(&self) -> &Registry {
        self.project.registry()
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), GraphError> {
        let object = self.project.registry_mut().object_mut(&self.id)?;
        object.set("name", name);
        object.set("productName", name);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Build phases
    // -----------------------------------------------------------------------

    /// The first phase of `kind`, or [`GraphError::NotFound`].
    pub fn build_phase(&self, kind: BuildPhaseKind) -> Result<BuildPhase, GraphError> {
        self.as_target().build_phase(kind)
    }

    /// Find the first phase of `kind` and run `configure` on it.
    ///
    /// `configure` is not called when no such phase exists.
    pub fn build_phase_with<F>(
        &mut self,
        kind: BuildPhaseKind,
        configure: F,
    ) -> Result<BuildPhase, GraphError>
    where
        F: FnOnce(&mut Object),
    {
        let phase = self.build_phase(kind)?;
        configure(self.project.registry_mut().object_mut(phase.id())?);
        Ok(phase)
    }

    /// Register a new phase of `kind` and append it to `buildPhases`.
    pub fn create_build_phase(&mut self, kind: BuildPhaseKind) -> Result<BuildPhase, GraphError> {
        self.create_build_phase_with(kind, |_| {})
    }

    /// As [`create_build_phase`](Self::create_build_phase), running
    /// `configure` on the new phase before returning.
    ///
    /// Always creates; an existing phase of the same kind is left alone.
    pub fn create_build_phase_with<F>(
        &mut self,
        kind: BuildPhaseKind,
        configure: F,
    ) -> Result<BuildPhase, GraphError>
    where
        F: FnOnce(&mut Object),
    {
        let registry = self.project.registry_mut();
        registry.object_of(&self.id, TARGET_ISAS)?;

        let phase_id = registry.add_object(kind.template());
        registry.object_mut(&self.id)?.push_id("buildPhases", phase_id.clone());
        configure(registry.object_mut(&phase_id)?);

        tracing::debug!(target_id = %self.id, phase = %phase_id, %kind, "created build phase");
        Ok(BuildPhase::new(phase_id, kind))
    }

    /// Create one phase per kind, in order. `None` entries are skipped.
    pub fn create_build_phases<I>(&mut self, kinds: I) -> Result<Vec<BuildPhase>, GraphError>
    where
        I: IntoIterator,
        I::Item: Into<Option<BuildPhaseKind>>,
    {
        self.create_build_phases_with(kinds, |_| {})
    }

    /// As [`create_build_phases`](Self::create_build_phases), running the same
    /// `configure` on every new phase.
    pub fn create_build_phases_with<I, F>(
        &mut self,
        kinds: I,
        mut configure: F,
    ) -> Result<Vec<BuildPhase>, GraphError>
    where
        I: IntoIterator,
        I::Item: Into<Option<BuildPhaseKind>>,
        F: FnMut(&mut Object),
    {
        self.project.registry().object_of(&self.id, TARGET_ISAS)?;
        kinds
            .into_iter()
            .filter_map(Into::<Option<BuildPhaseKind>>::into)
            .map(|kind| self.create_build_phase_with(kind, &mut configure))
            .collect()
    }

    // -----------------------------------------------------------------------
    // Dependencies and product
    // -----------------------------------------------------------------------

    /// Record that this target depends on `other`.
    ///
    /// Only this target's `dependencies` grows; `other` is untouched.
    pub fn add_dependency(&mut self, other: &ObjectId) -> Result<TargetDependency, GraphError> {
        let root = self.project.root_id().clone();
        let registry = self.project.registry_mut();
        registry.object_of(&self.id, TARGET_ISAS)?;
        registry.object_of(other, TARGET_ISAS)?;

        let dependency =
            TargetDependency::new(registry.add_object(TargetDependency::default_template()));
        dependency.create_dependency_on(registry, &root, other)?;
        registry.object_mut(&self.id)?.push_id("dependencies", dependency.id().clone());

        tracing::debug!(target_id = %self.id, on = %other, "added target dependency");
        Ok(dependency)
    }

    /// Create the product's file reference in the products group and record
    /// it as `productReference`.
    pub fn create_product_reference(&mut self, name: &str) -> Result<FileReference, GraphError> {
        self.project.registry().object_of(&self.id, TARGET_ISAS)?;
        let reference = self.project.products_group()?.create_product_reference(name)?;
        self.project
            .registry_mut()
            .object_mut(&self.id)?
            .set("productReference", reference.id().clone());
        Ok(reference)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
