//! Build phases: the five recognised kinds, their templates, and the
//! [`BuildPhase`] handle.
//!
//! | Kind           | `isa`                       |
//! |----------------|-----------------------------|
//! | `sources`      | `PBXSourcesBuildPhase`      |
//! | `resources`    | `PBXResourcesBuildPhase`    |
//! | `frameworks`   | `PBXFrameworksBuildPhase`   |
//! | `run_script`   | `PBXShellScriptBuildPhase`  |
//! | `copy_headers` | `PBXHeadersBuildPhase`      |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pbxgraph_core::{GraphError, Object, ObjectId, Registry};

use crate::file_reference;

/// One of the recognised build-phase kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildPhaseKind {
    Sources,
    Resources,
    Frameworks,
    RunScript,
    CopyHeaders,
}

impl BuildPhaseKind {
    pub const ALL: [BuildPhaseKind; 5] = [
        BuildPhaseKind::Sources,
        BuildPhaseKind::Resources,
        BuildPhaseKind::Frameworks,
        BuildPhaseKind::RunScript,
        BuildPhaseKind::CopyHeaders,
    ];

    /// The discriminator this kind maps to.
    pub const fn isa(self) -> &'static str {
        match self {
            BuildPhaseKind::Sources => "PBXSourcesBuildPhase",
            BuildPhaseKind::Resources => "PBXResourcesBuildPhase",
            BuildPhaseKind::Frameworks => "PBXFrameworksBuildPhase",
            BuildPhaseKind::RunScript => "PBXShellScriptBuildPhase",
            BuildPhaseKind::CopyHeaders => "PBXHeadersBuildPhase",
        }
    }

    pub fn from_isa(isa: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.isa() == isa)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BuildPhaseKind::Sources => "sources",
            BuildPhaseKind::Resources => "resources",
            BuildPhaseKind::Frameworks => "frameworks",
            BuildPhaseKind::RunScript => "run_script",
            BuildPhaseKind::CopyHeaders => "copy_headers",
        }
    }

    /// Default template for this kind: the discriminator and nothing else.
    pub fn template(self) -> Object {
        Object::new(self.isa())
    }
}

impl fmt::Display for BuildPhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildPhaseKind {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| GraphError::UnknownPhaseKind { kind: s.to_owned() })
    }
}

/// Parse every name before anything is created, so one bad name rejects the batch.
pub fn parse_kinds<'a>(
    names: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<BuildPhaseKind>, GraphError> {
    names.into_iter().map(str::parse).collect()
}

// ---------------------------------------------------------------------------
// Handle
// ---------------------------------------------------------------------------

/// A registered build phase, addressed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPhase {
    id: ObjectId,
    kind: BuildPhaseKind,
}

impl BuildPhase {
    pub(crate) fn new(id: ObjectId, kind: BuildPhaseKind) -> Self {
        Self { id, kind }
    }

    /// Wrap an existing id, checking it resolves to a build phase.
    pub fn from_id(registry: &Registry, id: ObjectId) -> Result<Self, GraphError> {
        let object = registry.object(&id)?;
        match BuildPhaseKind::from_isa(object.isa()) {
            Some(kind) => Ok(Self { id, kind }),
            None => Err(GraphError::UnexpectedIsa {
                found: object.isa().to_owned(),
                expected: "build phase".to_owned(),
                id,
            }),
        }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn kind(&self) -> BuildPhaseKind {
        self.kind
    }

    pub fn object<'r>(&self, registry: &'r Registry) -> Result<&'r Object, GraphError> {
        registry.object(&self.id)
    }

    /// Build-file ids in the phase's `files` list.
    pub fn files(&self, registry: &Registry) -> Result<Vec<ObjectId>, GraphError> {
        Ok(self.object(registry)?.ids("files"))
    }

    /// Register a `PBXBuildFile` for `file_ref` and append it to `files`.
    pub fn add_build_file(
        &self,
        registry: &mut Registry,
        file_ref: &ObjectId,
    ) -> Result<ObjectId, GraphError> {
        registry.object(file_ref)?;
        registry.object(&self.id)?;
        let build_file = registry.add_object(file_reference::build_file(file_ref.clone()));
        registry.object_mut(&self.id)?.push_id("files", build_file.clone());
        tracing::debug!(phase = %self.id, build_file = %build_file, "added build file");
        Ok(build_file)
    }

    /// Set the script body of a run-script phase.
    pub fn set_shell_script(
        &self,
        registry: &mut Registry,
        script: impl Into<String>,
    ) -> Result<(), GraphError> {
        if self.kind != BuildPhaseKind::RunScript {
            return Err(GraphError::UnexpectedIsa {
                id: self.id.clone(),
                expected: BuildPhaseKind::RunScript.isa().to_owned(),
                found: self.kind.isa().to_owned(),
            });
        }
        let object = registry.object_mut(&self.id)?;
        if !object.has("shellPath") {
            object.set("shellPath", "/bin/sh");
        }
        object.set("shellScript", script.into());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
