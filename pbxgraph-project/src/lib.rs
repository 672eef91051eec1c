//! # pbxgraph-project
//!
//! Targets and the objects they own: build phases, target dependencies and
//! product references, all registered in the [`Project`]'s registry and linked
//! by id.
//!
//! ## Usage
//!
//! ```rust
//! use pbxgraph_core::GraphOptions;
//! use pbxgraph_project::{BuildPhaseKind, Project, TargetKind};
//!
//! let mut project = Project::new(&GraphOptions::default());
//! let lib = project.create_target(TargetKind::Native, "Core").unwrap();
//! let app = project.create_target(TargetKind::Native, "App").unwrap();
//!
//! let mut target = project.target_mut(&app).unwrap();
//! target
//!     .create_build_phases([BuildPhaseKind::Sources, BuildPhaseKind::Resources])
//!     .unwrap();
//! target.add_dependency(&lib).unwrap();
//! target.create_product_reference("App.app").unwrap();
//! ```

pub mod build_phase;
pub mod dependency;
pub mod file_reference;
pub mod group;
pub mod project;
pub mod target;

pub use build_phase::{BuildPhase, BuildPhaseKind};
pub use dependency::TargetDependency;
pub use file_reference::FileReference;
pub use group::Group;
pub use project::Project;
pub use target::{Target, TargetKind, TargetMut};
