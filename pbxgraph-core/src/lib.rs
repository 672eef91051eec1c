//! pbxgraph core library — identifiers, objects, the registry, options, errors.
//!
//! Public API surface:
//! - [`ids`] — [`ObjectId`] and identifier minting
//! - [`value`] — [`Value`] and the discriminated [`Object`]
//! - [`registry`] — the [`Registry`] that owns every object
//! - [`config`] — [`GraphOptions`]
//! - [`error`] — [`GraphError`]

pub mod config;
pub mod error;
pub mod ids;
pub mod registry;
pub mod value;

pub use config::GraphOptions;
pub use error::GraphError;
pub use ids::{IdGenerator, IdStrategy, ObjectId};
pub use registry::Registry;
pub use value::{Object, Value};
