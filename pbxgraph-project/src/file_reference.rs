//! File references and build files.

use std::path::Path;

use pbxgraph_core::{GraphError, Object, ObjectId, Registry};

pub const FILE_REFERENCE_ISA: &str = "PBXFileReference";
pub const BUILD_FILE_ISA: &str = "PBXBuildFile";

/// `explicitFileType` for a product, from its extension.
pub fn product_file_type(name: &str) -> &'static str {
    let ext = Path::new(name).extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext {
        "app" => "wrapper.application",
        "bundle" => "wrapper.cfbundle",
        "framework" => "wrapper.framework",
        "a" => "archive.ar",
        "dylib" => "compiled.mach-o.dylib",
        "xctest" => "wrapper.cfbundle",
        _ => "compiled.mach-o.executable",
    }
}

/// Template for a built product living in `BUILT_PRODUCTS_DIR`.
pub fn product_reference(name: &str) -> Object {
    Object::new(FILE_REFERENCE_ISA)
        .with("explicitFileType", product_file_type(name))
        .with("includeInIndex", "0")
        .with("path", name)
        .with("sourceTree", "BUILT_PRODUCTS_DIR")
}

/// Template for a `PBXBuildFile` pointing at `file_ref`.
pub fn build_file(file_ref: ObjectId) -> Object {
    Object::new(BUILD_FILE_ISA).with("fileRef", file_ref)
}

/// A registered file reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReference {
    id: ObjectId,
}

impl FileReference {
    pub(crate) fn new(id: ObjectId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn path<'r>(&self, registry: &'r Registry) -> Result<Option<&'r str>, GraphError> {
        Ok(registry.object_of(&self.id, &[FILE_REFERENCE_ISA])?.string("path"))
    }
}
