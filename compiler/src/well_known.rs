//! Registry of well-known message types a generated file may import.
//!
//! The registry is owned by the [`FileDescriptor`](crate::descriptor::FileDescriptor)
//! it is handed to; there is no process-global descriptor pool. Resolving a
//! type against a registry that does not carry it is a hard failure.

use std::collections::BTreeMap;

use serde::Serialize;

pub const FIELD_MASK: &str = "google.protobuf.FieldMask";
pub const EMPTY: &str = "google.protobuf.Empty";

/// A message type defined outside the generated file, addressed by its
/// fully-qualified name and pulled in through a proto import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedMessage {
    pub full_name:   String,
    pub import_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypeRegistry {
    types: BTreeMap<String, ImportedMessage>,
}

impl TypeRegistry {
    /// A registry with no entries. Every resolution against it fails.
    pub fn empty() -> Self {
        TypeRegistry::default()
    }

    /// The standard registry: the well-known types the generators need.
    pub fn standard() -> Self {
        let mut registry = TypeRegistry::empty();
        registry.register(FIELD_MASK, "google/protobuf/field_mask.proto");
        registry.register(EMPTY, "google/protobuf/empty.proto");
        registry
    }

    pub fn register(&mut self, full_name: &str, import_path: &str) {
        self.types.insert(
            full_name.to_owned(),
            ImportedMessage {
                full_name:   full_name.to_owned(),
                import_path: import_path.to_owned(),
            },
        );
    }

    pub fn lookup(&self, full_name: &str) -> Option<&ImportedMessage> {
        self.types.get(full_name)
    }
}
