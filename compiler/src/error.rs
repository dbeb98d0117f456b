use thiserror::Error;

use crate::descriptor::DescriptorError;

/// Errors produced while compiling a resource. All of them abort the
/// compilation run; there is no partial output.
#[derive(Debug, Error)]
pub enum CompilerError {
    #[error("unable to generate resource {kind}: no protocol mapping for type \"{type_name}\" on field \"{field}\"")]
    UnsupportedFieldType {
        kind:      String,
        field:     String,
        type_name: String,
    },

    #[error("unable to generate resource {kind}: could not load well-known type \"{type_name}\"")]
    WellKnownTypeLoad {
        kind:      String,
        type_name: String,
    },

    #[error("unable to generate resource {kind}: {source}")]
    Descriptor {
        kind: String,
        #[source]
        source: DescriptorError,
    },

    #[error("Verifier error: {0}")]
    Verifier(String),
}

impl CompilerError {
    /// Wrap a descriptor-construction failure with the offending resource
    /// kind.
    pub fn descriptor(kind: &str, source: DescriptorError) -> Self {
        CompilerError::Descriptor {
            kind: kind.to_owned(),
            source,
        }
    }
}
