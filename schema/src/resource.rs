use std::rc::Rc;

use serde::{Serialize, Serializer};

/// The scalar types a resource field may declare.
///
/// `Unspecified` is what a parser produces for an unset or unrecognized
/// declared type; it has no protocol mapping and fails compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Unspecified,
    String,
    Int32,
    Int64,
    Bool,
    Double,
    Float,
}

impl ScalarType {
    /// The name the type was declared with, for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::Unspecified => "unspecified",
            ScalarType::String => "string",
            ScalarType::Int32 => "int32",
            ScalarType::Int64 => "int64",
            ScalarType::Bool => "bool",
            ScalarType::Double => "double",
            ScalarType::Float => "float",
        }
    }
}

/// One declared field of a resource.
///
/// Numbers are author-assigned and are the wire contract: they must be
/// stable across regenerations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name:   String,
    #[serde(rename = "type")]
    pub type_:  ScalarType,
    pub number: i32,
}

/// The standard methods a resource opts into. `false` means the method and
/// its request/response messages are not generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Methods {
    pub create:      bool,
    pub read:        bool,
    pub update:      bool,
    pub delete:      bool,
    pub list:        bool,
    pub global_list: bool,
    pub apply:       bool,
}

impl Methods {
    pub fn all() -> Self {
        Methods {
            create:      true,
            read:        true,
            update:      true,
            delete:      true,
            list:        true,
            global_list: true,
            apply:       true,
        }
    }

    pub fn none() -> Self {
        Methods::default()
    }
}

/// A fully resolved resource definition.
///
/// Constructed once by a parser and immutable for the lifetime of a
/// compilation run. `parents` holds live handles to already-parsed
/// ancestors, not forward string references.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSchema {
    /// Singular type name, unique within the API (e.g. "Book").
    pub kind: String,
    /// Plural display/path name (e.g. "books").
    pub plural: String,
    /// Fully-qualified resource type identifier used in reference
    /// annotations (e.g. "bookstore.example.com/Book").
    #[serde(rename = "type")]
    pub type_: String,
    pub fields: Vec<FieldSchema>,
    /// Ancestor resources. Only the first parent is effective for path
    /// generation; additional parents are accepted but ignored.
    #[serde(serialize_with = "serialize_parent_kinds")]
    pub parents: Vec<Rc<ResourceSchema>>,
    pub methods: Methods,
}

impl ResourceSchema {
    /// Fields in field-number order, the order generation walks them in.
    pub fn fields_sorted_by_number(&self) -> Vec<&FieldSchema> {
        let mut fields: Vec<&FieldSchema> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.number);
        fields
    }

    /// Lowercased kind, used for body and embedded-resource field names.
    pub fn singular(&self) -> String {
        self.kind.to_lowercase()
    }

    /// The effective parent, when one is declared.
    pub fn parent(&self) -> Option<&Rc<ResourceSchema>> {
        self.parents.first()
    }
}

// Parents serialize as their kind names; the full ancestor schemas are
// reachable through the model graph and would recurse otherwise.
fn serialize_parent_kinds<S>(
    parents: &[Rc<ResourceSchema>],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let kinds: Vec<&str> = parents.iter().map(|p| p.kind.as_str()).collect();
    kinds.serialize(serializer)
}
