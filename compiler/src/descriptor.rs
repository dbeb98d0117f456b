//! The descriptor types the compiler emits.
//!
//! These are explicit structured records rather than generic options bags:
//! HTTP bindings, required markers, and resource references are plain
//! fields on the method and field descriptors, so the generated contract
//! is readable straight off the data model. A downstream protocol emitter
//! serializes them into its own wire form.

use serde::Serialize;
use thiserror::Error;

use crate::well_known::{ImportedMessage, TypeRegistry};

/// Structural violations detected while assembling descriptors. These are
/// the only failures the descriptor layer itself can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("the field number {number} is used twice in message \"{message}\"")]
    DuplicateFieldNumber { message: String, number: i32 },

    #[error("the field name \"{field}\" is used twice in message \"{message}\"")]
    DuplicateFieldName { message: String, field: String },

    #[error("the message \"{0}\" is declared twice in the file")]
    DuplicateMessage(String),

    #[error("the method \"{0}\" is declared twice in the service")]
    DuplicateMethod(String),

    #[error("the type \"{0}\" is not present in the file's type registry")]
    MissingImport(String),
}

/// The protocol-level type of a generated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProtoType {
    String,
    Int32,
    Int64,
    Bool,
    Double,
    Float,
    /// A message declared in the same generated file, by name.
    Message(String),
    /// An imported message, by fully-qualified name.
    Imported(String),
}

/// A field's declared reference to another resource. `type_` of `None`
/// leaves the referenced resource type unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceReference {
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name:       String,
    pub number:     i32,
    pub proto_type: ProtoType,
    pub repeated:   bool,
    pub required:   bool,
    pub resource_reference: Option<ResourceReference>,
    pub comment:    String,
}

impl FieldDescriptor {
    pub fn new(name: &str, number: i32, proto_type: ProtoType) -> Self {
        FieldDescriptor {
            name: name.to_owned(),
            number,
            proto_type,
            repeated: false,
            required: false,
            resource_reference: None,
            comment: String::new(),
        }
    }

    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_reference(mut self, reference: ResourceReference) -> Self {
        self.resource_reference = Some(reference);
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_owned();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageDescriptor {
    pub name:    String,
    pub comment: String,
    fields:      Vec<FieldDescriptor>,
}

impl MessageDescriptor {
    pub fn new(name: &str) -> Self {
        MessageDescriptor {
            name:    name.to_owned(),
            comment: String::new(),
            fields:  Vec::new(),
        }
    }

    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.to_owned();
    }

    /// Append a field, rejecting duplicate numbers and duplicate names.
    pub fn add_field(&mut self, field: FieldDescriptor) -> Result<(), DescriptorError> {
        if self.fields.iter().any(|f| f.number == field.number) {
            return Err(DescriptorError::DuplicateFieldNumber {
                message: self.name.clone(),
                number:  field.number,
            });
        }
        if self.fields.iter().any(|f| f.name == field.name) {
            return Err(DescriptorError::DuplicateFieldName {
                message: self.name.clone(),
                field:   field.name,
            });
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The input or output message of an RPC method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RpcType {
    /// A message declared in the generated file, by name.
    Message(String),
    /// An imported message, by fully-qualified name.
    Imported(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HttpPattern {
    Get(String),
    Post(String),
    Put(String),
    Patch(String),
    Delete(String),
}

impl HttpPattern {
    /// The path template, whichever verb carries it.
    pub fn template(&self) -> &str {
        match self {
            HttpPattern::Get(t)
            | HttpPattern::Post(t)
            | HttpPattern::Put(t)
            | HttpPattern::Patch(t)
            | HttpPattern::Delete(t) => t,
        }
    }
}

/// The REST binding of a method: verb, path template, and the request
/// field transmitted as the HTTP body, when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HttpRule {
    pub pattern: HttpPattern,
    pub body:    Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDescriptor {
    pub name:    String,
    pub input:   RpcType,
    pub output:  RpcType,
    pub http:    Option<HttpRule>,
    /// Canonical signature hints: each entry is a comma-joined list of the
    /// primary positional request fields.
    pub signatures: Vec<String>,
    pub comment: String,
}

impl MethodDescriptor {
    pub fn new(name: &str, input: RpcType, output: RpcType) -> Self {
        MethodDescriptor {
            name: name.to_owned(),
            input,
            output,
            http: None,
            signatures: Vec::new(),
            comment: String::new(),
        }
    }
}

/// The file accumulator: collects every message generated during one
/// compilation run, plus the imports they rely on. Constructed fresh per
/// run and handed to `add_resource` by `&mut`; not safe for concurrent
/// appends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileDescriptor {
    pub name:    String,
    pub package: String,
    registry:    TypeRegistry,
    imports:     Vec<String>,
    messages:    Vec<MessageDescriptor>,
}

impl FileDescriptor {
    /// A file backed by [`TypeRegistry::standard`].
    pub fn new(name: &str, package: &str) -> Self {
        FileDescriptor::with_registry(name, package, TypeRegistry::standard())
    }

    pub fn with_registry(name: &str, package: &str, registry: TypeRegistry) -> Self {
        FileDescriptor {
            name:    name.to_owned(),
            package: package.to_owned(),
            registry,
            imports:  Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Append a message, rejecting duplicate message names.
    pub fn add_message(&mut self, message: MessageDescriptor) -> Result<(), DescriptorError> {
        if self.messages.iter().any(|m| m.name == message.name) {
            return Err(DescriptorError::DuplicateMessage(message.name));
        }
        self.messages.push(message);
        Ok(())
    }

    /// Resolve a fully-qualified type name against the registry and record
    /// its import path in the file's import list.
    pub fn resolve_import(&mut self, full_name: &str) -> Result<ImportedMessage, DescriptorError> {
        let imported = self
            .registry
            .lookup(full_name)
            .cloned()
            .ok_or_else(|| DescriptorError::MissingImport(full_name.to_owned()))?;
        if !self.imports.contains(&imported.import_path) {
            self.imports.push(imported.import_path.clone());
        }
        Ok(imported)
    }

    pub fn messages(&self) -> &[MessageDescriptor] {
        &self.messages
    }

    pub fn message(&self, name: &str) -> Option<&MessageDescriptor> {
        self.messages.iter().find(|m| m.name == name)
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }
}

/// The service accumulator: collects every RPC method generated during one
/// compilation run. Same ownership rules as [`FileDescriptor`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceDescriptor {
    pub name: String,
    methods:  Vec<MethodDescriptor>,
}

impl ServiceDescriptor {
    pub fn new(name: &str) -> Self {
        ServiceDescriptor {
            name:    name.to_owned(),
            methods: Vec::new(),
        }
    }

    /// Append a method, rejecting duplicate method names.
    pub fn add_method(&mut self, method: MethodDescriptor) -> Result<(), DescriptorError> {
        if self.methods.iter().any(|m| m.name == method.name) {
            return Err(DescriptorError::DuplicateMethod(method.name));
        }
        self.methods.push(method);
        Ok(())
    }

    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.methods
    }

    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}
