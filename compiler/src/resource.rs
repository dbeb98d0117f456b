//! The resource-to-service compiler.
//!
//! [`add_resource`] is invoked once per resource and appends the
//! resource's generated messages and RPC methods to the caller-owned file
//! and service accumulators. The caller must compile a resource's
//! ancestors before the resource itself, so that the ancestors' messages
//! are declared earlier in the same file.

use aepgen_schema::{ResourceSchema, ScalarType};

use crate::{
    constants,
    descriptor::{
        DescriptorError, FieldDescriptor, FileDescriptor, HttpPattern, HttpRule,
        MessageDescriptor, MethodDescriptor, ProtoType, ResourceReference, RpcType,
        ServiceDescriptor,
    },
    error::CompilerError,
    path::{collection_path, parent_capture_path},
    well_known,
};

/// Add a resource's messages and RPCs to a file and service.
pub fn add_resource(
    r: &ResourceSchema,
    fb: &mut FileDescriptor,
    sb: &mut ServiceDescriptor,
) -> Result<(), CompilerError> {
    let resource_mb = generate_resource_message(r)?;
    let resource = RpcType::Message(resource_mb.name.clone());
    fb.add_message(resource_mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    if r.methods.create {
        add_create(r, &resource, fb, sb)?;
    }
    if r.methods.read {
        add_get(r, &resource, fb, sb)?;
    }
    if r.methods.update {
        add_update(r, &resource, fb, sb)?;
    }
    if r.methods.delete {
        add_delete(r, fb, sb)?;
    }
    if r.methods.list {
        add_list(r, &resource, fb, sb)?;
    }
    if r.methods.global_list {
        add_global_list(r, &resource, fb, sb)?;
    }
    if r.methods.apply {
        add_apply(r, &resource, fb, sb)?;
    }
    Ok(())
}

/// Build the resource message itself: one field per schema field, in
/// field-number order, numbers taken verbatim.
pub fn generate_resource_message(
    r: &ResourceSchema,
) -> Result<MessageDescriptor, CompilerError> {
    let mut mb = MessageDescriptor::new(&r.kind);
    mb.set_comment(&format!("A {} resource.", r.kind));
    for field in r.fields_sorted_by_number() {
        let proto_type = match field.type_ {
            ScalarType::String => ProtoType::String,
            ScalarType::Int32 => ProtoType::Int32,
            ScalarType::Int64 => ProtoType::Int64,
            ScalarType::Bool => ProtoType::Bool,
            ScalarType::Double => ProtoType::Double,
            ScalarType::Float => ProtoType::Float,
            ScalarType::Unspecified => {
                return Err(CompilerError::UnsupportedFieldType {
                    kind:      r.kind.clone(),
                    field:     field.name.clone(),
                    type_name: field.type_.name().to_owned(),
                })
            }
        };
        mb.add_field(
            FieldDescriptor::new(&field.name, field.number, proto_type)
                .with_comment(&format!("Field for {}.", field.name)),
        )
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    }
    Ok(mb)
}

fn add_create(
    r: &ResourceSchema,
    resource: &RpcType,
    fb: &mut FileDescriptor,
    sb: &mut ServiceDescriptor,
) -> Result<(), CompilerError> {
    let mut mb = MessageDescriptor::new(&format!("Create{}Request", r.kind));
    mb.set_comment(&format!("A Create request for a {} resource.", r.kind));
    add_parent_field(r, &mut mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    add_id_field(r, &mut mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    add_resource_field(r, resource, &mut mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let input = RpcType::Message(mb.name.clone());
    fb.add_message(mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let mut method =
        MethodDescriptor::new(&format!("Create{}", r.kind), input, resource.clone());
    method.comment = format!("An aep-compliant Create method for {}.", r.kind);
    method.http = Some(HttpRule {
        pattern: HttpPattern::Post(parent_capture_path(r)),
        body:    Some(r.singular()),
    });
    method.signatures = vec![format!(
        "{},{}",
        constants::FIELD_PARENT_NAME,
        r.singular()
    )];
    sb.add_method(method)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))
}

/// Adds a Get method for the resource, along with its request message.
fn add_get(
    r: &ResourceSchema,
    resource: &RpcType,
    fb: &mut FileDescriptor,
    sb: &mut ServiceDescriptor,
) -> Result<(), CompilerError> {
    let mut mb = MessageDescriptor::new(&format!("Get{}Request", r.kind));
    mb.set_comment(&format!("Request message for the Get{} method", r.kind));
    add_path_field(r, &mut mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let input = RpcType::Message(mb.name.clone());
    fb.add_message(mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let mut method = MethodDescriptor::new(&format!("Get{}", r.kind), input, resource.clone());
    method.comment = format!("An aep-compliant Get method for {}.", r.kind);
    method.http = Some(HttpRule {
        pattern: HttpPattern::Get(format!("/{{path={}}}", collection_path(r))),
        body:    None,
    });
    method.signatures = vec![constants::FIELD_PATH_NAME.to_owned()];
    sb.add_method(method)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))
}

fn add_update(
    r: &ResourceSchema,
    resource: &RpcType,
    fb: &mut FileDescriptor,
    sb: &mut ServiceDescriptor,
) -> Result<(), CompilerError> {
    let mut mb = MessageDescriptor::new(&format!("Update{}Request", r.kind));
    mb.set_comment(&format!("Request message for the Update{} method", r.kind));
    add_path_field(r, &mut mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    add_resource_field(r, resource, &mut mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let field_mask = fb
        .resolve_import(well_known::FIELD_MASK)
        .map_err(|_| CompilerError::WellKnownTypeLoad {
            kind:      r.kind.clone(),
            type_name: well_known::FIELD_MASK.to_owned(),
        })?;
    mb.add_field(
        FieldDescriptor::new(
            constants::FIELD_UPDATE_MASK_NAME,
            constants::FIELD_UPDATE_MASK_NUMBER,
            ProtoType::Imported(field_mask.full_name),
        )
        .with_comment("The update mask for the resource"),
    )
    .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let input = RpcType::Message(mb.name.clone());
    fb.add_message(mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let mut method =
        MethodDescriptor::new(&format!("Update{}", r.kind), input, resource.clone());
    method.comment = format!("An aep-compliant Update method for {}.", r.kind);
    method.http = Some(HttpRule {
        pattern: HttpPattern::Patch(format!(
            "/{{{}.path={}}}",
            r.singular(),
            collection_path(r)
        )),
        body:    Some(r.singular()),
    });
    method.signatures = vec![format!(
        "{},{}",
        r.singular(),
        constants::FIELD_UPDATE_MASK_NAME
    )];
    sb.add_method(method)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))
}

fn add_delete(
    r: &ResourceSchema,
    fb: &mut FileDescriptor,
    sb: &mut ServiceDescriptor,
) -> Result<(), CompilerError> {
    let mut mb = MessageDescriptor::new(&format!("Delete{}Request", r.kind));
    mb.set_comment(&format!("Request message for the Delete{} method", r.kind));
    add_path_field(r, &mut mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let input = RpcType::Message(mb.name.clone());
    fb.add_message(mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let empty = fb
        .resolve_import(well_known::EMPTY)
        .map_err(|_| CompilerError::WellKnownTypeLoad {
            kind:      r.kind.clone(),
            type_name: well_known::EMPTY.to_owned(),
        })?;
    let mut method = MethodDescriptor::new(
        &format!("Delete{}", r.kind),
        input,
        RpcType::Imported(empty.full_name),
    );
    method.comment = format!("An aep-compliant Delete method for {}.", r.kind);
    method.http = Some(HttpRule {
        pattern: HttpPattern::Delete(format!("/{{path={}}}", collection_path(r))),
        body:    None,
    });
    method.signatures = vec![constants::FIELD_PATH_NAME.to_owned()];
    sb.add_method(method)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))
}

fn add_list(
    r: &ResourceSchema,
    resource: &RpcType,
    fb: &mut FileDescriptor,
    sb: &mut ServiceDescriptor,
) -> Result<(), CompilerError> {
    let mut req_mb = MessageDescriptor::new(&format!("List{}Request", r.kind));
    req_mb.set_comment(&format!("Request message for the List{} method", r.kind));
    add_parent_field(r, &mut req_mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    add_page_token(&mut req_mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    req_mb
        .add_field(
            FieldDescriptor::new(
                constants::FIELD_MAX_PAGE_SIZE_NAME,
                constants::FIELD_MAX_PAGE_SIZE_NUMBER,
                ProtoType::Int32,
            )
            .with_comment("The maximum number of resources to return in a single page."),
        )
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let input = RpcType::Message(req_mb.name.clone());
    fb.add_message(req_mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;

    let mut resp_mb = MessageDescriptor::new(&format!("List{}Response", r.kind));
    resp_mb.set_comment(&format!("Response message for the List{} method", r.kind));
    add_resources_field(r, resource, &mut resp_mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    add_next_page_token(&mut resp_mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let output = RpcType::Message(resp_mb.name.clone());
    fb.add_message(resp_mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;

    let mut method = MethodDescriptor::new(&format!("List{}", r.kind), input, output);
    method.comment = format!("An aep-compliant List method for {}.", r.plural);
    method.http = Some(HttpRule {
        pattern: HttpPattern::Get(parent_capture_path(r)),
        body:    None,
    });
    method.signatures = vec![constants::FIELD_PARENT_NAME.to_owned()];
    sb.add_method(method)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))
}

fn add_global_list(
    r: &ResourceSchema,
    resource: &RpcType,
    fb: &mut FileDescriptor,
    sb: &mut ServiceDescriptor,
) -> Result<(), CompilerError> {
    let mut req_mb = MessageDescriptor::new(&format!("GlobalList{}Request", r.kind));
    req_mb.set_comment(&format!("Request message for the GlobalList{} method", r.kind));
    add_path_field(r, &mut req_mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    add_page_token(&mut req_mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let input = RpcType::Message(req_mb.name.clone());
    fb.add_message(req_mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;

    let mut resp_mb = MessageDescriptor::new(&format!("GlobalList{}Response", r.kind));
    resp_mb.set_comment(&format!("Response message for the GlobalList{} method", r.kind));
    add_resources_field(r, resource, &mut resp_mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    add_next_page_token(&mut resp_mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let output = RpcType::Message(resp_mb.name.clone());
    fb.add_message(resp_mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;

    let mut method = MethodDescriptor::new(&format!("GlobalList{}", r.kind), input, output);
    // Lists across all parents: `--` is the wildcard-parent segment.
    method.http = Some(HttpRule {
        pattern: HttpPattern::Get(format!("/{{path=--/{}}}", r.plural.to_lowercase())),
        body:    None,
    });
    sb.add_method(method)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))
}

/// Adds an Apply (create-or-replace) method for the resource, along with
/// its request message.
fn add_apply(
    r: &ResourceSchema,
    resource: &RpcType,
    fb: &mut FileDescriptor,
    sb: &mut ServiceDescriptor,
) -> Result<(), CompilerError> {
    let mut mb = MessageDescriptor::new(&format!("Apply{}Request", r.kind));
    mb.set_comment(&format!("Request message for the Apply{} method", r.kind));
    add_path_field(r, &mut mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    add_resource_field(r, resource, &mut mb).map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let input = RpcType::Message(mb.name.clone());
    fb.add_message(mb)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))?;
    let mut method =
        MethodDescriptor::new(&format!("Apply{}", r.kind), input, resource.clone());
    method.comment = format!("An aep-compliant Apply method for {}.", r.plural);
    method.http = Some(HttpRule {
        pattern: HttpPattern::Put(format!("/{{path={}}}", collection_path(r))),
        body:    Some(r.singular()),
    });
    sb.add_method(method)
        .map_err(|e| CompilerError::descriptor(&r.kind, e))
}

fn add_parent_field(r: &ResourceSchema, mb: &mut MessageDescriptor) -> Result<(), DescriptorError> {
    mb.add_field(
        FieldDescriptor::new(
            constants::FIELD_PARENT_NAME,
            constants::FIELD_PARENT_NUMBER,
            ProtoType::String,
        )
        .required()
        .with_reference(ResourceReference::default())
        .with_comment(&format!("A field for the parent of {}", r.kind)),
    )
}

fn add_id_field(_r: &ResourceSchema, mb: &mut MessageDescriptor) -> Result<(), DescriptorError> {
    mb.add_field(
        FieldDescriptor::new(
            constants::FIELD_ID_NAME,
            constants::FIELD_ID_NUMBER,
            ProtoType::String,
        )
        .with_comment("An id that uniquely identifies the resource within the collection"),
    )
}

fn add_path_field(r: &ResourceSchema, mb: &mut MessageDescriptor) -> Result<(), DescriptorError> {
    mb.add_field(
        FieldDescriptor::new(
            constants::FIELD_PATH_NAME,
            constants::FIELD_PATH_NUMBER,
            ProtoType::String,
        )
        .required()
        .with_reference(ResourceReference {
            type_: Some(r.type_.clone()),
        })
        .with_comment("The globally unique identifier for the resource"),
    )
}

fn add_resource_field(
    r: &ResourceSchema,
    resource: &RpcType,
    mb: &mut MessageDescriptor,
) -> Result<(), DescriptorError> {
    let name = match resource {
        RpcType::Message(name) | RpcType::Imported(name) => name.clone(),
    };
    mb.add_field(
        FieldDescriptor::new(
            &r.singular(),
            constants::FIELD_RESOURCE_NUMBER,
            ProtoType::Message(name),
        )
        .required()
        .with_comment("The resource to perform the operation on."),
    )
}

fn add_resources_field(
    r: &ResourceSchema,
    resource: &RpcType,
    mb: &mut MessageDescriptor,
) -> Result<(), DescriptorError> {
    let name = match resource {
        RpcType::Message(name) | RpcType::Imported(name) => name.clone(),
    };
    mb.add_field(
        FieldDescriptor::new(
            constants::FIELD_RESOURCES_NAME,
            constants::FIELD_RESOURCES_NUMBER,
            ProtoType::Message(name),
        )
        .repeated()
        .with_comment(&format!("A list of {}", r.plural)),
    )
}

fn add_page_token(mb: &mut MessageDescriptor) -> Result<(), DescriptorError> {
    mb.add_field(
        FieldDescriptor::new(
            constants::FIELD_PAGE_TOKEN_NAME,
            constants::FIELD_PAGE_TOKEN_NUMBER,
            ProtoType::String,
        )
        .with_comment("The page token indicating the starting point of the page"),
    )
}

fn add_next_page_token(mb: &mut MessageDescriptor) -> Result<(), DescriptorError> {
    mb.add_field(
        FieldDescriptor::new(
            constants::FIELD_NEXT_PAGE_TOKEN_NAME,
            constants::FIELD_NEXT_PAGE_TOKEN_NUMBER,
            ProtoType::String,
        )
        .with_comment("The page token indicating the ending point of this response."),
    )
}
