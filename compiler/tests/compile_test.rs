#![cfg(test)]

use std::rc::Rc;

use aepgen_compiler::{
    add_resource,
    constants,
    descriptor::{
        DescriptorError, FieldDescriptor, FileDescriptor, HttpPattern, MessageDescriptor,
        ProtoType, RpcType, ServiceDescriptor,
    },
    error::CompilerError,
    generate_resource_message,
    path::{collection_path, parent_capture_path},
    verify_resource,
    well_known::TypeRegistry,
};
use aepgen_schema::{FieldSchema, Methods, ResourceSchema, ScalarType};

fn string_field(name: &str, number: i32) -> FieldSchema {
    FieldSchema {
        name: name.to_owned(),
        type_: ScalarType::String,
        number,
    }
}

fn resource(
    kind: &str,
    plural: &str,
    parents: Vec<Rc<ResourceSchema>>,
    methods: Methods,
) -> ResourceSchema {
    ResourceSchema {
        kind:   kind.to_owned(),
        plural: plural.to_owned(),
        type_:  format!("bookstore.example.com/{}", kind),
        fields: vec![string_field("name", 1)],
        parents,
        methods,
    }
}

fn accumulators() -> (FileDescriptor, ServiceDescriptor) {
    (
        FileDescriptor::new("bookstore.proto", "bookstore"),
        ServiceDescriptor::new("Bookstore"),
    )
}

#[test]
fn test_resource_message_fields_in_bijection() {
    let mut book = resource("Book", "books", vec![], Methods::none());
    book.fields = vec![
        string_field("title", 7),
        FieldSchema {
            name: "pages".to_owned(),
            type_: ScalarType::Int32,
            number: 2,
        },
        FieldSchema {
            name: "in_print".to_owned(),
            type_: ScalarType::Bool,
            number: 4,
        },
        FieldSchema {
            name: "rating".to_owned(),
            type_: ScalarType::Double,
            number: 1,
        },
    ];

    let mb = generate_resource_message(&book).expect("generate_resource_message failed");
    assert_eq!(mb.name, "Book");
    assert_eq!(mb.comment, "A Book resource.");
    assert_eq!(mb.fields().len(), 4);

    // Walked in field-number order, numbers verbatim.
    assert_eq!(mb.fields()[0].name, "rating");
    assert_eq!(mb.fields()[0].number, 1);
    assert_eq!(mb.fields()[0].proto_type, ProtoType::Double);
    assert_eq!(mb.fields()[1].name, "pages");
    assert_eq!(mb.fields()[1].number, 2);
    assert_eq!(mb.fields()[1].proto_type, ProtoType::Int32);
    assert_eq!(mb.fields()[2].name, "in_print");
    assert_eq!(mb.fields()[2].number, 4);
    assert_eq!(mb.fields()[2].proto_type, ProtoType::Bool);
    assert_eq!(mb.fields()[3].name, "title");
    assert_eq!(mb.fields()[3].number, 7);
    assert_eq!(mb.fields()[3].proto_type, ProtoType::String);
    assert_eq!(mb.fields()[3].comment, "Field for title.");
}

#[test]
fn test_book_with_create_read_delete() {
    let mut book = resource(
        "Book",
        "books",
        vec![],
        Methods {
            create: true,
            read: true,
            delete: true,
            ..Methods::none()
        },
    );
    book.fields = vec![string_field("isbn", 3)];

    let (mut fb, mut sb) = accumulators();
    add_resource(&book, &mut fb, &mut sb).expect("add_resource failed");

    // Exactly the resource message plus one request per enabled method.
    let names: Vec<&str> = fb.messages().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Book", "CreateBookRequest", "GetBookRequest", "DeleteBookRequest"]
    );

    let book_mb = fb.message("Book").unwrap();
    assert_eq!(book_mb.fields().len(), 1);
    assert_eq!(book_mb.fields()[0].name, "isbn");
    assert_eq!(book_mb.fields()[0].number, 3);

    let create_req = fb.message("CreateBookRequest").unwrap();
    assert_eq!(create_req.fields().len(), 3);
    let parent = create_req.field("parent").unwrap();
    assert_eq!(parent.number, constants::FIELD_PARENT_NUMBER);
    assert_eq!(parent.number, 1);
    assert!(parent.required);
    // Unconstrained reference on the parent field.
    assert_eq!(parent.resource_reference.as_ref().unwrap().type_, None);
    let id = create_req.field("id").unwrap();
    assert_eq!(id.number, 2);
    assert!(!id.required);
    let embedded = create_req.field("book").unwrap();
    assert_eq!(embedded.number, constants::FIELD_RESOURCE_NUMBER);
    assert_eq!(embedded.proto_type, ProtoType::Message("Book".to_owned()));
    assert!(embedded.required);

    let get_req = fb.message("GetBookRequest").unwrap();
    assert_eq!(get_req.fields().len(), 1);
    let path = get_req.field("path").unwrap();
    assert_eq!(path.number, 1);
    assert!(path.required);
    assert_eq!(
        path.resource_reference.as_ref().unwrap().type_,
        Some("bookstore.example.com/Book".to_owned())
    );

    let delete_req = fb.message("DeleteBookRequest").unwrap();
    assert_eq!(delete_req.fields().len(), 1);
    assert_eq!(delete_req.field("path").unwrap().number, 1);

    let method_names: Vec<&str> = sb.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(method_names, vec!["CreateBook", "GetBook", "DeleteBook"]);

    let create = sb.method("CreateBook").unwrap();
    assert_eq!(create.input, RpcType::Message("CreateBookRequest".to_owned()));
    assert_eq!(create.output, RpcType::Message("Book".to_owned()));
    let http = create.http.as_ref().unwrap();
    assert_eq!(http.pattern, HttpPattern::Post("/{parent=books}".to_owned()));
    assert_eq!(http.body, Some("book".to_owned()));
    assert_eq!(create.signatures, vec!["parent,book".to_owned()]);

    let get = sb.method("GetBook").unwrap();
    let http = get.http.as_ref().unwrap();
    assert_eq!(http.pattern, HttpPattern::Get("/{path=books/*}".to_owned()));
    assert_eq!(http.body, None);
    assert_eq!(get.signatures, vec!["path".to_owned()]);

    let delete = sb.method("DeleteBook").unwrap();
    assert_eq!(
        delete.output,
        RpcType::Imported("google.protobuf.Empty".to_owned())
    );
    let http = delete.http.as_ref().unwrap();
    assert_eq!(http.pattern, HttpPattern::Delete("/{path=books/*}".to_owned()));

    // Delete pulled in the Empty import, and nothing else.
    assert_eq!(fb.imports(), vec!["google/protobuf/empty.proto".to_owned()]);
}

#[test]
fn test_all_methods_message_set() {
    let book = resource("Book", "books", vec![], Methods::all());
    let (mut fb, mut sb) = accumulators();
    add_resource(&book, &mut fb, &mut sb).expect("add_resource failed");

    let names: Vec<&str> = fb.messages().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Book",
            "CreateBookRequest",
            "GetBookRequest",
            "UpdateBookRequest",
            "DeleteBookRequest",
            "ListBookRequest",
            "ListBookResponse",
            "GlobalListBookRequest",
            "GlobalListBookResponse",
            "ApplyBookRequest",
        ]
    );

    let method_names: Vec<&str> = sb.methods().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        method_names,
        vec![
            "CreateBook",
            "GetBook",
            "UpdateBook",
            "DeleteBook",
            "ListBook",
            "GlobalListBook",
            "ApplyBook",
        ]
    );
}

#[test]
fn test_update_method() {
    let book = resource(
        "Book",
        "books",
        vec![],
        Methods {
            update: true,
            ..Methods::none()
        },
    );
    let (mut fb, mut sb) = accumulators();
    add_resource(&book, &mut fb, &mut sb).expect("add_resource failed");

    let update_req = fb.message("UpdateBookRequest").unwrap();
    assert_eq!(update_req.fields().len(), 3);
    assert_eq!(update_req.field("path").unwrap().number, 1);
    assert_eq!(update_req.field("book").unwrap().number, 3);
    let mask = update_req.field("update_mask").unwrap();
    assert_eq!(mask.number, constants::FIELD_UPDATE_MASK_NUMBER);
    assert_eq!(
        mask.proto_type,
        ProtoType::Imported("google.protobuf.FieldMask".to_owned())
    );
    assert_eq!(fb.imports(), vec!["google/protobuf/field_mask.proto".to_owned()]);

    let update = sb.method("UpdateBook").unwrap();
    let http = update.http.as_ref().unwrap();
    assert_eq!(
        http.pattern,
        HttpPattern::Patch("/{book.path=books/*}".to_owned())
    );
    assert_eq!(http.body, Some("book".to_owned()));
    assert_eq!(update.signatures, vec!["book,update_mask".to_owned()]);
}

#[test]
fn test_list_and_global_list_and_apply() {
    let book = resource(
        "Book",
        "books",
        vec![],
        Methods {
            list: true,
            global_list: true,
            apply: true,
            ..Methods::none()
        },
    );
    let (mut fb, mut sb) = accumulators();
    add_resource(&book, &mut fb, &mut sb).expect("add_resource failed");

    let list_req = fb.message("ListBookRequest").unwrap();
    assert_eq!(list_req.field("parent").unwrap().number, 1);
    assert_eq!(list_req.field("page_token").unwrap().number, 2);
    let max_page = list_req.field("max_page_size").unwrap();
    assert_eq!(max_page.number, 3);
    assert_eq!(max_page.proto_type, ProtoType::Int32);

    let list_resp = fb.message("ListBookResponse").unwrap();
    let results = list_resp.field("results").unwrap();
    assert_eq!(results.number, 1);
    assert!(results.repeated);
    assert_eq!(results.proto_type, ProtoType::Message("Book".to_owned()));
    assert_eq!(list_resp.field("next_page_token").unwrap().number, 2);

    let list = sb.method("ListBook").unwrap();
    let http = list.http.as_ref().unwrap();
    assert_eq!(http.pattern, HttpPattern::Get("/{parent=books}".to_owned()));
    assert_eq!(list.signatures, vec!["parent".to_owned()]);

    let global_req = fb.message("GlobalListBookRequest").unwrap();
    assert_eq!(global_req.fields().len(), 2);
    assert_eq!(global_req.field("path").unwrap().number, 1);
    assert_eq!(global_req.field("page_token").unwrap().number, 2);

    let global = sb.method("GlobalListBook").unwrap();
    let http = global.http.as_ref().unwrap();
    assert_eq!(http.pattern, HttpPattern::Get("/{path=--/books}".to_owned()));
    assert!(global.signatures.is_empty());

    let apply_req = fb.message("ApplyBookRequest").unwrap();
    assert_eq!(apply_req.fields().len(), 2);
    let apply = sb.method("ApplyBook").unwrap();
    assert_eq!(apply.output, RpcType::Message("Book".to_owned()));
    let http = apply.http.as_ref().unwrap();
    assert_eq!(http.pattern, HttpPattern::Put("/{path=books/*}".to_owned()));
    assert_eq!(http.body, Some("book".to_owned()));
}

#[test]
fn test_collection_path_over_ancestor_chain() {
    let store = Rc::new(resource("Store", "stores", vec![], Methods::none()));
    let shelf = Rc::new(resource("Shelf", "shelves", vec![store.clone()], Methods::none()));
    let book = resource("Book", "books", vec![shelf.clone()], Methods::none());

    assert_eq!(collection_path(&store), "stores/*");
    assert_eq!(collection_path(&shelf), "stores/*/shelves/*");
    assert_eq!(collection_path(&book), "stores/*/shelves/*/books/*");

    // One "name/*" segment per chain level, ancestor-to-descendant.
    assert_eq!(collection_path(&book).matches("/*").count(), 3);

    assert_eq!(parent_capture_path(&store), "/{parent=stores}");
    assert_eq!(parent_capture_path(&book), "/{parent=stores/*/shelves/*/books}");
}

#[test]
fn test_nested_list_binding() {
    let shelf = Rc::new(resource(
        "Shelf",
        "shelves",
        vec![],
        Methods {
            list: true,
            ..Methods::none()
        },
    ));
    let book = resource(
        "Book",
        "books",
        vec![shelf.clone()],
        Methods {
            list: true,
            ..Methods::none()
        },
    );

    let (mut fb, mut sb) = accumulators();
    add_resource(&shelf, &mut fb, &mut sb).expect("add_resource failed for Shelf");
    add_resource(&book, &mut fb, &mut sb).expect("add_resource failed for Book");

    assert_eq!(collection_path(&book), "shelves/*/books/*");
    let list = sb.method("ListBook").unwrap();
    let http = list.http.as_ref().unwrap();
    assert_eq!(
        http.pattern,
        HttpPattern::Get("/{parent=shelves/*/books}".to_owned())
    );
}

#[test]
fn test_multi_parent_uses_first_parent_only() {
    let shelf = Rc::new(resource("Shelf", "shelves", vec![], Methods::none()));
    let bin = Rc::new(resource("Bin", "bins", vec![], Methods::none()));
    let book = resource("Book", "books", vec![shelf, bin], Methods::none());

    assert_eq!(collection_path(&book), "shelves/*/books/*");
    assert_eq!(parent_capture_path(&book), "/{parent=shelves/*/books}");
}

#[test]
fn test_unsupported_field_type_is_fatal() {
    let mut book = resource("Book", "books", vec![], Methods::all());
    book.fields = vec![FieldSchema {
        name: "mystery".to_owned(),
        type_: ScalarType::Unspecified,
        number: 1,
    }];

    let (mut fb, mut sb) = accumulators();
    let err = add_resource(&book, &mut fb, &mut sb).unwrap_err();
    match err {
        CompilerError::UnsupportedFieldType { kind, field, type_name } => {
            assert_eq!(kind, "Book");
            assert_eq!(field, "mystery");
            assert_eq!(type_name, "unspecified");
        }
        other => panic!("expected UnsupportedFieldType, got {:?}", other),
    }

    // Nothing was registered.
    assert!(fb.messages().is_empty());
    assert!(sb.methods().is_empty());
}

#[test]
fn test_well_known_type_load_failure() {
    let book = resource(
        "Book",
        "books",
        vec![],
        Methods {
            update: true,
            ..Methods::none()
        },
    );

    let mut fb =
        FileDescriptor::with_registry("bookstore.proto", "bookstore", TypeRegistry::empty());
    let mut sb = ServiceDescriptor::new("Bookstore");
    let err = add_resource(&book, &mut fb, &mut sb).unwrap_err();
    match err {
        CompilerError::WellKnownTypeLoad { kind, type_name } => {
            assert_eq!(kind, "Book");
            assert_eq!(type_name, "google.protobuf.FieldMask");
        }
        other => panic!("expected WellKnownTypeLoad, got {:?}", other),
    }
}

#[test]
fn test_compilation_is_idempotent() {
    let shelf = Rc::new(resource("Shelf", "shelves", vec![], Methods::all()));
    let mut book = resource("Book", "books", vec![shelf.clone()], Methods::all());
    book.fields = vec![
        string_field("isbn", 1),
        FieldSchema {
            name: "pages".to_owned(),
            type_: ScalarType::Int64,
            number: 2,
        },
    ];

    let mut runs = Vec::new();
    for _ in 0..2 {
        let (mut fb, mut sb) = accumulators();
        add_resource(&shelf, &mut fb, &mut sb).expect("add_resource failed for Shelf");
        add_resource(&book, &mut fb, &mut sb).expect("add_resource failed for Book");
        let file_json = serde_json::to_string(&fb).expect("file serialization failed");
        let service_json = serde_json::to_string(&sb).expect("service serialization failed");
        runs.push((file_json, service_json));
    }
    assert_eq!(runs[0], runs[1]);
}

#[test]
fn test_descriptor_rejects_duplicates() {
    let mut mb = MessageDescriptor::new("Book");
    mb.add_field(FieldDescriptor::new("isbn", 1, ProtoType::String))
        .expect("add_field failed");
    assert_eq!(
        mb.add_field(FieldDescriptor::new("title", 1, ProtoType::String)),
        Err(DescriptorError::DuplicateFieldNumber {
            message: "Book".to_owned(),
            number:  1,
        })
    );
    assert_eq!(
        mb.add_field(FieldDescriptor::new("isbn", 2, ProtoType::String)),
        Err(DescriptorError::DuplicateFieldName {
            message: "Book".to_owned(),
            field:   "isbn".to_owned(),
        })
    );

    let (mut fb, mut sb) = accumulators();
    let book = resource("Book", "books", vec![], Methods::none());
    add_resource(&book, &mut fb, &mut sb).expect("add_resource failed");
    let err = add_resource(&book, &mut fb, &mut sb).unwrap_err();
    match err {
        CompilerError::Descriptor { kind, source } => {
            assert_eq!(kind, "Book");
            assert_eq!(source, DescriptorError::DuplicateMessage("Book".to_owned()));
        }
        other => panic!("expected Descriptor error, got {:?}", other),
    }
}

#[test]
fn test_verifier() {
    let book = resource("Book", "books", vec![], Methods::all());
    verify_resource(&book).expect("verify_resource failed");

    let mut bad = book.clone();
    bad.kind = "book".to_owned();
    assert!(verify_resource(&bad).is_err());

    let mut bad = book.clone();
    bad.plural = "Books!".to_owned();
    assert!(verify_resource(&bad).is_err());

    let mut bad = book.clone();
    bad.type_ = String::new();
    assert!(verify_resource(&bad).is_err());

    let mut bad = book.clone();
    bad.fields = vec![string_field("isbn", 0)];
    assert!(verify_resource(&bad).is_err());

    let mut bad = book.clone();
    bad.fields = vec![string_field("isbn", 1), string_field("title", 1)];
    assert!(verify_resource(&bad).is_err());

    let mut bad = book;
    bad.fields = vec![string_field("isbn", 1), string_field("isbn", 2)];
    assert!(verify_resource(&bad).is_err());
}
