//! aepgen-compiler
//!
//! This crate implements:
//!  1) The descriptor model the compiler emits (`descriptor`): messages,
//!     fields, RPC methods, HTTP bindings, and the file/service
//!     accumulators a compilation run appends to,
//!  2) The resource-to-service compiler (`resource::add_resource`), which
//!     turns one `ResourceSchema` into its resource message, per-method
//!     request/response messages, and annotated RPCs,
//!  3) REST path generation over the ancestor chain (`path`),
//!  4) A schema verifier (`verifier`) establishing the validated-input
//!     precondition, and
//!  5) Error types (`CompilerError`).
//!
//! An external driver compiles resources one at a time, ancestors first:
//!
//! ```
//! use aepgen_compiler::descriptor::{FileDescriptor, ServiceDescriptor};
//! use aepgen_compiler::{add_resource, verify_resource};
//! use aepgen_schema::{FieldSchema, Methods, ResourceSchema, ScalarType};
//!
//! let book = ResourceSchema {
//!     kind:    "Book".to_owned(),
//!     plural:  "books".to_owned(),
//!     type_:   "bookstore.example.com/Book".to_owned(),
//!     fields:  vec![FieldSchema { name: "isbn".to_owned(), type_: ScalarType::String, number: 1 }],
//!     parents: vec![],
//!     methods: Methods::all(),
//! };
//!
//! let mut fb = FileDescriptor::new("bookstore.proto", "bookstore");
//! let mut sb = ServiceDescriptor::new("Bookstore");
//! verify_resource(&book)?;
//! add_resource(&book, &mut fb, &mut sb)?;
//! assert_eq!(sb.methods().len(), 7);
//! # Ok::<(), aepgen_compiler::CompilerError>(())
//! ```

pub mod constants;
pub mod descriptor;
pub mod error;
pub mod path;
pub mod resource;
pub mod verifier;
pub mod well_known;

pub use error::CompilerError;
pub use resource::add_resource;
pub use resource::generate_resource_message;
pub use verifier::verify_resource;
