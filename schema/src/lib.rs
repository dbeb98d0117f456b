//! Resource model for the aepgen service compiler.
//!
//! A [`ResourceSchema`] describes one resource of an AEP-style API: its
//! singular and plural names, its declared fields, its ancestor chain, and
//! the subset of standard methods it supports. Schemas are produced by an
//! external parser and consumed read-only by `aepgen-compiler`.
//!
//! ```
//! use aepgen_schema::*;
//!
//! let book = ResourceSchema {
//!     kind:    "Book".to_owned(),
//!     plural:  "books".to_owned(),
//!     type_:   "bookstore.example.com/Book".to_owned(),
//!     fields:  vec![FieldSchema { name: "isbn".to_owned(), type_: ScalarType::String, number: 1 }],
//!     parents: vec![],
//!     methods: Methods::all(),
//! };
//! assert_eq!(book.singular(), "book");
//! ```

pub mod resource;

pub use resource::*;
