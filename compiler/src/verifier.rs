//! Pre-compilation validation of a resource schema.
//!
//! The generators assume validated input; callers run [`verify_resource`]
//! over each parsed resource first. Violations abort the run the same way
//! generation errors do.

use aepgen_schema::ResourceSchema;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::CompilerError;

lazy_static! {
    static ref KIND: Regex = Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap();
    static ref LOWER_IDENTIFIER: Regex = Regex::new(r"^[a-z][a-z0-9_]*$").unwrap();
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text)
}

/// Returns `Ok(())` if the resource is well-formed, or
/// `Err(CompilerError::Verifier(_))` otherwise.
pub fn verify_resource(r: &ResourceSchema) -> Result<(), CompilerError> {
    if !KIND.is_match(&r.kind) {
        return Err(CompilerError::Verifier(format!(
            "The kind {} is not a capitalized identifier",
            quote(&r.kind)
        )));
    }
    if !LOWER_IDENTIFIER.is_match(&r.plural) {
        return Err(CompilerError::Verifier(format!(
            "The plural {} of resource {} is not a lowercase identifier",
            quote(&r.plural),
            quote(&r.kind)
        )));
    }
    if r.type_.is_empty() {
        return Err(CompilerError::Verifier(format!(
            "The resource {} has no type identifier",
            quote(&r.kind)
        )));
    }

    let mut names: Vec<&str> = Vec::new();
    let mut numbers: Vec<i32> = Vec::new();
    for field in &r.fields {
        if !LOWER_IDENTIFIER.is_match(&field.name) {
            return Err(CompilerError::Verifier(format!(
                "The field name {} of resource {} is not a lowercase identifier",
                quote(&field.name),
                quote(&r.kind)
            )));
        }
        if names.contains(&field.name.as_str()) {
            return Err(CompilerError::Verifier(format!(
                "The field name {} is used twice in resource {}",
                quote(&field.name),
                quote(&r.kind)
            )));
        }
        if field.number <= 0 {
            return Err(CompilerError::Verifier(format!(
                "The number for field {} of resource {} must be positive",
                quote(&field.name),
                quote(&r.kind)
            )));
        }
        if numbers.contains(&field.number) {
            return Err(CompilerError::Verifier(format!(
                "The number for field {} of resource {} is used twice",
                quote(&field.name),
                quote(&r.kind)
            )));
        }
        names.push(&field.name);
        numbers.push(field.number);
    }

    Ok(())
}
