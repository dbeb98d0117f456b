//! REST path templates derived from a resource's ancestor chain.
//!
//! Paths are a pure function of the chain's plural names; they never read
//! registered descriptors or any other run-time state.

use aepgen_schema::ResourceSchema;

/// The collection path of a resource: every ancestor's plural name with a
/// single-segment wildcard, ancestor-to-descendant, ending in the
/// resource's own plural/wildcard pair.
///
/// `Book` under `Shelf` under `Store` yields `stores/*/shelves/*/books/*`;
/// a parentless resource yields `books/*`. Walks the full chain through
/// each level's first declared parent; additional parents are ignored.
pub fn collection_path(r: &ResourceSchema) -> String {
    let mut elements = vec![r.plural.to_lowercase()];
    let mut ancestor = r.parent();
    while let Some(p) = ancestor {
        elements.insert(0, p.plural.to_lowercase());
        ancestor = p.parent();
    }
    format!("{}/*", elements.join("/*/"))
}

/// The binding path for operations on a resource's collection (Create,
/// List): the immediate parent's collection path, followed by the
/// resource's plural name, wrapped in a `parent` capture group.
///
/// With a parent: `/{parent=shelves/*/books}`; without: `/{parent=books}`.
pub fn parent_capture_path(r: &ResourceSchema) -> String {
    let plural = r.plural.to_lowercase();
    match r.parent() {
        Some(p) => format!("/{{parent={}/{}}}", collection_path(p), plural),
        None => format!("/{{parent={}}}", plural),
    }
}
