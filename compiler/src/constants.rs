//! Reserved names and numbers for the structural fields of generated
//! request and response messages.
//!
//! These numbers are a published binary contract shared by every generated
//! API: they must never vary between resources or regenerations. Resource
//! fields keep their author-assigned numbers; only the fields below are
//! compiler-owned.

pub const FIELD_PARENT_NAME: &str = "parent";
pub const FIELD_PARENT_NUMBER: i32 = 1;

pub const FIELD_ID_NAME: &str = "id";
pub const FIELD_ID_NUMBER: i32 = 2;

/// The embedded resource in Create/Update/Apply requests. The field is
/// named after the resource's lowercased kind.
pub const FIELD_RESOURCE_NUMBER: i32 = 3;

pub const FIELD_UPDATE_MASK_NAME: &str = "update_mask";
pub const FIELD_UPDATE_MASK_NUMBER: i32 = 4;

pub const FIELD_PATH_NAME: &str = "path";
pub const FIELD_PATH_NUMBER: i32 = 1;

pub const FIELD_PAGE_TOKEN_NAME: &str = "page_token";
pub const FIELD_PAGE_TOKEN_NUMBER: i32 = 2;

pub const FIELD_MAX_PAGE_SIZE_NAME: &str = "max_page_size";
pub const FIELD_MAX_PAGE_SIZE_NUMBER: i32 = 3;

pub const FIELD_RESOURCES_NAME: &str = "results";
pub const FIELD_RESOURCES_NUMBER: i32 = 1;

pub const FIELD_NEXT_PAGE_TOKEN_NAME: &str = "next_page_token";
pub const FIELD_NEXT_PAGE_TOKEN_NUMBER: i32 = 2;
