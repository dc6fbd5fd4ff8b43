//! # Schema Registry
//!
//! The closed mapping from collection name to schema. It is a static
//! table built at compile time; nothing registers collections at runtime.
//!
//! ## Thread Safety
//!
//! Every schema is `'static` immutable data, so lookups and validation can
//! run from any number of threads with no coordination.

use folio_core::{
    BlogEntry, CollectionName, ConfigurationError, ContentError, ProjectEntry, ValidEntry,
    ValidationError,
};
use serde_json::Value;

use crate::collections::{BLOG, PROJECTS};
use crate::schema::CollectionSchema;

static COLLECTIONS: [&CollectionSchema; 2] = [&BLOG, &PROJECTS];

/// Every registered schema, ordered by collection name.
pub fn collections() -> &'static [&'static CollectionSchema] {
    &COLLECTIONS
}

/// The schema of a known collection.
pub fn schema_for(name: CollectionName) -> &'static CollectionSchema {
    match name {
        CollectionName::Blog => &BLOG,
        CollectionName::Projects => &PROJECTS,
    }
}

/// Resolve a collection by name.
///
/// # Errors
///
/// `ConfigurationError::UnknownCollection` for any name other than
/// `blog` or `projects`.
pub fn lookup(name: &str) -> Result<&'static CollectionSchema, ConfigurationError> {
    name.parse::<CollectionName>().map(schema_for)
}

/// Validate a raw entry against the collection called `name`.
///
/// # Errors
///
/// `ContentError::Configuration` if the collection is not registered,
/// `ContentError::Validation` if the entry does not conform.
pub fn validate(name: &str, raw: &Value) -> Result<ValidEntry, ContentError> {
    let collection = name.parse::<CollectionName>()?;
    Ok(validate_collection(collection, raw)?)
}

/// Validate a raw entry against a known collection.
pub fn validate_collection(
    collection: CollectionName,
    raw: &Value,
) -> Result<ValidEntry, ValidationError> {
    match collection {
        CollectionName::Blog => validate_blog(raw).map(ValidEntry::Blog),
        CollectionName::Projects => validate_project(raw).map(ValidEntry::Project),
    }
}

/// Validate a raw `projects` entry.
pub fn validate_project(raw: &Value) -> Result<ProjectEntry, ValidationError> {
    PROJECTS.validate(raw)?.try_into()
}

/// Validate a raw `blog` entry.
pub fn validate_blog(raw: &Value) -> Result<BlogEntry, ValidationError> {
    BLOG.validate(raw)?.try_into()
}
