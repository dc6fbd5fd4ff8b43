//! # folio-schema: Content Collection Schemas
//!
//! Declares the schemas of the two content collections and validates raw
//! front matter against them.
//!
//! ## Schemas (`field`, `schema`, `collections`)
//!
//! A schema is a static table of [`FieldSpec`]s, each tagged
//! {Required, Optional} x {String, StringArray, CoercedDate}.
//! [`validate_record`] walks the table once and reports every violation
//! it finds rather than stopping at the first. The `projects` and `blog`
//! tables live in [`collections`], together with the conversions from
//! validated fields into `ProjectEntry` / `BlogEntry`.
//!
//! ## Registry (`registry`)
//!
//! [`registry::lookup`] and [`registry::validate`] resolve a collection by
//! name. The registry is a closed, immutable static table; asking for any
//! other name yields a `ConfigurationError`.
//!
//! ## Content Files (`source`, `loader`)
//!
//! [`source`] turns a data file (JSON/YAML) or a markdown file with YAML
//! front matter into a raw record. [`ContentLoader`] walks a content
//! directory laid out as `<content_dir>/<collection>/...` and validates
//! every entry it finds.
//!
//! ## JSON Schema Export (`json_schema`)
//!
//! Renders each collection table as a Draft 2020-12 JSON Schema for
//! editor tooling.
//!
//! ## Crate Policy
//!
//! - Depends only on `folio-core` internally.
//! - Validation is pure: no I/O, no mutation of the input record.
//! - Unknown front-matter fields are dropped, not rejected.

pub mod collections;
pub mod field;
pub mod json_schema;
pub mod loader;
pub mod registry;
pub mod schema;
pub mod source;

pub use collections::{BLOG, PROJECTS};
pub use field::{FieldKind, FieldSpec, FieldValue, Presence};
pub use json_schema::to_json_schema;
pub use loader::{
    CollectionReport, ContentLoader, Entry, EntryError, LoadError, LoadFailure, LoadReport,
};
pub use schema::{validate_record, CollectionSchema, FieldValues};
pub use source::{RawEntry, SourceError};
