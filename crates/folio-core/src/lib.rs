//! # folio-core: Foundational Types for Content Collections
//!
//! This crate defines the vocabulary shared by every other folio crate:
//! the closed set of collection names, the strongly-typed entries that
//! validation produces, the coerced `ContentDate`, and the error types
//! returned when raw front matter does not conform.
//!
//! ## Key Design Principles
//!
//! 1. **Closed collection set.** `CollectionName` has exactly two variants,
//!    `Blog` and `Projects`. Parsing any other name yields a
//!    `ConfigurationError`, never a silent default.
//!
//! 2. **Typed entries.** `ProjectEntry` and `BlogEntry` mirror the
//!    collection schemas field for field. Once a value of either type
//!    exists, its required fields are present and its dates are parsed.
//!
//! 3. **Two error kinds.** `ValidationError` is a data problem in one
//!    entry and carries every violation found. `ConfigurationError` is a
//!    programming mistake (an unregistered collection). `ContentError`
//!    wraps both so callers can match on the kind.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `folio-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod collection;
pub mod entry;
pub mod error;
pub mod temporal;

pub use collection::{CollectionKind, CollectionName};
pub use entry::{BlogEntry, ProjectEntry, ValidEntry};
pub use error::{
    ConfigurationError, ContentError, ExpectedType, ValidationError, ValueKind, Violation,
    ViolationReason, Violations,
};
pub use temporal::{ContentDate, DateCoercionError};
