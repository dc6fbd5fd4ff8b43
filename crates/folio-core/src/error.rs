//! # Error Types
//!
//! Two error kinds leave the validation layer:
//!
//! - [`ValidationError`]: a raw entry does not conform to its collection's
//!   schema. Carries every violation found in the entry, each with the
//!   field path and the reason.
//! - [`ConfigurationError`]: a collection name that is not registered was
//!   requested. Fatal; indicates a configuration mistake, not bad data.
//!
//! [`ContentError`] wraps both for operations that can fail either way.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::collection::CollectionName;

/// Top-level error for registry operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    /// The entry failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested collection is not registered.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Error raised for a collection name outside the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Lookup of a collection that does not exist.
    #[error(
        "unknown collection {name:?} (registered collections: {})",
        registered_names()
    )]
    UnknownCollection {
        /// The name that was requested.
        name: String,
    },
}

fn registered_names() -> String {
    CollectionName::ALL
        .iter()
        .map(CollectionName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// JSON type of a raw value, used when reporting what was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a raw value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        };
        f.write_str(s)
    }
}

/// The type a validator wanted at a given path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    String,
    Array,
    Date,
    Object,
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::String => "string",
            Self::Array => "array",
            Self::Date => "date",
            Self::Object => "object",
        };
        f.write_str(s)
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationReason {
    /// A required field is absent.
    Missing,
    /// The value has the wrong JSON type.
    WrongType {
        expected: ExpectedType,
        found: ValueKind,
    },
    /// A date field held a string or number that does not parse as a date.
    InvalidDate {
        /// The raw input, rendered as text.
        input: String,
    },
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("required field is missing"),
            Self::WrongType { expected, found } => {
                write!(f, "expected {expected}, received {found}")
            }
            Self::InvalidDate { input } => write!(f, "invalid date: {input}"),
        }
    }
}

/// A single rejected field.
///
/// `field` is empty for violations about the record as a whole. `index`
/// is set when the violation concerns one element of an array field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub index: Option<usize>,
    pub reason: ViolationReason,
}

impl Violation {
    /// A violation on a top-level field.
    pub fn field(field: impl Into<String>, reason: ViolationReason) -> Self {
        Self {
            field: field.into(),
            index: None,
            reason,
        }
    }

    /// A violation on one element of an array field.
    pub fn element(field: impl Into<String>, index: usize, reason: ViolationReason) -> Self {
        Self {
            field: field.into(),
            index: Some(index),
            reason,
        }
    }

    /// A violation on the record itself.
    pub fn root(reason: ViolationReason) -> Self {
        Self {
            field: String::new(),
            index: None,
            reason,
        }
    }

    /// Path to the violating value, e.g. `techStack[1]`, or `(root)`.
    pub fn path(&self) -> String {
        match (self.field.is_empty(), self.index) {
            (true, _) => "(root)".to_string(),
            (false, None) => self.field.clone(),
            (false, Some(i)) => format!("{}[{i}]", self.field),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.path(), self.reason)
    }
}

/// Ordered collection of violations found in one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A raw entry did not conform to its collection's schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Collection the entry was validated against.
    pub collection: CollectionName,
    /// Identifier of the entry, when known (set by the loader).
    pub entry: Option<String>,
    /// Every violation found, in schema field order.
    pub violations: Violations,
}

impl ValidationError {
    pub fn new(collection: CollectionName, violations: impl Into<Violations>) -> Self {
        Self {
            collection,
            entry: None,
            violations: violations.into(),
        }
    }

    /// Attach the id of the entry that failed.
    pub fn with_entry(mut self, entry: impl Into<String>) -> Self {
        self.entry = Some(entry.into());
        self
    }

    /// Names of the fields with at least one violation, without duplicates.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for v in &self.violations {
            if !fields.contains(&v.field.as_str()) {
                fields.push(v.field.as_str());
            }
        }
        fields
    }

    /// Returns true if any violation concerns `field`.
    pub fn has_violation_for(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry {
            Some(entry) => write!(
                f,
                "entry '{entry}' in collection '{}' failed validation:",
                self.collection
            )?,
            None => write!(
                f,
                "entry in collection '{}' failed validation:",
                self.collection
            )?,
        }
        write!(f, "\n{}", self.violations)
    }
}
