//! # Collection Schemas
//!
//! A [`CollectionSchema`] binds a collection name to its field table.
//! [`validate_record`] is the one generic validation routine: it checks
//! every field of the table against a raw record and either returns the
//! typed values or a `ValidationError` listing every violation, in table
//! order.

use std::collections::BTreeMap;

use folio_core::{
    CollectionKind, CollectionName, ContentDate, ExpectedType, ValidationError, ValueKind,
    Violation, ViolationReason,
};
use serde_json::Value;

use crate::field::{FieldSpec, FieldValue};

/// The schema of one collection: its name and its field table.
#[derive(Debug, PartialEq, Eq)]
pub struct CollectionSchema {
    pub name: CollectionName,
    pub fields: &'static [FieldSpec],
}

impl CollectionSchema {
    /// Whether entries are data files or markdown content.
    pub fn kind(&self) -> CollectionKind {
        self.name.kind()
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Required fields in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.is_required())
    }

    /// Validate a raw record against this schema. See [`validate_record`].
    pub fn validate(&self, record: &Value) -> Result<FieldValues, ValidationError> {
        validate_record(self, record)
    }
}

/// Validate a raw record against a schema, collecting every violation.
///
/// The record must be a JSON object. Keys the schema does not declare are
/// ignored and do not appear in the result.
///
/// # Errors
///
/// Returns a `ValidationError` for the schema's collection when the record
/// is not an object, or when any field fails its validator.
pub fn validate_record(
    schema: &CollectionSchema,
    record: &Value,
) -> Result<FieldValues, ValidationError> {
    let Value::Object(map) = record else {
        return Err(ValidationError::new(
            schema.name,
            vec![Violation::root(ViolationReason::WrongType {
                expected: ExpectedType::Object,
                found: ValueKind::of(record),
            })],
        ));
    };

    let mut violations = Vec::new();
    let mut values = BTreeMap::new();

    for spec in schema.fields {
        if let Some(value) = spec.check(map.get(spec.name), &mut violations) {
            values.insert(spec.name, value);
        }
    }

    for key in map.keys().filter(|k| schema.field(k).is_none()) {
        tracing::debug!(collection = %schema.name, field = %key, "ignoring undeclared field");
    }

    if violations.is_empty() {
        Ok(FieldValues {
            collection: schema.name,
            values,
        })
    } else {
        Err(ValidationError::new(schema.name, violations))
    }
}

/// Typed field values of a record that passed validation.
///
/// The `take_*` accessors move values out when building a typed entry.
/// They fail only if the caller asks for a field the schema does not
/// declare with that kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValues {
    collection: CollectionName,
    values: BTreeMap<&'static str, FieldValue>,
}

impl FieldValues {
    pub fn collection(&self) -> CollectionName {
        self.collection
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn take_string(&mut self, field: &'static str) -> Result<String, ValidationError> {
        let value = self.take_optional_string(field)?;
        self.require(field, value)
    }

    pub fn take_optional_string(
        &mut self,
        field: &'static str,
    ) -> Result<Option<String>, ValidationError> {
        self.take_as(field, ExpectedType::String, |v| match v {
            FieldValue::String(s) => Ok(s),
            other => Err(other),
        })
    }

    pub fn take_strings(&mut self, field: &'static str) -> Result<Vec<String>, ValidationError> {
        let value = self.take_as(field, ExpectedType::Array, |v| match v {
            FieldValue::Strings(s) => Ok(s),
            other => Err(other),
        })?;
        self.require(field, value)
    }

    pub fn take_date(&mut self, field: &'static str) -> Result<ContentDate, ValidationError> {
        let value = self.take_optional_date(field)?;
        self.require(field, value)
    }

    pub fn take_optional_date(
        &mut self,
        field: &'static str,
    ) -> Result<Option<ContentDate>, ValidationError> {
        self.take_as(field, ExpectedType::Date, |v| match v {
            FieldValue::Date(d) => Ok(d),
            other => Err(other),
        })
    }

    fn take_as<T>(
        &mut self,
        field: &'static str,
        expected: ExpectedType,
        extract: fn(FieldValue) -> Result<T, FieldValue>,
    ) -> Result<Option<T>, ValidationError> {
        match self.values.remove(field) {
            None => Ok(None),
            Some(value) => extract(value).map(Some).map_err(|other| {
                ValidationError::new(
                    self.collection,
                    vec![Violation::field(
                        field,
                        ViolationReason::WrongType {
                            expected,
                            found: other.value_kind(),
                        },
                    )],
                )
            }),
        }
    }

    fn require<T>(&self, field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
        value.ok_or_else(|| {
            ValidationError::new(
                self.collection,
                vec![Violation::field(field, ViolationReason::Missing)],
            )
        })
    }
}
