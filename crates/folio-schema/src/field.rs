//! # Field Validators
//!
//! The validator primitives a collection schema is built from. A field is
//! a name plus a [`FieldKind`] and a [`Presence`]; checking it against a
//! raw value either yields a typed [`FieldValue`] or appends violations.

use folio_core::{ContentDate, ExpectedType, ValueKind, Violation, ViolationReason};
use serde_json::Value;

/// The type a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// An array whose every element is a JSON string.
    StringArray,
    /// A string or number coerced into a [`ContentDate`].
    CoercedDate,
}

/// Whether a field must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// One entry of a collection schema table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub presence: Presence,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            presence: Presence::Optional,
        }
    }

    pub fn is_required(&self) -> bool {
        self.presence == Presence::Required
    }

    /// Check a raw value (or its absence) against this field.
    ///
    /// Returns the typed value on success. On failure, pushes one
    /// violation per problem onto `violations` (one per bad element for
    /// arrays) and returns `None`. An absent optional field also returns
    /// `None`, without a violation.
    pub fn check(
        &self,
        value: Option<&Value>,
        violations: &mut Vec<Violation>,
    ) -> Option<FieldValue> {
        let Some(value) = value else {
            if self.is_required() {
                violations.push(Violation::field(self.name, ViolationReason::Missing));
            }
            return None;
        };

        match self.kind {
            FieldKind::String => match value {
                Value::String(s) => Some(FieldValue::String(s.clone())),
                other => {
                    violations.push(self.wrong_type(ExpectedType::String, other));
                    None
                }
            },
            FieldKind::StringArray => match value {
                Value::Array(items) => self.check_elements(items, violations),
                other => {
                    violations.push(self.wrong_type(ExpectedType::Array, other));
                    None
                }
            },
            FieldKind::CoercedDate => match ContentDate::coerce(value) {
                Ok(date) => Some(FieldValue::Date(date)),
                Err(e) => {
                    violations.push(Violation::field(self.name, e.into()));
                    None
                }
            },
        }
    }

    fn check_elements(
        &self,
        items: &[Value],
        violations: &mut Vec<Violation>,
    ) -> Option<FieldValue> {
        let mut strings = Vec::with_capacity(items.len());
        let mut clean = true;
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => strings.push(s.clone()),
                other => {
                    clean = false;
                    violations.push(Violation::element(
                        self.name,
                        i,
                        ViolationReason::WrongType {
                            expected: ExpectedType::String,
                            found: ValueKind::of(other),
                        },
                    ));
                }
            }
        }
        clean.then_some(FieldValue::Strings(strings))
    }

    fn wrong_type(&self, expected: ExpectedType, found: &Value) -> Violation {
        Violation::field(
            self.name,
            ViolationReason::WrongType {
                expected,
                found: ValueKind::of(found),
            },
        )
    }
}

/// A field value that passed its validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Strings(Vec<String>),
    Date(ContentDate),
}

impl FieldValue {
    /// The JSON type this value was read from.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::Strings(_) => ValueKind::Array,
            Self::String(_) | Self::Date(_) => ValueKind::String,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(spec: FieldSpec, value: Option<Value>) -> (Option<FieldValue>, Vec<Violation>) {
        let mut violations = Vec::new();
        let result = spec.check(value.as_ref(), &mut violations);
        (result, violations)
    }

    #[test]
    fn test_required_missing() {
        let (value, violations) = run(FieldSpec::required("title", FieldKind::String), None);
        assert!(value.is_none());
        assert_eq!(
            violations,
            vec![Violation::field("title", ViolationReason::Missing)]
        );
    }

    #[test]
    fn test_optional_missing_is_silent() {
        let (value, violations) = run(FieldSpec::optional("url", FieldKind::String), None);
        assert!(value.is_none());
        assert!(violations.is_empty());
    }

    #[test]
    fn test_string_accepts_empty() {
        let (value, violations) = run(
            FieldSpec::required("description", FieldKind::String),
            Some(json!("")),
        );
        assert_eq!(value, Some(FieldValue::String(String::new())));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_string_rejects_number() {
        let (_, violations) = run(
            FieldSpec::required("name", FieldKind::String),
            Some(json!(7)),
        );
        assert_eq!(
            violations[0].reason,
            ViolationReason::WrongType {
                expected: ExpectedType::String,
                found: ValueKind::Number
            }
        );
    }

    #[test]
    fn test_optional_null_is_wrong_type() {
        let (_, violations) = run(
            FieldSpec::optional("url", FieldKind::String),
            Some(json!(null)),
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "url");
    }

    #[test]
    fn test_array_preserves_order() {
        let (value, _) = run(
            FieldSpec::required("tags", FieldKind::StringArray),
            Some(json!(["b", "a", "c"])),
        );
        assert_eq!(
            value,
            Some(FieldValue::Strings(vec![
                "b".to_string(),
                "a".to_string(),
                "c".to_string()
            ]))
        );
    }

    #[test]
    fn test_array_accepts_empty() {
        let (value, violations) = run(
            FieldSpec::required("tags", FieldKind::StringArray),
            Some(json!([])),
        );
        assert_eq!(value, Some(FieldValue::Strings(vec![])));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_array_reports_each_bad_element() {
        let (value, violations) = run(
            FieldSpec::required("techStack", FieldKind::StringArray),
            Some(json!(["TypeScript", 42, "Rust", false])),
        );
        assert!(value.is_none());
        let paths: Vec<String> = violations.iter().map(Violation::path).collect();
        assert_eq!(paths, vec!["techStack[1]", "techStack[3]"]);
    }

    #[test]
    fn test_array_rejects_scalar() {
        let (_, violations) = run(
            FieldSpec::required("tags", FieldKind::StringArray),
            Some(json!("rust")),
        );
        assert_eq!(violations[0].path(), "tags");
    }

    #[test]
    fn test_date_coerced() {
        let (value, _) = run(
            FieldSpec::required("pubDate", FieldKind::CoercedDate),
            Some(json!("2024-01-15")),
        );
        let expected = ContentDate::from_ymd(2024, 1, 15).unwrap();
        assert_eq!(value, Some(FieldValue::Date(expected)));
    }

    #[test]
    fn test_date_unparseable() {
        let (_, violations) = run(
            FieldSpec::optional("updatedDate", FieldKind::CoercedDate),
            Some(json!("not-a-date")),
        );
        assert_eq!(
            violations[0].reason,
            ViolationReason::InvalidDate {
                input: "\"not-a-date\"".to_string()
            }
        );
    }
}
