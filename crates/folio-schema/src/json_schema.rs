//! # JSON Schema Export
//!
//! Renders a collection table as a JSON Schema (Draft 2020-12) document so
//! editors can offer completion and inline diagnostics for data files and
//! front matter.
//!
//! The export mirrors validation, with one relaxation: the JSON Schema
//! vocabulary cannot express date coercion, so date fields accept any
//! date-time string, date string, or number. Whether the value actually
//! parses is only known to [`crate::validate_record`].

use folio_core::CollectionName;
use serde_json::{json, Map, Value};

use crate::field::{FieldKind, FieldSpec};
use crate::registry;
use crate::schema::CollectionSchema;

pub const DRAFT_2020_12: &str = "https://json-schema.org/draft/2020-12/schema";

/// File name used when writing a collection's schema to disk.
pub fn schema_file_name(collection: CollectionName) -> String {
    format!("{collection}.schema.json")
}

/// Render one collection schema.
pub fn to_json_schema(schema: &CollectionSchema) -> Value {
    let properties: Map<String, Value> = schema
        .fields
        .iter()
        .map(|f| (f.name.to_string(), field_schema(f)))
        .collect();
    let required: Vec<&str> = schema.required_fields().map(|f| f.name).collect();

    json!({
        "$schema": DRAFT_2020_12,
        "title": schema.name.as_str(),
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": true,
    })
}

/// Render every registered collection, in registry order.
pub fn all_json_schemas() -> Vec<(CollectionName, Value)> {
    registry::collections()
        .iter()
        .map(|s| (s.name, to_json_schema(s)))
        .collect()
}

fn field_schema(field: &FieldSpec) -> Value {
    match field.kind {
        FieldKind::String => json!({ "type": "string" }),
        FieldKind::StringArray => json!({
            "type": "array",
            "items": { "type": "string" },
        }),
        FieldKind::CoercedDate => json!({
            "anyOf": [
                { "type": "string", "format": "date-time" },
                { "type": "string", "format": "date" },
                { "type": "number" },
            ],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::{BLOG, PROJECTS};

    fn validator(schema: &Value) -> jsonschema::Validator {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        opts.build(schema).unwrap()
    }

    #[test]
    fn test_project_schema_shape() {
        let schema = to_json_schema(&PROJECTS);
        assert_eq!(schema["$schema"], DRAFT_2020_12);
        assert_eq!(
            schema["required"],
            json!(["name", "description", "techStack"])
        );
        assert_eq!(schema["properties"]["techStack"]["items"]["type"], "string");
        assert_eq!(schema["properties"]["url"]["type"], "string");
    }

    #[test]
    fn test_blog_schema_date_fields() {
        let schema = to_json_schema(&BLOG);
        assert!(schema["properties"]["pubDate"]["anyOf"].is_array());
        assert_eq!(
            schema["required"],
            json!(["title", "description", "pubDate", "tags"])
        );
    }

    #[test]
    fn test_exported_schema_accepts_what_validation_accepts() {
        let v = validator(&to_json_schema(&PROJECTS));
        let record = json!({
            "name": "folio",
            "description": "schemas",
            "techStack": ["Rust"],
            "repoUrl": "https://example.com/folio.git",
            "featured": true
        });
        assert!(v.is_valid(&record));
        assert!(registry::validate_project(&record).is_ok());
    }

    #[test]
    fn test_exported_schema_rejects_what_validation_rejects() {
        let v = validator(&to_json_schema(&PROJECTS));
        for record in [
            json!({"name": "folio", "description": "d", "techStack": ["TypeScript", 42]}),
            json!({"description": "d", "techStack": []}),
            json!({"name": 1, "description": "d", "techStack": []}),
        ] {
            assert!(!v.is_valid(&record), "schema accepted {record}");
            assert!(registry::validate_project(&record).is_err());
        }
    }

    #[test]
    fn test_blog_schema_compiles_and_accepts_epoch_dates() {
        let v = validator(&to_json_schema(&BLOG));
        assert!(v.is_valid(&json!({
            "title": "t",
            "description": "d",
            "pubDate": 1_705_276_800_000_i64,
            "tags": []
        })));
        assert!(!v.is_valid(&json!({
            "title": "t",
            "description": "d",
            "pubDate": true,
            "tags": []
        })));
    }

    #[test]
    fn test_all_json_schemas() {
        let names: Vec<CollectionName> = all_json_schemas().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, CollectionName::ALL.to_vec());
        assert_eq!(schema_file_name(CollectionName::Blog), "blog.schema.json");
    }
}
