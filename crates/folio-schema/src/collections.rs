//! # Collection Declarations
//!
//! The two registered schemas and the conversions from validated field
//! values into their typed entries.
//!
//! | collection | kind    | fields |
//! |------------|---------|--------|
//! | `projects` | data    | name, description, techStack, url?, repoUrl? |
//! | `blog`     | content | title, description, pubDate, updatedDate?, tags |

use folio_core::{BlogEntry, CollectionName, ProjectEntry, ValidationError};

use crate::field::{FieldKind, FieldSpec};
use crate::schema::{CollectionSchema, FieldValues};

pub static PROJECTS: CollectionSchema = CollectionSchema {
    name: CollectionName::Projects,
    fields: &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("description", FieldKind::String),
        FieldSpec::required("techStack", FieldKind::StringArray),
        FieldSpec::optional("url", FieldKind::String),
        FieldSpec::optional("repoUrl", FieldKind::String),
    ],
};

pub static BLOG: CollectionSchema = CollectionSchema {
    name: CollectionName::Blog,
    fields: &[
        FieldSpec::required("title", FieldKind::String),
        FieldSpec::required("description", FieldKind::String),
        FieldSpec::required("pubDate", FieldKind::CoercedDate),
        FieldSpec::optional("updatedDate", FieldKind::CoercedDate),
        FieldSpec::required("tags", FieldKind::StringArray),
    ],
};

impl TryFrom<FieldValues> for ProjectEntry {
    type Error = ValidationError;

    fn try_from(mut fields: FieldValues) -> Result<Self, Self::Error> {
        Ok(ProjectEntry {
            name: fields.take_string("name")?,
            description: fields.take_string("description")?,
            tech_stack: fields.take_strings("techStack")?,
            url: fields.take_optional_string("url")?,
            repo_url: fields.take_optional_string("repoUrl")?,
        })
    }
}

impl TryFrom<FieldValues> for BlogEntry {
    type Error = ValidationError;

    fn try_from(mut fields: FieldValues) -> Result<Self, Self::Error> {
        Ok(BlogEntry {
            title: fields.take_string("title")?,
            description: fields.take_string("description")?,
            pub_date: fields.take_date("pubDate")?,
            updated_date: fields.take_optional_date("updatedDate")?,
            tags: fields.take_strings("tags")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Presence;
    use folio_core::CollectionKind;
    use serde_json::json;

    #[test]
    fn test_project_table() {
        let names: Vec<&str> = PROJECTS.fields.iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec!["name", "description", "techStack", "url", "repoUrl"]
        );
        assert_eq!(PROJECTS.kind(), CollectionKind::Data);
        assert_eq!(PROJECTS.field("url").unwrap().presence, Presence::Optional);
    }

    #[test]
    fn test_blog_table() {
        let required: Vec<&str> = BLOG.required_fields().map(|f| f.name).collect();
        assert_eq!(required, vec!["title", "description", "pubDate", "tags"]);
        assert_eq!(BLOG.kind(), CollectionKind::Content);
        let updated = BLOG.field("updatedDate").unwrap();
        assert_eq!(updated.kind, FieldKind::CoercedDate);
    }

    #[test]
    fn test_project_conversion() {
        let fields = PROJECTS
            .validate(&json!({
                "name": "folio",
                "description": "Content schemas",
                "techStack": ["Rust"],
                "url": "https://example.com"
            }))
            .unwrap();
        let entry = ProjectEntry::try_from(fields).unwrap();
        assert_eq!(entry.url.as_deref(), Some("https://example.com"));
        assert_eq!(entry.repo_url, None);
    }

    #[test]
    fn test_blog_conversion() {
        let fields = BLOG
            .validate(&json!({
                "title": "Hello",
                "description": "First",
                "pubDate": "2024-01-15",
                "updatedDate": "2024-02-01",
                "tags": []
            }))
            .unwrap();
        let entry = BlogEntry::try_from(fields).unwrap();
        let updated = folio_core::ContentDate::from_ymd(2024, 2, 1);
        assert_eq!(entry.updated_date, updated);
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn test_conversion_from_wrong_collection_fails() {
        let fields = PROJECTS
            .validate(&json!({"name": "n", "description": "d", "techStack": []}))
            .unwrap();
        let err = BlogEntry::try_from(fields).unwrap_err();
        assert!(err.has_violation_for("title"));
    }
}
