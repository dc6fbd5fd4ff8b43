//! # Typed Entries
//!
//! The shapes produced by successful validation. Field names serialize in
//! the camelCase used by front matter so a validated entry can be written
//! back out (e.g. `folio check --json`) with the same keys it was read with.

use serde::{Deserialize, Serialize};

use crate::collection::CollectionName;
use crate::temporal::ContentDate;

/// An entry of the `projects` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    /// Technologies in the order the author listed them.
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

/// An entry of the `blog` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogEntry {
    pub title: String,
    pub description: String,
    pub pub_date: ContentDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<ContentDate>,
    pub tags: Vec<String>,
}

/// A validated entry of any registered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ValidEntry {
    Project(ProjectEntry),
    Blog(BlogEntry),
}

impl ValidEntry {
    /// The collection this entry belongs to.
    pub fn collection(&self) -> CollectionName {
        match self {
            Self::Project(_) => CollectionName::Projects,
            Self::Blog(_) => CollectionName::Blog,
        }
    }

    pub fn as_project(&self) -> Option<&ProjectEntry> {
        match self {
            Self::Project(p) => Some(p),
            Self::Blog(_) => None,
        }
    }

    pub fn as_blog(&self) -> Option<&BlogEntry> {
        match self {
            Self::Blog(b) => Some(b),
            Self::Project(_) => None,
        }
    }
}

impl From<ProjectEntry> for ValidEntry {
    fn from(entry: ProjectEntry) -> Self {
        Self::Project(entry)
    }
}

impl From<BlogEntry> for ValidEntry {
    fn from(entry: BlogEntry) -> Self {
        Self::Blog(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post() -> BlogEntry {
        BlogEntry {
            title: "Hello".to_string(),
            description: "First post".to_string(),
            pub_date: ContentDate::from_ymd(2024, 1, 15).unwrap(),
            updated_date: None,
            tags: vec!["rust".to_string()],
        }
    }

    #[test]
    fn test_project_serializes_camel_case_and_omits_absent_optionals() {
        let project = ProjectEntry {
            name: "folio".to_string(),
            description: "Content schemas".to_string(),
            tech_stack: vec!["Rust".to_string(), "YAML".to_string()],
            url: None,
            repo_url: Some("https://example.com/folio.git".to_string()),
        };
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "folio",
                "description": "Content schemas",
                "techStack": ["Rust", "YAML"],
                "repoUrl": "https://example.com/folio.git"
            })
        );
    }

    #[test]
    fn test_blog_serializes_dates_as_iso() {
        let value = serde_json::to_value(post()).unwrap();
        assert_eq!(value["pubDate"], "2024-01-15T00:00:00.000Z");
        assert!(value.get("updatedDate").is_none());
    }

    #[test]
    fn test_valid_entry_collection() {
        let entry: ValidEntry = post().into();
        assert_eq!(entry.collection(), CollectionName::Blog);
        assert!(entry.as_blog().is_some());
        assert!(entry.as_project().is_none());
    }
}
