//! # Collection Names
//!
//! The registry recognizes exactly two collections. `CollectionName` is the
//! closed enumeration of them; `CollectionKind` says whether a collection's
//! entries are structured data files or markdown content with front matter.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// A registered content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionName {
    /// Markdown posts with front matter.
    Blog,
    /// Project descriptors stored as JSON or YAML data files.
    Projects,
}

impl CollectionName {
    /// Every registered collection, in alphabetical order.
    pub const ALL: [CollectionName; 2] = [CollectionName::Blog, CollectionName::Projects];

    /// The name used in directory layouts and lookups.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blog => "blog",
            Self::Projects => "projects",
        }
    }

    /// Whether entries are data files or markdown content.
    pub fn kind(&self) -> CollectionKind {
        match self {
            Self::Blog => CollectionKind::Content,
            Self::Projects => CollectionKind::Data,
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionName {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownCollection {
                name: s.to_string(),
            })
    }
}

/// How entries of a collection are stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// One JSON or YAML document per entry.
    Data,
    /// One markdown document per entry, fields in YAML front matter.
    Content,
}

impl CollectionKind {
    /// File extensions (without the dot) that hold entries of this kind.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Data => &["json", "yaml", "yml"],
            Self::Content => &["md", "mdx", "markdown"],
        }
    }

    /// Returns true if `ext` (case-insensitive, no dot) belongs to this kind.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions()
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data => f.write_str("data"),
            Self::Content => f.write_str("content"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_registered_names() {
        assert_eq!(
            "blog".parse::<CollectionName>().unwrap(),
            CollectionName::Blog
        );
        assert_eq!(
            "projects".parse::<CollectionName>().unwrap(),
            CollectionName::Projects
        );
    }

    #[test]
    fn test_parse_unregistered_name_is_configuration_error() {
        let err = "notes".parse::<CollectionName>().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownCollection {
                name: "notes".to_string()
            }
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!("Blog".parse::<CollectionName>().is_err());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(CollectionName::Blog.kind(), CollectionKind::Content);
        assert_eq!(CollectionName::Projects.kind(), CollectionKind::Data);
    }

    #[test]
    fn test_accepts_extension() {
        assert!(CollectionKind::Data.accepts_extension("YAML"));
        assert!(CollectionKind::Content.accepts_extension("mdx"));
        assert!(!CollectionKind::Content.accepts_extension("json"));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&CollectionName::Projects).unwrap();
        assert_eq!(json, "\"projects\"");
    }
}
