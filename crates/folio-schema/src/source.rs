//! # Content Sources
//!
//! Turns files into raw records for validation.
//!
//! - Data entries (`.json`, `.yaml`, `.yml`) are one document per file; the
//!   document must be a mapping.
//! - Content entries (`.md`, `.mdx`, `.markdown`) carry their fields in a
//!   YAML front-matter block delimited by `---` lines at the very top of
//!   the file. Everything after the closing delimiter is the body.
//!
//! Failures here are [`SourceError`]s: the file could not be read or
//! parsed at all. Whether the parsed fields are acceptable is decided
//! later by schema validation.

use std::path::{Path, PathBuf};

use folio_core::{CollectionKind, ValueKind};
use serde_json::{Map, Value};
use thiserror::Error;

const DELIMITER: &str = "---";

/// Error reading or parsing a content file.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The YAML document or front-matter block is malformed.
    #[error("invalid YAML in {}: {reason}", path.display())]
    Yaml { path: PathBuf, reason: String },

    /// The JSON document is malformed.
    #[error("invalid JSON in {}: {reason}", path.display())]
    Json { path: PathBuf, reason: String },

    /// The document parsed but is not a mapping of fields.
    #[error(
        "{} must contain a mapping of fields, found {found}",
        path.display()
    )]
    NotAMapping { path: PathBuf, found: ValueKind },

    /// An opening `---` without a matching closing line.
    #[error(
        "front matter in {} is not terminated by a '---' line",
        path.display()
    )]
    UnterminatedFrontMatter { path: PathBuf },

    /// The extension does not belong to the collection's kind.
    #[error("{} is not a {kind} file", path.display())]
    UnsupportedExtension {
        path: PathBuf,
        kind: CollectionKind,
    },
}

/// A parsed but not yet validated entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEntry {
    /// The fields, always a JSON object.
    pub record: Value,
    /// Markdown text after the front matter; `None` for data entries.
    pub body: Option<String>,
}

/// The two halves of a markdown document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// YAML text between the delimiters, or `None` if the document has no
    /// front matter.
    pub yaml: Option<&'a str>,
    pub body: &'a str,
}

/// Read and parse one entry file of the given kind.
pub fn read_entry(path: &Path, kind: CollectionKind) -> Result<RawEntry, SourceError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !kind.accepts_extension(ext) {
        return Err(SourceError::UnsupportedExtension {
            path: path.to_path_buf(),
            kind,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match kind {
        CollectionKind::Data => {
            let record = if ext.eq_ignore_ascii_case("json") {
                parse_json(&content, path)?
            } else {
                parse_yaml(&content, path)?
            };
            Ok(RawEntry { record, body: None })
        }
        CollectionKind::Content => parse_markdown(&content, path),
    }
}

/// Parse a JSON data document. The result is always an object.
pub fn parse_json(content: &str, origin: &Path) -> Result<Value, SourceError> {
    let value: Value = serde_json::from_str(content).map_err(|e| SourceError::Json {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    })?;
    expect_mapping(value, origin)
}

/// Parse a YAML data document. The result is always an object.
pub fn parse_yaml(content: &str, origin: &Path) -> Result<Value, SourceError> {
    let value = yaml_document(content, origin)?;
    expect_mapping(value, origin)
}

/// Split a markdown document and parse its front matter.
///
/// A document without front matter, or with an empty block, yields an
/// empty record; the schema then reports the missing fields.
pub fn parse_markdown(content: &str, origin: &Path) -> Result<RawEntry, SourceError> {
    let FrontMatter { yaml, body } = split_front_matter(content).ok_or_else(|| {
        SourceError::UnterminatedFrontMatter {
            path: origin.to_path_buf(),
        }
    })?;

    let record = match yaml {
        None => Value::Object(Map::new()),
        Some(text) => match yaml_document(text, origin)? {
            Value::Null => Value::Object(Map::new()),
            other => expect_mapping(other, origin)?,
        },
    };

    Ok(RawEntry {
        record,
        body: Some(body.to_string()),
    })
}

/// Locate the front-matter block of a markdown document.
///
/// Returns `None` when an opening delimiter has no closing one. A leading
/// byte-order mark is skipped. Delimiter lines may carry trailing
/// whitespace and either line ending.
pub fn split_front_matter(content: &str) -> Option<FrontMatter<'_>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let first_len = content.find('\n').map_or(content.len(), |i| i + 1);
    if content[..first_len].trim_end() != DELIMITER {
        return Some(FrontMatter {
            yaml: None,
            body: content,
        });
    }

    let rest = &content[first_len..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some(FrontMatter {
                yaml: Some(&rest[..offset]),
                body: &rest[offset + line.len()..],
            });
        }
        offset += line.len();
    }
    None
}

fn yaml_document(content: &str, origin: &Path) -> Result<Value, SourceError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| SourceError::Yaml {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
    yaml_to_json(yaml).map_err(|reason| SourceError::Yaml {
        path: origin.to_path_buf(),
        reason,
    })
}

fn expect_mapping(value: Value, origin: &Path) -> Result<Value, SourceError> {
    match value {
        Value::Object(_) => Ok(value),
        other => Err(SourceError::NotAMapping {
            path: origin.to_path_buf(),
            found: ValueKind::of(&other),
        }),
    }
}

/// Convert a YAML value tree into the JSON value tree validation works on.
///
/// Tags are dropped. Scalar map keys are rendered as strings; sequence or
/// mapping keys are rejected.
fn yaml_to_json(yaml: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("number {n} has no JSON representation"))?
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(map) => {
            let mut object = Map::with_capacity(map.len());
            for (key, value) in map {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Null => "null".to_string(),
                    other => return Err(format!("unsupported mapping key: {other:?}")),
                };
                object.insert(key, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}
