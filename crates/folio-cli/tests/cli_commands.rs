//! Integration tests for the `check` and `schema` handlers against a
//! temporary site directory.

use std::fs;
use std::path::Path;

use folio_cli::check::{render_report, run_check, CheckArgs};
use folio_cli::config::{FolioConfig, CONFIG_FILE_NAME};
use folio_cli::schema::{run_schema, select, write_schemas, SchemaArgs};
use folio_schema::ContentLoader;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn valid_site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/content/blog/first.md",
        "---\ntitle: First\ndescription: The first post\npubDate: 2024-01-15\ntags: [intro]\n---\nHi\n",
    );
    write(
        dir.path(),
        "src/content/projects/folio.json",
        r#"{"name": "folio", "description": "schemas", "techStack": ["Rust"]}"#,
    );
    dir
}

#[test]
fn test_check_valid_site_exits_zero() {
    let site = valid_site();
    let config = FolioConfig::discover(None, site.path()).unwrap();
    let code = run_check(&CheckArgs::default(), &config, site.path()).unwrap();
    assert_eq!(code, 0);
}

#[test]
fn test_check_invalid_entry_exits_one() {
    let site = valid_site();
    write(
        site.path(),
        "src/content/blog/untitled.md",
        "---\ndescription: No title\npubDate: 2024-01-15\ntags: []\n---\n",
    );
    let config = FolioConfig::discover(None, site.path()).unwrap();
    let code = run_check(&CheckArgs::default(), &config, site.path()).unwrap();
    assert_eq!(code, 1);
}

#[test]
fn test_check_single_collection_ignores_others() {
    let site = valid_site();
    write(
        site.path(),
        "src/content/blog/untitled.md",
        "---\ndescription: No title\n---\n",
    );
    let config = FolioConfig::discover(None, site.path()).unwrap();
    let args = CheckArgs {
        collection: Some("projects".to_string()),
        ..CheckArgs::default()
    };
    assert_eq!(run_check(&args, &config, site.path()).unwrap(), 0);
}

#[test]
fn test_check_unknown_collection_is_error() {
    let site = valid_site();
    let config = FolioConfig::discover(None, site.path()).unwrap();
    let args = CheckArgs {
        collection: Some("notes".to_string()),
        ..CheckArgs::default()
    };
    let err = run_check(&args, &config, site.path()).unwrap_err();
    assert!(format!("{err:#}").contains("unknown collection \"notes\""));
}

#[test]
fn test_check_missing_content_dir_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = FolioConfig::discover(None, dir.path()).unwrap();
    let result = run_check(&CheckArgs::default(), &config, dir.path());
    assert!(result.is_err());
}

#[test]
fn test_check_content_dir_flag_overrides_config() {
    let site = valid_site();
    write(
        site.path(),
        CONFIG_FILE_NAME,
        "content_dir: does/not/exist\n",
    );
    let config = FolioConfig::discover(None, site.path()).unwrap();
    let args = CheckArgs {
        content_dir: Some("src/content".into()),
        ..CheckArgs::default()
    };
    assert_eq!(run_check(&args, &config, site.path()).unwrap(), 0);
}

#[test]
fn test_render_report_lists_violations() {
    let site = valid_site();
    write(
        site.path(),
        "src/content/projects/broken.yaml",
        "name: broken\ntechStack: [TypeScript, 42]\n",
    );
    let content_dir = site.path().join("src/content");
    let report = ContentLoader::new(&content_dir).load_all().unwrap();
    let text = render_report(&report, &content_dir);

    assert!(text.contains("blog: 1/1 passed"));
    assert!(text.contains("projects: 1/2 passed"));
    assert!(text.contains("FAIL broken (projects/broken.yaml)"));
    assert!(text.contains("description: required field is missing"));
    assert!(text.contains("techStack[1]: expected string"));
    assert!(text.contains("1 entry failed validation out of 3 total."));
}

#[test]
fn test_schema_select() {
    assert_eq!(select(None).unwrap().len(), 2);
    let blog = select(Some("blog")).unwrap();
    assert_eq!(blog[0].1["title"], "blog");
    assert!(select(Some("notes")).is_err());
}

#[test]
fn test_schema_write_uses_config_dir() {
    let site = valid_site();
    let config = FolioConfig::discover(None, site.path()).unwrap();
    let args = SchemaArgs {
        write: true,
        ..SchemaArgs::default()
    };
    assert_eq!(run_schema(&args, &config, site.path()).unwrap(), 0);

    let written = site.path().join(".folio/schemas/projects.schema.json");
    let schema: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(written).unwrap()).unwrap();
    assert_eq!(schema["required"][2], "techStack");
    let blog = site.path().join(".folio/schemas/blog.schema.json");
    assert!(blog.is_file());
}

#[test]
fn test_write_schemas_returns_paths() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/out");
    let paths = write_schemas(&select(Some("projects")).unwrap(), &out).unwrap();
    assert_eq!(paths, vec![out.join("projects.schema.json")]);
}
