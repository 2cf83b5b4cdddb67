//! Configuration loading through the facade

use crate::common::*;
use dirsearch::{DirectorySearch, Error, MemoryStore, SearchConfig, SearchRequest, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn test_missing_config_file_is_created_with_defaults() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    let search = DirectorySearch::with_config_file(MemoryStore::new(), &path).unwrap();
    assert!(path.exists());
    assert_eq!(search.config(), &SearchConfig::default());
}

#[test]
fn test_config_file_values_take_effect() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "key_prefix = \"dir\"\ndefault_limit = 2\ncontent_prefix_chars = 10\n\n[weights]\ntitle = 1.0\ndescription = 0.0\ncontent = 5.0\n",
    )
    .unwrap();

    let search = DirectorySearch::with_config_file(MemoryStore::new(), &path).unwrap();
    let listings = search.listings();
    listings.index(&listing("s1", "a", "c1", "Lantern"));
    listings.index(&listing("s1", "b", "c1", "Stove").with_content("lantern"));
    listings.index(&listing("s1", "c", "c1", "Tent").with_content("0123456789 lantern"));

    // Content weight now outranks title; content past 10 characters is not indexed
    let results = listings.search(&site("s1"), &SearchRequest::new().with_query("lantern"));
    assert_eq!(results.ids(), vec!["b", "a"]);
    assert_eq!(results.limit, 2);
    assert!(search
        .store()
        .keys_with_prefix("")
        .iter()
        .all(|k| k.starts_with("dir:s1:")));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SearchConfig {
        default_limit: 0,
        ..SearchConfig::default()
    };
    assert!(matches!(
        DirectorySearch::new(MemoryStore::new(), config),
        Err(Error::Config(_))
    ));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "default_limit = \"many\"").unwrap();
    assert!(matches!(
        DirectorySearch::with_config_file(MemoryStore::new(), &path),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_written_config_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let config = SearchConfig {
        key_prefix: "tenant-index".to_string(),
        default_limit: 50,
        ..SearchConfig::default()
    };
    config.write_to_file(&path).unwrap();

    let search = DirectorySearch::with_config_file(MemoryStore::new(), &path).unwrap();
    assert_eq!(search.config(), &config);
}
