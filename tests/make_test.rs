//! Integration tests for migration file scaffolding.

use dbforge::commands::{FileType, MakeOptions, make_files};
use std::fs;

#[test]
fn test_make_migration_creates_file_pair() {
    let dir = tempfile::tempdir().unwrap();
    let files = make_files(
        dir.path(),
        "add_users",
        FileType::Migration,
        &MakeOptions::default(),
    )
    .expect("should generate files");

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("_add_users.up.sql"));
    assert!(files[1].ends_with("_add_users.down.sql"));
    // Timestamped prefix
    assert!(files[0].chars().take(14).all(|c| c.is_ascii_digit()));

    for filename in &files {
        let contents = fs::read_to_string(dir.path().join(filename)).unwrap();
        assert!(contents.is_empty(), "{} should be empty", filename);
    }
}

#[test]
fn test_make_migration_create_stub() {
    let dir = tempfile::tempdir().unwrap();
    let options = MakeOptions {
        create: true,
        object_name: Some("users".to_string()),
    };
    let files = make_files(dir.path(), "create_users", FileType::Migration, &options)
        .expect("should generate files");

    let up = fs::read_to_string(dir.path().join(&files[0])).unwrap();
    let down = fs::read_to_string(dir.path().join(&files[1])).unwrap();
    assert!(up.contains("CREATE TABLE users"));
    assert!(down.contains("DROP TABLE users"));
}

#[test]
fn test_make_migration_object_name_defaults_to_filename() {
    let dir = tempfile::tempdir().unwrap();
    let options = MakeOptions {
        create: true,
        object_name: None,
    };
    let files = make_files(dir.path(), "orders", FileType::Migration, &options)
        .expect("should generate files");

    let up = fs::read_to_string(dir.path().join(&files[0])).unwrap();
    assert!(up.contains("CREATE TABLE orders"));
}

#[test]
fn test_make_migration_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("src").join("migration");
    let files = make_files(&nested, "init", FileType::Migration, &MakeOptions::default())
        .expect("should generate files");

    assert!(nested.join(&files[0]).exists());
    assert!(nested.join(&files[1]).exists());
}

#[test]
fn test_unsupported_file_type_message() {
    let dir = tempfile::tempdir().unwrap();
    let result = make_files(
        dir.path(),
        "active_orders",
        FileType::View,
        &MakeOptions::default(),
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "Unsupported file type view."
    );
}
