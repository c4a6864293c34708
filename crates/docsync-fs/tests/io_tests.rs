use docsync_fs::io;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state.json");

    io::write_atomic(&path, b"hello world").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "hello world");
}

#[test]
fn test_write_atomic_overwrites_existing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state.json");
    fs::write(&path, "original").unwrap();

    io::write_atomic(&path, b"updated").unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "updated");
}

#[test]
fn test_write_atomic_replaces_longer_content_wholesale() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("state.json");
    fs::write(&path, "a much longer original payload").unwrap();

    io::write_atomic(&path, b"short").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "short");
}

#[test]
fn test_read_text_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("article.md");
    fs::write(&path, "hello").unwrap();

    let content = io::read_text(&path).unwrap();
    assert_eq!(content, "hello");
}

#[test]
fn test_read_text_if_exists_missing_is_none() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.json");

    assert!(io::read_text_if_exists(&path).unwrap().is_none());
}

#[test]
fn test_read_text_if_exists_present_is_some() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("present.json");
    fs::write(&path, "{}").unwrap();

    assert_eq!(io::read_text_if_exists(&path).unwrap().as_deref(), Some("{}"));
}

#[test]
fn test_write_text_preserves_utf8() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("unicode.md");

    io::write_text(&path, "# Café ☕\n\nnaïve").unwrap();

    assert_eq!(io::read_text(&path).unwrap(), "# Café ☕\n\nnaïve");
}
