use std::io::Write;
use tempfile::tempdir;
use toolpin_fs::{Error, create_executable, ensure_dir, is_executable, remove_if_present};

#[test]
fn test_place_then_remove_executable() {
    let dir = tempdir().unwrap();
    let parent = dir.path().join("elm").join("0.19.1");
    ensure_dir(&parent).unwrap();

    let path = parent.join("elm");
    let mut file = create_executable(&path).unwrap();
    file.write_all(b"#!/bin/sh\necho elm\n").unwrap();
    drop(file);
    assert!(is_executable(&path));

    remove_if_present(&path).unwrap();
    assert!(!path.exists());
    remove_if_present(&path).unwrap();
}

#[test]
fn test_write_into_missing_directory() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("elm");
    let err = create_executable(&path).unwrap_err();
    assert!(matches!(err, Error::Write { .. }));
    assert!(!is_executable(&path));
}

#[test]
fn test_directory_is_not_executable_file() {
    let dir = tempdir().unwrap();
    assert!(!is_executable(dir.path()));
}
