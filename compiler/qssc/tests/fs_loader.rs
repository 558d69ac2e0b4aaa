// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Filesystem import resolution.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use qss_diagnostic::ErrorCode;
use qss_eval::{ImportLoader, LoadError};
use qssc::{compile_file, CompileError, CompileOptions, FsLoader};

fn write(path: &Path, contents: &str) {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn resolves_relative_to_entry_then_include_paths() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("app/parts/colors.qss"), "$fg: white;");
    write(&root.join("shared/mixins.qss"), "@mixin pad($p) { padding: $p; }");
    write(
        &root.join("app/main.qss"),
        "@import \"parts/colors\";\n@import \"mixins\";\nQLabel { color: $fg; @include pad(2px); }\n",
    );

    let options = CompileOptions::new().with_include_path(root.join("shared"));
    let output = compile_file(&root.join("app/main.qss"), &options).unwrap();
    assert_eq!(output, "QLabel{color:white;padding:2.0px;}");
}

#[test]
fn entry_directory_wins_over_include_paths() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(&root.join("local/theme.qss"), "$which: local;");
    write(&root.join("include/theme.qss"), "$which: include;");

    let loader = FsLoader::new(root.join("local")).with_include_paths([root.join("include")]);
    assert_eq!(loader.load("theme").unwrap(), "$which: local;");
    assert_eq!(loader.load("theme.qss").unwrap(), "$which: local;");
}

#[test]
fn missing_import_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FsLoader::new(dir.path());
    assert!(matches!(
        loader.load("absent"),
        Err(LoadError::NotFound { path }) if path == "absent"
    ));
}

#[test]
fn missing_import_reports_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let entry = dir.path().join("main.qss");
    write(&entry, "@import \"absent\";");

    let err = compile_file(&entry, &CompileOptions::new()).unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::E3001));
    assert_eq!(err.to_string(), "cannot find import `absent`");
}

#[test]
fn missing_entry_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = compile_file(&dir.path().join("nope.qss"), &CompileOptions::new()).unwrap_err();
    assert!(matches!(err, CompileError::Io { .. }));
    assert_eq!(err.code(), None);
    assert!(err.to_diagnostic().is_none());
}
