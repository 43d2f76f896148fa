use crate::scan::ProjectScanner;
use std::fs;
use tempfile::TempDir;

fn touch(dir: &TempDir, rel: &str) {
    let path = dir.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "<Project />").unwrap();
}

#[test]
fn test_finds_nested_project() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "plc/plc_proj/plc_proj.plcproj");

    let scanner = ProjectScanner::new(dir.path());
    let found = scanner.find_projects().unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("plc_proj.plcproj"));
}

#[test]
fn test_extension_match_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "plc/Project.PlcProj");

    let scanner = ProjectScanner::new(dir.path());
    assert_eq!(scanner.find_projects().unwrap().len(), 1);
}

#[test]
fn test_skips_version_control_directories() {
    let dir = TempDir::new().unwrap();
    touch(&dir, ".git/stale.plcproj");
    touch(&dir, "plc/real.plcproj");

    let scanner = ProjectScanner::new(dir.path());
    let found = scanner.find_projects().unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("real.plcproj"));
}

#[test]
fn test_find_default_with_single_project() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "plc/only.plcproj");

    let scanner = ProjectScanner::new(dir.path());
    let path = scanner.find_default().unwrap();
    assert!(path.ends_with("only.plcproj"));
}

#[test]
fn test_find_default_fails_when_none_found() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "plc/notes.txt");

    let scanner = ProjectScanner::new(dir.path());
    let err = scanner.find_default().unwrap_err();
    assert!(err.to_string().contains("No .plcproj file found"));
}

#[test]
fn test_find_default_fails_when_ambiguous() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "a/first.plcproj");
    touch(&dir, "b/second.plcproj");

    let scanner = ProjectScanner::new(dir.path());
    let err = scanner.find_default().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("--plcproj"));
    assert!(message.contains("first.plcproj"));
    assert!(message.contains("second.plcproj"));
}
