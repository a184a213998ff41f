use super::*;
use crate::model::EntryKind;

fn entry(name: &str, kind: EntryKind) -> ContentEntry {
    ContentEntry {
        path: name.to_string(),
        name: name.to_string(),
        kind,
        size: 0,
        sha: format!("sha-{}", name),
    }
}

#[test]
fn join_path_handles_root_and_nested_dirs() {
    assert_eq!(join_path("", "a.txt"), "a.txt");
    assert_eq!(join_path("src", "a.txt"), "src/a.txt");
    assert_eq!(join_path("src/lib", "x/y.txt"), "src/lib/x/y.txt");
}

#[test]
fn join_path_never_doubles_separators() {
    assert_eq!(join_path("src/", "a.txt"), "src/a.txt");
    assert_eq!(join_path("src", "/a.txt"), "src/a.txt");
    assert_eq!(join_path("", "/a.txt"), "a.txt");
}

#[test]
fn parent_path_walks_up_to_root() {
    assert_eq!(parent_path("src/lib/x"), "src/lib");
    assert_eq!(parent_path("src"), "");
    assert_eq!(parent_path(""), "");
}

#[test]
fn sort_listing_puts_dirs_first_then_names_case_sensitive() {
    let mut entries = vec![
        entry("b.txt", EntryKind::File),
        entry("src", EntryKind::Dir),
        entry("A.md", EntryKind::File),
        entry("Docs", EntryKind::Dir),
        entry("a.txt", EntryKind::File),
    ];
    sort_listing(&mut entries);
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Docs", "src", "A.md", "a.txt", "b.txt"]);
}

#[test]
fn dot_segments_are_rejected() {
    assert!(check_repo_path("src/lib.rs").is_ok());
    assert!(check_repo_path("").is_ok());
    assert!(check_repo_path(".github/workflows/ci.yml").is_ok());
    assert!(check_repo_path("../other/contents/x").is_err());
    assert!(check_repo_path("docs/./x").is_err());
    assert!(check_repo_path("docs/..").is_err());
}
