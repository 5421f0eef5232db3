use std::fs;
use std::path::Path;

use tempfile::tempdir;

use glance_core::io::navigation::{list_sibling_images, FileCycle};

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"").unwrap();
}

fn names(files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_lists_supported_files_sorted() {
    let dir = tempdir().unwrap();
    for name in ["c.png", "a.TIF", "notes.txt", "b.npy", "d.jpeg"] {
        touch(dir.path(), name);
    }
    fs::create_dir(dir.path().join("sub.png")).unwrap();

    let files = list_sibling_images(&dir.path().join("c.png")).unwrap();
    assert_eq!(names(&files), vec!["a.TIF", "b.npy", "c.png", "d.jpeg"]);
}

#[test]
fn test_cycle_wraps_both_ways() {
    let dir = tempdir().unwrap();
    for name in ["1.png", "2.png", "3.png"] {
        touch(dir.path(), name);
    }
    let mut cycle = FileCycle::around(&dir.path().join("3.png")).unwrap();
    assert_eq!(cycle.len(), 3);
    assert_eq!(cycle.current().unwrap().file_name().unwrap(), "3.png");
    assert_eq!(cycle.next_file().unwrap().file_name().unwrap(), "1.png");
    assert_eq!(cycle.previous_file().unwrap().file_name().unwrap(), "3.png");
    assert_eq!(cycle.previous_file().unwrap().file_name().unwrap(), "2.png");
}

#[test]
fn test_cycle_inserts_unlisted_current() {
    let files = vec!["/data/a.png".into(), "/data/c.png".into()];
    let mut cycle = FileCycle::new(files, Path::new("/data/b.weird"));
    assert_eq!(cycle.len(), 3);
    assert_eq!(cycle.next_file(), Some(Path::new("/data/c.png")));
    assert_eq!(cycle.next_file(), Some(Path::new("/data/a.png")));
}

#[test]
fn test_empty_cycle() {
    let mut cycle = FileCycle::new(Vec::new(), Path::new("only.png"));
    assert_eq!(cycle.len(), 1);
    assert_eq!(cycle.next_file(), Some(Path::new("only.png")));
    assert_eq!(cycle.previous_file(), Some(Path::new("only.png")));
}
