use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_encode_file").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn write_atomic_creates_parents_and_leaves_no_temp_file() {
    let dir = scratch("creates");
    let out = dir.join("nested").join("a.png");

    write_atomic(&out, b"hello").unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"hello");

    let leftovers: Vec<_> = std::fs::read_dir(out.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn write_atomic_replaces_existing_file() {
    let dir = scratch("replaces");
    let out = dir.join("b.svg");
    write_atomic(&out, b"old").unwrap();
    write_atomic(&out, b"new").unwrap();
    assert_eq!(std::fs::read(&out).unwrap(), b"new");
}

#[test]
fn write_atomic_fails_without_partial_output() {
    let dir = scratch("fails");
    let blocker = dir.join("file");
    std::fs::write(&blocker, b"x").unwrap();

    let out = blocker.join("c.png");
    let err = write_atomic(&out, b"data").unwrap_err();
    assert!(matches!(err, InkError::OutputWrite { .. }));
    assert!(!out.exists());
}

#[test]
fn path_without_file_name_is_rejected() {
    assert!(write_atomic(Path::new("/"), b"data").is_err());
}

#[test]
fn temp_names_are_unique_per_write() {
    let out = Path::new("target/unit_encode_file/a.png");
    let a = temp_sibling(out).unwrap();
    let b = temp_sibling(out).unwrap();
    assert_ne!(a, b);
    assert_eq!(a.parent(), out.parent());
}
