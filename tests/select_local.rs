use std::fs;
use std::path::Path;

use filetime::{set_file_mtime, FileTime};
use move_upto::{select, ListErrorKind, LocalStore, SelectionCriteria};
use tempfile::tempdir;

fn write_at(dir: &Path, name: &str, contents: &[u8], unix_secs: i64) {
    let p = dir.join(name);
    fs::write(&p, contents).expect("write file");
    set_file_mtime(&p, FileTime::from_unix_time(unix_secs, 0)).expect("set mtime");
}

#[test]
fn matching_subdirectory_is_never_selected() {
    let td = tempdir().unwrap();
    write_at(td.path(), "notes.txt", b"n", 1_700_000_000);
    fs::create_dir(td.path().join("archive.txt")).unwrap();
    fs::write(td.path().join("archive.txt").join("inner.txt"), b"i").unwrap();

    let plan = select(&LocalStore, td.path(), &SelectionCriteria::new(".txt", false)).unwrap();
    assert_eq!(plan.names(), ["notes.txt"]);
}

#[test]
fn selection_equals_non_directory_matches() {
    let td = tempdir().unwrap();
    for (i, name) in ["a.mkv", "b.MKV", "c.mkv.part", "d.srt", "mkv"].iter().enumerate() {
        write_at(td.path(), name, b"x", 1_700_000_000 + i as i64);
    }
    fs::create_dir(td.path().join("mkv-dir")).unwrap();

    let plan = select(&LocalStore, td.path(), &SelectionCriteria::new("mkv", false)).unwrap();
    assert_eq!(plan.names(), ["a.mkv", "c.mkv.part", "mkv"]);

    let all = select(&LocalStore, td.path(), &SelectionCriteria::default()).unwrap();
    assert_eq!(all.len(), 5);
}

#[test]
fn older_first_orders_by_mtime() {
    let td = tempdir().unwrap();
    write_at(td.path(), "a-newest", b"1", 1_700_000_300);
    write_at(td.path(), "b-oldest", b"22", 1_700_000_100);
    write_at(td.path(), "c-middle", b"333", 1_700_000_200);

    let plan = select(&LocalStore, td.path(), &SelectionCriteria::new("", true)).unwrap();
    assert_eq!(plan.names(), ["b-oldest", "c-middle", "a-newest"]);
    assert_eq!(plan.total_bytes(), 6);
    for pair in plan.entries().windows(2) {
        assert!(pair[0].modified <= pair[1].modified);
    }
}

#[test]
fn missing_source_is_not_found() {
    let td = tempdir().unwrap();
    let err = select(&LocalStore, &td.path().join("nope"), &SelectionCriteria::default())
        .unwrap_err();
    assert_eq!(err.kind(), ListErrorKind::NotFound);
}

#[test]
fn invalid_filter_fails_before_listing() {
    let td = tempdir().unwrap();
    // the directory does not exist either; the filter error wins
    let err = select(
        &LocalStore,
        &td.path().join("nope"),
        &SelectionCriteria::new("[a-", false),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ListErrorKind::InvalidFilter);
}

#[cfg(unix)]
#[test]
fn symlinked_source_is_not_a_directory() {
    let td = tempdir().unwrap();
    let real = td.path().join("real");
    fs::create_dir(&real).unwrap();
    let link = td.path().join("link");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let err = select(&LocalStore, &link, &SelectionCriteria::default()).unwrap_err();
    assert_eq!(err.kind(), ListErrorKind::NotADirectory);
}

#[cfg(unix)]
#[test]
fn symlinked_children_follow_their_target() {
    use std::os::unix::fs::symlink;

    let td = tempdir().unwrap();
    let src = td.path().join("incoming");
    fs::create_dir(&src).unwrap();
    let elsewhere = td.path().join("elsewhere");
    fs::create_dir(&elsewhere).unwrap();
    fs::write(elsewhere.join("payload"), b"12345").unwrap();

    write_at(&src, "plain.txt", b"p", 1_700_000_000);
    symlink(&elsewhere, src.join("dir.txt")).unwrap();
    symlink(elsewhere.join("payload"), src.join("linkfile.txt")).unwrap();
    symlink(td.path().join("gone"), src.join("dangling.txt")).unwrap();

    let plan = select(&LocalStore, &src, &SelectionCriteria::new(".txt", false)).unwrap();
    let got: Vec<_> = plan.entries().iter().map(|e| (e.name.as_str(), e.size)).collect();
    assert_eq!(got, [("linkfile.txt", 5_u64), ("plain.txt", 1_u64)]);
}

// Other unix filesystems (APFS) refuse names that are not valid UTF-8.
#[cfg(target_os = "linux")]
#[test]
fn non_utf8_names_are_skipped() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let td = tempdir().unwrap();
    write_at(td.path(), "plain.txt", b"p", 1_700_000_000);
    fs::write(td.path().join(OsStr::from_bytes(b"bad\xff.txt")), b"b").unwrap();

    let plan = select(&LocalStore, td.path(), &SelectionCriteria::new(".txt", false)).unwrap();
    assert_eq!(plan.names(), ["plain.txt"]);
}
