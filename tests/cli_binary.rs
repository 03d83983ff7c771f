use assert_cmd::cargo;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

struct World {
    _td: TempDir,
    cfg: PathBuf,
    src: PathBuf,
    dst: PathBuf,
}

/// Source/target dirs plus an empty config file so the user's own config is never read.
fn world() -> World {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let src = base.join("incoming");
    let dst = base.join("archive");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    let cfg = base.join("config.xml");
    fs::write(&cfg, "<config><log_level>quiet</log_level></config>").unwrap();
    World { _td: td, cfg, src, dst }
}

fn run_bin(w: &World, src: &Path, extra: &[&str]) -> Output {
    let me = cargo::cargo_bin!("move_upto");
    Command::new(me)
        .arg("--config")
        .arg(&w.cfg)
        .arg("--source")
        .arg(src)
        .arg("--target")
        .arg(&w.dst)
        .args(extra)
        .output()
        .expect("spawn binary")
}

#[test]
fn moves_matching_files() {
    let w = world();
    fs::write(w.src.join("a.txt"), b"a").unwrap();
    fs::write(w.src.join("b.txt"), b"b").unwrap();
    fs::write(w.src.join("c.log"), b"c").unwrap();

    let out = run_bin(&w, &w.src, &["--amount", "1", "--filter", ".txt", "--older-first"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(w.dst.join("a.txt").exists());
    assert!(w.dst.join("b.txt").exists());
    assert!(w.src.join("c.log").exists());
    assert!(!w.dst.join("c.log").exists());
}

#[test]
fn zero_amount_warns_and_stops_on_first_non_empty_file() {
    let w = world();
    fs::write(w.src.join("a-empty"), b"").unwrap();
    fs::write(w.src.join("b-full"), b"data").unwrap();

    let out = run_bin(&w, &w.src, &["--amount", "0"]);
    assert!(out.status.success(), "budget stop is not an error");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Please supply a size"), "stderr: {stderr}");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"b-full\" is too big"), "stdout: {stdout}");
    assert!(w.dst.join("a-empty").exists());
    assert!(w.src.join("b-full").exists());
}

#[test]
fn missing_source_is_reported_without_failing() {
    let w = world();
    let out = run_bin(&w, &w.src.join("does-not-exist"), &["--amount", "1"]);
    assert!(out.status.success(), "listing errors are a reported stop");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error while trying to list"), "stderr: {stderr}");
    assert_eq!(fs::read_dir(&w.dst).unwrap().count(), 0);
}

#[test]
fn invalid_filter_is_reported_without_failing() {
    let w = world();
    fs::write(w.src.join("a.txt"), b"a").unwrap();
    let out = run_bin(&w, &w.src, &["--amount", "1", "--filter", "("]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid filter pattern"));
    assert!(w.src.join("a.txt").exists());
}

#[test]
fn transfer_failure_exits_non_zero() {
    let w = world();
    fs::write(w.src.join("first.txt"), b"1").unwrap();
    fs::write(w.src.join("second.txt"), b"2").unwrap();
    fs::create_dir(w.dst.join("second.txt")).unwrap();

    let out = run_bin(&w, &w.src, &["--amount", "1"]);
    assert!(!out.status.success(), "transfer failure must exit non-zero");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error while moving file \"second.txt\""), "stderr: {stderr}");
    assert!(w.dst.join("first.txt").is_file());
    assert!(w.src.join("second.txt").is_file());
}

#[test]
fn missing_target_is_a_config_error() {
    let w = world();
    fs::write(w.src.join("a.txt"), b"a").unwrap();
    let me = cargo::cargo_bin!("move_upto");
    let out = Command::new(me)
        .arg("--config")
        .arg(&w.cfg)
        .arg("--source")
        .arg(&w.src)
        .arg("--target")
        .arg(w.dst.join("absent"))
        .args(["--amount", "1"])
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
    assert!(w.src.join("a.txt").exists());
    assert!(!w.dst.join("absent").exists(), "target must not be created");
}

#[test]
fn dry_run_leaves_files_in_place() {
    let w = world();
    fs::write(w.src.join("a.txt"), b"a").unwrap();
    let out = run_bin(&w, &w.src, &["--amount", "1", "--dry-run"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Would move 1 file(s)"));
    assert!(w.src.join("a.txt").exists());
    assert!(!w.dst.join("a.txt").exists());
}

#[cfg(unix)]
#[test]
fn source_locked_by_another_run_is_refused() {
    let w = world();
    fs::write(w.src.join("a.txt"), b"a").unwrap();
    let held = move_upto::fs_ops::try_lock_dir(&w.src)
        .unwrap()
        .expect("lock is free before the binary starts");

    let out = run_bin(&w, &w.src, &["--amount", "1"]);
    drop(held);

    assert!(!out.status.success(), "a held lock must fail the run");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("another run is already moving files"), "stderr: {stderr}");
    assert!(w.src.join("a.txt").is_file());
    assert_eq!(fs::read_dir(&w.dst).unwrap().count(), 0);
}

#[cfg(target_os = "linux")]
#[test]
fn undeletable_source_is_a_warning_not_a_failure() {
    use std::os::unix::fs::PermissionsExt;

    // Root ignores directory permissions, so the delete would succeed.
    unsafe {
        if libc::geteuid() == 0 {
            eprintln!("skipping: running as root");
            return;
        }
    }

    let w = world();
    fs::write(w.src.join("a.txt"), b"a").unwrap();
    fs::set_permissions(&w.src, fs::Permissions::from_mode(0o555)).unwrap();

    let out = run_bin(&w, &w.src, &["--amount", "1"]);
    fs::set_permissions(&w.src, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("a.txt was copied to"), "stderr: {stderr}");
    assert!(stderr.contains("could not be removed"), "stderr: {stderr}");
    assert!(w.dst.join("a.txt").is_file());
    assert!(w.src.join("a.txt").is_file());
}
