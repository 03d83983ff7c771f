use clap::Parser;
use move_upto::cli::Args;
use move_upto::config::types::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn flags_map_onto_config() {
    let args = Args::parse_from([
        "move_upto",
        "--source",
        "/in",
        "--target",
        "/out",
        "--amount",
        "5",
        "--filter",
        "tainted",
        "--older-first",
        "--dry-run",
        "--preserve-times",
        "--disable-locks",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source, PathBuf::from("/in"));
    assert_eq!(cfg.target, PathBuf::from("/out"));
    assert_eq!(cfg.amount_gib, 5);
    assert_eq!(cfg.filter, "tainted");
    assert!(cfg.older_first);
    assert!(cfg.dry_run);
    assert!(cfg.preserve_times);
    assert!(cfg.disable_locks);
}

#[test]
fn unset_flags_keep_file_values() {
    let args = Args::parse_from(["move_upto", "--amount", "2"]);
    let mut cfg = Config::new("/from-file", "/to-file");
    cfg.filter = "mkv".into();
    cfg.older_first = true;
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.source, PathBuf::from("/from-file"));
    assert_eq!(cfg.target, PathBuf::from("/to-file"));
    assert_eq!(cfg.filter, "mkv");
    assert!(cfg.older_first, "absent --older-first does not reset the file value");
    assert_eq!(cfg.amount_gib, 2);
}

#[test]
fn empty_filter_flag_clears_file_filter() {
    let args = Args::parse_from(["move_upto", "--filter", ""]);
    let mut cfg = Config::default();
    cfg.filter = "mkv".into();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.filter, "");
}

#[test]
fn negative_amount_is_rejected() {
    assert!(Args::try_parse_from(["move_upto", "--amount", "-1"]).is_err());
    assert!(Args::try_parse_from(["move_upto", "--amount", "1.5"]).is_err());
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["move_upto", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["move_upto", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["move_upto"]);
    assert_eq!(args.effective_log_level(), None);
}
