use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_run_defaults() {
    match parse(&["aipdl", "run", "--manifest", "jp.toml"]) {
        CliCommand::Run {
            manifest,
            force,
            workers,
            root,
            airports,
        } => {
            assert_eq!(manifest, Path::new("jp.toml"));
            assert!(!force);
            assert!(workers.is_none());
            assert!(root.is_none());
            assert!(airports.is_empty());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_all_flags() {
    match parse(&[
        "aipdl", "run", "-m", "jp.toml", "--force", "--workers", "8", "--root", "/srv/aip", "-a",
        "RJAA", "--airport", "RJTT",
    ]) {
        CliCommand::Run {
            force,
            workers,
            root,
            airports,
            ..
        } => {
            assert!(force);
            assert_eq!(workers, Some(8));
            assert_eq!(root.as_deref(), Some(Path::new("/srv/aip")));
            assert_eq!(airports, ["RJAA", "RJTT"]);
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_run_requires_manifest() {
    assert!(Cli::try_parse_from(["aipdl", "run"]).is_err());
}

#[test]
fn cli_run_rejects_non_numeric_workers() {
    assert!(Cli::try_parse_from(["aipdl", "run", "-m", "x.toml", "--workers", "many"]).is_err());
}
