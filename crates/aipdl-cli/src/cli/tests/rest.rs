use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_plan() {
    match parse(&["aipdl", "plan", "--manifest", "jp.toml"]) {
        CliCommand::Plan { manifest, root } => {
            assert_eq!(manifest, Path::new("jp.toml"));
            assert!(root.is_none());
        }
        _ => panic!("expected Plan"),
    }
}

#[test]
fn cli_parse_merge() {
    match parse(&["aipdl", "merge", "-m", "jp.toml", "--airport", "RJAA"]) {
        CliCommand::Merge { airport, .. } => assert_eq!(airport, "RJAA"),
        _ => panic!("expected Merge"),
    }
}

#[test]
fn cli_merge_requires_airport() {
    assert!(Cli::try_parse_from(["aipdl", "merge", "-m", "jp.toml"]).is_err());
}

#[test]
fn cli_parse_checksum() {
    match parse(&["aipdl", "checksum", "/tmp/RJAA_full.pdf"]) {
        CliCommand::Checksum { path } => assert_eq!(path, Path::new("/tmp/RJAA_full.pdf")),
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_config() {
    assert!(matches!(parse(&["aipdl", "config"]), CliCommand::Config));
}

#[test]
fn cli_unknown_command_fails() {
    assert!(Cli::try_parse_from(["aipdl", "upload"]).is_err());
}
