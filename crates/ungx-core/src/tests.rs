use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use super::*;
use crate::descriptor::parse_canonical_path;

#[test]
fn parse_canonical_path_reads_nested_dvcsimport() {
    let content = r#"{
  "author": "someone",
  "gx": {
    "dvcsimport": "github.com/ipfs/go-log"
  },
  "gxVersion": "0.12.1",
  "name": "go-log",
  "version": "1.5.7"
}"#;

    let path = parse_canonical_path(content).expect("descriptor should parse");
    assert_eq!(path, "github.com/ipfs/go-log");
}

#[test]
fn parse_canonical_path_trims_trailing_separator() {
    let path = parse_canonical_path(r#"{"gx":{"dvcsimport":" github.com/x/y/ "}}"#)
        .expect("descriptor should parse");
    assert_eq!(path, "github.com/x/y");
}

#[test]
fn parse_canonical_path_rejects_missing_field() {
    let err = parse_canonical_path(r#"{"name":"go-log","gx":{}}"#)
        .expect_err("must reject descriptor without dvcsimport");
    assert!(err.contains("gx.dvcsimport"), "unexpected error: {err}");

    let err = parse_canonical_path(r#"{"name":"go-log"}"#)
        .expect_err("must reject descriptor without gx section");
    assert!(err.contains("gx.dvcsimport"), "unexpected error: {err}");
}

#[test]
fn parse_canonical_path_rejects_invalid_json() {
    let err = parse_canonical_path("{not json").expect_err("must reject invalid json");
    assert!(err.contains("invalid descriptor json"), "unexpected error: {err}");
}

#[test]
fn parse_canonical_path_rejects_traversal_segments() {
    for path in ["../escape", "github.com/x/../y", "/abs/path", "github.com//y"] {
        let content = format!(r#"{{"gx":{{"dvcsimport":"{path}"}}}}"#);
        let err = parse_canonical_path(&content).expect_err("must reject unsafe canonical path");
        assert!(
            err.contains("canonical path"),
            "unexpected error for {path}: {err}"
        );
    }
}

#[test]
fn read_descriptor_from_origin_directory() {
    let root = test_root();
    write_package(&root, "QmAbc", "go-log", "github.com/ipfs/go-log");

    let descriptor = PackageDescriptor::read(&root.join("QmAbc")).expect("must read descriptor");
    assert_eq!(
        descriptor,
        PackageDescriptor {
            canonical_path: "github.com/ipfs/go-log".to_string(),
            origin: "QmAbc".to_string(),
            package_dir: "go-log".to_string(),
        }
    );
    assert_eq!(descriptor.hash_reference(), "gx/ipfs/QmAbc/go-log");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn read_descriptor_reports_missing_package_directory() {
    let root = test_root();
    fs::create_dir_all(root.join("QmEmpty")).expect("must create origin dir");

    let err = PackageDescriptor::read(&root.join("QmEmpty")).expect_err("must fail");
    assert!(matches!(err, UngxError::ManifestMissing { .. }));
    assert!(err.to_string().contains("no package directory"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn read_descriptor_reports_missing_descriptor_file() {
    let root = test_root();
    fs::create_dir_all(root.join("QmNoDesc").join("pkg")).expect("must create package dir");

    let err = PackageDescriptor::read(&root.join("QmNoDesc")).expect_err("must fail");
    assert!(matches!(err, UngxError::ManifestMissing { .. }));
    assert!(err.to_string().contains(DESCRIPTOR_FILE));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn read_descriptor_reports_malformed_descriptor() {
    let root = test_root();
    let package_dir = root.join("QmBad").join("pkg");
    fs::create_dir_all(&package_dir).expect("must create package dir");
    fs::write(package_dir.join(DESCRIPTOR_FILE), r#"{"gx": 7}"#).expect("must write descriptor");

    let err = PackageDescriptor::read(&root.join("QmBad")).expect_err("must fail");
    assert!(matches!(err, UngxError::ManifestMalformed { .. }));
    assert!(err.to_string().starts_with("manifest-malformed:"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn read_descriptor_rejects_ambiguous_package_directories() {
    let root = test_root();
    write_package(&root, "QmTwo", "a", "github.com/x/a");
    write_package(&root, "QmTwo", "b", "github.com/x/b");

    let err = PackageDescriptor::read(&root.join("QmTwo")).expect_err("must fail");
    assert!(matches!(err, UngxError::ManifestMalformed { .. }));
    assert!(err.to_string().contains("found 2"));

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn read_descriptors_sorts_by_origin_and_ignores_files() {
    let root = test_root();
    write_package(&root, "QmZ", "z", "github.com/x/z");
    write_package(&root, "QmA", "a", "github.com/x/a");
    fs::write(root.join("stray.txt"), "not a package").expect("must write stray file");

    let descriptors = read_descriptors(&root).expect("must read descriptors");
    let origins: Vec<&str> = descriptors.iter().map(|d| d.origin.as_str()).collect();
    assert_eq!(origins, vec!["QmA", "QmZ"]);

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn read_descriptors_treats_missing_root_as_empty() {
    let root = test_root();
    let descriptors = read_descriptors(&root.join("absent")).expect("missing root is empty");
    assert!(descriptors.is_empty());
}

#[test]
fn layout_maps_import_paths_onto_directories() {
    let layout = ProjectLayout::new("/work/proj");
    assert_eq!(
        layout.gx_packages_dir(),
        PathBuf::from("/work/proj/vendor/gx/ipfs")
    );
    assert_eq!(
        layout.vendor_path("github.com/x/z"),
        PathBuf::from("/work/proj/vendor/github.com/x/z")
    );
    assert_eq!(
        layout.embed_path("github.com/x/z"),
        PathBuf::from("/work/proj/gxlibs/github.com/x/z")
    );
    assert_eq!(
        layout.hash_embed_path("Qm1"),
        PathBuf::from("/work/proj/gxlibs/ipfs/Qm1")
    );
}

#[test]
fn error_messages_lead_with_reason_code() {
    let err = UngxError::Config {
        path: PathBuf::from("/tmp/ungx.toml"),
        reason: "fork must not be empty".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "config-error: /tmp/ungx.toml: fork must not be empty"
    );

    let err = UngxError::ProbeSetup {
        reason: "failed building http client".to_string(),
    };
    assert!(err.to_string().starts_with("probe-setup-failed:"));
}

#[test]
fn io_errors_keep_cause_out_of_the_message() {
    let err = UngxError::relocation(
        "moving",
        "/tmp/x",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    );
    assert_eq!(err.to_string(), "relocation-io-error: failed moving /tmp/x");
    let source = std::error::Error::source(&err).expect("must carry io cause");
    assert_eq!(source.to_string(), "denied");

    let err = UngxError::rewrite(
        "writing",
        "/tmp/a.go",
        std::io::Error::other("disk full"),
    );
    assert_eq!(err.to_string(), "rewrite-io-error: failed writing /tmp/a.go");
    assert!(!err.to_string().contains("disk full"));
}

fn write_package(root: &Path, origin: &str, package_dir: &str, canonical_path: &str) {
    let dir = root.join(origin).join(package_dir);
    fs::create_dir_all(&dir).expect("must create package dir");
    fs::write(
        dir.join(DESCRIPTOR_FILE),
        format!(r#"{{"name":"{package_dir}","gx":{{"dvcsimport":"{canonical_path}"}}}}"#),
    )
    .expect("must write descriptor");
}

fn test_root() -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    path.push(format!("ungx-core-tests-{}-{}", std::process::id(), nanos));
    path
}

#[test]
fn embed_references_live_under_root_identity() {
    assert_eq!(
        embed_reference("github.com/orig/proj", "github.com/x/z"),
        "github.com/orig/proj/gxlibs/github.com/x/z"
    );
    assert_eq!(
        hash_embed_reference("github.com/orig/proj", "Qm1"),
        "github.com/orig/proj/gxlibs/ipfs/Qm1"
    );
    assert_eq!(origin_reference("Qm1"), "gx/ipfs/Qm1");
}
