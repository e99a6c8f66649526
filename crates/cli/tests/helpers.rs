use std::fs;

use libseek::{init_tracing, sha256_file};
use tempfile::tempdir;

#[test]
fn sha256_file_hashes_contents() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("abc.bin");
    fs::write(&path, b"abc").expect("write file");

    let hash = sha256_file(&path).expect("hash");
    assert_eq!(hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}

#[test]
fn sha256_file_reports_missing_file() {
    let tmp = tempdir().expect("tempdir");
    assert!(sha256_file(&tmp.path().join("nope.bin")).is_err());
}

#[test]
fn init_tracing_can_be_called_repeatedly() {
    init_tracing(0);
    init_tracing(2);
}
