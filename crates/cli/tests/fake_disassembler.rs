#![cfg(unix)]

//! Drives the disassembler commands against a shell script standing in for
//! IDA. The script logs its arguments to `calls.log` and writes the `-o`
//! database file like the real tool does.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::sync::Mutex;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

// Serializes script creation with process spawning in sibling tests, which
// otherwise can fail with ETXTBSY.
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

const FAKE_IDA: &str = r#"#!/bin/sh
printf '%s\n' "$*" >> "$(dirname "$0")/calls.log"
for arg in "$@"; do
  case "$arg" in
    -o*) printf db > "${arg#-o}" ;;
  esac
done
exit ${FAKE_IDA_EXIT:-0}
"#;

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
    tool: PathBuf,
    binary: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempdir().expect("tempdir");
        let root = dir.path().to_path_buf();
        let tool = root.join("idat64");
        fs::write(&tool, FAKE_IDA).expect("write fake ida");
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).expect("chmod");
        let binary = root.join("app.bin");
        fs::write(&binary, b"abc").expect("write binary");
        Self { _dir: dir, root, tool, binary }
    }

    fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.root.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn database(&self) -> PathBuf {
        self.root.join("app.bin.i64")
    }
}

fn locked() -> std::sync::MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

fn create_db(fx: &Fixture, extra: &[&str]) -> assert_cmd::assert::Assert {
    cargo_bin_cmd!("libseek")
        .env_remove("FAKE_IDA_EXIT")
        .arg("create-db")
        .arg("--binary")
        .arg(&fx.binary)
        .arg("--tool")
        .arg(&fx.tool)
        .args(extra)
        .assert()
}

#[test]
fn create_db_runs_tool_once_and_reuses_database() {
    let _guard = locked();
    let fx = Fixture::new();

    create_db(&fx, &[]).success().stdout(predicate::str::contains("app.bin.i64"));
    create_db(&fx, &[]).success().stdout(predicate::str::contains("app.bin.i64"));

    assert!(fx.database().is_file());
    let calls = fx.calls();
    assert_eq!(calls.len(), 1, "calls: {calls:?}");
    assert_eq!(calls[0], format!("-A -B -o{} {}", fx.database().display(), fx.binary.display()));
}

#[test]
fn create_db_force_rebuilds() {
    let _guard = locked();
    let fx = Fixture::new();

    create_db(&fx, &[]).success();
    create_db(&fx, &["--force"]).success();
    assert_eq!(fx.calls().len(), 2);
}

#[test]
fn failing_tool_is_an_error_unless_lenient() {
    let _guard = locked();
    let fx = Fixture::new();

    cargo_bin_cmd!("libseek")
        .env("FAKE_IDA_EXIT", "3")
        .arg("create-db")
        .arg("--binary")
        .arg(&fx.binary)
        .arg("--tool")
        .arg(&fx.tool)
        .arg("--force")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exit code 3"));

    cargo_bin_cmd!("libseek")
        .env("FAKE_IDA_EXIT", "3")
        .arg("create-db")
        .arg("--binary")
        .arg(&fx.binary)
        .arg("--tool")
        .arg(&fx.tool)
        .arg("--force")
        .arg("--lenient")
        .assert()
        .success();
}

#[test]
fn tool_can_come_from_config_or_environment() {
    let _guard = locked();
    let fx = Fixture::new();
    let config = fx.root.join("libseek.json");
    fs::write(&config, serde_json::json!({ "disassembler": fx.tool }).to_string()).unwrap();

    cargo_bin_cmd!("libseek")
        .env_remove("LIBSEEK_DISASSEMBLER")
        .arg("create-db")
        .arg("--binary")
        .arg(&fx.binary)
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    cargo_bin_cmd!("libseek")
        .env("LIBSEEK_DISASSEMBLER", &fx.tool)
        .arg("create-db")
        .arg("--binary")
        .arg(&fx.binary)
        .arg("--force")
        .assert()
        .success();

    assert_eq!(fx.calls().len(), 2);
}

#[test]
fn analyze_builds_database_and_runs_script() {
    let _guard = locked();
    let fx = Fixture::new();
    let script = fx.root.join("identify.py");
    fs::write(&script, "# identification script\n").unwrap();

    cargo_bin_cmd!("libseek")
        .env_remove("FAKE_IDA_EXIT")
        .arg("analyze")
        .arg("--binary")
        .arg(&fx.binary)
        .arg("--script")
        .arg(&script)
        .arg("--tool")
        .arg(&fx.tool)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "SHA-256: ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        ))
        .stdout(predicate::str::contains("Database:"))
        .stdout(predicate::str::contains("Disassembler: IDA"));

    let calls = fx.calls();
    assert_eq!(calls.len(), 2, "calls: {calls:?}");
    assert_eq!(calls[1], format!("-A -S{} {}", script.display(), fx.database().display()));
}

#[test]
fn analyze_uses_script_from_config() {
    let _guard = locked();
    let fx = Fixture::new();
    let config = fx.root.join("libseek.yaml");
    fs::write(&config, format!("script: {}/identify.py\n", fx.root.display())).unwrap();

    cargo_bin_cmd!("libseek")
        .env_remove("FAKE_IDA_EXIT")
        .arg("analyze")
        .arg("--binary")
        .arg(&fx.binary)
        .arg("--tool")
        .arg(&fx.tool)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("identify.py"));
}

#[test]
fn analyze_requires_a_script() {
    let _guard = locked();
    let fx = Fixture::new();

    cargo_bin_cmd!("libseek")
        .arg("analyze")
        .arg("--binary")
        .arg(&fx.binary)
        .arg("--tool")
        .arg(&fx.tool)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No identification script given"));
    assert!(fx.calls().is_empty());
}

#[test]
fn run_script_requires_existing_database() {
    let _guard = locked();
    let fx = Fixture::new();

    cargo_bin_cmd!("libseek")
        .arg("run-script")
        .arg("--database")
        .arg(fx.database())
        .arg("--script")
        .arg("identify.py")
        .arg("--tool")
        .arg(&fx.tool)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Database not found"));
}

#[test]
fn run_script_invokes_tool_on_database() {
    let _guard = locked();
    let fx = Fixture::new();
    fs::write(fx.database(), b"db").unwrap();

    cargo_bin_cmd!("libseek")
        .env_remove("FAKE_IDA_EXIT")
        .arg("run-script")
        .arg("--database")
        .arg(fx.database())
        .arg("--script")
        .arg("identify.py")
        .arg("--tool")
        .arg(&fx.tool)
        .assert()
        .success()
        .stdout(predicate::str::contains("Executed identify.py"));
    assert_eq!(fx.calls(), vec![format!("-A -Sidentify.py {}", fx.database().display())]);
}

