//! Shared test doubles for adapter and pipeline tests.

#![allow(dead_code)]

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use libseek_core::disassembler::{CommandRunner, ToolExit};

/// Records every invocation and, like the real tool, writes the `-o<path>`
/// database when configured to.
#[derive(Clone)]
pub struct RecordingRunner {
    pub calls: Arc<Mutex<Vec<Vec<String>>>>,
    pub exit_code: Option<i32>,
    pub writes_database: bool,
    pub spawn_fails: bool,
}

impl RecordingRunner {
    pub fn succeeding() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            exit_code: Some(0),
            writes_database: true,
            spawn_fails: false,
        }
    }

    pub fn failing(code: i32) -> Self {
        Self { exit_code: Some(code), writes_database: false, ..Self::succeeding() }
    }

    pub fn spawn_failure() -> Self {
        Self { spawn_fails: true, writes_database: false, ..Self::succeeding() }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call(&self, idx: usize) -> Vec<String> {
        self.calls.lock().unwrap()[idx].clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, _program: &Path, args: &[OsString]) -> io::Result<ToolExit> {
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().to_string()).collect();
        self.calls.lock().unwrap().push(args.clone());
        if self.spawn_fails {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such tool"));
        }
        if self.writes_database {
            if let Some(db) = args.iter().find_map(|a| a.strip_prefix("-o")) {
                std::fs::write(db, b"db").unwrap();
            }
        }
        Ok(ToolExit { code: self.exit_code })
    }
}
