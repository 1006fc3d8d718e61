#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{Local, NaiveDate, TimeZone};
use rovertime::core::Confirm;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, isolated from the real config directory.
pub fn rot(name: &str) -> Command {
    let home = test_home(name);
    let mut cmd = cargo_bin_cmd!("rovertime");
    cmd.env("HOME", &home)
        .env("APPDATA", &home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

pub fn test_home(name: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{name}_rovertime_home"));
    fs::create_dir_all(&path).ok();
    path
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_rovertime.sqlite"));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{name}_out.{ext}"));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and add a small dataset useful for many tests
pub fn init_db_with_data(name: &str, db_path: &str) {
    rot(name).args(["--db", db_path, "init"]).assert().success();

    rot(name)
        .args(["--db", db_path, "add", "2025-09-01", "--in", "09:00", "--out", "17:00"])
        .assert()
        .success();

    rot(name)
        .args([
            "--db", db_path, "add", "2025-09-15", "--in", "08:00", "--out", "17:30", "--break", "15",
        ])
        .assert()
        .success();
}

/// Local epoch-ms for a wall-clock moment.
pub fn local_ms(y: i32, m: u32, d: u32, h: u32, mi: u32) -> i64 {
    let naive = NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, mi, 0))
        .expect("valid test date");
    Local
        .from_local_datetime(&naive)
        .earliest()
        .expect("representable local time")
        .timestamp_millis()
}

/// Answers from a script; records every question asked.
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: RefCell<VecDeque<bool>>,
    pub asked: RefCell<Vec<(String, String)>>,
    pub calls: Cell<usize>,
}

impl ScriptedConfirm {
    pub fn new(answers: &[bool]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().copied().collect()),
            ..Default::default()
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&self, message: &str, title: &str) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.asked
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}
