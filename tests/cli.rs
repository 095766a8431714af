use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn fluxtodo(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fluxtodo").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

#[test]
fn empty_store_lists_nothing() {
    let dir = TempDir::new().unwrap();
    fluxtodo(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No todos."));
}

#[test]
fn add_joins_words_and_persists() {
    let dir = TempDir::new().unwrap();

    fluxtodo(dir.path())
        .args(["add", "buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added (1): buy milk"));

    fluxtodo(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [ ] buy milk"));
}

#[test]
fn toggle_then_clear() {
    let dir = TempDir::new().unwrap();
    fluxtodo(dir.path()).args(["a", "one"]).assert().success();
    fluxtodo(dir.path()).args(["a", "two"]).assert().success();

    fluxtodo(dir.path())
        .args(["toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed (1): one"));

    fluxtodo(dir.path())
        .args(["ls", "--done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] one").and(predicate::str::contains("two").not()));

    fluxtodo(dir.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared: one"));

    fluxtodo(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [ ] two").and(predicate::str::contains("one").not()));
}

#[test]
fn toggle_twice_reopens() {
    let dir = TempDir::new().unwrap();
    fluxtodo(dir.path()).args(["add", "walk"]).assert().success();
    fluxtodo(dir.path()).args(["t", "1"]).assert().success();

    fluxtodo(dir.path())
        .args(["t", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened (1): walk"));
}

#[test]
fn clear_with_nothing_completed() {
    let dir = TempDir::new().unwrap();
    fluxtodo(dir.path()).args(["add", "x"]).assert().success();
    fluxtodo(dir.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("No completed todos to clear."));
}

#[test]
fn blank_text_is_rejected() {
    let dir = TempDir::new().unwrap();
    fluxtodo(dir.path())
        .args(["add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Todo text cannot be empty"));
}

#[test]
fn unknown_index_is_an_error() {
    let dir = TempDir::new().unwrap();
    fluxtodo(dir.path()).args(["add", "x"]).assert().success();
    fluxtodo(dir.path())
        .args(["toggle", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Index 4 not found"));
}

#[test]
fn slot_name_config_selects_the_list() {
    let dir = TempDir::new().unwrap();
    fluxtodo(dir.path()).args(["add", "default list"]).assert().success();

    fluxtodo(dir.path())
        .args(["config", "slot-name", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slot-name set to work"));

    fluxtodo(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No todos."));

    fluxtodo(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("slot-name = work"));
}

#[test]
fn data_dir_can_come_from_env() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("fluxtodo").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("FLUXTODO_DATA", dir.path())
        .args(["add", "from env"])
        .assert()
        .success();

    assert!(dir
        .path()
        .join("slots")
        .join("flux-backbone-todo.json")
        .exists());
}

#[test]
fn init_creates_data_dir() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("nested").join("store");
    fluxtodo(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized fluxtodo store"));
    assert!(data_dir.is_dir());
}

#[test]
fn corrupt_slot_does_not_block_switching_slots() {
    let dir = TempDir::new().unwrap();
    let slots = dir.path().join("slots");
    std::fs::create_dir_all(&slots).unwrap();
    std::fs::write(slots.join("flux-backbone-todo.json"), "{not json").unwrap();

    fluxtodo(dir.path()).arg("list").assert().failure();
    fluxtodo(dir.path()).arg("init").assert().success();

    fluxtodo(dir.path())
        .args(["config", "slot-name", "fresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("slot-name set to fresh"));

    fluxtodo(dir.path())
        .args(["add", "works again"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added (1): works again"));
}

#[test]
fn init_on_existing_dir_warns() {
    let dir = TempDir::new().unwrap();
    fluxtodo(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
