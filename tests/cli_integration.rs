use std::fs;
use std::path::Path;

use assert_cmd::Command;
use git2::Repository;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::{TempDir, tempdir};

fn gitli(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gitli"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("USER", "zoe")
        .env_remove("GITLI_LOG");
    cmd
}

fn repo() -> (TempDir, Repository) {
    let dir = tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    (dir, repo)
}

fn initialized() -> (TempDir, Repository) {
    let (dir, repo) = repo();
    gitli(dir.path()).arg("init").assert().success();
    (dir, repo)
}

fn json(dir: &Path, args: &[&str]) -> Value {
    let output = gitli(dir)
        .arg("--format")
        .arg("json")
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "gitli {:?} failed:\n{}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json stdout")
}

fn set_config(repo: &Repository, key: &str, value: &str) {
    repo.config().unwrap().set_str(key, value).unwrap();
}

#[test]
fn no_command_exits_with_failure() {
    let (dir, _repo) = repo();
    gitli(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn outside_repository_exits_with_failure() {
    let dir = tempdir().unwrap();
    gitli(dir.path())
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unable to find a git repository"));
}

#[test]
fn commands_before_init_report_not_initialized() {
    let (dir, _repo) = repo();
    let output = gitli(dir.path())
        .args(["--format", "json", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    let err: Value = serde_json::from_str(stderr.lines().last().unwrap()).unwrap();
    assert_eq!(err["error"], "not_initialized");
}

#[test]
fn init_is_idempotent() {
    let (dir, _repo) = initialized();
    gitli(dir.path()).args(["new", "Keep me"]).assert().success();
    gitli(dir.path()).arg("init").assert().success();
    let ledger = fs::read_to_string(dir.path().join(".gitli/.issues")).unwrap();
    assert_eq!(ledger, "1\nKeep me\n1\n0.1\n");
    assert!(dir.path().join(".gitli/.issues-comments").is_file());
}

#[test]
fn new_list_close_workflow() {
    let (dir, _repo) = initialized();
    gitli(dir.path()).args(["new", "Hello World 1"]).assert().success();
    gitli(dir.path()).args(["add", "Hello World 2"]).assert().success();
    gitli(dir.path())
        .args(["open", "Hello World 3", "--type", "bug"])
        .assert()
        .success();
    gitli(dir.path()).args(["close", "2"]).assert().success();

    gitli(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("#1"))
        .stdout(predicate::str::contains("Hello World 2"))
        .stdout(predicate::str::contains("closed"));

    let open = json(dir.path(), &["list", "open"]);
    let ids: Vec<&str> = open
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["1", "3"]);

    let bugs = json(dir.path(), &["list", "bug"]);
    assert_eq!(bugs.as_array().unwrap().len(), 1);
    assert_eq!(bugs[0]["type"], "bug");
    assert_eq!(bugs[0]["status"], "open");

    gitli(dir.path()).args(["reopen", "2"]).assert().success();
    gitli(dir.path()).args(["reopen", "2"]).assert().success();
    let open_set = fs::read_to_string(dir.path().join(".gitli/.issues-open")).unwrap();
    assert_eq!(open_set.lines().filter(|l| *l == "2").count(), 1);
}

#[test]
fn default_list_filter_from_config() {
    let (dir, repo) = initialized();
    gitli(dir.path()).args(["new", "a"]).assert().success();
    gitli(dir.path()).args(["new", "b"]).assert().success();
    gitli(dir.path()).args(["close", "1"]).assert().success();
    set_config(&repo, "gitli.list.option", "open");

    let listed = json(dir.path(), &["list"]);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], "2");

    let all = json(dir.path(), &["list", "all"]);
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[test]
fn team_mode_from_git_config() {
    let (dir, repo) = initialized();
    set_config(&repo, "gitli.team.active", "on");
    set_config(&repo, "gitli.team.user", "bob");

    assert_eq!(json(dir.path(), &["new", "Hello World 1"])["id"], "bob1");
    assert_eq!(json(dir.path(), &["new", "Hello World 2"])["id"], "bob2");
    let cursor = fs::read_to_string(dir.path().join(".gitli/.issues-last")).unwrap();
    assert_eq!(cursor, "0\nbob2\n");
}

#[test]
fn team_prefix_defaults_to_login_initial() {
    let (dir, repo) = initialized();
    set_config(&repo, "gitli.team.active", "true");
    assert_eq!(json(dir.path(), &["new", "Mine"])["id"], "z1");
}

#[test]
fn custom_store_path_from_flag_and_config() {
    let (dir, repo) = repo();
    let custom = dir.path().join("foobar");
    let custom_arg = custom.to_str().unwrap();

    gitli(dir.path()).args(["--path", custom_arg, "init"]).assert().success();
    gitli(dir.path())
        .args(["--path", custom_arg, "new", "Hello World 1"])
        .assert()
        .success();
    assert!(!dir.path().join(".gitli").exists());
    let ledger = fs::read_to_string(custom.join(".issues")).unwrap();
    assert_eq!(ledger, "1\nHello World 1\n1\n0.1\n");

    set_config(&repo, "gitli.path", custom_arg);
    gitli(dir.path()).args(["milestone", "0.2"]).assert().success();
    assert_eq!(
        fs::read_to_string(custom.join(".issues-current")).unwrap(),
        "0.2"
    );
}

#[test]
fn milestone_up_moves_open_issues() {
    let (dir, _repo) = initialized();
    for title in ["a", "b", "c"] {
        gitli(dir.path()).args(["new", title]).assert().success();
    }
    gitli(dir.path()).args(["close", "2"]).assert().success();

    gitli(dir.path())
        .args(["milestone", "0.2", "--up"])
        .assert()
        .success();
    gitli(dir.path())
        .arg("current")
        .assert()
        .success()
        .stdout(predicate::str::contains("The current milestone is 0.2"));

    let issues = json(dir.path(), &["list"]);
    let milestones: Vec<&str> = issues
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["milestone"].as_str().unwrap())
        .collect();
    assert_eq!(milestones, ["0.2", "0.1", "0.2"]);
}

#[test]
fn edit_with_flags_and_remove() {
    let (dir, _repo) = initialized();
    gitli(dir.path()).args(["new", "first"]).assert().success();
    gitli(dir.path()).args(["new", "second"]).assert().success();

    let edited = json(
        dir.path(),
        &["edit", "1", "--title", "First!", "--type", "enhancement"],
    );
    assert_eq!(edited["title"], "First!");
    assert_eq!(edited["type"], "enhancement");
    assert_eq!(edited["milestone"], "0.1");

    gitli(dir.path()).args(["delete", "1"]).assert().success();
    let remaining = json(dir.path(), &["list"]);
    assert_eq!(remaining.as_array().unwrap().len(), 1);
    assert_eq!(remaining[0]["id"], "2");
    let open_set = fs::read_to_string(dir.path().join(".gitli/.issues-open")).unwrap();
    assert_eq!(open_set, "2\n");
}

#[test]
fn unknown_ids_are_reported_without_failing() {
    let (dir, _repo) = initialized();
    gitli(dir.path())
        .args(["show", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Issue #9 not found"));
    gitli(dir.path())
        .args(["edit", "9", "--title", "x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Issue #9 unknown"));
}

#[test]
fn show_lists_referencing_commits() {
    let (dir, repo) = initialized();
    gitli(dir.path()).args(["new", "Traceable"]).assert().success();

    let sig = git2::Signature::now("Tester", "tester@example.com").unwrap();
    let tree_id = repo.index().unwrap().write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let first = repo
        .commit(Some("HEAD"), &sig, &sig, "Begin #1", &tree, &[])
        .unwrap();
    let parent = repo.find_commit(first).unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "Touch #11", &tree, &[&parent])
        .unwrap();

    gitli(dir.path())
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Traceable"))
        .stdout(predicate::str::contains("Begin #1"))
        .stdout(predicate::str::contains("Touch #11").not());

    let shown = json(dir.path(), &["show", "1"]);
    assert_eq!(shown["title"], "Traceable");
    let commits = shown["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0]["summary"], "Begin #1");
}

#[test]
fn corrupt_ledger_fails_loudly() {
    let (dir, _repo) = initialized();
    fs::write(dir.path().join(".gitli/.issues"), "1\nbroken\n").unwrap();
    gitli(dir.path())
        .arg("list")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("corrupt issue ledger"));
}
