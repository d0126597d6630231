use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasklist-{nanos}-{file_name}"))
}

fn run(store_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tasklist"))
        .args(args)
        .env("TASKLIST_STORE_PATH", store_path)
        .env("TASKLIST_CONFIG_PATH", store_path.with_extension("config.json"))
        .output()
        .expect("failed to run tasklist")
}

fn read_store(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn add_command_succeeds() {
    let store_path = temp_path("cli-add.json");

    let output = run(&store_path, &["add", "Buy milk"]);
    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added task: Buy milk (1)"));
    assert_eq!(
        stored,
        serde_json::json!([{"id": 1, "text": "Buy milk", "completed": false}])
    );
}

#[test]
fn add_keeps_surrounding_whitespace() {
    let store_path = temp_path("cli-add-spaces.json");

    run(&store_path, &["add", "  padded  "]);
    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();

    assert_eq!(stored[0]["text"], "  padded  ");
}

#[test]
fn add_appends_after_existing_tasks() {
    let store_path = temp_path("cli-add-append.json");
    std::fs::write(
        &store_path,
        r#"[{"id": 1718000000000, "text": "from before", "completed": true}]"#,
    )
    .unwrap();

    let output = run(&store_path, &["--json", "add", "next"]);
    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed["id"], 1718000000001u64);
    assert_eq!(stored.as_array().unwrap().len(), 2);
    assert_eq!(stored[0]["text"], "from before");
    assert_eq!(stored[1]["text"], "next");
}

#[test]
fn blank_add_is_silent_no_op() {
    let store_path = temp_path("cli-add-blank.json");

    let output = run(&store_path, &["add", "   "]);
    let exists = store_path.exists();
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(!exists);
}

#[test]
fn add_command_rejects_missing_text() {
    let store_path = temp_path("cli-add-missing.json");

    let output = run(&store_path, &["add"]);
    std::fs::remove_file(&store_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
}

#[test]
fn malformed_store_starts_empty_and_is_replaced() {
    let store_path = temp_path("cli-add-malformed.json");
    std::fs::write(&store_path, "{ not a task list").unwrap();

    let output = run(&store_path, &["add", "fresh start"]);
    let stored = read_store(&store_path);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    assert_eq!(
        stored,
        serde_json::json!([{"id": 1, "text": "fresh start", "completed": false}])
    );
}
