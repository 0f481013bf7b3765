use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const CATALOG: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../sleepdex-core/tests/fixtures/catalog.json"
);

fn temp_path(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "sleepdex-cli-{label}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

fn sleepdex(state: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sleepdex"))
        .arg("--catalog")
        .arg(CATALOG)
        .arg("--state")
        .arg(state)
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("run cli")
}

fn json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "cli failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json output")
}

#[test]
fn toggle_persists_and_summary_reflects_it() {
    let state = temp_path("toggle");
    let out = sleepdex(&state, &["--report", "json", "toggle", "0025-1", "0133-2"]);
    assert_eq!(json(&out)["acquired_total"], 2);

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&state).expect("state file")).expect("blob");
    assert_eq!(saved, serde_json::json!({"0025-1": true, "0133-2": true}));

    let summary = json(&sleepdex(&state, &["--report", "json", "summary"]));
    let total_row = summary["rows"]
        .as_array()
        .and_then(|rows| rows.last())
        .expect("total row");
    assert_eq!(total_row["cells"][0]["acquired"], 2);
    assert_eq!(total_row["cells"][0]["total"], 12);
    let _ = std::fs::remove_file(state);
}

#[test]
fn list_filters_by_location_and_kana() {
    let state = temp_path("list");
    let rows = json(&sleepdex(
        &state,
        &["--report", "json", "list", "--location", "cyan", "--name", "いーぶい"],
    ));
    let ids: Vec<&str> = rows
        .as_array()
        .expect("rows")
        .iter()
        .filter_map(|row| row["ID"].as_str())
        .collect();
    assert_eq!(ids, ["0133-1", "0133-2", "0133-3"]);
}

#[test]
fn reverse_lookup_skips_acquired_records() {
    let state = temp_path("reverse");
    let before = json(&sleepdex(
        &state,
        &["--report", "json", "reverse", "--location", "gold", "--rank", "ノーマル2"],
    ));
    assert_eq!(before.as_array().map(Vec::len), Some(2));

    json(&sleepdex(&state, &["--report", "json", "toggle", "0025-1"]));
    let after = json(&sleepdex(
        &state,
        &["--report", "json", "reverse", "--location", "gold", "--rank", "ノーマル2"],
    ));
    assert_eq!(after.as_array().map(Vec::len), Some(1));
    assert_eq!(after[0]["ID"], "0025-2");
    let _ = std::fs::remove_file(state);
}

#[test]
fn bulk_mark_needs_a_target() {
    let state = temp_path("bulk");
    let refused = sleepdex(&state, &["mark"]);
    assert!(!refused.status.success());

    let marked = json(&sleepdex(
        &state,
        &["--report", "json", "mark", "--location", "taupe"],
    ));
    assert_eq!(marked["changed"], 4);

    let cleared = json(&sleepdex(
        &state,
        &["--report", "json", "unmark", "--all"],
    ));
    assert_eq!(cleared["changed"], 4);
    assert_eq!(cleared["acquired_total"], 0);
    let _ = std::fs::remove_file(state);
}

#[test]
fn toggle_counts_flips_in_both_directions() {
    let state = temp_path("toggle-both");
    json(&sleepdex(&state, &["--report", "json", "toggle", "0025-1"]));

    let report = json(&sleepdex(
        &state,
        &["--report", "json", "toggle", "0025-1", "0133-1", "0133-2", "0133-2"],
    ));
    assert_eq!(report["requested"], 4);
    assert_eq!(report["changed"], 4);
    assert_eq!(report["flips"], serde_json::json!({"on": 2, "off": 2}));
    assert_eq!(report["acquired_total"], 1);

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&state).expect("state file")).expect("blob");
    assert_eq!(saved, serde_json::json!({"0133-1": true}));
    let _ = std::fs::remove_file(state);
}

#[test]
fn bulk_refuses_ids_mixed_with_filters() {
    let state = temp_path("bulk-mixed");
    for args in [
        ["mark", "0025-1", "--location", "taupe"],
        ["unmark", "0025-1", "--acquired", "acquired"],
        ["mark", "0025-1", "--name", "ぴか"],
    ] {
        let out = sleepdex(&state, &args);
        assert!(!out.status.success(), "{args:?} should be refused");
        assert!(String::from_utf8_lossy(&out.stderr).contains("not both"));
    }
    let out = sleepdex(&state, &["mark", "0025-1", "--all"]);
    assert!(!out.status.success());
    assert!(!state.exists(), "refused commands must not write state");

    let marked = json(&sleepdex(&state, &["--report", "json", "mark", "0025-1"]));
    assert_eq!(marked["changed"], 1);
    let _ = std::fs::remove_file(state);
}

#[test]
fn export_then_import_restores_state() {
    let state = temp_path("export");
    let backup = temp_path("backup");
    json(&sleepdex(&state, &["--report", "json", "toggle", "0001-4", "ghost-id"]));

    let out = sleepdex(&state, &["export", "--output", backup.to_str().expect("utf8 path")]);
    assert!(out.status.success());
    let text = std::fs::read_to_string(&backup).expect("backup");
    assert!(text.contains("\n  \"0001-4\": true"), "pretty export: {text}");

    let fresh = temp_path("fresh");
    let imported = json(&sleepdex(
        &fresh,
        &["--report", "json", "import", backup.to_str().expect("utf8 path")],
    ));
    assert_eq!(imported["acquired_total"], 2);

    for path in [state, backup, fresh] {
        let _ = std::fs::remove_file(path);
    }
}

#[test]
fn invalid_backup_is_rejected_and_state_kept() {
    let state = temp_path("invalid");
    let bad = temp_path("bad-backup");
    std::fs::write(&bad, "[true]").expect("write bad backup");
    json(&sleepdex(&state, &["--report", "json", "toggle", "0025-3"]));

    let out = sleepdex(&state, &["import", bad.to_str().expect("utf8 path")]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not a valid backup"));

    let saved = std::fs::read_to_string(&state).expect("state file");
    assert!(saved.contains("0025-3"));
    for path in [state, bad] {
        let _ = std::fs::remove_file(path);
    }
}

#[test]
fn ranks_lists_all_thirty_five() {
    let state = temp_path("ranks");
    let ranks = json(&sleepdex(&state, &["--report", "json", "ranks"]));
    let ranks = ranks.as_array().expect("ranks");
    assert_eq!(ranks.len(), 35);
    assert_eq!(ranks[0], "ノーマル1");
    assert_eq!(ranks[34], "マスター20");
}
