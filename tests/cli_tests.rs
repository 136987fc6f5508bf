use std::path::Path;
use std::process::{Command, Output};

/// Run the built binary with a clean environment for the data directory
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_leg-eff"))
        .args(args)
        .env_remove("LEG_EFF_DATA_DIR")
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to execute leg-eff")
}

fn write_fixture(dir: &Path) {
    let legiscan = r#"[
        {"bill_number": "A00010", "progress": [{"date": "2023-01-04", "event": 1}],
         "history": [{"date": "2023-01-04", "action": "referred to codes"},
                     {"date": "2023-05-01", "action": "passed assembly"}],
         "sponsors": [{"name": "Bo Kim", "role": "Rep", "party": "R"}]},
        {"bill_number": "S00020", "progress": [{"date": "2023-01-04", "event": 1}],
         "history": [{"date": "2023-01-04", "action": "REFERRED TO RULES"}],
         "sponsors": []}
    ]"#;
    let senate = r#"[
        {"basePrintNo": "A10", "sponsor": {"member": {"fullName": "Bo Kim"}, "budget": false, "rules": false, "redistricting": false}},
        {"basePrintNo": "S20", "sponsor": {"member": null, "budget": false, "rules": true, "redistricting": false}}
    ]"#;
    std::fs::write(dir.join("NY-2023.json"), legiscan).unwrap();
    std::fs::write(dir.join("NY-2023-senate.json"), senate).unwrap();
}

#[test]
fn test_no_command_lists_commands() {
    let output = run_cli(&[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("score"));
    assert!(stdout.contains("bills"));
}

#[test]
fn test_score_table() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let data_dir = dir.path().to_string_lossy().to_string();

    let output = run_cli(&["score", "--year", "2023", "--data-dir", &data_dir, "--format", "table"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8_lossy(&output.stdout);
    insta::assert_snapshot!(stdout.trim_end(), @r"
    sponsor  bill  aic  pass  pass_other_house  law  spons_house  spons_party   score
    Bo Kim      1    0     1                 0    0  Rep          R            0.3000
    rules       1    0     0                 0    0  -            -            0.1000
    ");
}

#[test]
fn test_score_jsonl_to_file() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let data_dir = dir.path().to_string_lossy().to_string();
    let out_path = dir.path().join("scores.jsonl");
    let out = out_path.to_string_lossy().to_string();

    let output = run_cli(&["score", "--year", "2023", "--data-dir", &data_dir, "--output", &out]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let rows: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["sponsor"], "Bo Kim");
    assert_eq!(rows[0]["pass"], 1);
    assert_eq!(rows[1]["sponsor"], "rules");
}

#[test]
fn test_bills_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let data_dir = dir.path().to_string_lossy().to_string();

    let output = run_cli(&["bills", "--year", "2023", "--data-dir", &data_dir]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let first: serde_json::Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["bill_number"], "A00010");
    assert_eq!(first["chamber_of_origin"], "assembly");
    assert_eq!(first["pass_assembly"], true);
    assert_eq!(first["main_sponsor"], "Bo Kim");
}

#[test]
fn test_missing_dataset_fails() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_string_lossy().to_string();

    let output = run_cli(&["score", "--year", "2023", "--data-dir", &data_dir]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Did you download the data for this year?"));
}

#[test]
fn test_unsupported_state_fails() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_string_lossy().to_string();

    let output = run_cli(&["score", "--state", "CA", "--year", "2023", "--data-dir", &data_dir]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not implemented yet"));
}
