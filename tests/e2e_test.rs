/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join("risks.json")
}

/// Runs the binary inside `dir` against its `risks.json` store.
fn register(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("risk-register");
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .arg("--store")
        .arg(store_path(dir));
    cmd
}

/// Creates a risk and returns its id.
fn create(dir: &TempDir, title: &str, likelihood: u8, impact: u8) -> String {
    let output = register(dir)
        .args(["create", "--title", title])
        .args(["--likelihood", &likelihood.to_string()])
        .args(["--impact", &impact.to_string()])
        .output()
        .unwrap();
    assert!(output.status.success(), "create failed: {:?}", output);

    let risk: Value = serde_json::from_slice(&output.stdout).unwrap();
    risk["id"].as_str().unwrap().to_string()
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

fn single_file_in(dir: &Path) -> PathBuf {
    let entries: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1, "expected one file in {}", dir.display());
    entries[0].clone()
}

// ============================================================================
// Exit code tests
// ============================================================================

mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("risk-register").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("risk-register")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("risk-register")
            .args(["list", "--invalid-option"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Missing subcommand
    #[test]
    fn test_exit_code_missing_subcommand() {
        cargo_bin_cmd!("risk-register").assert().code(2);
    }

    /// Exit code 1: Validation failure lists every bad field
    #[test]
    fn test_exit_code_validation_failure() {
        let dir = TempDir::new().unwrap();
        register(&dir)
            .args(["create", "--likelihood", "0", "--impact", "seven"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("title: is required"))
            .stderr(predicate::str::contains("likelihood: must be an integer between 1 and 5"))
            .stderr(predicate::str::contains("impact: expected a number"));

        assert!(!store_path(&dir).exists());
    }

    /// Exit code 1: Malformed JSON body
    #[test]
    fn test_exit_code_invalid_body() {
        let dir = TempDir::new().unwrap();
        register(&dir)
            .args(["create", "--data", "{not json"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid request body"));
    }

    /// Exit code 1: Unknown band filter
    #[test]
    fn test_exit_code_invalid_filter() {
        let dir = TempDir::new().unwrap();
        register(&dir)
            .args(["list", "--band", "Severe"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("band"));
    }

    /// Exit code 3: Application error - unreadable store
    #[test]
    fn test_exit_code_corrupt_store() {
        let dir = TempDir::new().unwrap();
        fs::write(store_path(&dir), "{ not a list").unwrap();

        register(&dir)
            .arg("list")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse risk store"));
    }

    /// Exit code 4: Unknown risk id
    #[test]
    fn test_exit_code_not_found() {
        let dir = TempDir::new().unwrap();
        register(&dir)
            .args(["show", "no-such-id"])
            .assert()
            .code(4)
            .stderr(predicate::str::contains("Risk not found: no-such-id"));
    }
}

// ============================================================================
// CRUD tests
// ============================================================================

mod crud_tests {
    use super::*;

    #[test]
    fn test_create_scores_risk() {
        let dir = TempDir::new().unwrap();
        let output = register(&dir)
            .args(["create", "-t", "Server outage", "-l", "3", "-i", "4"])
            .args(["--owner", "Ops"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let risk = stdout_json(&output);
        assert_eq!(risk["severity"], 12);
        assert_eq!(risk["band"], "High");
        assert_eq!(risk["status"], "Open");
        assert_eq!(risk["owner"], "Ops");
        assert_eq!(risk["createdAt"], risk["updatedAt"]);
        assert!(store_path(&dir).exists());
    }

    #[test]
    fn test_create_from_json_body() {
        let dir = TempDir::new().unwrap();
        let output = register(&dir)
            .args([
                "create",
                "--data",
                r#"{"title":"Vendor lock-in","likelihood":"2","impact":5,"severity":1,"band":"Low"}"#,
            ])
            .output()
            .unwrap();

        assert!(output.status.success());
        let risk = stdout_json(&output);
        assert_eq!(risk["severity"], 10);
        assert_eq!(risk["band"], "High");
    }

    #[test]
    fn test_update_rescores_and_persists() {
        let dir = TempDir::new().unwrap();
        let id = create(&dir, "Server outage", 3, 4);

        register(&dir)
            .args(["update", &id, "--likelihood", "5"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("\"band\": \"Critical\""));

        let output = register(&dir).args(["show", &id]).output().unwrap();
        let risk = stdout_json(&output);
        assert_eq!(risk["severity"], 20);
        assert_eq!(risk["title"], "Server outage");
    }

    #[test]
    fn test_invalid_update_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let id = create(&dir, "Server outage", 3, 4);
        let before = fs::read_to_string(store_path(&dir)).unwrap();

        register(&dir)
            .args(["update", &id, "--impact", "9"])
            .assert()
            .code(1);

        assert_eq!(fs::read_to_string(store_path(&dir)).unwrap(), before);
    }

    #[test]
    fn test_delete_twice() {
        let dir = TempDir::new().unwrap();
        let id = create(&dir, "Server outage", 3, 4);

        register(&dir).args(["delete", &id]).assert().code(0);
        register(&dir).args(["delete", &id]).assert().code(4);
        register(&dir).args(["show", &id]).assert().code(4);
    }
}

// ============================================================================
// Query tests
// ============================================================================

mod query_tests {
    use super::*;

    fn seed(dir: &TempDir) {
        create(dir, "Server outage", 3, 4);
        create(dir, "Ransomware", 5, 5);
        create(dir, "Printer jam", 1, 2);
    }

    #[test]
    fn test_list_json_sorted_by_severity() {
        let dir = TempDir::new().unwrap();
        seed(&dir);

        let output = register(&dir).args(["list", "--json"]).output().unwrap();
        assert!(output.status.success());

        let page = stdout_json(&output);
        let severities: Vec<u64> = page["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["severity"].as_u64().unwrap())
            .collect();
        assert_eq!(severities, vec![25, 12, 2]);
        assert_eq!(page["total"], 3);
        assert_eq!(page["totalPages"], 1);
        assert_eq!(page["pageSize"], 20);
    }

    #[test]
    fn test_list_page_size_is_clamped() {
        let dir = TempDir::new().unwrap();
        seed(&dir);

        let output = register(&dir)
            .args(["list", "--json", "--page-size", "500"])
            .output()
            .unwrap();
        assert_eq!(stdout_json(&output)["pageSize"], 100);

        let output = register(&dir)
            .args(["list", "--json", "--page-size", "1", "--page", "2"])
            .output()
            .unwrap();
        let page = stdout_json(&output);
        assert_eq!(page["totalPages"], 3);
        assert_eq!(page["items"][0]["severity"], 12);
    }

    #[test]
    fn test_list_empty_register() {
        let dir = TempDir::new().unwrap();
        let output = register(&dir).args(["list", "--json"]).output().unwrap();

        let page = stdout_json(&output);
        assert_eq!(page["total"], 0);
        assert_eq!(page["totalPages"], 1);
    }

    #[test]
    fn test_list_table_output() {
        let dir = TempDir::new().unwrap();
        seed(&dir);

        register(&dir)
            .args(["list", "--search", "OUTAGE"])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Server outage"))
            .stdout(predicate::str::contains("Ransomware").not())
            .stdout(predicate::str::contains("Page 1/1 · 1 risk(s)"));
    }

    #[test]
    fn test_query_string_filters() {
        let dir = TempDir::new().unwrap();
        seed(&dir);

        let output = register(&dir)
            .args(["list", "--json", "--query", "band=all&sortBy=severity&order=asc"])
            .output()
            .unwrap();
        let page = stdout_json(&output);
        assert_eq!(page["items"][0]["title"], "Printer jam");
    }

    #[test]
    fn test_matrix_and_summary() {
        let dir = TempDir::new().unwrap();
        seed(&dir);

        let output = register(&dir).args(["matrix", "--json"]).output().unwrap();
        let matrix = stdout_json(&output);
        let top_right = &matrix["rows"][0][4];
        assert_eq!(top_right["likelihood"], 5);
        assert_eq!(top_right["impact"], 5);
        assert_eq!(top_right["count"], 1);

        let output = register(&dir)
            .args(["summary", "--json", "--band", "Critical"])
            .output()
            .unwrap();
        let summary = stdout_json(&output);
        assert_eq!(summary["total"], 1);
        assert_eq!(summary["critical"], 1);
    }
}

// ============================================================================
// Export tests
// ============================================================================

mod export_tests {
    use super::*;

    #[test]
    fn test_export_csv_to_stdout() {
        let dir = TempDir::new().unwrap();
        create(&dir, "Say \"hi\", twice", 4, 5);

        let output = register(&dir)
            .args(["export", "--format", "csv"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let stdout = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<&str> = stdout.trim_end_matches('\n').split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID,Título,Descripción,Categoría,Propietario"));
        assert!(lines[1].contains("\"Say \"\"hi\"\", twice\""));
        assert!(lines[1].contains("\"Crítico\",\"Abierto\""));
    }

    #[test]
    fn test_export_json_is_default() {
        let dir = TempDir::new().unwrap();
        create(&dir, "Server outage", 3, 4);

        let output = register(&dir).arg("export").output().unwrap();
        let risks = stdout_json(&output);
        assert_eq!(risks.as_array().unwrap().len(), 1);
        assert_eq!(risks[0]["severity"], 12);
    }

    #[test]
    fn test_export_into_directory_uses_dated_filename() {
        let dir = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        create(&dir, "Server outage", 3, 4);

        register(&dir)
            .args(["export", "-f", "csv", "-o"])
            .arg(out_dir.path())
            .assert()
            .code(0)
            .stderr(predicate::str::contains("Export written"));

        let written = single_file_in(out_dir.path());
        let name = written.file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with("riesgos-"));
        assert!(name.ends_with(".csv"));
        assert!(fs::read_to_string(&written).unwrap().starts_with("ID,"));
    }

    #[test]
    fn test_export_unknown_format() {
        let dir = TempDir::new().unwrap();
        register(&dir)
            .args(["export", "--format", "xlsx"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid format: xlsx"));
    }
}
