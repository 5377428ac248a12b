//! End-to-end tests for the `repograph` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn repograph() -> Command {
    let mut cmd = Command::cargo_bin("repograph").unwrap();
    cmd.env_remove("REPOGRAPH_LLM_API_KEY")
        .env_remove("ANTHROPIC_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, path: &str, content: &str) {
    let full = root.join(path);
    fs::create_dir_all(full.parent().unwrap()).unwrap();
    fs::write(full, content).unwrap();
}

fn sample_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/util.ts", "export function helper() { return 1; }\n");
    write(
        temp.path(),
        "src/main.ts",
        "import { helper } from './util';\nexport function run() { return helper(); }\n",
    );
    write(temp.path(), "scripts/tool.py", "def tool():\n    pass\n");
    temp
}

#[test]
fn languages_lists_extractors() {
    repograph()
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("typescript"))
        .stdout(predicate::str::contains(".tsx"))
        .stdout(predicate::str::contains("python"))
        .stdout(predicate::str::contains("pattern"));
}

#[test]
fn analyze_writes_json_to_stdout() {
    let repo = sample_repo();
    let output = repograph()
        .args(["analyze", "--no-llm", "--json", "-"])
        .arg(repo.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let edges = json["fileGraph"]["edges"].as_array().unwrap();
    assert!(edges.iter().any(|edge| edge["source"] == "src/main.ts"
        && edge["target"] == "src/util.ts"
        && edge["kind"] == "imports"));

    let nodes = json["fileGraph"]["nodes"].as_array().unwrap();
    assert!(nodes.iter().any(|node| node["id"] == "scripts/tool.py"));
    assert!(nodes.iter().any(|node| node["id"] == "src" && node["kind"] == "directory"));

    let calls = json["functionGraph"]["edges"].as_array().unwrap();
    assert!(calls.iter().any(|edge| edge["source"] == "src/main.ts::run"
        && edge["target"] == "src/util.ts::helper"));
}

#[test]
fn analyze_writes_json_file() {
    let repo = sample_repo();
    let out = repo.path().join("out/graph.json");
    repograph()
        .args(["analyze", "--no-llm", "--json"])
        .arg(&out)
        .arg(repo.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Repository Graph"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    assert_eq!(json["stats"]["fileCount"], 3);
}

#[test]
fn missing_root_fails() {
    let temp = TempDir::new().unwrap();
    repograph()
        .arg("analyze")
        .arg(temp.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Repository root not found"));
}

#[test]
fn config_file_limits_files() {
    let repo = sample_repo();
    write(repo.path(), "repograph.json", r#"{ "max_files": 1, "llm_enabled": false }"#);

    let output = repograph()
        .args(["analyze", "--json", "-"])
        .arg(repo.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stats"]["fileCount"], 1);
}

#[test]
fn missing_credential_is_a_warning() {
    let repo = sample_repo();
    repograph()
        .arg("analyze")
        .arg(repo.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "LLM enrichment skipped: no API credential configured",
        ));
}
