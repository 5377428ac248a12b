//! Integration tests for the analyze command against real directories.

use std::fs;
use std::path::PathBuf;

use repograph_cli::cli::AnalyzeArgs;
use repograph_cli::commands;
use repograph_cli::CliError;
use tempfile::TempDir;

fn args(root: PathBuf) -> AnalyzeArgs {
    AnalyzeArgs {
        root,
        json: None,
        max_files: None,
        concurrency: None,
        no_llm: true,
        tsconfig: None,
        config: None,
    }
}

#[tokio::test]
async fn tsconfig_aliases_resolve() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/lib")).unwrap();
    fs::write(
        root.join("tsconfig.json"),
        r#"{
  // path aliases
  "compilerOptions": { "baseUrl": ".", "paths": { "@lib/*": ["src/lib/*"] } },
}"#,
    )
    .unwrap();
    fs::write(root.join("src/lib/math.ts"), "export function add(a, b) { return a + b; }").unwrap();
    fs::write(
        root.join("src/index.ts"),
        "import { add } from '@lib/math';\nexport const total = add(1, 2);",
    )
    .unwrap();

    let out = root.join("graph.json");
    let mut run = args(root.to_path_buf());
    run.json = Some(out.clone());
    commands::analyze_execute(run, true).await.unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(out).unwrap()).unwrap();
    let edges = json["fileGraph"]["edges"].as_array().unwrap();
    assert!(edges
        .iter()
        .any(|edge| edge["source"] == "src/index.ts" && edge["target"] == "src/lib/math.ts"));
    assert_eq!(json["stats"]["unresolvedImportCount"], 0);
}

#[tokio::test]
async fn explicit_broken_tsconfig_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.ts"), "export {}").unwrap();
    fs::write(temp.path().join("custom.json"), "{ nope").unwrap();

    let mut run = args(temp.path().to_path_buf());
    run.tsconfig = Some(PathBuf::from("custom.json"));
    let err = commands::analyze_execute(run, true).await.unwrap_err();
    assert!(matches!(err, CliError::Aliases { .. }));
}

#[tokio::test]
async fn invalid_concurrency_is_rejected() {
    let temp = TempDir::new().unwrap();
    let mut run = args(temp.path().to_path_buf());
    run.concurrency = Some(0);
    let err = commands::analyze_execute(run, true).await.unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}

#[tokio::test]
async fn unwritable_json_path_reports_context() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.ts"), "export function a() {}").unwrap();
    fs::write(temp.path().join("blocker"), "not a directory").unwrap();

    let mut run = args(temp.path().to_path_buf());
    run.json = Some(temp.path().join("blocker/graph.json"));
    let err = commands::analyze_execute(run, true).await.unwrap_err();

    assert!(matches!(err, CliError::Other(_)));
    assert!(err.to_string().contains("Failed to create"), "{err}");
}
