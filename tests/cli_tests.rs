mod common;

use common::write_docs;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    input: PathBuf,
    out: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = write_docs(
            &dir.path().join("texts"),
            &[
                ("a.txt", "Кот сидит. Кот спит, кот ест."),
                ("b.txt", "Пёс спит, кот спит."),
            ],
        );
        let out = dir.path().join("result");
        Self { dir, input, out }
    }

    fn extract(&self, extra: &[&str]) -> Output {
        let mut args = vec![
            "extract".to_string(),
            self.input.to_string_lossy().into_owned(),
            "--orders".to_string(),
            "1-2".to_string(),
            "--output-dir".to_string(),
            self.out.to_string_lossy().into_owned(),
            "--no-builtin-stopwords".to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        run(&args)
    }
}

fn run<S: AsRef<std::ffi::OsStr>>(args: &[S]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ngramforge"))
        .args(args)
        .output()
        .expect("Failed to execute binary")
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).to_string()
}

fn stderr(o: &Output) -> String {
    String::from_utf8_lossy(&o.stderr).to_string()
}

fn abs_table(out: &Path) -> PathBuf {
    out.join("frequencies").join("absolute_frequency.csv")
}

#[test]
fn test_cli_extract_writes_outputs() {
    let ctx = TestContext::new();
    let output = ctx.extract(&[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    assert!(abs_table(&ctx.out).exists());
    assert!(ctx.out.join("frequencies").join("relative_frequency.csv").exists());
    assert!(ctx.out.join("best_n").join("a_txt").join("top_2.csv").exists());

    let text = stdout(&output);
    assert!(text.contains("RUN SUMMARY"), "stdout: {}", text);
}

#[test]
fn test_cli_rerun_skips_everything() {
    let ctx = TestContext::new();
    assert!(ctx.extract(&[]).status.success());
    let before = fs::read_to_string(abs_table(&ctx.out)).unwrap();

    let output = ctx.extract(&["--json"]);
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(summary["processed"], 0);
    assert_eq!(summary["skipped_duplicates"].as_array().unwrap().len(), 2);
    assert_eq!(fs::read_to_string(abs_table(&ctx.out)).unwrap(), before);

    let log = stderr(&output);
    assert!(log.contains("'a.txt' is already in the corpus table"), "stderr: {}", log);
}

#[test]
fn test_cli_missing_input_exits_nonzero() {
    let ctx = TestContext::new();
    let missing = ctx.dir.path().join("missing");
    let output = run(&[
        "extract",
        missing.to_str().unwrap(),
        "--output-dir",
        ctx.out.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Input not found"));
}

#[test]
fn test_cli_report_lists_top_ngrams() {
    let ctx = TestContext::new();
    assert!(ctx.extract(&[]).status.success());

    let output = run(&[
        "report",
        "--output-dir",
        ctx.out.to_str().unwrap(),
        "--order",
        "1",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    // кот: 3 in a.txt + 1 in b.txt, ranked first
    let text = stdout(&output);
    let row = Regex::new(r"\|\s*1\s*\|\s*кот\s*\|\s*1\s*\|\s*4\s*\|\s*2\s*\|").unwrap();
    assert!(row.is_match(&text), "stdout: {}", text);
}

#[test]
fn test_cli_report_json() {
    let ctx = TestContext::new();
    assert!(ctx.extract(&[]).status.success());

    let output = run(&[
        "report",
        "--output-dir",
        ctx.out.to_str().unwrap(),
        "--order",
        "2",
        "--json",
    ]);
    assert!(output.status.success());

    let top: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let rows = top.as_array().unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r["order"] == 2));
}

#[test]
fn test_cli_report_without_tables_fails() {
    let ctx = TestContext::new();
    let output = run(&["report", "--output-dir", ctx.out.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_config_file_with_override() {
    let ctx = TestContext::new();
    let config_path = ctx.dir.path().join("config.json");
    fs::write(
        &config_path,
        format!(
            r#"{{ "extraction": {{ "orders": "3", "top_k": 1 }}, "output": {{ "output_dir": {:?} }} }}"#,
            ctx.out.to_string_lossy()
        ),
    )
    .unwrap();

    // --top-k on the command line beats the file; orders come from the file
    let output = run(&[
        "--config",
        config_path.to_str().unwrap(),
        "extract",
        ctx.input.to_str().unwrap(),
        "--top-k",
        "5",
        "--no-builtin-stopwords",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let doc_dir = ctx.out.join("best_n").join("a_txt");
    assert!(doc_dir.join("top_3.csv").exists());
    assert!(!doc_dir.join("top_1.csv").exists());
    let lines = fs::read_to_string(doc_dir.join("top_3.csv")).unwrap();
    // a.txt has 4 distinct trigrams, all kept with top-k 5
    assert_eq!(lines.lines().count(), 5);
}
