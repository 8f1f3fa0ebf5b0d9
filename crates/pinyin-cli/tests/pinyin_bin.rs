use std::fs;
use std::io::{self, Write};
use std::process::{Command, Stdio};

const UNIGRAM: &str = r#"{
    "ni": {"words": ["你", "尼"], "counts": [100, 1]},
    "hao": {"words": ["好", "号"], "counts": [100, 1]}
}"#;
const BIGRAM: &str = r#"{"ni hao": {"words": ["你 好", "尼 好"], "counts": [5, 50]}}"#;

fn run_pinyin(dir: &std::path::Path, args: &[&str], input: &str) -> std::process::Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_pinyin"))
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    // The child may exit before reading, e.g. on a missing table.
    if let Err(e) = stdin.write_all(input.as_bytes()) {
        assert_eq!(e.kind(), io::ErrorKind::BrokenPipe, "{e}");
    }
    drop(stdin);
    child.wait_with_output().unwrap()
}

#[test]
fn test_decodes_stdin_with_default_table_paths() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("1_word.txt"), UNIGRAM).unwrap();
    fs::write(dir.path().join("2_word.txt"), BIGRAM).unwrap();

    let out = run_pinyin(dir.path(), &[], "ni hao\n\nxyz123\n");
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "你好\n\n?\n");
}

#[test]
fn test_missing_table_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("1_word.txt"), UNIGRAM).unwrap();

    let input = "ni hao\n".repeat(100_000);
    let out = run_pinyin(dir.path(), &[], &input);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("2_word.txt"));
}

#[test]
fn test_compiled_snapshot_and_parallel_jobs() {
    let dir = tempfile::tempdir().unwrap();
    let model = pinyin_core::LanguageModel::from_json_strs(UNIGRAM, BIGRAM).unwrap();
    let snapshot = dir.path().join("model.pylm");
    model.save(&snapshot).unwrap();

    let out = run_pinyin(
        dir.path(),
        &["--model", snapshot.to_str().unwrap(), "--jobs", "3"],
        "hao\nni hao\n",
    );
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "好\n你好\n");
}
