use std::ffi::OsStr;
use std::fs;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run_codeheap(args: &[&OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_codeheap"))
        .args(args)
        .env("RUST_LOG", "codeheap=info")
        .env_remove("CODEHEAP_EXTENSIONS")
        .env_remove("CODEHEAP_MODIFIED_AFTER")
        .output()
        .expect("Failed to run codeheap")
}

#[test]
fn test_cli_reports_each_copy() {
    let source = tempdir().unwrap();
    let heap = tempdir().unwrap();
    fs::create_dir_all(source.path().join("src")).unwrap();
    fs::write(source.path().join("src/app.py"), "print('hi')").unwrap();
    fs::write(source.path().join("src/app.rs"), "fn main() {}").unwrap();

    let output = run_codeheap(&[
        source.path().as_os_str(),
        heap.path().as_os_str(),
        OsStr::new("--extensions"),
        OsStr::new(".py"),
        OsStr::new(".rs"),
    ]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Cleared all contents from"));
    assert!(stdout.contains("Copied: "));
    assert!(stdout.contains("Files have been aggregated in:"));
    assert!(heap.path().join("app.py").is_file());
    assert!(heap.path().join("app.rs").is_file());
}

#[test]
fn test_cli_bad_date_fails_before_clearing() {
    let source = tempdir().unwrap();
    let heap = tempdir().unwrap();
    fs::write(source.path().join("a.py"), "a").unwrap();
    fs::write(heap.path().join("sentinel.md"), "keep me").unwrap();

    let output = run_codeheap(&[
        source.path().as_os_str(),
        heap.path().as_os_str(),
        OsStr::new("--modified-after"),
        OsStr::new("2024-31-12"),
    ]);

    assert!(!output.status.success());
    assert!(heap.path().join("sentinel.md").is_file());
    assert!(!heap.path().join("a.py").exists());
}

#[test]
fn test_cli_missing_source_exits_non_zero() {
    let scratch = tempdir().unwrap();
    let heap = tempdir().unwrap();

    let output = run_codeheap(&[
        scratch.path().join("does-not-exist").as_os_str(),
        heap.path().as_os_str(),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Aggregation failed"));
}

#[test]
fn test_cli_help_describes_every_flag() {
    let output = run_codeheap(&[OsStr::new("--help")]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("File extensions to include"));
    assert!(stdout.contains("Only include files modified on or after this date"));
    assert!(stdout.contains("Patterns file to use instead of"));
    assert!(stdout.contains("Skip the summary tree of copied files"));
}
