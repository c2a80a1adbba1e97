//! End-to-end tests for the `lox` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Write `contents` to a fresh file under the system temp dir.
fn source_file(name: &str, contents: impl AsRef<[u8]>) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lox_cli_tests_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn lox(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lox"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn tokenize(path: &PathBuf) -> Output {
    lox(&["tokenize", path.to_str().unwrap()])
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_tokenize_success() {
    let path = source_file("parens.lox", "(( )){}");
    let output = tokenize(&path);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_of(&output),
        "LEFT_PAREN ( null\nLEFT_PAREN ( null\nRIGHT_PAREN ) null\nRIGHT_PAREN ) null\n\
         LEFT_BRACE { null\nRIGHT_BRACE } null\nEOF  null\n"
    );
    assert_eq!(stderr_of(&output), "");
}

#[test]
fn test_tokenize_empty_file() {
    let path = source_file("empty.lox", "");
    let output = tokenize(&path);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "EOF  null\n");
}

#[test]
fn test_tokenize_literals() {
    let path = source_file("literals.lox", "\"hello\" 42 3.5\n");
    let output = tokenize(&path);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_of(&output),
        "STRING \"hello\" hello\nNUMBER 42 42.0\nNUMBER 3.5 3.5\nEOF  null\n"
    );
}

#[test]
fn test_lexical_errors_exit_65() {
    let path = source_file("errors.lox", ",.$(#");
    let output = tokenize(&path);
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(
        stdout_of(&output),
        "COMMA , null\nDOT . null\nLEFT_PAREN ( null\nEOF  null\n"
    );
    assert_eq!(
        stderr_of(&output),
        "[line 1] Error: Unexpected character: $\n[line 1] Error: Unexpected character: #\n"
    );
}

#[test]
fn test_unterminated_string_exit_65() {
    let path = source_file("unterminated.lox", "\"bar");
    let output = tokenize(&path);
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stdout_of(&output), "EOF  null\n");
    assert_eq!(stderr_of(&output), "[line 1] Error: Unterminated string.\n");
}

#[test]
fn test_unknown_command_is_usage_error() {
    let path = source_file("unknown.lox", "+");
    let output = lox(&["parse", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_file_argument_is_usage_error() {
    let output = lox(&["tokenize"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_no_arguments_is_usage_error() {
    let output = lox(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unreadable_file() {
    let output = lox(&["tokenize", "/definitely/not/a/real/file.lox"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("failed to read"));
}

#[test]
fn test_invalid_utf8() {
    let path = source_file("latin1.lox", [b'(', 0xE9, b')']);
    let output = tokenize(&path);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("not valid UTF-8"));
}

#[test]
fn test_multiple_files_in_argument_order() {
    let first = source_file("first.lox", "+");
    let second = source_file("second.lox", "-");
    let output = lox(&["tokenize", first.to_str().unwrap(), second.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "PLUS + null\nEOF  null\nMINUS - null\nEOF  null\n");
}

#[test]
fn test_json_format() {
    let path = source_file("json.lox", "(1 @");
    let output = lox(&["tokenize", "--format", "json", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stderr_of(&output), "");

    let document: serde_json::Value = serde_json::from_str(stdout_of(&output).trim()).unwrap();
    assert_eq!(
        document,
        serde_json::json!({
            "tokens": [
                { "kind": "LEFT_PAREN", "lexeme": "(", "literal": null, "line": 1 },
                { "kind": "NUMBER", "lexeme": "1", "literal": 1.0, "line": 1 },
                { "kind": "EOF", "lexeme": "", "literal": null, "line": 1 },
            ],
            "diagnostics": [
                { "line": 1, "code": 1001, "message": "Unexpected character: @" },
            ],
        })
    );
}

#[test]
fn test_pretty_diagnostics() {
    let path = source_file("pretty.lox", "+\n  $");
    let output = lox(&["tokenize", "--pretty", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stdout_of(&output), "PLUS + null\nEOF  null\n");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("[line 2] Error: Unexpected character: $"));
    assert!(stderr.contains("lox::E1001"));
}
