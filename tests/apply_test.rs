//! apply サブコマンドの統合テスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use i18n_patch::cli::ApplyArgs;
use i18n_patch::commands::{
    self,
    CommandError,
};
use tempfile::TempDir;

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read_file(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

fn apply_args(root: &Path, patches: &[&str]) -> ApplyArgs {
    ApplyArgs {
        patches: patches.iter().map(|name| root.join(name)).collect(),
        language: None,
        reformat: false,
        dry_run: false,
        allow_suspect: false,
    }
}

#[test]
fn applies_language_batches_to_matching_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", "{\n  \"common\": {\n    \"greeting\": \"Hello\"\n  }\n}\n");
    write_file(root, "locales/fr.json", "{\n  \"common\": {\n    \"greeting\": \"Bonjour\"\n  }\n}\n");
    write_file(
        root,
        "patch.json",
        r#"{"fr": {"common": {"greeting": "Salut", "farewell": "Au revoir"}}}"#,
    );
    let en_before = read_file(root, "locales/en.json");

    let mut out = Vec::new();
    commands::apply::run(&apply_args(root, &["patch.json"]), root, &mut out).unwrap();

    let fr = read_file(root, "locales/fr.json");
    assert!(fr.contains("Salut"));
    assert!(fr.contains("Au revoir"));
    assert!(!fr.contains("Bonjour"));
    assert_eq!(read_file(root, "locales/en.json"), en_before);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("fr: added 1, updated 1"));
}

#[test]
fn preserves_untouched_formatting_and_escapes() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", r#"{"a": "cafe", "b": "old"}"#);
    write_file(root, "locales/fr.json", "{\n\t\"a\": \"caf\\u00e9\",\n\t\"b\": \"old\"\n}\n");
    write_file(root, "patch.json", r#"{"fr": {"b": "new"}}"#);

    let mut out = Vec::new();
    commands::apply::run(&apply_args(root, &["patch.json"]), root, &mut out).unwrap();

    let fr = read_file(root, "locales/fr.json");
    assert!(fr.contains("caf\\u00e9"), "escape sequence rewritten: {fr}");
    assert!(fr.contains("\t\"a\""), "tab indentation rewritten: {fr}");
    assert!(fr.contains("\"new\""));
}

#[test]
fn dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", r#"{"a": "1"}"#);
    write_file(root, "locales/fr.json", r#"{"a": "un"}"#);
    write_file(root, "patch.json", r#"{"fr": {"a": "deux", "b": "trois"}}"#);
    let before = read_file(root, "locales/fr.json");

    let mut out = Vec::new();
    let mut args = apply_args(root, &["patch.json"]);
    args.dry_run = true;
    commands::apply::run(&args, root, &mut out).unwrap();

    assert_eq!(read_file(root, "locales/fr.json"), before);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("fr: would add 1, update 1"));
    assert!(output.contains("dry run: would add 1 and update 1 key(s)"));
}

#[test]
fn reformat_rewrites_the_file_canonically() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", r#"{"a": "1", "b": "2", "c": "3"}"#);
    write_file(root, "locales/fr.json", "{\"b\":\"2\",\"a\":\"1\"}");
    write_file(root, "patch.json", r#"{"fr": {"c": "3"}}"#);

    let mut out = Vec::new();
    let mut args = apply_args(root, &["patch.json"]);
    args.reformat = true;
    commands::apply::run(&args, root, &mut out).unwrap();

    let expected = "{\n  \"a\": \"1\",\n  \"b\": \"2\",\n  \"c\": \"3\"\n}\n";
    assert_eq!(read_file(root, "locales/fr.json"), expected);
}

#[test]
fn identical_patch_leaves_the_file_alone() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", r#"{"a": "1"}"#);
    write_file(root, "locales/fr.json", "{   \"a\" :   \"un\" }");
    write_file(root, "patch.json", r#"{"fr": {"a": "un"}}"#);
    let before = read_file(root, "locales/fr.json");

    let mut out = Vec::new();
    commands::apply::run(&apply_args(root, &["patch.json"]), root, &mut out).unwrap();

    assert_eq!(read_file(root, "locales/fr.json"), before);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("fr: already up to date"));
}

#[test]
fn later_documents_win_over_earlier_ones() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", r#"{"a": "1"}"#);
    write_file(root, "locales/fr.json", r#"{"a": "un"}"#);
    write_file(root, "first.json", r#"{"fr": {"a": "premier", "b": "seul"}}"#);
    write_file(root, "second.json", r#"{"fr": {"a": "second"}}"#);

    let mut out = Vec::new();
    commands::apply::run(&apply_args(root, &["first.json", "second.json"]), root, &mut out)
        .unwrap();

    let fr = read_file(root, "locales/fr.json");
    assert!(fr.contains("second"));
    assert!(!fr.contains("premier"));
    assert!(fr.contains("seul"));
}

#[test]
fn explicit_language_flag_takes_the_whole_document() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", r#"{"common": {"greeting": "Hello"}}"#);
    write_file(root, "locales/de.json", r#"{"common": {"greeting": "Hi"}}"#);
    write_file(root, "patch.json", r#"{"common": {"greeting": "Hallo"}}"#);

    let mut out = Vec::new();
    let mut args = apply_args(root, &["patch.json"]);
    args.language = Some("de".to_string());
    commands::apply::run(&args, root, &mut out).unwrap();

    assert!(read_file(root, "locales/de.json").contains("Hallo"));
}

#[test]
fn unknown_batch_language_fails_before_any_write() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", r#"{"a": "1"}"#);
    write_file(root, "locales/fr.json", r#"{"a": "un"}"#);
    write_file(root, "patch.json", r#"{"fr": {"a": "deux"}, "xx": {"a": "?"}}"#);
    let before = read_file(root, "locales/fr.json");

    let mut out = Vec::new();
    let result = commands::apply::run(&apply_args(root, &["patch.json"]), root, &mut out);

    assert!(matches!(result, Err(CommandError::UnknownLanguage { .. })));
    assert_eq!(read_file(root, "locales/fr.json"), before);
}

#[test]
fn placeholder_mismatch_is_rejected_without_allow_suspect() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", r#"{"greeting": "Hello, {{name}}!"}"#);
    write_file(root, "locales/fr.json", r#"{"greeting": "Bonjour !"}"#);
    write_file(root, "patch.json", r#"{"fr": {"greeting": "Bonjour, {{nom}} !"}}"#);
    let before = read_file(root, "locales/fr.json");

    let mut out = Vec::new();
    let result = commands::apply::run(&apply_args(root, &["patch.json"]), root, &mut out);
    assert!(matches!(result, Err(CommandError::SuspectValues { .. })));
    assert_eq!(read_file(root, "locales/fr.json"), before);

    let mut args = apply_args(root, &["patch.json"]);
    args.allow_suspect = true;
    commands::apply::run(&args, root, &mut out).unwrap();
    assert!(read_file(root, "locales/fr.json").contains("{{nom}}"));
}

#[test]
fn patching_the_reference_language_skips_parity_checks() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "locales/en.json", r#"{"greeting": "Hello, {{name}}!"}"#);
    write_file(root, "patch.json", r#"{"en": {"greeting": "Hello, {{userName}}!"}}"#);

    let mut out = Vec::new();
    commands::apply::run(&apply_args(root, &["patch.json"]), root, &mut out).unwrap();

    assert!(read_file(root, "locales/en.json").contains("{{userName}}"));
}
