// tests/config_test.rs
use patch_series::config::{load_config, load_lts_versions, Backend, Config};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.filter, "syzkaller.appspotmail.com");
    assert_eq!(config.prefix, "syzkaller");
    assert_eq!(config.output_dir, PathBuf::from("."));
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
filter = "Cc: stable@vger.kernel.org"
prefix = "stable"
lts_file = "lines.txt"
output_dir = "out"
backend = "cli"
verify_history = true
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.filter, "Cc: stable@vger.kernel.org");
    assert_eq!(config.prefix, "stable");
    assert_eq!(config.lts_file, PathBuf::from("lines.txt"));
    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert_eq!(config.backend, Backend::Cli);
    assert!(config.verify_history);
}

#[test]
fn test_empty_file_gives_defaults() {
    let temp_file = NamedTempFile::new().unwrap();
    let config = load_config(Some(temp_file.path())).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config(Some(dir.path().join("nope.toml").as_path()));
    assert!(result.is_err());
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"prefix = [unterminated").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path())).unwrap_err();
    assert!(err.to_string().contains("Config file parse error"));
}

#[test]
fn test_lts_versions_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"5.10 5.4 4.19 4.14\n").unwrap();
    temp_file.flush().unwrap();

    let lines = load_lts_versions(temp_file.path()).unwrap();
    assert_eq!(lines, vec!["5.10", "5.4", "4.19", "4.14"]);
}
