use std::fs;
use std::io::Write;

use favlens_lib::search::credentials::MISSING_KEY_MESSAGE;
use favlens_lib::search::{CredentialStore, ShodanCliStore};
use favlens_lib::source::targets::MISSING_SOURCE_MESSAGE;
use favlens_lib::{
    exit_status, load_run_config, resolve_api_key, validate_flags, FavlensError, KeyFlags,
    SourceFlags,
};
use tempfile::NamedTempFile;

type TestResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync>>;

struct FixedStore(&'static str);

impl CredentialStore for FixedStore {
    fn api_key(&self) -> favlens_lib::Result<String> {
        Ok(self.0.to_string())
    }
}

fn web_source() -> SourceFlags {
    SourceFlags { web: Some("example.com".to_string()), ..Default::default() }
}

#[test]
fn missing_key_source_is_rejected() {
    let result = validate_flags(&KeyFlags::default(), &web_source());
    assert_eq!(exit_status(&result), 1);
    match result {
        Err(FavlensError::Configuration(msg)) => assert_eq!(msg, MISSING_KEY_MESSAGE),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn missing_favicon_source_is_rejected() {
    let keys = KeyFlags { key: Some("k".to_string()), ..Default::default() };
    let result = validate_flags(&keys, &SourceFlags::default());
    assert_eq!(exit_status(&result), 1);
    match result {
        Err(FavlensError::Configuration(msg)) => assert_eq!(msg, MISSING_SOURCE_MESSAGE),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn key_source_is_checked_first() {
    let result = validate_flags(&KeyFlags::default(), &SourceFlags::default());
    assert!(matches!(result, Err(FavlensError::Configuration(ref msg)) if msg == MISSING_KEY_MESSAGE));
}

#[test]
fn any_single_flag_is_enough() {
    let keys = KeyFlags { shodan_cli: true, ..Default::default() };
    assert!(validate_flags(&keys, &web_source()).is_ok());
}

#[test]
fn literal_key_wins_over_key_file_and_cli() -> TestResult {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "from-file")?;
    let flags = KeyFlags {
        key: Some("literal".to_string()),
        key_file: Some(file.path().to_path_buf()),
        shodan_cli: true,
    };
    assert_eq!(resolve_api_key(&flags, &FixedStore("from-cli"))?, "literal");
    Ok(())
}

#[test]
fn key_file_wins_over_cli() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(file, "  from-file  \nsecond line\n")?;
    let flags = KeyFlags { key: None, key_file: Some(file.path().to_path_buf()), shodan_cli: true };
    assert_eq!(resolve_api_key(&flags, &FixedStore("from-cli"))?, "from-file");
    Ok(())
}

#[test]
fn cli_store_used_last() -> TestResult {
    let flags = KeyFlags { shodan_cli: true, ..Default::default() };
    assert_eq!(resolve_api_key(&flags, &FixedStore("from-cli"))?, "from-cli");
    Ok(())
}

#[test]
fn unreadable_key_file_is_fatal() {
    let flags = KeyFlags { key_file: Some("/nonexistent/key.txt".into()), ..Default::default() };
    let result = resolve_api_key(&flags, &FixedStore("unused"));
    assert!(matches!(result, Err(FavlensError::File { .. })));
    assert_eq!(exit_status(&result), 1);
}

#[test]
fn shodan_cli_store_reads_config_dir() -> TestResult {
    let home = tempfile::tempdir()?;
    let dir = home.path().join(".config").join("shodan");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("api_key"), "cli-key\n")?;

    assert_eq!(ShodanCliStore::new(home.path()).api_key()?, "cli-key");
    Ok(())
}

#[test]
fn shodan_cli_store_falls_back_to_legacy_dir() -> TestResult {
    let home = tempfile::tempdir()?;
    let dir = home.path().join(".shodan");
    fs::create_dir_all(&dir)?;
    fs::write(dir.join("api_key"), "legacy-key")?;

    assert_eq!(ShodanCliStore::new(home.path()).api_key()?, "legacy-key");
    Ok(())
}

#[test]
fn shodan_cli_store_without_key_is_authentication_error() -> TestResult {
    let home = tempfile::tempdir()?;
    let result = ShodanCliStore::new(home.path()).api_key();
    assert!(matches!(result, Err(FavlensError::Authentication(_))));
    Ok(())
}

#[test]
fn missing_key_reported_before_bad_config() -> TestResult {
    let mut cfg = NamedTempFile::new()?;
    cfg.write_all(b"[search\nbase_url = ")?;

    let result = load_run_config(&KeyFlags::default(), &web_source(), Some(cfg.path()));
    match result {
        Err(FavlensError::Configuration(msg)) => assert_eq!(msg, MISSING_KEY_MESSAGE),
        other => panic!("unexpected result: {other:?}"),
    }

    let keys = KeyFlags { key: Some("k".to_string()), ..Default::default() };
    let result = load_run_config(&keys, &SourceFlags::default(), Some(cfg.path()));
    match result {
        Err(FavlensError::Configuration(msg)) => assert_eq!(msg, MISSING_SOURCE_MESSAGE),
        other => panic!("unexpected result: {other:?}"),
    }
    Ok(())
}

#[test]
fn valid_flags_load_default_config_without_file() -> TestResult {
    let keys = KeyFlags { key: Some("k".to_string()), ..Default::default() };
    let config = load_run_config(&keys, &web_source(), None)?;
    assert_eq!(config.whois.port, 43);
    Ok(())
}
