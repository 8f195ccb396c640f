//! Unit tests for session configuration parsing.

use super::*;
use mockable::MockEnv;
use rstest::{fixture, rstest};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key bytes");
    file
}

#[fixture]
fn release_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().into_owned()
}

fn mock_env(vars: HashMap<&'static str, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_vars(key_path: String) -> HashMap<&'static str, String> {
    HashMap::from([
        (KEY_FILE_ENV, key_path),
        (COOKIE_SECURE_ENV, "1".to_owned()),
        (SAMESITE_ENV, "Strict".to_owned()),
        (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
    ])
}

fn release_error(vars: HashMap<&'static str, String>) -> SessionConfigError {
    match session_settings_from_env(&mock_env(vars), BuildMode::Release) {
        Ok(_) => panic!("release configuration should have been rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_valid_settings_succeed(release_key: NamedTempFile) {
    let env = mock_env(release_vars(path_of(&release_key)));
    let settings =
        session_settings_from_env(&env, BuildMode::Release).expect("valid release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_rejects_each_missing_toggle(release_key: NamedTempFile, #[case] name: &'static str) {
    let mut vars = release_vars(path_of(&release_key));
    vars.remove(name);
    let err = release_error(vars);
    assert!(matches!(err, SessionConfigError::MissingEnv { name: missing } if missing == name));
}

#[rstest]
#[case("maybe")]
#[case("")]
fn release_rejects_unparseable_cookie_secure(release_key: NamedTempFile, #[case] value: &str) {
    let mut vars = release_vars(path_of(&release_key));
    vars.insert(COOKIE_SECURE_ENV, value.to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            ..
        }
    ));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_key: NamedTempFile) {
    let mut vars = release_vars(path_of(&release_key));
    vars.insert(ALLOW_EPHEMERAL_ENV, "yes".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::EphemeralNotAllowed
    ));
}

#[rstest]
fn release_rejects_insecure_same_site_none(release_key: NamedTempFile) {
    let mut vars = release_vars(path_of(&release_key));
    vars.insert(COOKIE_SECURE_ENV, "0".to_owned());
    vars.insert(SAMESITE_ENV, "None".to_owned());
    assert!(matches!(
        release_error(vars),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_rejects_short_key() {
    let short = key_file(SESSION_KEY_DERIVE_MIN_LEN);
    assert!(matches!(
        release_error(release_vars(path_of(&short))),
        SessionConfigError::KeyTooShort { min_len: SESSION_KEY_MIN_LEN, .. }
    ));
}

#[rstest]
fn release_rejects_unreadable_key_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent").to_string_lossy().into_owned();
    assert!(matches!(
        release_error(release_vars(missing)),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn debug_defaults_allow_ephemeral_key() {
    let mut vars = HashMap::new();
    vars.insert(KEY_FILE_ENV, "/nonexistent/session_key".to_owned());
    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug defaults should succeed");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_tolerates_tiny_key_file() {
    let tiny = key_file(4);
    let mut vars = HashMap::new();
    vars.insert(KEY_FILE_ENV, path_of(&tiny));
    assert!(session_settings_from_env(&mock_env(vars), BuildMode::Debug).is_ok());
}

#[rstest]
fn debug_invalid_same_site_falls_back_to_lax(release_key: NamedTempFile) {
    let mut vars = release_vars(path_of(&release_key));
    vars.insert(SAMESITE_ENV, "sideways".to_owned());
    let settings = session_settings_from_env(&mock_env(vars), BuildMode::Debug)
        .expect("debug should fall back");
    assert_eq!(settings.same_site, SameSite::Lax);
}
