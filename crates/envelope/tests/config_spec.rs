use result_envelope::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn given_partial_config_when_parsing_then_missing_keys_use_defaults() {
    let config = EnvelopeConfig::from_json_str(r#"{ "errorCode": 503 }"#).unwrap();

    assert_eq!(config.error_code, 503);
    assert_eq!(config.success_code, 200);
    assert_eq!(config.validation_code, 400);
    assert!(config.capture_stack_trace);
}

#[test]
fn given_unknown_key_when_parsing_then_fails() {
    let result = EnvelopeConfig::from_json_str(r#"{ "errorcode": 503 }"#);
    assert!(matches!(result, Err(ConfigError::JsonParsingFailed { .. })));
}

#[test]
fn given_config_file_when_load_then_factory_uses_it() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("envelope.json");
    fs::write(
        &path,
        r#"{
            "successCode": 201,
            "validationCode": 422,
            "captureStackTrace": false
        }"#,
    )
    .unwrap();

    let config = EnvelopeConfig::load(&path).unwrap();
    let factory = EnvelopeFactory::with_config(config);

    let created = factory.success("made");
    assert_eq!(created.code(), 201);

    let error = anyhow::anyhow!("boom");
    let failed: Envelope = factory.anyhow_error(&error);
    assert_eq!(failed.code(), 500);
    assert!(failed.stack_trace().is_none());
}

#[test]
fn given_missing_file_when_load_then_not_found_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = EnvelopeConfig::load(&temp_dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::ConfigFileNotFound { .. })));
}

#[test]
#[serial]
fn given_env_var_unset_when_from_env_then_defaults() {
    std::env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(EnvelopeConfig::from_env().unwrap(), EnvelopeConfig::default());
}

#[test]
#[serial]
fn given_env_var_set_when_from_env_then_file_is_loaded() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("envelope.json");
    fs::write(&path, r#"{ "successCode": 202 }"#).unwrap();

    std::env::set_var(CONFIG_ENV_VAR, &path);
    let config = EnvelopeConfig::from_env();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert_eq!(config.unwrap().success_code, 202);
}

#[cfg(unix)]
#[test]
#[serial]
fn given_non_unicode_env_var_when_from_env_then_fails_instead_of_defaulting() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    std::env::set_var(CONFIG_ENV_VAR, OsStr::from_bytes(b"/tmp/envelope-\xff.json"));
    let result = EnvelopeConfig::from_env();
    std::env::remove_var(CONFIG_ENV_VAR);

    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}
