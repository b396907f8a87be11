use note_portal::config::{AppConfig, Env};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

// Environment mutation is process-global, so every test here is #[serial].
// set_var/remove_var are unsafe in edition 2024; these tests are the only
// place in the crate that touches the process environment after startup.

fn clear_portal_env() {
    unsafe {
        env::remove_var("APP_ENV");
        env::remove_var("SESSION_SECRET");
        env::remove_var("ADMIN_PASSWORD");
        env::remove_var("READER_PASSWORD");
        env::remove_var("NOTES_FILE");
    }
}

#[test]
#[serial]
fn test_load_defaults_to_local_with_fallback_secret() {
    clear_portal_env();

    let config = AppConfig::load();
    assert_eq!(config.env, Env::Local);
    // The documented insecure local fallback; production refuses to start
    // without an explicit secret instead.
    assert_eq!(config.session_secret, "default_secret_key_change_me");
    assert_eq!(config.notes_file, PathBuf::from("notes.json"));
    // Unset passwords mean neither role can log in.
    assert!(config.admin_password.is_none());
    assert!(config.reader_password.is_none());
}

#[test]
#[serial]
fn test_load_reads_the_full_environment() {
    clear_portal_env();
    unsafe {
        env::set_var("SESSION_SECRET", "env-secret");
        env::set_var("ADMIN_PASSWORD", "env-admin");
        env::set_var("READER_PASSWORD", "env-reader");
        env::set_var("NOTES_FILE", "/tmp/env-notes.json");
    }

    let config = AppConfig::load();
    assert_eq!(config.session_secret, "env-secret");
    assert_eq!(config.admin_password.as_deref(), Some("env-admin"));
    assert_eq!(config.reader_password.as_deref(), Some("env-reader"));
    assert_eq!(config.notes_file, PathBuf::from("/tmp/env-notes.json"));

    clear_portal_env();
}

#[test]
#[serial]
fn test_production_env_is_recognized() {
    clear_portal_env();
    unsafe {
        env::set_var("APP_ENV", "production");
        env::set_var("SESSION_SECRET", "prod-secret");
    }

    let config = AppConfig::load();
    assert_eq!(config.env, Env::Production);
    assert_eq!(config.session_secret, "prod-secret");

    clear_portal_env();
}

#[test]
fn test_default_config_is_test_safe() {
    // Default exists so tests can build state without environment variables.
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert!(config.admin_password.is_some());
    assert!(config.reader_password.is_some());
    assert!(!config.session_secret.is_empty());
}
