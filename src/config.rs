use std::env;
use std::path::PathBuf;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services.
/// It is pulled into handlers via FromRef, so no component ever reads ambient
/// process-wide state after startup.
#[derive(Clone)]
pub struct AppConfig {
    /// Secret used to sign and validate the session cookie.
    pub session_secret: String,
    /// Password granting the "admin" role. `None` means nobody can log in as admin.
    pub admin_password: Option<String>,
    /// Password granting the "reader" role. `None` means nobody can log in as reader.
    pub reader_password: Option<String>,
    /// Path of the flat JSON file backing the note store.
    pub notes_file: PathBuf,
    /// Runtime environment marker. Controls the logging format at startup.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between local development defaults
/// (pretty logs, fallback session secret) and production requirements (JSON logs,
/// mandatory secret).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows tests to build application state without touching process
    /// environment variables.
    fn default() -> Self {
        Self {
            session_secret: "test-session-secret".to_string(),
            admin_password: Some("admin-password".to_string()),
            reader_password: Some("reader-password".to_string()),
            notes_file: PathBuf::from("notes.json"),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the fail-fast
    /// principle for production secrets.
    ///
    /// # Panics
    /// Panics if `SESSION_SECRET` is missing while `APP_ENV=production`. Starting a
    /// production instance with the known local fallback secret would make every
    /// session cookie forgeable.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        // Session Secret Resolution
        // The production secret is mandatory and must be explicitly set. The local
        // fallback mirrors the historical default; anyone knowing it can mint
        // arbitrary role cookies, so it never leaves development.
        let session_secret = match env {
            Env::Production => env::var("SESSION_SECRET")
                .expect("FATAL: SESSION_SECRET must be set in production."),
            _ => env::var("SESSION_SECRET")
                .unwrap_or_else(|_| "default_secret_key_change_me".to_string()),
        };

        Self {
            env,
            session_secret,
            // Role passwords are optional: an unset password disables that role's
            // login path rather than preventing startup.
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            reader_password: env::var("READER_PASSWORD").ok(),
            notes_file: env::var("NOTES_FILE")
                .unwrap_or_else(|_| "notes.json".to_string())
                .into(),
        }
    }
}
