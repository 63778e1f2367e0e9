// src/settings/credentials.rs
//! API key resolution: process environment (after `.env`), then the OS keyring.

use std::path::{Path, PathBuf};

use bevy::prelude::*;

pub const API_KEY_ENV_VAR: &str = "MY_API_KEY";
pub const KEYRING_SERVICE_NAME: &str = "causes_dashboard_ai";
pub const KEYRING_API_KEY_USERNAME: &str = "llm_api_key";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("MY_API_KEY is not set and no key is stored in the keyring")]
    Missing,
    #[error("MY_API_KEY is set but empty")]
    Blank,
    #[error("Keyring error: {0}")]
    Keyring(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    Keyring,
    /// Typed into the settings popup.
    Session,
}

/// API key in use for this run.
#[derive(Resource, Debug, Clone, Default)]
pub struct SessionApiKey(pub Option<String>);

/// What the settings popup and the banner show about the key.
#[derive(Resource, Debug, Clone, Default)]
pub struct ApiKeyDisplayStatus {
    pub status: String,
    /// Configuration problem shown as the startup banner.
    pub error: Option<String>,
}

impl ApiKeyDisplayStatus {
    pub fn from_resolution(resolution: &Result<(String, CredentialSource), CredentialError>) -> Self {
        match resolution {
            Ok((_, source)) => Self {
                status: match source {
                    CredentialSource::Environment => "Key Set (Environment)".to_string(),
                    CredentialSource::Keyring => "Key Set (Keyring)".to_string(),
                    CredentialSource::Session => "Key Set (Session)".to_string(),
                },
                error: None,
            },
            Err(e) => Self {
                status: "No Key Set".to_string(),
                error: Some(format!("API Key Error: {}", e)),
            },
        }
    }
}

/// Outcome of loading the `.env` file, logged once logging is up.
#[derive(Debug, Clone)]
pub enum EnvFileOutcome {
    Loaded(PathBuf),
    NotFound,
    Failed(String),
}

/// Loads `path`, or `.env` searched upward from the working directory.
/// Variables already in the environment win.
pub fn load_env_file(path: Option<&Path>) -> EnvFileOutcome {
    let result = match path {
        Some(p) => dotenvy::from_path(p).map(|_| p.to_path_buf()),
        None => dotenvy::dotenv(),
    };
    match result {
        Ok(p) => EnvFileOutcome::Loaded(p),
        Err(e) if e.not_found() => EnvFileOutcome::NotFound,
        Err(e) => EnvFileOutcome::Failed(e.to_string()),
    }
}

/// Environment first; the keyring only when the variable is absent.
/// A blank variable is reported rather than silently skipped.
pub fn resolve_api_key(
    env_lookup: impl Fn(&str) -> Option<String>,
    keyring_lookup: impl FnOnce() -> Result<Option<String>, CredentialError>,
) -> Result<(String, CredentialSource), CredentialError> {
    if let Some(value) = env_lookup(API_KEY_ENV_VAR) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Blank);
        }
        return Ok((trimmed.to_string(), CredentialSource::Environment));
    }
    match keyring_lookup()? {
        Some(key) if !key.trim().is_empty() => Ok((key.trim().to_string(), CredentialSource::Keyring)),
        _ => Err(CredentialError::Missing),
    }
}

fn keyring_entry() -> Result<keyring::Entry, CredentialError> {
    keyring::Entry::new(KEYRING_SERVICE_NAME, KEYRING_API_KEY_USERNAME)
        .map_err(|e| CredentialError::Keyring(e.to_string()))
}

pub fn read_keyring_key() -> Result<Option<String>, CredentialError> {
    match keyring_entry()?.get_password() {
        Ok(key) => Ok(Some(key)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(CredentialError::Keyring(e.to_string())),
    }
}

pub fn store_keyring_key(key: &str) -> Result<(), CredentialError> {
    keyring_entry()?
        .set_password(key)
        .map_err(|e| CredentialError::Keyring(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with(value: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |name| {
            assert_eq!(name, API_KEY_ENV_VAR);
            value.map(String::from)
        }
    }

    #[test]
    fn environment_wins_over_keyring() {
        let resolved = resolve_api_key(env_with(Some(" abc ")), || {
            panic!("keyring must not be consulted")
        });
        assert_eq!(resolved, Ok(("abc".to_string(), CredentialSource::Environment)));
    }

    #[test]
    fn keyring_used_when_variable_absent() {
        let resolved = resolve_api_key(env_with(None), || Ok(Some("stored".to_string())));
        assert_eq!(resolved, Ok(("stored".to_string(), CredentialSource::Keyring)));
    }

    #[test]
    fn blank_variable_is_an_error() {
        let resolved = resolve_api_key(env_with(Some("  ")), || Ok(Some("stored".to_string())));
        assert_eq!(resolved, Err(CredentialError::Blank));
    }

    #[test]
    fn nothing_anywhere_is_missing() {
        assert_eq!(
            resolve_api_key(env_with(None), || Ok(None)),
            Err(CredentialError::Missing)
        );
        assert_eq!(
            resolve_api_key(env_with(None), || Ok(Some(String::new()))),
            Err(CredentialError::Missing)
        );
    }

    #[test]
    fn keyring_failure_surfaces_in_banner() {
        let resolved = resolve_api_key(env_with(None), || {
            Err(CredentialError::Keyring("locked".to_string()))
        });
        let status = ApiKeyDisplayStatus::from_resolution(&resolved);
        assert_eq!(status.status, "No Key Set");
        assert_eq!(status.error.as_deref(), Some("API Key Error: Keyring error: locked"));
    }

    #[test]
    fn missing_env_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = load_env_file(Some(&dir.path().join(".env")));
        assert!(matches!(outcome, EnvFileOutcome::NotFound));
    }
}
