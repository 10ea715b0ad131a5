//! Configuration file management.
//!
//! Reads `config.toml` and `secret.json` from `<config dir>/rythu/`
//! (`~/.config/rythu/` on Linux). Missing files yield defaults.

use rythu_core::config::{AppConfig, GeminiConfig, SecretConfig};
use rythu_core::error::{Result, RythuError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APP_DIR: &str = "rythu";
pub const CONFIG_FILE: &str = "config.toml";
pub const SECRET_FILE: &str = "secret.json";

/// Environment variables checked, in order, for a Gemini API key.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Returns `<config dir>/rythu`.
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .ok_or_else(|| RythuError::config("Could not determine config directory"))
}

/// Loads config.toml from `dir`, falling back to defaults when absent.
pub fn load_app_config(dir: &Path) -> Result<AppConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "No config.toml, using defaults");
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        RythuError::io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    AppConfig::from_toml_str(&content).map_err(|e| {
        RythuError::config(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Loads secret.json from `dir`. A missing file means no credential.
pub fn load_secret_config(dir: &Path) -> Result<SecretConfig> {
    let path = dir.join(SECRET_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "No secret.json found");
        return Ok(SecretConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| {
        RythuError::io(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        RythuError::config(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Overrides the secret.json key with the first non-blank value found in
/// [`API_KEY_ENV_VARS`], read through `lookup`.
pub fn apply_env_overrides<F>(mut secrets: SecretConfig, lookup: F) -> SecretConfig
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = API_KEY_ENV_VARS.iter().find_map(|name| {
        lookup(name)
            .filter(|value| !value.trim().is_empty())
            .map(|value| (*name, value))
    });

    if let Some((name, api_key)) = from_env {
        info!(source = name, "Using Gemini API key from environment");
        let model_name = secrets.gemini.take().and_then(|g| g.model_name);
        secrets.gemini = Some(GeminiConfig {
            api_key,
            model_name,
        });
    }
    secrets
}

/// Everything needed to start a session, loaded from one directory.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub app: AppConfig,
    pub secrets: SecretConfig,
}

impl LoadedConfig {
    /// Loads both files from `dir` and applies environment overrides.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let app = load_app_config(dir)?;
        let secrets = apply_env_overrides(load_secret_config(dir)?, |name| {
            std::env::var(name).ok()
        });
        Ok(Self { app, secrets })
    }

    /// Loads from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rythu_core::language::Language;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_files_give_defaults() {
        let dir = TempDir::new().unwrap();
        let app = load_app_config(dir.path()).unwrap();
        let secrets = load_secret_config(dir.path()).unwrap();
        assert_eq!(app, AppConfig::default());
        assert!(secrets.gemini_api_key().is_none());
    }

    #[test]
    fn test_reads_both_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[chat]\ndefault_language = \"english\"\nmax_history = 6\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(SECRET_FILE),
            r#"{"gemini": {"api_key": "abc123", "model_name": "gemini-2.0-flash"}}"#,
        )
        .unwrap();

        let app = load_app_config(dir.path()).unwrap();
        assert_eq!(app.chat.default_language, Language::English);
        assert_eq!(app.chat.max_history, 6);

        let secrets = load_secret_config(dir.path()).unwrap();
        assert_eq!(secrets.gemini_api_key(), Some("abc123"));
        assert_eq!(secrets.gemini_model(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn test_broken_secret_is_config_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SECRET_FILE), "{not json").unwrap();
        let err = load_secret_config(dir.path()).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(SECRET_FILE));
    }

    #[test]
    fn test_env_key_takes_precedence_in_order() {
        let secrets = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: "from-file".into(),
                model_name: Some("gemini-2.0-flash".into()),
            }),
        };

        let merged = apply_env_overrides(
            secrets.clone(),
            env(&[("API_KEY", "second"), ("GEMINI_API_KEY", "first")]),
        );
        assert_eq!(merged.gemini_api_key(), Some("first"));
        assert_eq!(merged.gemini_model(), Some("gemini-2.0-flash"));

        let merged = apply_env_overrides(
            secrets.clone(),
            env(&[("GEMINI_API_KEY", " "), ("API_KEY", "second")]),
        );
        assert_eq!(merged.gemini_api_key(), Some("second"));

        let untouched = apply_env_overrides(secrets.clone(), env(&[]));
        assert_eq!(untouched, secrets);
    }
}
