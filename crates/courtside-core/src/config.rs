//! Client configuration.
//!
//! Priority, highest first:
//!
//! 1. environment (`COURTSIDE_EXPORT_URL`, `COURTSIDE_THEME`)
//! 2. TOML file (explicit path, or `<config dir>/courtside/config.toml`)
//! 3. built-in defaults
//!
//! ```toml
//! export_base_url = "https://stats.example.com/api"
//! theme = "dark"
//! auto_dismiss_ms = 1500
//! undo_toast_ms = 5000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::error::{CourtsideError, CourtsideResult};
use crate::flows::DismissTimer;
use crate::theme::ThemePreference;

pub const ENV_EXPORT_URL: &str = "COURTSIDE_EXPORT_URL";
pub const ENV_THEME: &str = "COURTSIDE_THEME";

const DEFAULT_EXPORT_URL: &str = "http://127.0.0.1:3210/api";
/// Free-throw result modal
const DEFAULT_AUTO_DISMISS_MS: u64 = 1_500;
const DEFAULT_UNDO_TOAST_MS: u64 = 5_000;

/// On-disk shape; every field optional so partial files work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub export_base_url: Option<String>,
    pub theme: Option<ThemePreference>,
    pub auto_dismiss_ms: Option<u64>,
    pub undo_toast_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub export_base_url: Url,
    pub theme: ThemePreference,
    pub auto_dismiss: Duration,
    pub undo_toast: Duration,
}

impl ClientConfig {
    pub fn defaults() -> CourtsideResult<Self> {
        Ok(Self {
            export_base_url: parse_url("export_base_url", DEFAULT_EXPORT_URL)?,
            theme: ThemePreference::System,
            auto_dismiss: Duration::from_millis(DEFAULT_AUTO_DISMISS_MS),
            undo_toast: Duration::from_millis(DEFAULT_UNDO_TOAST_MS),
        })
    }

    /// `<config dir>/courtside/config.toml`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("courtside").join("config.toml"))
    }

    /// Load from `path` (or the default location) and the process
    /// environment. An explicit path must exist; the default one may not.
    pub fn load(path: Option<&Path>) -> CourtsideResult<Self> {
        let file = match path {
            Some(path) => Some(Self::read_file(path)?),
            None => match Self::default_path() {
                Some(path) if path.exists() => Some(Self::read_file(&path)?),
                _ => None,
            },
        };
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Combine defaults, an optional file and environment lookups.
    pub fn resolve(
        file: Option<ConfigFile>,
        env: impl Fn(&str) -> Option<String>,
    ) -> CourtsideResult<Self> {
        let mut config = Self::defaults()?;
        if let Some(file) = file {
            config.merge_file(file)?;
        }
        config.merge_env(env)?;
        Ok(config)
    }

    pub fn read_file(path: &Path) -> CourtsideResult<ConfigFile> {
        info!(path = %path.display(), "Loading configuration");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CourtsideError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents)
            .map_err(|e| CourtsideError::Config(format!("invalid {}: {}", path.display(), e)))
    }

    fn merge_file(&mut self, file: ConfigFile) -> CourtsideResult<()> {
        if let Some(url) = file.export_base_url {
            self.export_base_url = parse_url("export_base_url", &url)?;
        }
        if let Some(theme) = file.theme {
            self.theme = theme;
        }
        if let Some(ms) = file.auto_dismiss_ms {
            self.auto_dismiss = Duration::from_millis(ms);
        }
        if let Some(ms) = file.undo_toast_ms {
            self.undo_toast = Duration::from_millis(ms);
        }
        Ok(())
    }

    fn merge_env(&mut self, env: impl Fn(&str) -> Option<String>) -> CourtsideResult<()> {
        if let Some(url) = env(ENV_EXPORT_URL) {
            debug!(key = ENV_EXPORT_URL, "Override from environment");
            self.export_base_url = parse_url(ENV_EXPORT_URL, &url)?;
        }
        if let Some(theme) = env(ENV_THEME) {
            debug!(key = ENV_THEME, "Override from environment");
            self.theme = theme.parse()?;
        }
        Ok(())
    }

    /// The effective configuration in file form
    pub fn to_file(&self) -> ConfigFile {
        ConfigFile {
            export_base_url: Some(self.export_base_url.to_string()),
            theme: Some(self.theme),
            auto_dismiss_ms: Some(self.auto_dismiss.as_millis() as u64),
            undo_toast_ms: Some(self.undo_toast.as_millis() as u64),
        }
    }

    /// Timer for the free-throw result modal
    pub fn result_modal_timer(&self) -> DismissTimer {
        DismissTimer::new(self.auto_dismiss)
    }

    /// Timer for the undo toast
    pub fn undo_toast_timer(&self) -> DismissTimer {
        DismissTimer::new(self.undo_toast)
    }

    pub fn to_toml(&self) -> CourtsideResult<String> {
        toml::to_string_pretty(&self.to_file())
            .map_err(|e| CourtsideError::Serialization(e.to_string()))
    }
}

fn parse_url(key: &str, value: &str) -> CourtsideResult<Url> {
    Url::parse(value.trim())
        .map_err(|e| CourtsideError::Config(format!("{} is not a valid URL: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::resolve(None, no_env).unwrap();
        assert_eq!(config.theme, ThemePreference::System);
        assert_eq!(config.auto_dismiss, Duration::from_millis(1500));
        assert_eq!(config.export_base_url.as_str(), "http://127.0.0.1:3210/api");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "export_base_url = \"https://stats.example.com/api/\"\ntheme = \"dark\"\nundo_toast_ms = 8000"
        )
        .unwrap();

        let parsed = ClientConfig::read_file(file.path()).unwrap();
        let config = ClientConfig::resolve(Some(parsed), no_env).unwrap();
        assert_eq!(config.export_base_url.as_str(), "https://stats.example.com/api/");
        assert_eq!(config.theme, ThemePreference::Dark);
        assert_eq!(config.undo_toast, Duration::from_secs(8));
        assert_eq!(config.auto_dismiss, Duration::from_millis(1500));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = ConfigFile {
            theme: Some(ThemePreference::Dark),
            export_base_url: Some("https://file.example.com/api".to_string()),
            ..Default::default()
        };
        let env: HashMap<&str, &str> = [(ENV_THEME, "light")].into_iter().collect();
        let config =
            ClientConfig::resolve(Some(file), |key| env.get(key).map(|v| v.to_string())).unwrap();
        assert_eq!(config.theme, ThemePreference::Light);
        assert_eq!(config.export_base_url.as_str(), "https://file.example.com/api");
    }

    #[test]
    fn test_bad_values_are_config_errors() {
        let file = ConfigFile {
            export_base_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            ClientConfig::resolve(Some(file), no_env),
            Err(CourtsideError::Config(_))
        ));

        let bad_theme = |key: &str| (key == ENV_THEME).then(|| "neon".to_string());
        assert!(ClientConfig::resolve(None, bad_theme).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_use_configured_delays() {
        let file = ConfigFile {
            auto_dismiss_ms: Some(900),
            undo_toast_ms: Some(3000),
            ..Default::default()
        };
        let config = ClientConfig::resolve(Some(file), no_env).unwrap();
        assert_eq!(config.result_modal_timer().delay(), Duration::from_millis(900));

        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let mut toast = config.undo_toast_timer();
        toast.schedule(move || flag.store(true, Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(2900)).await;
        assert!(!fired.load(Ordering::SeqCst));
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let err = ClientConfig::load(Some(missing.as_path())).unwrap_err();
        assert!(matches!(err, CourtsideError::Config(_)));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "colour = \"blue\"").unwrap();
        assert!(ClientConfig::read_file(file.path()).is_err());
    }

    #[test]
    fn test_to_toml_round_trips() {
        let config = ClientConfig::resolve(None, no_env).unwrap();
        let text = config.to_toml().unwrap();
        let parsed: ConfigFile = toml::from_str(&text).unwrap();
        assert_eq!(ClientConfig::resolve(Some(parsed), no_env).unwrap(), config);
    }
}
