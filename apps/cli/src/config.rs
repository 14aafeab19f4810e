use std::{fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use shared::domain::{CubeState, DEFAULT_CUBE};
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "cube-cli.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub solver_url: String,
    pub default_cube: String,
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver_url: "http://localhost:8000/".into(),
            default_cube: DEFAULT_CUBE.into(),
            request_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    solver_url: Option<String>,
    default_cube: Option<String>,
    request_timeout_ms: Option<u64>,
}

/// Settings after every value has been checked.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub solver_url: Url,
    pub default_cube: CubeState,
    pub request_timeout: Duration,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then `path` if it exists, then environment overrides.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.solver_url {
                    settings.solver_url = v;
                }
                if let Some(v) = file_cfg.default_cube {
                    settings.default_cube = v;
                }
                if let Some(v) = file_cfg.request_timeout_ms {
                    settings.request_timeout_ms = v;
                }
            }
            Err(error) => warn!(path = %path.display(), %error, "ignoring malformed settings file"),
        }
    }

    if let Some(v) = env("SOLVER_URL") {
        settings.solver_url = v;
    }
    if let Some(v) = env("APP__SOLVER_URL") {
        settings.solver_url = v;
    }

    if let Some(v) = env("APP__DEFAULT_CUBE") {
        settings.default_cube = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_ms = parsed,
            Err(_) => warn!(value = %v, "ignoring non-numeric APP__REQUEST_TIMEOUT_MS"),
        }
    }

    settings
}

impl Settings {
    pub fn resolve(&self) -> anyhow::Result<ResolvedSettings> {
        let solver_url = Url::parse(self.solver_url.trim())
            .with_context(|| format!("invalid solver url '{}'", self.solver_url))?;
        let default_cube = CubeState::parse(&self.default_cube)
            .with_context(|| format!("invalid default cube '{}'", self.default_cube))?;
        if self.request_timeout_ms == 0 {
            anyhow::bail!("request timeout must be greater than zero");
        }

        Ok(ResolvedSettings {
            solver_url,
            default_cube,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        })
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
