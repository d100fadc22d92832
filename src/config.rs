//! Library defaults: figure size, DPI, theme and whether the helpers show.
//!
//! Values come from an optional JSON file named by `HICKORY_CONFIG`, then
//! `HICKORY_SHOW`, `HICKORY_DPI` and `HICKORY_THEME` override single fields.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::Deserialize;

use crate::plotting::Theme;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Whether `plot` / `plot_hist` show when no file is given
    pub show: bool,
    pub dpi: f64,
    /// Figure width in pixels at 100 DPI
    pub width: f64,
    /// Figure height in pixels at 100 DPI
    pub height: f64,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            show: true,
            dpi: 100.0,
            width: 640.0,
            height: 480.0,
            theme: Theme::Default,
        }
    }
}

static GLOBAL: OnceLock<Config> = OnceLock::new();

impl Config {
    /// Load configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Could not open config file {}", path.display()))?;
        let config: Config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then `HICKORY_CONFIG`, then the single-field overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup("HICKORY_CONFIG") {
            Some(path) if !path.is_empty() => Self::load(&path)?,
            _ => Config::default(),
        };

        if let Some(show) = lookup("HICKORY_SHOW") {
            config.show = parse_bool(&show)
                .with_context(|| format!("Invalid HICKORY_SHOW value '{}'", show))?;
        }
        if let Some(dpi) = lookup("HICKORY_DPI") {
            config.dpi = dpi
                .trim()
                .parse()
                .with_context(|| format!("Invalid HICKORY_DPI value '{}'", dpi))?;
        }
        if let Some(theme) = lookup("HICKORY_THEME") {
            config.theme = theme
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("Invalid HICKORY_THEME value '{}'", theme))?;
        }

        config.validate()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// The process-wide configuration. A broken environment falls back to defaults.
    pub fn global() -> &'static Config {
        GLOBAL.get_or_init(|| {
            Config::from_env().unwrap_or_else(|e| {
                warn!("Using default configuration: {:#}", e);
                Config::default()
            })
        })
    }

    fn validate(&self) -> Result<()> {
        if !(self.dpi > 0.0 && self.dpi.is_finite()) {
            bail!("dpi must be positive, got {}", self.dpi);
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            bail!("figure size must be positive, got {}x{}", self.width, self.height);
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.show);
        assert_eq!(config.dpi, 100.0);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HICKORY_SHOW", "off"),
            ("HICKORY_DPI", "200"),
            ("HICKORY_THEME", "dark"),
        ]))
        .unwrap();
        assert!(!config.show);
        assert_eq!(config.dpi, 200.0);
        assert_eq!(config.theme, Theme::Dark);
    }

    #[test]
    fn test_bad_values() {
        assert!(Config::from_lookup(lookup_from(&[("HICKORY_SHOW", "maybe")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("HICKORY_DPI", "-3")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("HICKORY_THEME", "neon")])).is_err());
    }

    #[test]
    fn test_json_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"dpi": 150, "width": 800, "theme": "seaborn"}}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = Config::from_lookup(lookup_from(&[
            ("HICKORY_CONFIG", path.as_str()),
            ("HICKORY_DPI", "300"),
        ]))
        .unwrap();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 480.0);
        assert_eq!(config.theme, Theme::Seaborn);
        assert_eq!(config.dpi, 300.0);
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/hickory.json").unwrap_err();
        assert!(err.to_string().contains("Could not open config file"));
    }
}
