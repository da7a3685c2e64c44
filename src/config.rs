use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogSource, ModeId, ModeSpec, ModeTable, default_mode_specs};
use crate::error::CatalogError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_mode")]
    pub default_mode: String,
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,
    #[serde(default = "default_confirm_reset")]
    pub confirm_reset: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_url: Option<String>,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_mode_specs")]
    pub modes: Vec<ModeSpec>,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_mode() -> String {
    "te".to_string()
}
fn default_advance_delay_ms() -> u64 {
    500
}
fn default_confirm_reset() -> bool {
    true
}
fn default_log_file() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("katsuyo")
        .join("katsuyo.log")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            default_mode: default_mode(),
            advance_delay_ms: default_advance_delay_ms(),
            confirm_reset: default_confirm_reset(),
            catalog_path: None,
            catalog_url: None,
            log_file: default_log_file(),
            modes: default_mode_specs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("katsuyo")
            .join("config.toml")
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    pub fn mode_table(&self) -> Result<ModeTable, CatalogError> {
        ModeTable::new(self.modes.clone())
    }

    /// A local file wins over a URL; with neither, the bundled list is used.
    pub fn catalog_source(&self) -> CatalogSource {
        if let Some(path) = &self.catalog_path {
            CatalogSource::File(PathBuf::from(path))
        } else if let Some(url) = &self.catalog_url {
            CatalogSource::Url(url.clone())
        } else {
            CatalogSource::Embedded
        }
    }

    /// Reset `default_mode` to the table's first mode if it names no configured mode.
    pub fn normalize_default_mode(&mut self, table: &ModeTable) {
        if !table.contains(&ModeId::new(self.default_mode.as_str())) {
            self.default_mode = table.default_mode().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.default_mode, "te");
        assert_eq!(config.advance_delay_ms, 500);
        assert!(config.confirm_reset);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.modes.len(), 2);
        assert!(config.log_file.contains("katsuyo"));
    }

    #[test]
    fn test_config_extra_mode_from_toml() {
        let toml_str = r#"
default_mode = "nai"
advance_delay_ms = 250

[[modes]]
id = "te"
label = "て-form"
kanji_field = "teForm"
kana_field = "teHiragana"
romaji_field = "teRomaji"

[[modes]]
id = "nai"
label = "ない-form"
kanji_field = "naiForm"
kana_field = "naiHiragana"
romaji_field = "naiRomaji"
"#;
        let mut config: Config = toml::from_str(toml_str).unwrap();
        let table = config.mode_table().unwrap();
        config.normalize_default_mode(&table);
        assert_eq!(config.default_mode, "nai");
        assert_eq!(config.advance_delay(), Duration::from_millis(250));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"nai".into()).unwrap().kana_field, "naiHiragana");
    }

    #[test]
    fn test_normalize_unknown_default_mode_resets() {
        let mut config = Config::default();
        config.default_mode = "masu".to_string();
        let table = config.mode_table().unwrap();
        config.normalize_default_mode(&table);
        assert_eq!(config.default_mode, "te");
    }

    #[test]
    fn test_empty_modes_rejected() {
        let mut config = Config::default();
        config.modes.clear();
        assert!(matches!(config.mode_table(), Err(CatalogError::NoModes)));
    }

    #[test]
    fn test_catalog_source_precedence() {
        let mut config = Config::default();
        assert_eq!(config.catalog_source(), CatalogSource::Embedded);

        config.catalog_url = Some("https://example.com/verbs.json".to_string());
        assert_eq!(
            config.catalog_source(),
            CatalogSource::Url("https://example.com/verbs.json".to_string())
        );

        config.catalog_path = Some("/tmp/verbs.json".to_string());
        assert_eq!(
            config.catalog_source(),
            CatalogSource::File(PathBuf::from("/tmp/verbs.json"))
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.theme = "catppuccin-mocha".to_string();
        config.confirm_reset = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, "catppuccin-mocha");
        assert!(!loaded.confirm_reset);
        assert_eq!(loaded.modes, config.modes);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.theme, "terminal-default");
    }
}
