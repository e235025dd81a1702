// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::FileStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_snooze_mins() -> u32 {
    1440
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Overrides `<data_dir>/lict.txt`.
    #[serde(default)]
    pub data_file: Option<String>,

    /// Used by `snooze <n>` when no amount is given.
    #[serde(default = "default_snooze_mins")]
    pub default_snooze_mins: u32,

    #[serde(default)]
    pub user_name: Option<String>,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            default_snooze_mins: default_snooze_mins(),
            user_name: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults and
    /// writes them out so the user has something to edit.
    pub fn load_or_init(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                let cfg = Config::default();
                if let Err(e) = cfg.save(ctx) {
                    log::warn!("Could not write default config: {}", e);
                }
                Ok(cfg)
            }
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        FileStorage::with_lock(&path, || FileStorage::atomic_write(&path, &toml_str))?;
        Ok(())
    }

    /// Resolves where the task list lives.
    pub fn data_file_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        match &self.data_file {
            Some(p) if !p.trim().is_empty() => Ok(PathBuf::from(p.trim())),
            _ => ctx.get_data_file_path(),
        }
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    #[test]
    fn test_missing_config_is_detected() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_load_or_init_writes_defaults() {
        let ctx = TestContext::new();
        let cfg = Config::load_or_init(&ctx).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(ctx.get_config_file_path().unwrap().exists());
        assert_eq!(Config::load(&ctx).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let ctx = TestContext::new();
        fs::write(
            ctx.get_config_file_path().unwrap(),
            "user_name = \"Ada\"\n",
        )
        .unwrap();
        let cfg = Config::load(&ctx).unwrap();
        assert_eq!(cfg.user_name.as_deref(), Some("Ada"));
        assert_eq!(cfg.default_snooze_mins, 1440);
        assert_eq!(cfg.log_level_filter(), log::LevelFilter::Info);
    }

    #[test]
    fn test_syntax_error_is_not_missing() {
        let ctx = TestContext::new();
        fs::write(ctx.get_config_file_path().unwrap(), "user_name = ").unwrap();
        let err = Config::load(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
    }

    #[test]
    fn test_data_file_override() {
        let ctx = TestContext::new();
        let mut cfg = Config::default();
        assert_eq!(
            cfg.data_file_path(&ctx).unwrap(),
            ctx.get_data_file_path().unwrap()
        );
        cfg.data_file = Some("/tmp/elsewhere.txt".to_string());
        assert_eq!(
            cfg.data_file_path(&ctx).unwrap(),
            PathBuf::from("/tmp/elsewhere.txt")
        );
    }
}
