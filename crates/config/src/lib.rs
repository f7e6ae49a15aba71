//! SEQ Configuration Management
//!
//! Loads tracker options from a plain `key = value` file. Lines starting
//! with `#` are comments. Unknown keys are logged and skipped, and every
//! option has a default so an empty file is a valid configuration.

use seq_core::SeqError;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for '{key}': {value}")]
    InvalidValue { key: String, value: String },
}

impl From<ConfigError> for SeqError {
    fn from(err: ConfigError) -> Self {
        SeqError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Complete tracker configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SeqConfig {
    // ========== Zone state ==========
    /// Write `<base>Zone.dat` after every zone transition (from "save_zone_state")
    pub save_zone_state: bool,
    /// Read `<base>Zone.dat` at startup (from "restore_zone_state")
    pub restore_zone_state: bool,
    /// Path prefix for saved state files (from "save_restore_base")
    pub save_restore_base: String,

    // ========== Spawn points ==========
    /// Track spawn points at all (from "spawn_points_enabled")
    pub spawn_points_enabled: bool,
    /// Directory holding per-zone `.sp` files (from "spawn_points_dir")
    pub spawn_points_dir: PathBuf,

    // ========== Decoder ==========
    /// Profile layout revision tag (from "profile_layout")
    pub profile_layout: String,

    // ========== Logging ==========
    /// Default tracing filter when `RUST_LOG` is unset (from "log_level")
    pub log_level: String,
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            save_zone_state: false,
            restore_zone_state: false,
            save_restore_base: "/tmp/last".into(),
            spawn_points_enabled: true,
            spawn_points_dir: PathBuf::from("spawnpoints"),
            profile_layout: "current".into(),
            log_level: "info".into(),
        }
    }
}

/// Options the zone state machine reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneConfig {
    pub save_zone_state: bool,
    pub restore_zone_state: bool,
    pub save_restore_base: String,
}

impl ZoneConfig {
    /// Path of the zone-state file
    pub fn state_file(&self) -> PathBuf {
        PathBuf::from(format!("{}Zone.dat", self.save_restore_base))
    }
}

/// Options the spawn point tracker reads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnConfig {
    pub enabled: bool,
    pub dir: PathBuf,
}

impl SpawnConfig {
    /// Path of the spawn-point file for a zone short name
    pub fn file_for(&self, short_name: &str) -> PathBuf {
        self.dir.join(format!("{}.sp", short_name))
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
        }),
    }
}

impl SeqConfig {
    /// Load configuration from a file
    ///
    /// # Arguments
    /// * `path` - Path to the `key = value` file
    ///
    /// # Returns
    /// The parsed configuration, or an error if the file cannot be read or
    /// a boolean option has an unrecognised value
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                config.parse_option(key.trim(), value.trim())?;
            }
        }

        Ok(config)
    }

    fn parse_option(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "save_zone_state" => self.save_zone_state = parse_bool(key, value)?,
            "restore_zone_state" => self.restore_zone_state = parse_bool(key, value)?,
            "save_restore_base" => self.save_restore_base = value.into(),
            "spawn_points_enabled" => self.spawn_points_enabled = parse_bool(key, value)?,
            "spawn_points_dir" => self.spawn_points_dir = PathBuf::from(value),
            "profile_layout" => self.profile_layout = value.into(),
            "log_level" => self.log_level = value.into(),
            _ => {
                tracing::debug!("Unknown config option: {} = {}", key, value);
            }
        }
        Ok(())
    }

    pub fn zone(&self) -> ZoneConfig {
        ZoneConfig {
            save_zone_state: self.save_zone_state,
            restore_zone_state: self.restore_zone_state,
            save_restore_base: self.save_restore_base.clone(),
        }
    }

    pub fn spawns(&self) -> SpawnConfig {
        SpawnConfig {
            enabled: self.spawn_points_enabled,
            dir: self.spawn_points_dir.clone(),
        }
    }

    /// Log a configuration summary
    pub fn display(&self) {
        tracing::info!("Configuration:");
        tracing::info!("  [zone state]");
        tracing::info!("    Save: {}", self.save_zone_state);
        tracing::info!("    Restore: {}", self.restore_zone_state);
        tracing::info!("    Base: {}", self.save_restore_base);
        tracing::info!("  [spawn points]");
        tracing::info!("    Enabled: {}", self.spawn_points_enabled);
        tracing::info!("    Directory: {}", self.spawn_points_dir.display());
        tracing::info!("  [decoder]");
        tracing::info!("    Profile layout: {}", self.profile_layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SeqConfig::default();
        assert!(!config.save_zone_state);
        assert!(config.spawn_points_enabled);
        assert_eq!(config.profile_layout, "current");
    }

    #[test]
    fn test_parse_simple_config() {
        let config_text = r#"
# zone state
save_zone_state = true
restore_zone_state = yes
save_restore_base = /var/seq/last
spawn_points_dir = /var/seq/sp
no_such_option = 12
"#;
        let config = SeqConfig::parse(config_text).unwrap();
        assert!(config.save_zone_state);
        assert!(config.restore_zone_state);
        assert_eq!(config.save_restore_base, "/var/seq/last");
        assert_eq!(config.spawn_points_dir, PathBuf::from("/var/seq/sp"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_bad_boolean_rejected() {
        let err = SeqConfig::parse("save_zone_state = maybe").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_sub_configs() {
        let config = SeqConfig::parse("save_restore_base = /tmp/run1\nspawn_points_dir = sp").unwrap();
        assert_eq!(config.zone().state_file(), PathBuf::from("/tmp/run1Zone.dat"));
        assert_eq!(config.spawns().file_for("qeynos"), PathBuf::from("sp/qeynos.sp"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = debug").unwrap();

        let config = SeqConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
    }
}
