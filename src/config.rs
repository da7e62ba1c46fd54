//! Configuration
//!
//! Configuration can be loaded from:
//! - Default values
//! - An explicit file (`--config PATH`)
//! - `./archviz.toml` in the working directory
//! - `~/.config/archviz/config.toml`
//!
//! Every field is optional in the file; missing ones take their default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::diagram::preset::SIM_STUDIO_OUTPUT;
use crate::error::{Error, Result};

pub const LOCAL_CONFIG: &str = "archviz.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub diagram: DiagramConfig,
    pub scaffold: ScaffoldConfig,
}

/// Diagram rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramConfig {
    /// Image path; the extension selects the format
    pub output: PathBuf,

    /// Diagram file to render instead of the built-in one
    pub input: Option<PathBuf>,

    /// Canvas size in pixels
    pub width: f64,
    pub height: f64,

    /// Pixel density multiplier for PNG output
    pub scale: f32,

    pub font_family: String,
}

/// Deployment kit settings, also the template context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScaffoldConfig {
    pub out_dir: PathBuf,
    pub app_name: String,
    pub domain: String,
    pub region: String,
    pub branch: String,
    pub web_plan: String,
    pub realtime_plan: String,
    pub database_plan: String,
    pub disk_size_gb: u32,
    pub web_port: u16,
    pub realtime_port: u16,
    pub node_version: String,
    pub postgres_version: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(SIM_STUDIO_OUTPUT),
            input: None,
            width: 700.0,
            height: 500.0,
            scale: 1.0,
            font_family: "Open Sans, Verdana, Arial, sans-serif".to_string(),
        }
    }
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            app_name: "simstudio".to_string(),
            domain: "your-simstudio-app.onrender.com".to_string(),
            region: "oregon".to_string(),
            branch: "main".to_string(),
            web_plan: "standard".to_string(),
            realtime_plan: "starter".to_string(),
            database_plan: "basic-1gb".to_string(),
            disk_size_gb: 5,
            web_port: 3000,
            realtime_port: 3001,
            node_version: "20".to_string(),
            postgres_version: "15".to_string(),
        }
    }
}

impl Config {
    /// Load configuration, preferring `explicit`, then the local file,
    /// then the user config directory. Falls back to defaults when no
    /// file exists; a file that exists but does not parse is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        for candidate in Self::search_paths() {
            if candidate.exists() {
                return Self::load_from(&candidate);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration as pretty TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Where `save` writes when no path was given
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("archviz").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG))
    }

    /// The file a `set` should be persisted to: the explicit path, the
    /// local file if present, else the user config file
    pub fn write_target(explicit: Option<&Path>) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None if Path::new(LOCAL_CONFIG).exists() => PathBuf::from(LOCAL_CONFIG),
            None => Self::default_path(),
        }
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("archviz").join("config.toml"));
        }
        paths
    }

    /// Read a value by dotted key, e.g. `scaffold.domain`
    pub fn get(&self, key: &str) -> Result<String> {
        let root = toml::Value::try_from(self)?;
        let (section, field) = split_key(key)?;

        match root.get(section).and_then(|s| s.get(field)) {
            Some(toml::Value::String(s)) => Ok(s.clone()),
            Some(value) => Ok(value.to_string()),
            None if self.is_known_unset(section, field) => Ok(String::new()),
            None => Err(Error::Config(format!("Unknown config key: {key}"))),
        }
    }

    /// Set a value by dotted key. The value is parsed according to the
    /// key's current type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut root = toml::Value::try_from(&*self)?;
        let (section, field) = split_key(key)?;

        let table = root
            .get_mut(section)
            .and_then(toml::Value::as_table_mut)
            .ok_or_else(|| Error::Config(format!("Unknown config section: {section}")))?;

        let parsed = match table.get(field) {
            Some(toml::Value::Integer(_)) => toml::Value::Integer(
                value
                    .parse()
                    .map_err(|_| Error::Config(format!("{key} expects an integer, got '{value}'")))?,
            ),
            Some(toml::Value::Float(_)) => toml::Value::Float(
                value
                    .parse()
                    .map_err(|_| Error::Config(format!("{key} expects a number, got '{value}'")))?,
            ),
            Some(toml::Value::Boolean(_)) => toml::Value::Boolean(
                value
                    .parse()
                    .map_err(|_| Error::Config(format!("{key} expects true or false, got '{value}'")))?,
            ),
            Some(_) => toml::Value::String(value.to_string()),
            None if self.is_known_unset(section, field) => toml::Value::String(value.to_string()),
            None => return Err(Error::Config(format!("Unknown config key: {key}"))),
        };
        table.insert(field.to_string(), parsed);

        *self = root
            .try_into()
            .map_err(|e: toml::de::Error| Error::Config(format!("Invalid value for {key}: {e}")))?;
        Ok(())
    }

    /// Optional keys that are absent from the serialized form when unset
    fn is_known_unset(&self, section: &str, field: &str) -> bool {
        matches!((section, field), ("diagram", "input")) && self.diagram.input.is_none()
    }
}

fn split_key(key: &str) -> Result<(&str, &str)> {
    key.split_once('.')
        .filter(|(s, f)| !s.is_empty() && !f.is_empty())
        .ok_or_else(|| Error::Config(format!("Config keys look like section.field, got '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.diagram.output, PathBuf::from("sim_studio_architecture.png"));
        assert_eq!(config.diagram.scale, 1.0);
        assert_eq!(config.scaffold.web_port, 3000);
        assert_eq!(config.scaffold.realtime_port, 3001);
        assert_eq!(config.scaffold.disk_size_gb, 5);
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
            [scaffold]
            domain = "studio.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.scaffold.domain, "studio.example.com");
        assert_eq!(config.scaffold.app_name, "simstudio");
        assert_eq!(config.diagram, DiagramConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[diagram]\ncolour = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();
        assert_eq!(config.get("scaffold.region").unwrap(), "oregon");
        assert_eq!(config.get("scaffold.web_port").unwrap(), "3000");
        assert_eq!(config.get("diagram.input").unwrap(), "");

        config.set("scaffold.web_port", "8080").unwrap();
        config.set("diagram.scale", "2").unwrap();
        config.set("diagram.input", "stack.toml").unwrap();
        config.set("scaffold.domain", "studio.example.com").unwrap();

        assert_eq!(config.scaffold.web_port, 8080);
        assert_eq!(config.diagram.scale, 2.0);
        assert_eq!(config.diagram.input, Some(PathBuf::from("stack.toml")));
        assert_eq!(config.scaffold.domain, "studio.example.com");
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("scaffold.web_port", "lots").is_err());
        assert!(config.set("scaffold.web_port", "70000").is_err());
        assert!(config.set("scaffold.nope", "x").is_err());
        assert!(config.set("nosection", "x").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/archviz.toml");

        let mut config = Config::default();
        config.scaffold.app_name = "studio".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }
}
