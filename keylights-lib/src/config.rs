use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_PORT: u16 = 9123;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// One configured Key Light, with the config defaults already folded in.
///
/// Immutable once loaded. The alias, where present, is the identity used for
/// CLI target lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Light {
    pub host: String,
    pub port: u16,
    pub alias: Option<String>,
    pub timeout: Duration,
}

impl Light {
    /// Human-readable identifier for log and error messages: the alias if the
    /// light has one, the host otherwise.
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.host)
    }
}

/// The `defaults` block of a config file. Values apply to every light that
/// does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// One light entry as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightEntry {
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

/// The config file: an optional `defaults` block and a non-empty `lights`
/// list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub lights: Vec<LightEntry>,
}

impl Config {
    /// Loads and validates a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// A sample config, used by `--print-config-template`.
    pub fn template() -> Self {
        Config {
            defaults: Defaults::default(),
            lights: vec![
                LightEntry {
                    host: "192.168.1.5".to_string(),
                    port: None,
                    alias: Some("left".to_string()),
                    timeout: None,
                },
                LightEntry {
                    host: "192.168.1.6".to_string(),
                    port: Some(DEFAULT_PORT),
                    alias: Some("right".to_string()),
                    timeout: None,
                },
            ],
        }
    }

    fn validate(&self) -> Result<(), Error> {
        if self.lights.is_empty() {
            return Err(Error::Config(
                "config must include a non-empty 'lights' list".to_string(),
            ));
        }

        let mut seen_aliases = HashSet::new();
        for entry in &self.lights {
            if entry.host.is_empty() {
                return Err(Error::Config(
                    "each light needs a non-empty 'host' field".to_string(),
                ));
            }
            if let Some(alias) = &entry.alias {
                if alias.is_empty() {
                    return Err(Error::Config(
                        "alias must be non-empty if provided".to_string(),
                    ));
                }
                if !seen_aliases.insert(alias.clone()) {
                    return Err(Error::Config(format!(
                        "duplicate alias in config: {alias}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// The configured lights with defaults folded in, in file order.
    pub fn lights(&self) -> Vec<Light> {
        self.lights
            .iter()
            .map(|entry| Light {
                host: entry.host.clone(),
                port: entry.port.unwrap_or(self.defaults.port),
                alias: entry.alias.clone(),
                timeout: Duration::from_secs(
                    entry.timeout.unwrap_or(self.defaults.timeout),
                ),
            })
            .collect()
    }
}

/// Default config location: `~/.config/keylights/keylights.conf` on Unix,
/// the local app-data equivalent elsewhere.
pub fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("keylights").join("keylights.conf")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_folds_defaults() {
        let file = write_config(
            r#"{
                "defaults": { "port": 9124, "timeout": 2 },
                "lights": [
                    { "alias": "left", "host": "10.0.0.1" },
                    { "alias": "right", "host": "10.0.0.2", "port": 9123, "timeout": 7 }
                ]
            }"#,
        );
        let config = Config::load(file.path()).unwrap();
        let lights = config.lights();

        assert_eq!(lights.len(), 2);
        assert_eq!(lights[0].host, "10.0.0.1");
        assert_eq!(lights[0].port, 9124);
        assert_eq!(lights[0].timeout, Duration::from_secs(2));
        assert_eq!(lights[1].port, 9123);
        assert_eq!(lights[1].timeout, Duration::from_secs(7));
        assert_eq!(lights[1].alias.as_deref(), Some("right"));
    }

    #[test]
    fn test_load_without_defaults_block() {
        let file = write_config(r#"{ "lights": [ { "host": "10.0.0.1" } ] }"#);
        let lights = Config::load(file.path()).unwrap().lights();

        assert_eq!(lights[0].port, DEFAULT_PORT);
        assert_eq!(lights[0].timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(lights[0].alias, None);
        assert_eq!(lights[0].label(), "10.0.0.1");
    }

    #[test]
    fn test_rejects_empty_lights() {
        let file = write_config(r#"{ "lights": [] }"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
    }

    #[test]
    fn test_rejects_missing_lights() {
        let file = write_config(r#"{}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
    }

    #[test]
    fn test_rejects_empty_host() {
        let file = write_config(r#"{ "lights": [ { "host": "" } ] }"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
    }

    #[test]
    fn test_rejects_duplicate_alias() {
        let file = write_config(
            r#"{ "lights": [
                { "alias": "desk", "host": "10.0.0.1" },
                { "alias": "desk", "host": "10.0.0.2" }
            ] }"#,
        );
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("duplicate alias"), "got {err}");
    }

    #[test]
    fn test_rejects_non_integer_port() {
        let file = write_config(r#"{ "lights": [ { "host": "10.0.0.1", "port": "nine" } ] }"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }), "got {err:?}");
    }

    #[test]
    fn test_rejects_invalid_json() {
        let file = write_config("not json at all");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }), "got {err:?}");
    }

    #[test]
    fn test_missing_file_is_config_read_error() {
        let err = Config::load("/nonexistent/keylights.conf").unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }), "got {err:?}");
        assert!(err.is_fatal());
    }

    #[test]
    fn test_template_is_loadable() {
        let json = serde_json::to_string_pretty(&Config::template()).unwrap();
        let file = write_config(&json);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.lights.len(), 2);
        assert_eq!(config.lights().iter().filter(|l| l.alias.is_some()).count(), 2);
    }
}
