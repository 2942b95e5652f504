use crate::error::{GramSathiError, Result};
use dialoguer::{Input, Select};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Directory holding `symptom.yaml`, `soil.yaml` and/or `scheme.yaml`.
    #[serde(default, deserialize_with = "deserialize_optional_path")]
    pub dir: Option<PathBuf>,
}

/// Treats an empty string (an unset `${VAR}`) as no directory.
fn deserialize_optional_path<'de, D>(deserializer: D) -> std::result::Result<Option<PathBuf>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty() && !s.starts_with("${"))
        .map(PathBuf::from))
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Loads the config from `config_override` or the standard locations.
    /// A missing file is not an error: the built-in defaults apply.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(GramSathiError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading config from {}", config_path.display());
        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| GramSathiError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content)
            .map_err(|e| GramSathiError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("gramsathi").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/gramsathi/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GramSathiError::Config("Cannot determine config directory".into()))?
            .join("gramsathi");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("GramSathi setup");
        println!();

        let rules_dir: String = Input::new()
            .with_prompt("  Rule table directory (blank for built-in tables)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| GramSathiError::Config(format!("Input error: {}", e)))?;

        let formats = ["text", "json"];
        let format_index = Select::new()
            .with_prompt("  Output format")
            .items(&formats)
            .default(0)
            .interact()
            .map_err(|e| GramSathiError::Config(format!("Input error: {}", e)))?;

        let config = Config {
            rules: RulesConfig {
                dir: Some(rules_dir.trim())
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from),
            },
            output: OutputConfig {
                format: if format_index == 1 {
                    OutputFormat::Json
                } else {
                    OutputFormat::Text
                },
            },
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| GramSathiError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# GramSathi Configuration\n# Generated by `gramsathi init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return content.to_string(),
        };

        re.replace_all(content, |caps: &regex_lite::Captures<'_>| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert!(config.rules.dir.is_none());
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn parses_rules_dir_and_format() {
        let config = Config::from_yaml("rules:\n  dir: /srv/rules\noutput:\n  format: json\n").unwrap();
        assert_eq!(config.rules.dir, Some(PathBuf::from("/srv/rules")));
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn substitutes_environment_variables() {
        std::env::set_var("GRAMSATHI_TEST_RULES_DIR", "/opt/gramsathi/rules");
        let config = Config::from_yaml("rules:\n  dir: ${GRAMSATHI_TEST_RULES_DIR}\n").unwrap();
        assert_eq!(
            config.rules.dir,
            Some(PathBuf::from("/opt/gramsathi/rules"))
        );
    }

    #[test]
    fn unset_variable_means_no_rules_dir() {
        let config = Config::from_yaml("rules:\n  dir: ${GRAMSATHI_TEST_UNSET_VARIABLE}\n").unwrap();
        assert!(config.rules.dir.is_none());
    }

    #[test]
    fn unknown_format_is_a_config_error() {
        let err = Config::from_yaml("output:\n  format: xml\n").unwrap_err();
        assert!(matches!(err, GramSathiError::Config(msg) if msg.contains("Failed to parse")));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = Config::load(Some(PathBuf::from("/nonexistent/gramsathi.yaml"))).unwrap_err();
        assert!(matches!(err, GramSathiError::Config(_)));
    }
}
