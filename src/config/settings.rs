use crate::domain::ports::SettingsSource;
use crate::utils::error::{CardError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

pub const APP_BASE_DOMAIN: &str = "AppBaseDomain";
pub const MANIFEST_APP_ID: &str = "ManifestAppId";

/// Settings file of the form:
///
/// ```toml
/// [settings]
/// AppBaseDomain = "${BOT_BASE_DOMAIN}"
/// ManifestAppId = "00000000-0000-0000-0000-000000000000"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlSettings {
    #[serde(default)]
    pub settings: HashMap<String, String>,
}

impl TomlSettings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CardError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CardError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        for (key, value) in &self.settings {
            if value.contains("${") {
                return Err(CardError::InvalidConfigValueError {
                    field: format!("settings.{}", key),
                    value: value.clone(),
                    reason: "Unresolved environment variable".to_string(),
                });
            }
        }

        if let Some(domain) = self.settings.get(APP_BASE_DOMAIN) {
            validation::validate_domain(APP_BASE_DOMAIN, domain)?;
        }
        if let Some(app_id) = self.settings.get(MANIFEST_APP_ID) {
            validation::validate_non_empty_string(MANIFEST_APP_ID, app_id)?;
        }

        Ok(())
    }
}

impl SettingsSource for TomlSettings {
    fn get_setting(&self, key: &str) -> Result<String> {
        self.settings.get_setting(key)
    }
}

impl Validate for TomlSettings {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
