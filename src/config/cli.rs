use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "welcome-card")]
#[command(about = "Render the pair-up welcome card for a team member")]
pub struct CliConfig {
    #[arg(long, help = "TOML file with AppBaseDomain and ManifestAppId")]
    pub settings: String,

    #[arg(long, help = "JSON file describing the team, installer, sender and recipient")]
    pub context: String,

    #[arg(long, help = "TOML string table merged over the built-in strings")]
    pub resources: Option<String>,

    #[arg(long, help = "Directory holding <TemplateName>.json card templates")]
    pub templates: Option<String>,

    #[arg(long, default_value = "en")]
    pub locale: String,

    #[arg(long, help = "Override the team name from the context file")]
    pub team: Option<String>,

    #[arg(long, help = "Override the installer name from the context file")]
    pub installer: Option<String>,

    #[arg(long, help = "Pretty-print the attachment JSON")]
    pub pretty: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("settings", &self.settings)?;
        validation::validate_path("context", &self.context)?;
        if let Some(resources) = &self.resources {
            validation::validate_path("resources", resources)?;
        }
        if let Some(templates) = &self.templates {
            validation::validate_path("templates", templates)?;
        }
        if let Some(team) = &self.team {
            validation::validate_non_empty_string("team", team)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_args() {
        let config = CliConfig::try_parse_from([
            "welcome-card",
            "--settings",
            "settings.toml",
            "--context",
            "context.json",
        ])
        .unwrap();

        assert_eq!(config.locale, "en");
        assert!(config.templates.is_none());
        assert!(!config.pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_team_override_is_rejected() {
        let config = CliConfig::try_parse_from([
            "welcome-card",
            "--settings",
            "settings.toml",
            "--context",
            "context.json",
            "--team",
            "  ",
        ])
        .unwrap();

        assert!(config.validate().is_err());
    }
}
