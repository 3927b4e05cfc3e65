use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing setting: {key}")]
    MissingSetting { key: String },

    #[error("Missing resource '{key}' for locale '{locale}'")]
    MissingResource { key: String, locale: String },

    #[error("Invalid format string for '{key}': {reason}")]
    InvalidFormat { key: String, reason: String },

    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    #[error("Template '{name}' could not be parsed: {message}")]
    TemplateParseError { name: String, message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input: {message}")]
    InputError { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Template,
    Input,
    System,
}

impl CardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CardError::MissingSetting { .. }
            | CardError::MissingResource { .. }
            | CardError::InvalidFormat { .. }
            | CardError::ConfigError { .. }
            | CardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CardError::TemplateNotFound { .. }
            | CardError::TemplateParseError { .. }
            | CardError::RenderError { .. } => ErrorCategory::Template,
            CardError::InputError { .. } => ErrorCategory::Input,
            CardError::IoError(_) | CardError::SerializationError(_) | CardError::Internal { .. } => {
                ErrorCategory::System
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CardError::MissingSetting { key } => {
                format!("Setting '{}' is not configured", key)
            }
            CardError::MissingResource { key, locale } => {
                format!("No text for '{}' in locale '{}' or the default locale", key, locale)
            }
            CardError::TemplateNotFound { name } => {
                format!("Card template '{}' could not be found", name)
            }
            CardError::TemplateParseError { name, .. } => {
                format!("Card template '{}' is not valid JSON", name)
            }
            other => other.to_string(),
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => 1,
            ErrorCategory::Template => 2,
            ErrorCategory::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CardError>;
