use crate::domain::model::{Attachment, CardTemplate, Locale, TemplateDataSet, TemplateName};
use crate::utils::error::{CardError, Result};
use std::collections::HashMap;

/// Process-wide, read-only key/value settings.
pub trait SettingsSource: Send + Sync {
    fn get_setting(&self, key: &str) -> Result<String>;
}

impl SettingsSource for HashMap<String, String> {
    fn get_setting(&self, key: &str) -> Result<String> {
        self.get(key).cloned().ok_or_else(|| CardError::MissingSetting {
            key: key.to_string(),
        })
    }
}

/// Localized strings keyed by name.
pub trait ResourceTable: Send + Sync {
    fn get(&self, key: &str, locale: &Locale) -> Result<String>;

    /// Looks up `key` and substitutes positional `{0}`, `{1}`, ... arguments.
    fn format(&self, key: &str, locale: &Locale, args: &[&str]) -> Result<String> {
        let pattern = self.get(key, locale)?;
        crate::config::resources::format_positional(key, &pattern, args)
    }
}

pub trait TemplateStore: Send + Sync {
    fn load_template(&self, name: TemplateName) -> Result<CardTemplate>;
}

pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &CardTemplate, data: &TemplateDataSet) -> Result<Attachment>;
}
