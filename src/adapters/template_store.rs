use crate::domain::model::{CardTemplate, TemplateName};
use crate::domain::ports::TemplateStore;
use crate::utils::error::{CardError, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

const PAIR_UP_NOTIFICATION: &str = include_str!("../../templates/PairUpNotification.json");

pub fn parse_template(name: TemplateName, text: &str) -> Result<CardTemplate> {
    let body: serde_json::Value =
        serde_json::from_str(text).map_err(|e| CardError::TemplateParseError {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    if !body.is_object() {
        return Err(CardError::TemplateParseError {
            name: name.to_string(),
            message: "template root must be a JSON object".to_string(),
        });
    }

    Ok(CardTemplate { name, body })
}

/// Loads `<dir>/<TemplateName>.json`.
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    dir: PathBuf,
}

impl FileTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TemplateStore for FileTemplateStore {
    fn load_template(&self, name: TemplateName) -> Result<CardTemplate> {
        let path = self.dir.join(name.file_name());
        tracing::debug!("Loading card template from {}", path.display());

        let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CardError::TemplateNotFound {
                name: path.display().to_string(),
            },
            _ => CardError::IoError(e),
        })?;

        parse_template(name, &text)
    }
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateStore;

impl TemplateStore for EmbeddedTemplateStore {
    fn load_template(&self, name: TemplateName) -> Result<CardTemplate> {
        let text = match name {
            TemplateName::PairUpNotification => PAIR_UP_NOTIFICATION,
        };
        parse_template(name, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_template_parses() {
        let template = EmbeddedTemplateStore
            .load_template(TemplateName::PairUpNotification)
            .unwrap();
        assert_eq!(template.body["type"], "AdaptiveCard");
    }

    #[test]
    fn test_file_store_loads_named_template() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("PairUpNotification.json"),
            r#"{"type": "AdaptiveCard", "body": []}"#,
        )
        .unwrap();

        let store = FileTemplateStore::new(temp_dir.path());
        let template = store.load_template(TemplateName::PairUpNotification).unwrap();
        assert_eq!(template.name, TemplateName::PairUpNotification);
    }

    #[test]
    fn test_file_store_missing_template() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTemplateStore::new(temp_dir.path());

        let err = store
            .load_template(TemplateName::PairUpNotification)
            .unwrap_err();
        assert!(matches!(err, CardError::TemplateNotFound { .. }));
    }

    #[test]
    fn test_unparsable_template() {
        assert!(matches!(
            parse_template(TemplateName::PairUpNotification, "{ not json"),
            Err(CardError::TemplateParseError { .. })
        ));
        assert!(matches!(
            parse_template(TemplateName::PairUpNotification, "[1, 2]"),
            Err(CardError::TemplateParseError { .. })
        ));
    }
}
