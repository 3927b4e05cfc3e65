use crate::domain::model::NotificationContext;
use crate::utils::error::{CardError, Result};
use std::path::Path;

/// Reads the JSON context passed to the CLI. Read and parse failures are input errors.
pub fn load_context<P: AsRef<Path>>(path: P) -> Result<NotificationContext> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| CardError::InputError {
        message: format!("cannot read context file {}: {}", path.display(), e),
    })?;

    serde_json::from_str(&raw).map_err(|e| CardError::InputError {
        message: format!("invalid context JSON in {}: {}", path.display(), e),
    })
}

pub fn parse_context(raw: &str) -> Result<NotificationContext> {
    serde_json::from_str(raw).map_err(|e| CardError::InputError {
        message: format!("invalid context JSON: {}", e),
    })
}
