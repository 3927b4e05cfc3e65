pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{AdaptiveCardRenderer, EmbeddedTemplateStore, FileTemplateStore};
pub use config::{StringCatalog, TomlSettings};
pub use crate::core::{card_builder::NotificationCardBuilder, template_cache::TemplateCache};
pub use domain::model::{Attachment, Identity, Locale, NotificationContext, TemplateName};
pub use utils::error::{CardError, Result};
