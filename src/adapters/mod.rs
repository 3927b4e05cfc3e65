// Adapters layer: concrete implementations of the domain ports.

pub mod renderer;
pub mod template_store;

pub use renderer::AdaptiveCardRenderer;
pub use template_store::{EmbeddedTemplateStore, FileTemplateStore};
