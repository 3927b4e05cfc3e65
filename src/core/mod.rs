pub mod card_builder;
pub mod template_cache;
