#[cfg(feature = "cli")]
pub mod cli;
pub mod context;
pub mod resources;
pub mod settings;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use resources::StringCatalog;
pub use settings::TomlSettings;
