use clap::Parser;
use std::sync::Arc;
use welcome_card::config::context;
use welcome_card::domain::ports::TemplateStore;
use welcome_card::utils::logger::{self, LogFormat};
use welcome_card::utils::validation::Validate;
use welcome_card::{
    AdaptiveCardRenderer, Attachment, CardError, CliConfig, EmbeddedTemplateStore,
    FileTemplateStore, Locale, NotificationCardBuilder, NotificationContext, Result,
    StringCatalog, TemplateCache, TemplateName, TomlSettings,
};

fn load_context(config: &CliConfig) -> Result<NotificationContext> {
    let mut context = context::load_context(&config.context)?;

    if let Some(team) = &config.team {
        context.team_name = team.clone();
    }
    if let Some(installer) = &config.installer {
        context.installer = Some(installer.clone());
    }
    Ok(context)
}

fn build<S: TemplateStore>(config: &CliConfig, store: S) -> Result<Attachment> {
    let settings = TomlSettings::from_file(&config.settings)?;
    settings.validate()?;

    let mut resources = StringCatalog::embedded()?;
    if let Some(path) = &config.resources {
        resources = resources.merge(StringCatalog::from_file(path)?);
    }
    tracing::debug!(
        "String table locales: {}",
        resources.locales().collect::<Vec<_>>().join(", ")
    );

    let template = Arc::new(TemplateCache::new(store, TemplateName::PairUpNotification));
    template.get()?;
    tracing::debug!("Loaded template '{}'", template.name());

    let builder =
        NotificationCardBuilder::new(template, settings, resources, AdaptiveCardRenderer::new()?);

    let context = load_context(config)?;
    let locale = Locale::new(config.locale.as_str());
    tracing::debug!("Building card for team '{}' in locale '{}'", context.team_name, locale);

    builder.build_welcome_card(&context, &locale)
}

fn run(config: &CliConfig) -> Result<String> {
    let attachment = match &config.templates {
        Some(dir) => build(config, FileTemplateStore::new(dir))?,
        None => build(config, EmbeddedTemplateStore)?,
    };

    let json = if config.pretty {
        serde_json::to_string_pretty(&attachment)?
    } else {
        serde_json::to_string(&attachment)?
    };
    Ok(json)
}

fn fail(e: &CardError) -> ! {
    tracing::error!("❌ Card build failed: {} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(e.exit_code());
}

fn main() {
    let config = CliConfig::parse();

    let format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, config.verbose);

    tracing::info!("Starting welcome-card");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    match run(&config) {
        Ok(json) => {
            tracing::info!("✅ Card rendered");
            println!("{}", json);
        }
        Err(e) => fail(&e),
    }
}
