use anyhow::Result;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use welcome_card::domain::model::CardTemplate;
use welcome_card::domain::ports::TemplateStore;
use welcome_card::{
    AdaptiveCardRenderer, CardError, EmbeddedTemplateStore, Identity, Locale,
    NotificationCardBuilder, NotificationContext, StringCatalog, TemplateCache, TemplateName,
};

const STRINGS: &str = r#"
[en]
BotDisplayName = "Icebreaker"
InstallMessageUnknownInstallerPart1 = "unknown-1 [{0}]"
InstallMessageUnknownInstallerPart2 = "unknown-2"
InstallMessageUnknownInstallerPart3 = "unknown-3"
InstallMessageKnownInstallerPart1 = "known-1 [{0}] [{1}]"
InstallMessageKnownInstallerPart2 = "known-2"
InstallMessageKnownInstallerPart3 = "known-3"
WelcomeTourTitle = "Tour"
PausePairingsButtonText = "Pause"
SalutationTitleText = "Hello"
TakeATourButtonText = "Take a tour"
ChatWithMessageButtonText = "Chat with {0}"
"#;

/// Delegates to the embedded store and counts loads.
struct CountingStore {
    loads: Arc<AtomicUsize>,
}

impl TemplateStore for CountingStore {
    fn load_template(&self, name: TemplateName) -> welcome_card::Result<CardTemplate> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        EmbeddedTemplateStore.load_template(name)
    }
}

fn settings(base_domain: &str) -> HashMap<String, String> {
    HashMap::from([
        ("AppBaseDomain".to_string(), base_domain.to_string()),
        ("ManifestAppId".to_string(), "0f1e2d3c".to_string()),
    ])
}

fn builder(
    base_domain: &str,
    loads: Arc<AtomicUsize>,
) -> Result<
    NotificationCardBuilder<CountingStore, HashMap<String, String>, StringCatalog, AdaptiveCardRenderer>,
> {
    let template = Arc::new(TemplateCache::new(
        CountingStore { loads },
        TemplateName::PairUpNotification,
    ));
    Ok(NotificationCardBuilder::new(
        template,
        settings(base_domain),
        StringCatalog::from_toml_str(STRINGS)?,
        AdaptiveCardRenderer::new()?,
    ))
}

fn context(installer: Option<&str>, recipient: Identity) -> NotificationContext {
    NotificationContext {
        team_name: "Acme".to_string(),
        installer: installer.map(str::to_string),
        sender: Identity::new("Walter Skinner", "walter@acme.com").with_given_name("Walter"),
        recipient,
    }
}

fn member() -> Identity {
    Identity::new("Fox Mulder", "fox@acme.com")
        .with_given_name("Fox")
        .with_email("fox.mulder@acme.com")
}

fn guest() -> Identity {
    Identity::new("Dana Scully", "dana_fbi.gov#EXT#@acme.onmicrosoft.com").with_email("dana@fbi.gov")
}

fn text_blocks(card: &serde_json::Value) -> Vec<String> {
    card["body"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["text"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn test_unknown_installer_uses_team_only_message() -> Result<()> {
    let builder = builder("bot.acme.com", Arc::new(AtomicUsize::new(0)))?;

    for installer in [None, Some("")] {
        let card = builder.build_welcome_card(&context(installer, member()), &Locale::default())?;
        let texts = text_blocks(&card.content);

        assert!(texts.contains(&"unknown-1 [Acme]".to_string()));
        assert!(texts.contains(&"unknown-2".to_string()));
        assert!(texts.contains(&"unknown-3".to_string()));
    }
    Ok(())
}

#[test]
fn test_known_installer_uses_installer_and_team() -> Result<()> {
    let builder = builder("bot.acme.com", Arc::new(AtomicUsize::new(0)))?;

    let card = builder.build_welcome_card(&context(Some("Dana"), member()), &Locale::default())?;
    let texts = text_blocks(&card.content);

    assert!(texts.contains(&"known-1 [Dana] [Acme]".to_string()));
    assert!(texts.contains(&"known-2".to_string()));
    assert!(texts.contains(&"known-3".to_string()));
    Ok(())
}

#[test]
fn test_image_url_is_rooted_at_base_domain() -> Result<()> {
    for domain in ["bot.acme.com", "localhost:3978"] {
        let builder = builder(domain, Arc::new(AtomicUsize::new(0)))?;
        let card = builder.build_welcome_card(&context(None, member()), &Locale::default())?;

        assert_eq!(
            card.content["body"][0]["url"],
            format!("https://{}/Content/welcome-card-image.png", domain)
        );
    }
    Ok(())
}

#[test]
fn test_guest_recipient_is_addressed_by_email() -> Result<()> {
    let builder = builder("bot.acme.com", Arc::new(AtomicUsize::new(0)))?;

    let guest_data = builder.welcome_data(&context(None, guest()), &Locale::default())?;
    assert_eq!(guest_data["recipientUpn"], "dana@fbi.gov");
    assert_eq!(guest_data["personFirstName"], "Dana Scully");
    assert_eq!(
        guest_data["chatUrl"],
        "https://teams.microsoft.com/l/chat/0/0?users=dana%40fbi.gov"
    );

    let member_data = builder.welcome_data(&context(None, member()), &Locale::default())?;
    assert_eq!(member_data["recipientUpn"], "fox@acme.com");
    assert_eq!(member_data["personFirstName"], "Fox");
    Ok(())
}

#[test]
fn test_alignment_follows_locale_direction() -> Result<()> {
    let builder = builder("bot.acme.com", Arc::new(AtomicUsize::new(0)))?;

    let rtl = builder.build_welcome_card(&context(None, member()), &Locale::new("ar-SA"))?;
    assert_eq!(rtl.content["body"][1]["horizontalAlignment"], "Right");

    let ltr = builder.build_welcome_card(&context(None, member()), &Locale::new("en-US"))?;
    assert_eq!(ltr.content["body"][1]["horizontalAlignment"], "Left");
    Ok(())
}

#[test]
fn test_template_is_loaded_once_across_builds() -> Result<()> {
    let loads = Arc::new(AtomicUsize::new(0));
    let builder = builder("bot.acme.com", Arc::clone(&loads))?;

    let first = builder.build_welcome_card(&context(None, member()), &Locale::default())?;
    let second = builder.build_welcome_card(&context(Some("Dana"), guest()), &Locale::default())?;

    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(first.content["type"], "AdaptiveCard");
    assert_eq!(second.content["type"], "AdaptiveCard");
    Ok(())
}

#[test]
fn test_missing_settings_and_strings_propagate() -> Result<()> {
    let template = Arc::new(TemplateCache::new(
        EmbeddedTemplateStore,
        TemplateName::PairUpNotification,
    ));
    let builder = NotificationCardBuilder::new(
        Arc::clone(&template),
        HashMap::<String, String>::new(),
        StringCatalog::from_toml_str(STRINGS)?,
        AdaptiveCardRenderer::new()?,
    );
    let err = builder
        .build_welcome_card(&context(None, member()), &Locale::default())
        .unwrap_err();
    assert!(matches!(err, CardError::MissingSetting { .. }));

    let builder = NotificationCardBuilder::new(
        template,
        settings("bot.acme.com"),
        StringCatalog::from_toml_str("[en]\n")?,
        AdaptiveCardRenderer::new()?,
    );
    let err = builder
        .build_welcome_card(&context(None, member()), &Locale::default())
        .unwrap_err();
    assert!(matches!(err, CardError::MissingResource { .. }));
    Ok(())
}

#[test]
fn test_rendered_card_has_no_unbound_fields() -> Result<()> {
    let builder = builder("bot.acme.com", Arc::new(AtomicUsize::new(0)))?;
    let card = builder.build_welcome_card(&context(Some("Dana"), guest()), &Locale::default())?;

    let json = serde_json::to_string(&card)?;
    assert!(!json.contains("${"), "unbound field in {json}");
    assert!(json.contains("\"contentType\":\"application/vnd.microsoft.card.adaptive\""));
    Ok(())
}
