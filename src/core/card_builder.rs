use crate::config::resources::keys;
use crate::config::settings::{APP_BASE_DOMAIN, MANIFEST_APP_ID};
use crate::core::template_cache::TemplateCache;
use crate::domain::model::{Attachment, Locale, NotificationContext, TemplateDataSet, TextAlignment};
use crate::domain::ports::{ResourceTable, SettingsSource, TemplateRenderer, TemplateStore};
use crate::utils::error::Result;
use serde_json::Value;
use std::sync::Arc;

pub const TEAMS_DEEP_LINK_BASE: &str = "https://teams.microsoft.com/l";

pub fn welcome_card_image_url(base_domain: &str) -> String {
    format!("https://{}/Content/welcome-card-image.png", base_domain)
}

/// Tour page; `{theme}` is filled in by the Teams client.
pub fn tour_url(base_domain: &str) -> String {
    format!("https://{}/Content/tour.html?theme={{theme}}", base_domain)
}

/// Task-module deep link that opens `tour_url` inside Teams.
pub fn tour_full_url(app_id: &str, tour_url: &str, tour_title: &str) -> String {
    format!(
        "{}/task/{}?url={}&height=533px&width=600px&title={}",
        TEAMS_DEEP_LINK_BASE,
        app_id,
        urlencoding::encode(tour_url),
        urlencoding::encode(tour_title)
    )
}

pub fn chat_url(contact: &str) -> String {
    format!("{}/chat/0/0?users={}", TEAMS_DEEP_LINK_BASE, urlencoding::encode(contact))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntroMessage {
    pub part1: String,
    pub part2: String,
    pub part3: String,
}

/// Builds the pair-up notification card sent to each member of a new pairing.
pub struct NotificationCardBuilder<S, C, R, T>
where
    S: TemplateStore,
    C: SettingsSource,
    R: ResourceTable,
    T: TemplateRenderer,
{
    template: Arc<TemplateCache<S>>,
    settings: C,
    resources: R,
    renderer: T,
}

impl<S, C, R, T> NotificationCardBuilder<S, C, R, T>
where
    S: TemplateStore,
    C: SettingsSource,
    R: ResourceTable,
    T: TemplateRenderer,
{
    pub fn new(template: Arc<TemplateCache<S>>, settings: C, resources: R, renderer: T) -> Self {
        Self {
            template,
            settings,
            resources,
            renderer,
        }
    }

    pub fn build_welcome_card(
        &self,
        context: &NotificationContext,
        locale: &Locale,
    ) -> Result<Attachment> {
        let data = self.welcome_data(context, locale)?;
        let template = self.template.get()?;

        tracing::debug!(
            "Rendering '{}' for team '{}' ({} fields)",
            template.name,
            context.team_name,
            data.len()
        );
        self.renderer.render(&template, &data)
    }

    pub fn intro_message(&self, context: &NotificationContext, locale: &Locale) -> Result<IntroMessage> {
        let team = context.team_name.as_str();

        let message = match context.known_installer() {
            None => IntroMessage {
                part1: self.resources.format(
                    keys::INSTALL_MESSAGE_UNKNOWN_INSTALLER_PART1,
                    locale,
                    &[team],
                )?,
                part2: self
                    .resources
                    .get(keys::INSTALL_MESSAGE_UNKNOWN_INSTALLER_PART2, locale)?,
                part3: self
                    .resources
                    .get(keys::INSTALL_MESSAGE_UNKNOWN_INSTALLER_PART3, locale)?,
            },
            Some(installer) => IntroMessage {
                part1: self.resources.format(
                    keys::INSTALL_MESSAGE_KNOWN_INSTALLER_PART1,
                    locale,
                    &[installer, team],
                )?,
                part2: self
                    .resources
                    .get(keys::INSTALL_MESSAGE_KNOWN_INSTALLER_PART2, locale)?,
                part3: self
                    .resources
                    .get(keys::INSTALL_MESSAGE_KNOWN_INSTALLER_PART3, locale)?,
            },
        };

        Ok(message)
    }

    /// Field values bound into the pair-up template.
    pub fn welcome_data(
        &self,
        context: &NotificationContext,
        locale: &Locale,
    ) -> Result<TemplateDataSet> {
        let text_alignment = TextAlignment::for_locale(locale);

        let sender_first_name = context.sender.first_name();
        let recipient_first_name = context.recipient.first_name();
        let recipient_upn = context.recipient.contact_address();

        let intro = self.intro_message(context, locale)?;

        let base_domain = self.settings.get_setting(APP_BASE_DOMAIN)?;
        let app_id = self.settings.get_setting(MANIFEST_APP_ID)?;
        let tour_title = self.resources.get(keys::WELCOME_TOUR_TITLE, locale)?;

        let chat_with_message_text = self.resources.format(
            keys::CHAT_WITH_MESSAGE_BUTTON_TEXT,
            locale,
            &[recipient_first_name],
        )?;

        let fields: [(&str, String); 16] = [
            ("textAlignment", text_alignment.as_str().to_string()),
            ("personFirstName", recipient_first_name.to_string()),
            ("senderFirstName", sender_first_name.to_string()),
            (
                "botDisplayName",
                self.resources.get(keys::BOT_DISPLAY_NAME, locale)?,
            ),
            ("recipientUpn", recipient_upn.to_string()),
            ("introMessagePart1", intro.part1),
            ("introMessagePart2", intro.part2),
            ("introMessagePart3", intro.part3),
            ("team", context.team_name.clone()),
            ("welcomeCardImageUrl", welcome_card_image_url(&base_domain)),
            (
                "pauseMatchesText",
                self.resources.get(keys::PAUSE_PAIRINGS_BUTTON_TEXT, locale)?,
            ),
            (
                "tourUrl",
                tour_full_url(&app_id, &tour_url(&base_domain), &tour_title),
            ),
            (
                "salutationText",
                self.resources.get(keys::SALUTATION_TITLE_TEXT, locale)?,
            ),
            (
                "tourButtonText",
                self.resources.get(keys::TAKE_A_TOUR_BUTTON_TEXT, locale)?,
            ),
            ("chatUrl", chat_url(recipient_upn)),
            ("chatWithMessageText", chat_with_message_text),
        ];

        Ok(fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), Value::String(value)))
            .collect())
    }
}
