use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker in a user principal name that flags an externally authenticated (guest) account.
pub const EXTERNAL_AUTH_UPN_MARKER: &str = "#ext#";

pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

/// A chat participant as reported by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub name: String,
    #[serde(default)]
    pub given_name: Option<String>,
    pub user_principal_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(name: impl Into<String>, user_principal_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            given_name: None,
            user_principal_name: user_principal_name.into(),
            email: None,
        }
    }

    pub fn with_given_name(mut self, given_name: impl Into<String>) -> Self {
        self.given_name = Some(given_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_guest(&self) -> bool {
        self.user_principal_name
            .to_lowercase()
            .contains(EXTERNAL_AUTH_UPN_MARKER)
    }

    /// Guest accounts often have no given name in the directory.
    pub fn first_name(&self) -> &str {
        match self.given_name.as_deref() {
            Some(given) if !given.is_empty() => given,
            _ => &self.name,
        }
    }

    /// The value used to open a chat with this participant.
    pub fn contact_address(&self) -> &str {
        if self.is_guest() {
            if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
                return email;
            }
        }
        &self.user_principal_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationContext {
    pub team_name: String,
    #[serde(default)]
    pub installer: Option<String>,
    pub sender: Identity,
    pub recipient: Identity,
}

impl NotificationContext {
    /// Installer name, if one is known. Empty counts as unknown.
    pub fn known_installer(&self) -> Option<&str> {
        self.installer.as_deref().filter(|i| !i.is_empty())
    }
}

/// Horizontal text alignment as understood by the card host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlignment {
    Left,
    Right,
}

impl TextAlignment {
    pub fn for_locale(locale: &Locale) -> Self {
        if locale.is_right_to_left() {
            TextAlignment::Right
        } else {
            TextAlignment::Left
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TextAlignment::Left => "Left",
            TextAlignment::Right => "Right",
        }
    }
}

const RIGHT_TO_LEFT_LANGUAGES: &[&str] = &[
    "ar", "arc", "ckb", "dv", "fa", "he", "khw", "ks", "ku", "ps", "sd", "syr", "ug", "ur", "yi",
];

const RIGHT_TO_LEFT_SCRIPTS: &[&str] = &["arab", "hebr", "nkoo", "syrc", "thaa"];

/// A language tag such as `en`, `en-US` or `ar-SA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    pub const DEFAULT: &'static str = "en";

    pub fn new(tag: impl Into<String>) -> Self {
        let tag: String = tag.into();
        let tag = tag.trim().replace('_', "-");
        if tag.is_empty() {
            return Self::default();
        }
        Self(tag)
    }

    pub fn tag(&self) -> &str {
        &self.0
    }

    pub fn language(&self) -> String {
        self.0
            .split('-')
            .next()
            .unwrap_or(Self::DEFAULT)
            .to_ascii_lowercase()
    }

    /// Four-letter script subtag, lowercased (`pa-Arab-PK` -> `arab`).
    pub fn script(&self) -> Option<String> {
        self.0
            .split('-')
            .skip(1)
            .find(|sub| sub.len() == 4 && sub.chars().all(|c| c.is_ascii_alphabetic()))
            .map(str::to_ascii_lowercase)
    }

    /// An explicit script subtag decides; otherwise the language's default script does.
    pub fn is_right_to_left(&self) -> bool {
        match self.script() {
            Some(script) => RIGHT_TO_LEFT_SCRIPTS.contains(&script.as_str()),
            None => RIGHT_TO_LEFT_LANGUAGES.contains(&self.language().as_str()),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    PairUpNotification,
}

impl TemplateName {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateName::PairUpNotification => "PairUpNotification",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed card template. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CardTemplate {
    pub name: TemplateName,
    pub body: serde_json::Value,
}

/// Field values substituted into a template.
pub type TemplateDataSet = serde_json::Map<String, serde_json::Value>;

/// A transport-ready card attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    pub content: serde_json::Value,
}

impl Attachment {
    pub fn adaptive_card(content: serde_json::Value) -> Self {
        Self {
            content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
            content,
        }
    }
}
