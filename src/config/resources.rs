//! Localized string table.
//!
//! Strings are grouped by locale tag in a TOML document. Lookups try the full
//! tag (`pt-BR`), then the primary language (`pt`), then [`Locale::DEFAULT`].

use crate::domain::model::Locale;
use crate::domain::ports::ResourceTable;
use crate::utils::error::{CardError, Result};
use std::collections::HashMap;
use std::path::Path;

const EMBEDDED_STRINGS: &str = include_str!("../../resources/strings.toml");

pub mod keys {
    pub const INSTALL_MESSAGE_UNKNOWN_INSTALLER_PART1: &str = "InstallMessageUnknownInstallerPart1";
    pub const INSTALL_MESSAGE_UNKNOWN_INSTALLER_PART2: &str = "InstallMessageUnknownInstallerPart2";
    pub const INSTALL_MESSAGE_UNKNOWN_INSTALLER_PART3: &str = "InstallMessageUnknownInstallerPart3";
    pub const INSTALL_MESSAGE_KNOWN_INSTALLER_PART1: &str = "InstallMessageKnownInstallerPart1";
    pub const INSTALL_MESSAGE_KNOWN_INSTALLER_PART2: &str = "InstallMessageKnownInstallerPart2";
    pub const INSTALL_MESSAGE_KNOWN_INSTALLER_PART3: &str = "InstallMessageKnownInstallerPart3";
    pub const WELCOME_TOUR_TITLE: &str = "WelcomeTourTitle";
    pub const PAUSE_PAIRINGS_BUTTON_TEXT: &str = "PausePairingsButtonText";
    pub const SALUTATION_TITLE_TEXT: &str = "SalutationTitleText";
    pub const TAKE_A_TOUR_BUTTON_TEXT: &str = "TakeATourButtonText";
    pub const BOT_DISPLAY_NAME: &str = "BotDisplayName";
    pub const CHAT_WITH_MESSAGE_BUTTON_TEXT: &str = "ChatWithMessageButtonText";
}

#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    // locale tag (lowercase) -> key -> format string
    locales: HashMap<String, HashMap<String, String>>,
}

impl StringCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_STRINGS)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CardError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parsed: HashMap<String, HashMap<String, String>> =
            toml::from_str(content).map_err(|e| CardError::ConfigError {
                message: format!("String table parsing error: {}", e),
            })?;

        let locales = parsed
            .into_iter()
            .map(|(tag, strings)| (tag.to_ascii_lowercase(), strings))
            .collect();

        Ok(Self { locales })
    }

    /// Overlays `other` on top of this catalog, entry by entry.
    pub fn merge(mut self, other: StringCatalog) -> Self {
        for (tag, strings) in other.locales {
            self.locales.entry(tag).or_default().extend(strings);
        }
        self
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    fn lookup(&self, tag: &str, key: &str) -> Option<&String> {
        self.locales.get(tag).and_then(|strings| strings.get(key))
    }
}

impl ResourceTable for StringCatalog {
    fn get(&self, key: &str, locale: &Locale) -> Result<String> {
        let full_tag = locale.tag().to_ascii_lowercase();
        let language = locale.language();

        let found = [full_tag.as_str(), language.as_str(), Locale::DEFAULT]
            .into_iter()
            .find_map(|tag| self.lookup(tag, key))
            .cloned()
            .ok_or_else(|| CardError::MissingResource {
                key: key.to_string(),
                locale: locale.to_string(),
            });
        found
    }
}

/// Substitutes `{0}`, `{1}`, ... with `args`. `{{` and `}}` produce literal braces.
pub fn format_positional(key: &str, pattern: &str, args: &[&str]) -> Result<String> {
    let invalid = |reason: String| CardError::InvalidFormat {
        key: key.to_string(),
        reason,
    };

    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut index = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) if d.is_ascii_digit() => index.push(d),
                        Some(other) => {
                            return Err(invalid(format!("unexpected '{}' in placeholder", other)))
                        }
                        None => return Err(invalid("unclosed placeholder".to_string())),
                    }
                }
                let position: usize = index
                    .parse()
                    .map_err(|_| invalid("empty placeholder".to_string()))?;
                let arg = args.get(position).ok_or_else(|| {
                    invalid(format!(
                        "placeholder {{{}}} but only {} argument(s)",
                        position,
                        args.len()
                    ))
                })?;
                out.push_str(arg);
            }
            '}' => return Err(invalid("unmatched '}'".to_string())),
            other => out.push(other),
        }
    }

    Ok(out)
}
