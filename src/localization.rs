//! Message catalog for every user-visible string the bot sends.
//!
//! The bot speaks one language. Texts live in a Fluent resource that is
//! compiled into the binary, so a missing file on the host can never leave
//! the bot mute.

use anyhow::{anyhow, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use unic_langid::LanguageIdentifier;

const DEFAULT_LOCALE: &str = "ru";
const DEFAULT_RESOURCE: &str = include_str!("../locales/ru/main.ftl");

/// Fluent-backed message catalog, safe to share between handler tasks
pub struct MessageCatalog {
    bundle: FluentBundle<FluentResource>,
}

impl MessageCatalog {
    /// Create the catalog from the embedded Russian resource
    pub fn new() -> Result<Self> {
        Self::from_source(DEFAULT_LOCALE, DEFAULT_RESOURCE.to_string())
    }

    /// Create a catalog from an arbitrary Fluent source
    pub fn from_source(locale: &str, source: String) -> Result<Self> {
        let locale: LanguageIdentifier = locale.parse()?;
        let resource = FluentResource::try_new(source)
            .map_err(|(_, errors)| anyhow!("invalid message catalog: {errors:?}"))?;

        let mut bundle = FluentBundle::new_concurrent(vec![locale]);
        // Telegram renders the Unicode isolation marks literally
        bundle.set_use_isolating(false);
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow!("conflicting catalog entries: {errors:?}"))?;

        Ok(Self { bundle })
    }

    /// Get a message without arguments
    pub fn get(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Get a message with simple string arguments
    pub fn get_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        let msg = match self.bundle.get_message(key) {
            Some(msg) => msg,
            None => return format!("Missing translation: {key}"),
        };

        let pattern = match msg.value() {
            Some(pattern) => pattern,
            None => return format!("Missing value for key: {key}"),
        };

        let mut errors = vec![];
        let value = self.bundle.format_pattern(pattern, args, &mut errors);
        if !errors.is_empty() {
            tracing::warn!(key, ?errors, "Message formatted with errors");
        }
        value.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MessageCatalog {
        MessageCatalog::new().expect("embedded catalog must parse")
    }

    #[test]
    fn test_existing_key() {
        assert_eq!(catalog().get("choose-category"), "Выберите категорию:");
    }

    #[test]
    fn test_missing_key() {
        let message = catalog().get("nonexistent-key");
        assert!(message.starts_with("Missing translation:"));
    }

    #[test]
    fn test_args_without_isolation_marks() {
        let message = catalog().get_with_args("free-sent", &[("request_id", "1700000000")]);
        assert!(message.contains("#1700000000 "));
        assert!(!message.contains('\u{2068}'));
    }

    #[test]
    fn test_multiline_message() {
        let message = catalog().get_with_args(
            "category-selected",
            &[("category", "Игрушки"), ("hint", "подсказка")],
        );
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Вы выбрали категорию: Игрушки");
        assert_eq!(lines[1], "Рекомендации: подсказка");
    }

    #[test]
    fn test_invalid_source_rejected() {
        assert!(MessageCatalog::from_source("ru", "broken = {".to_string()).is_err());
    }
}
