//! Environment-first configuration.
//!
//! `SOURCE_URL` / `MENU_URL` have working defaults; `TOKEN` and
//! `PUBLIC_URL` are only required to serve, so `check` runs without
//! any environment at all.

use anyhow::{Context, Result};
use url::Url;

/// Site origin scraped at startup; also resolves relative image paths.
const DEFAULT_SOURCE_URL: &str = "https://rebar.uz";

#[derive(Debug, Clone)]
pub struct Config {
    /// Bot token from @BotFather (`TOKEN`).
    pub token: Option<String>,
    /// Public HTTPS base Telegram can reach this server at (`PUBLIC_URL`).
    pub public_url: Option<String>,
    pub source_url: Url,
    pub menu_url: Url,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let source =
            std::env::var("SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string());
        let source_url =
            Url::parse(&source).with_context(|| format!("invalid SOURCE_URL '{source}'"))?;

        let menu_url = match std::env::var("MENU_URL") {
            Ok(explicit) => {
                Url::parse(&explicit).with_context(|| format!("invalid MENU_URL '{explicit}'"))?
            }
            Err(_) => source_url.join("menu").context("deriving menu URL")?,
        };

        Ok(Self {
            token: std::env::var("TOKEN").ok().filter(|v| !v.is_empty()),
            public_url: std::env::var("PUBLIC_URL").ok().filter(|v| !v.is_empty()),
            source_url,
            menu_url,
        })
    }

    pub fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .context("TOKEN is not set (bot token from @BotFather)")
    }

    /// Where Telegram delivers updates: `<PUBLIC_URL>/telegram`.
    pub fn webhook_url(&self) -> Result<String> {
        let public = self
            .public_url
            .as_deref()
            .context("PUBLIC_URL is not set (public HTTPS base of this server)")?;
        Ok(format!("{}/telegram", public.trim_end_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(public_url: Option<&str>) -> Config {
        Config {
            token: None,
            public_url: public_url.map(String::from),
            source_url: Url::parse(DEFAULT_SOURCE_URL).unwrap(),
            menu_url: Url::parse("https://rebar.uz/menu").unwrap(),
        }
    }

    #[test]
    fn test_webhook_url_joins_without_double_slash() {
        let c = config(Some("https://bot.example.com/"));
        assert_eq!(c.webhook_url().unwrap(), "https://bot.example.com/telegram");

        let c = config(Some("https://bot.example.com"));
        assert_eq!(c.webhook_url().unwrap(), "https://bot.example.com/telegram");
    }

    #[test]
    fn test_webhook_url_requires_public_url() {
        assert!(config(None).webhook_url().is_err());
    }

    #[test]
    fn test_default_menu_url_derives_from_source() {
        let source = Url::parse(DEFAULT_SOURCE_URL).unwrap();
        assert_eq!(source.join("menu").unwrap().as_str(), "https://rebar.uz/menu");
    }
}
