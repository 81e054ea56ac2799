//! Landing-page extraction: the contact block.

use scraper::{Html, Selector};

use super::node_text;
use crate::catalog::ContactRecord;
use crate::error::{BotError, BotResult};

const PHONE_SELECTOR: &str = r#"a[href^="tel:"]"#;
const ADDRESS_SELECTOR: &str = ".footer__addr";
const INSTAGRAM_SELECTOR: &str = r#"a[href*="instagram"]"#;

/// Parse the landing page into a [`ContactRecord`].
///
/// Contacts are presented as one atomic screen, so all three fields are
/// required: a missing one is a site-structure-changed condition, not
/// something to degrade silently.
pub fn extract_contacts(html: &str) -> BotResult<ContactRecord> {
    let document = Html::parse_document(html);

    let phone = document
        .select(&Selector::parse(PHONE_SELECTOR).unwrap())
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim_start_matches("tel:").to_string())
        .ok_or(BotError::MissingNode {
            page: "landing",
            selector: PHONE_SELECTOR,
        })?;

    let address = document
        .select(&Selector::parse(ADDRESS_SELECTOR).unwrap())
        .next()
        .map(|el| node_text(&el))
        .filter(|text| !text.is_empty())
        .ok_or(BotError::MissingNode {
            page: "landing",
            selector: ADDRESS_SELECTOR,
        })?;

    let instagram = document
        .select(&Selector::parse(INSTAGRAM_SELECTOR).unwrap())
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.to_string())
        .ok_or(BotError::MissingNode {
            page: "landing",
            selector: INSTAGRAM_SELECTOR,
        })?;

    Ok(ContactRecord {
        phone,
        address,
        instagram,
    })
}
