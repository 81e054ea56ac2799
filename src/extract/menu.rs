//! Menu-page extraction: `.menu-card` sections into ordered categories.

use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

use super::node_text;
use crate::catalog::{CategoryMap, MenuItem};
use crate::error::{BotError, BotResult};

const NAME_SELECTOR: &str = ".menu-item__name";
const PRICE_SELECTOR: &str = ".menu-item__price";

/// Parse the menu page into an ordered `title -> Category` mapping.
///
/// Walks `.menu-card` sections in document order. A `.menu-card__title`
/// node, when present, opens a new current category; `.menu-item` nodes
/// are appended to whichever category is current. Items that appear
/// before any title go into an anonymous category keyed by the empty
/// string. Image URLs are resolved against `base` when site-relative.
pub fn extract_menu(html: &str, base: &Url) -> BotResult<CategoryMap> {
    let document = Html::parse_document(html);
    let card_sel = Selector::parse(".menu-card").unwrap();
    let title_sel = Selector::parse(".menu-card__title").unwrap();
    let item_sel = Selector::parse(".menu-item").unwrap();
    let name_sel = Selector::parse(NAME_SELECTOR).unwrap();
    let price_sel = Selector::parse(PRICE_SELECTOR).unwrap();
    let img_sel = Selector::parse("img").unwrap();

    let mut categories = CategoryMap::new();
    let mut current = String::new();
    let mut warned_untitled = false;

    for card in document.select(&card_sel) {
        if let Some(title) = card.select(&title_sel).next() {
            current = node_text(&title);
            categories.open(&current);
        }

        for node in card.select(&item_sel) {
            let name = node
                .select(&name_sel)
                .next()
                .map(|el| node_text(&el))
                .ok_or(BotError::MissingNode {
                    page: "menu",
                    selector: NAME_SELECTOR,
                })?;
            let price = node
                .select(&price_sel)
                .next()
                .map(|el| node_text(&el))
                .ok_or(BotError::MissingNode {
                    page: "menu",
                    selector: PRICE_SELECTOR,
                })?;
            let image_url = node
                .select(&img_sel)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(|src| resolve_image(base, src))
                .unwrap_or_default();

            if current.is_empty() && !warned_untitled {
                warn!("menu items before any category title, keeping them under an unnamed category");
                warned_untitled = true;
            }
            categories.append(
                &current,
                MenuItem {
                    name,
                    price,
                    image_url,
                },
            );
        }
    }

    Ok(categories)
}

/// Absolute image URL: site-relative sources get the origin prefixed,
/// already-absolute ones pass through.
fn resolve_image(base: &Url, src: &str) -> String {
    base.join(src)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| src.to_string())
}
