//! The in-memory menu snapshot.
//!
//! Built exactly once at startup by [`Catalog::load`], then shared
//! read-only (`Arc`) into the navigation layer and the webhook server.
//! Nothing here has a `&mut` API past load, so concurrent handlers read
//! it without locks.

use std::collections::HashMap;

use url::Url;

use crate::error::BotResult;
use crate::extract;
use crate::fetch::PageFetcher;

/// A single dish as presented on the menu page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    /// Price text verbatim, currency formatting included ("25 000 сум").
    /// Never parsed to a number — the site owns the formatting.
    pub price: String,
    /// Absolute image URL, or empty when the item has no image.
    pub image_url: String,
}

/// A named, ordered group of menu items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// Insertion-ordered `title -> Category` mapping.
///
/// `HashMap` iteration order is unspecified, so presentation order is
/// kept explicitly: categories live in a `Vec` in document order and the
/// map only stores positions. Re-inserting an existing title replaces
/// its items but keeps its original position.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    categories: Vec<Category>,
    index: HashMap<String, usize>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a category: create it empty, or reset an existing one's
    /// items in place (last write wins on content, first on position).
    pub fn open(&mut self, title: &str) {
        match self.index.get(title) {
            Some(&pos) => self.categories[pos].items.clear(),
            None => {
                self.index.insert(title.to_string(), self.categories.len());
                self.categories.push(Category {
                    title: title.to_string(),
                    items: Vec::new(),
                });
            }
        }
    }

    /// Append an item to a category, opening it first if absent.
    pub fn append(&mut self, title: &str, item: MenuItem) {
        if !self.index.contains_key(title) {
            self.open(title);
        }
        let pos = self.index[title];
        self.categories[pos].items.push(item);
    }

    pub fn get(&self, title: &str) -> Option<&Category> {
        self.index.get(title).map(|&pos| &self.categories[pos])
    }

    /// Category at enumeration position `index` (0-based, document order).
    pub fn get_index(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Contact block scraped from the landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    /// Digits and symbols as extracted from the `tel:` anchor.
    pub phone: String,
    pub address: String,
    /// Instagram profile URL, verbatim.
    pub instagram: String,
}

/// The immutable snapshot of everything scraped at startup.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub categories: CategoryMap,
    pub contacts: ContactRecord,
}

impl Catalog {
    /// Run the extraction pipeline: fetch the landing page for contacts,
    /// then the menu page for categories. Sequential, once, to
    /// completion — any failure here aborts startup.
    pub async fn load(fetcher: &PageFetcher, source_url: &Url, menu_url: &Url) -> BotResult<Self> {
        tracing::info!("parsing {source_url}");
        let landing = fetcher.get(source_url.as_str()).await?;
        let contacts = extract::extract_contacts(&landing)?;

        let menu = fetcher.get(menu_url.as_str()).await?;
        let categories = extract::extract_menu(&menu, source_url)?;

        tracing::info!("loaded {} categories", categories.len());
        Ok(Self {
            categories,
            contacts,
        })
    }
}
