//! Markup → typed domain records.
//!
//! Both extractors are a sequence of find-required-node-or-fail steps:
//! they either return a fully populated record or a typed error, never a
//! partially filled one. The page structure is assumed stable; a missing
//! required node means the site changed and the cache must not be used.

mod contacts;
mod menu;

pub use contacts::extract_contacts;
pub use menu::extract_menu;

/// Trimmed text content of an element, text nodes joined.
pub(crate) fn node_text(el: &scraper::ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ").trim().to_string()
}
