// Copyright 2026 Rebar Bot Contributors
// SPDX-License-Identifier: Apache-2.0

//! The navigation state machine: four screens driven by callback tags.
//!
//! Every incoming interaction carries an opaque tag; it is decoded once
//! into a [`NavEvent`] and rendered into a (text, keyboard) pair. The
//! controller is a pure function of (catalog, event) — it holds no
//! per-conversation state, so a single instance serves every chat
//! concurrently and the transport layer owns whatever session notion it
//! wants (Telegram's: none, the tag alone identifies the next screen).

use crate::catalog::Catalog;
use crate::error::NavError;

pub const TAG_START: &str = "start";
pub const TAG_MAIN_MENU: &str = "main_menu";
pub const TAG_CONTACTS: &str = "contacts";
const TAG_CATEGORY_PREFIX: &str = "cat_";

/// A decoded interaction event. The closed set of screens reachable by
/// a button press; anything else fails decoding and never reaches the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// Initial `/start` command or the explicit back-to-start button.
    Start,
    /// Open the category list.
    MainMenu,
    /// Open the item list of the category at this enumeration position.
    Category(usize),
    /// Open the contact screen.
    Contacts,
}

impl NavEvent {
    /// Decode an event tag. The only place tag strings are interpreted.
    pub fn parse(tag: &str) -> Result<Self, NavError> {
        match tag {
            TAG_START => Ok(Self::Start),
            TAG_MAIN_MENU => Ok(Self::MainMenu),
            TAG_CONTACTS => Ok(Self::Contacts),
            other => other
                .strip_prefix(TAG_CATEGORY_PREFIX)
                .and_then(|suffix| suffix.parse::<usize>().ok())
                .map(Self::Category)
                .ok_or_else(|| NavError::UnknownTag(other.to_string())),
        }
    }
}

/// What a button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Feed this tag back as the next event.
    Callback(String),
    /// Open an external URL.
    Url(String),
}

/// One inline button: a user-facing label plus its action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    fn callback(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(tag.into()),
        }
    }

    fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// A rendered screen: Markdown text plus button rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
}

/// Renders screens from the catalog snapshot.
///
/// Only immutable configuration lives here (the site URL for the
/// welcome screen's external button); everything else comes in per call.
#[derive(Debug, Clone)]
pub struct Navigator {
    site_url: String,
}

impl Navigator {
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
        }
    }

    /// Produce the screen for one event. Pure: same catalog + same
    /// event, byte-identical rendering.
    pub fn handle(&self, catalog: &Catalog, event: NavEvent) -> Result<Rendering, NavError> {
        match event {
            NavEvent::Start => Ok(self.welcome()),
            NavEvent::MainMenu => Ok(category_list(catalog)),
            NavEvent::Category(index) => item_list(catalog, index),
            NavEvent::Contacts => Ok(contacts(catalog)),
        }
    }

    fn welcome(&self) -> Rendering {
        Rendering {
            text: "Добро пожаловать в *Rebar.uz* 🥩".to_string(),
            keyboard: vec![
                vec![Button::callback("🍽 Меню", TAG_MAIN_MENU)],
                vec![Button::callback("📞 Контакты", TAG_CONTACTS)],
                vec![Button::url("🌐 Сайт", &self.site_url)],
            ],
        }
    }
}

fn category_list(catalog: &Catalog) -> Rendering {
    let mut keyboard: Vec<Vec<Button>> = catalog
        .categories
        .iter()
        .enumerate()
        .map(|(idx, cat)| {
            vec![Button::callback(
                format!("▫️ {}", cat.title),
                format!("{TAG_CATEGORY_PREFIX}{idx}"),
            )]
        })
        .collect();
    keyboard.push(vec![Button::callback("⬅️ Назад", TAG_START)]);

    Rendering {
        text: "Выберите категорию:".to_string(),
        keyboard,
    }
}

fn item_list(catalog: &Catalog, index: usize) -> Result<Rendering, NavError> {
    let category = catalog
        .categories
        .get_index(index)
        .ok_or(NavError::IndexOutOfRange {
            index,
            len: catalog.categories.len(),
        })?;

    let lines: Vec<String> = category
        .items
        .iter()
        .map(|item| format!("• {} – {}", item.name, item.price))
        .collect();

    Ok(Rendering {
        text: format!("*{}*\n{}", category.title, lines.join("\n")),
        keyboard: vec![vec![Button::callback("⬅️ Назад", TAG_MAIN_MENU)]],
    })
}

fn contacts(catalog: &Catalog) -> Rendering {
    let c = &catalog.contacts;
    Rendering {
        text: format!(
            "*Rebar – стейк-хаус*\n📍 {}\n📞 [Позвонить](tel:{})\n📸 [Instagram]({})",
            c.address, c.phone, c.instagram
        ),
        keyboard: vec![vec![Button::callback("⬅️ Назад", TAG_START)]],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CategoryMap, ContactRecord, MenuItem};

    fn fixture() -> Catalog {
        let mut categories = CategoryMap::new();
        categories.open("Закуски");
        categories.append(
            "Закуски",
            MenuItem {
                name: "Салат".into(),
                price: "25 000 сум".into(),
                image_url: String::new(),
            },
        );
        categories.open("Стейки");
        categories.append(
            "Стейки",
            MenuItem {
                name: "Рибай".into(),
                price: "180 000 сум".into(),
                image_url: String::new(),
            },
        );
        Catalog {
            categories,
            contacts: ContactRecord {
                phone: "+998712005050".into(),
                address: "Ташкент, ул. Тараса Шевченко 28".into(),
                instagram: "https://instagram.com/rebar.uz".into(),
            },
        }
    }

    fn nav() -> Navigator {
        Navigator::new("https://rebar.uz")
    }

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(NavEvent::parse("start").unwrap(), NavEvent::Start);
        assert_eq!(NavEvent::parse("main_menu").unwrap(), NavEvent::MainMenu);
        assert_eq!(NavEvent::parse("contacts").unwrap(), NavEvent::Contacts);
        assert_eq!(NavEvent::parse("cat_0").unwrap(), NavEvent::Category(0));
        assert_eq!(NavEvent::parse("cat_17").unwrap(), NavEvent::Category(17));
    }

    #[test]
    fn test_parse_rejects_unknown_tags() {
        for tag in ["", "cat_", "cat_x", "cat_-1", "menu", "START", "cat_1extra"] {
            assert!(
                matches!(NavEvent::parse(tag), Err(NavError::UnknownTag(_))),
                "tag {tag:?} should not parse"
            );
        }
    }

    #[test]
    fn test_welcome_buttons() {
        let r = nav().handle(&fixture(), NavEvent::Start).unwrap();
        assert!(r.text.contains("Rebar.uz"));
        assert_eq!(r.keyboard.len(), 3);
        assert_eq!(
            r.keyboard[0][0].action,
            ButtonAction::Callback("main_menu".into())
        );
        assert_eq!(
            r.keyboard[1][0].action,
            ButtonAction::Callback("contacts".into())
        );
        assert_eq!(
            r.keyboard[2][0].action,
            ButtonAction::Url("https://rebar.uz".into())
        );
    }

    #[test]
    fn test_category_list_orders_buttons_by_catalog() {
        let r = nav().handle(&fixture(), NavEvent::MainMenu).unwrap();
        assert_eq!(r.text, "Выберите категорию:");
        assert_eq!(r.keyboard.len(), 3); // two categories + back
        assert_eq!(r.keyboard[0][0].label, "▫️ Закуски");
        assert_eq!(r.keyboard[0][0].action, ButtonAction::Callback("cat_0".into()));
        assert_eq!(r.keyboard[1][0].label, "▫️ Стейки");
        assert_eq!(r.keyboard[1][0].action, ButtonAction::Callback("cat_1".into()));
        assert_eq!(r.keyboard[2][0].action, ButtonAction::Callback("start".into()));
    }

    #[test]
    fn test_item_list_references_category_at_position() {
        let r = nav().handle(&fixture(), NavEvent::Category(1)).unwrap();
        assert_eq!(r.text, "*Стейки*\n• Рибай – 180 000 сум");
        assert_eq!(
            r.keyboard,
            vec![vec![Button::callback("⬅️ Назад", "main_menu")]]
        );
    }

    #[test]
    fn test_item_list_out_of_range_is_an_error_not_a_rendering() {
        let catalog = fixture();
        for index in [2usize, 99] {
            let err = nav().handle(&catalog, NavEvent::Category(index)).unwrap_err();
            assert!(matches!(
                err,
                NavError::IndexOutOfRange { index: i, len: 2 } if i == index
            ));
        }
        // Every in-range index renders.
        for index in 0..catalog.categories.len() {
            assert!(nav().handle(&catalog, NavEvent::Category(index)).is_ok());
        }
    }

    #[test]
    fn test_contacts_screen_renders_clickable_phone() {
        let r = nav().handle(&fixture(), NavEvent::Contacts).unwrap();
        assert!(r.text.contains("📍 Ташкент, ул. Тараса Шевченко 28"));
        assert!(r.text.contains("(tel:+998712005050)"));
        assert!(r.text.contains("(https://instagram.com/rebar.uz)"));
        assert_eq!(r.keyboard, vec![vec![Button::callback("⬅️ Назад", "start")]]);
    }

    #[test]
    fn test_back_navigation_round_trip_is_byte_identical() {
        let catalog = fixture();
        let nav = nav();
        let welcome = nav.handle(&catalog, NavEvent::Start).unwrap();

        // Welcome -> CategoryList -> ItemList -> CategoryList -> Welcome,
        // following the tags the rendered buttons carry.
        let menu = nav.handle(&catalog, NavEvent::parse("main_menu").unwrap()).unwrap();
        let ButtonAction::Callback(cat_tag) = &menu.keyboard[0][0].action else {
            panic!("category button must be a callback");
        };
        let items = nav.handle(&catalog, NavEvent::parse(cat_tag).unwrap()).unwrap();
        let ButtonAction::Callback(back_tag) = &items.keyboard[0][0].action else {
            panic!("back button must be a callback");
        };
        let menu_again = nav.handle(&catalog, NavEvent::parse(back_tag).unwrap()).unwrap();
        assert_eq!(menu, menu_again);

        let ButtonAction::Callback(start_tag) = &menu_again.keyboard.last().unwrap()[0].action
        else {
            panic!("back button must be a callback");
        };
        let welcome_again = nav.handle(&catalog, NavEvent::parse(start_tag).unwrap()).unwrap();
        assert_eq!(welcome, welcome_again);
    }

    #[test]
    fn test_empty_catalog_main_menu_has_only_back() {
        let catalog = Catalog {
            categories: CategoryMap::new(),
            contacts: fixture().contacts,
        };
        let r = nav().handle(&catalog, NavEvent::MainMenu).unwrap();
        assert_eq!(r.keyboard.len(), 1);
        assert_eq!(r.keyboard[0][0].label, "⬅️ Назад");

        let err = nav().handle(&catalog, NavEvent::Category(0)).unwrap_err();
        assert!(matches!(err, NavError::IndexOutOfRange { index: 0, len: 0 }));
    }
}
