//! The drink menu: an ordered list of names and prices in whole rubles.

use serde::Deserialize;

/// Single drink as configured.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MenuEntry {
    pub name: String,
    pub price: i64,
}

/// Menu in display order. Names are unique; on duplicates the first
/// occurrence wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    #[must_use]
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        let mut unique: Vec<MenuEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|known| known.name == entry.name) {
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    /// Price of `name`, if it is on the menu.
    #[must_use]
    pub fn price_of(&self, name: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.price)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.price_of(name).is_some()
    }

    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, price: i64) -> MenuEntry {
        MenuEntry {
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn keeps_configuration_order() {
        let menu = Menu::new(vec![entry("Латте", 270), entry("Чай", 180)]);
        let names: Vec<&str> = menu.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Латте", "Чай"]);
    }

    #[test]
    fn first_duplicate_wins() {
        let menu = Menu::new(vec![entry("Чай", 180), entry("Чай", 500)]);
        assert_eq!(menu.entries().len(), 1);
        assert_eq!(menu.price_of("Чай"), Some(180));
    }

    #[test]
    fn unknown_drink_has_no_price() {
        let menu = Menu::new(vec![entry("Чай", 180)]);
        assert_eq!(menu.price_of("Раф"), None);
        assert!(!menu.contains("Раф"));
    }
}
