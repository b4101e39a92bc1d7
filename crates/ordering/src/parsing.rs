//! Classification of inbound text into dialogue events.

use crate::Menu;
use crate::text::{
    LABEL_CANCEL, LABEL_CONFIRM, LABEL_HOURS, LABEL_MENU, LABEL_PHONE, QUANTITY_KEYS,
};

/// What one inbound message means to the order flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Start,
    Drink(String),
    Quantity(u32),
    Confirm,
    Cancel,
    Menu,
    Hours,
    Phone,
    Unrecognized,
}

pub(crate) fn parse_event(text: &str, menu: &Menu) -> Event {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Event::Unrecognized;
    }
    if is_start_command(trimmed) {
        return Event::Start;
    }
    if menu.contains(trimmed) {
        return Event::Drink(trimmed.to_string());
    }
    if let Some(quantity) = parse_quantity(trimmed) {
        return Event::Quantity(quantity);
    }
    match trimmed {
        LABEL_CONFIRM => Event::Confirm,
        LABEL_CANCEL => Event::Cancel,
        LABEL_MENU => Event::Menu,
        LABEL_PHONE => Event::Phone,
        LABEL_HOURS => Event::Hours,
        _ => Event::Unrecognized,
    }
}

/// `/start`, `/start payload` and `/start@botname` all count.
fn is_start_command(text: &str) -> bool {
    match text.strip_prefix("/start") {
        Some(rest) => rest.is_empty() || rest.starts_with(' ') || rest.starts_with('@'),
        None => false,
    }
}

/// Accepts plain digits and the keycaps the quantity keyboard sends;
/// anything outside 1–5 is rejected.
fn parse_quantity(text: &str) -> Option<u32> {
    if let Some(idx) = QUANTITY_KEYS.iter().position(|key| *key == text) {
        return Some(idx as u32 + 1);
    }
    match text.parse::<u32>() {
        Ok(n) if (1..=5).contains(&n) => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cafe;

    fn menu() -> Menu {
        Cafe::default().menu
    }

    #[test]
    fn start_command_variants() {
        assert_eq!(parse_event("/start", &menu()), Event::Start);
        assert_eq!(parse_event("  /start  ", &menu()), Event::Start);
        assert_eq!(parse_event("/start@cafe_bot", &menu()), Event::Start);
        assert_eq!(parse_event("/start deep-link", &menu()), Event::Start);
        assert_eq!(parse_event("/started", &menu()), Event::Unrecognized);
    }

    #[test]
    fn configured_drinks_match_exactly() {
        assert_eq!(
            parse_event("☕ Капучино", &menu()),
            Event::Drink("☕ Капучино".to_string())
        );
        assert_eq!(parse_event("Капучино", &menu()), Event::Unrecognized);
        assert_eq!(parse_event("🍩 Пончик", &menu()), Event::Unrecognized);
    }

    #[test]
    fn quantities_in_range() {
        for (text, expected) in [("1", 1), ("3", 3), ("5", 5)] {
            assert_eq!(parse_event(text, &menu()), Event::Quantity(expected));
        }
    }

    #[test]
    fn keycap_quantities() {
        assert_eq!(parse_event("1️⃣", &menu()), Event::Quantity(1));
        assert_eq!(parse_event("5️⃣", &menu()), Event::Quantity(5));
    }

    #[test]
    fn out_of_range_quantities_are_unrecognized() {
        for text in ["0", "6", "-1", "abc", "", "  "] {
            assert_eq!(parse_event(text, &menu()), Event::Unrecognized, "{text:?}");
        }
    }

    #[test]
    fn control_phrases() {
        assert_eq!(parse_event("Подтвердить", &menu()), Event::Confirm);
        assert_eq!(parse_event("Меню", &menu()), Event::Menu);
        assert_eq!(parse_event("🔙 Отмена", &menu()), Event::Cancel);
        assert_eq!(parse_event("📞 Позвонить", &menu()), Event::Phone);
        assert_eq!(parse_event("⏰ Часы работы", &menu()), Event::Hours);
        assert_eq!(parse_event("подтвердить", &menu()), Event::Unrecognized);
    }
}
