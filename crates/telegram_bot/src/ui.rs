use teloxide::types::{KeyboardButton, KeyboardMarkup};

use ordering::Menu;
use ordering::text::{
    LABEL_CANCEL, LABEL_CONFIRM, LABEL_HOURS, LABEL_MENU, LABEL_PHONE, QUANTITY_KEYS,
};

/// Maps a keyboard hint from the core onto a concrete reply keyboard.
/// `Keep` leaves the customer's current keyboard on screen.
pub(crate) fn reply_keyboard(hint: ordering::KeyboardHint, menu: &Menu) -> Option<KeyboardMarkup> {
    match hint {
        ordering::KeyboardHint::Menu => Some(menu_keyboard(menu)),
        ordering::KeyboardHint::Quantity => Some(quantity_keyboard()),
        ordering::KeyboardHint::Confirm => Some(confirm_keyboard()),
        ordering::KeyboardHint::Info => Some(info_keyboard()),
        ordering::KeyboardHint::Keep => None,
    }
}

fn menu_keyboard(menu: &Menu) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = Vec::new();
    for entry in menu.entries() {
        rows.push(vec![KeyboardButton::new(entry.name.clone())]);
    }
    rows.push(info_row());

    KeyboardMarkup::new(rows).resize_keyboard()
}

fn info_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![info_row()]).resize_keyboard()
}

fn info_row() -> Vec<KeyboardButton> {
    vec![
        KeyboardButton::new(LABEL_PHONE),
        KeyboardButton::new(LABEL_HOURS),
    ]
}

fn quantity_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(QUANTITY_KEYS[0]),
            KeyboardButton::new(QUANTITY_KEYS[1]),
            KeyboardButton::new(QUANTITY_KEYS[2]),
        ],
        vec![
            KeyboardButton::new(QUANTITY_KEYS[3]),
            KeyboardButton::new(QUANTITY_KEYS[4]),
            KeyboardButton::new(LABEL_CANCEL),
        ],
    ])
    .resize_keyboard()
    .one_time_keyboard()
}

fn confirm_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(LABEL_CONFIRM),
        KeyboardButton::new(LABEL_MENU),
    ]])
    .resize_keyboard()
    .one_time_keyboard()
}

#[cfg(test)]
mod tests {
    use super::*;

    use ordering::Cafe;

    #[test]
    fn menu_keyboard_offers_every_drink_and_the_info_row() {
        let cafe = Cafe::default();
        let markup = menu_keyboard(&cafe.menu);

        assert_eq!(markup.keyboard.len(), cafe.menu.entries().len() + 1);
        let last = markup.keyboard.last().unwrap();
        assert_eq!(last[0].text, LABEL_PHONE);
        assert_eq!(last[1].text, LABEL_HOURS);
    }

    #[test]
    fn quantity_keyboard_shows_keycaps_and_a_way_back() {
        let markup = quantity_keyboard();

        let texts: Vec<&str> = markup
            .keyboard
            .iter()
            .flatten()
            .map(|button| button.text.as_str())
            .collect();
        assert_eq!(texts, ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣", LABEL_CANCEL]);
        assert_eq!(markup.keyboard[0].len(), 3);
        assert_eq!(markup.keyboard[1].len(), 3);
    }

    #[test]
    fn hints_map_to_their_keyboards() {
        let menu = Cafe::default().menu;

        assert!(reply_keyboard(ordering::KeyboardHint::Menu, &menu).is_some());
        assert!(reply_keyboard(ordering::KeyboardHint::Info, &menu).is_some());
        assert!(reply_keyboard(ordering::KeyboardHint::Keep, &menu).is_none());
    }
}
