//! Static café profile assembled once at startup.

use crate::{Menu, MenuEntry, WorkingHours};

/// Everything the assistant knows about the café it serves.
#[derive(Clone, Debug)]
pub struct Cafe {
    pub name: String,
    pub phone: String,
    /// Chat that receives confirmed orders.
    pub admin_chat_id: i64,
    pub hours: WorkingHours,
    pub menu: Menu,
}

/// Built-in profile used for every field the configuration leaves out.
impl Default for Cafe {
    fn default() -> Self {
        Self {
            name: "Кофейня «Уют» ☕".to_string(),
            phone: "+7 989 273-67-56".to_string(),
            admin_chat_id: 1471275603,
            hours: WorkingHours::new(9, 21),
            menu: Menu::new(vec![
                MenuEntry {
                    name: "☕ Капучино".to_string(),
                    price: 250,
                },
                MenuEntry {
                    name: "🥛 Латте".to_string(),
                    price: 270,
                },
                MenuEntry {
                    name: "🍵 Чай".to_string(),
                    price: 180,
                },
                MenuEntry {
                    name: "⚡ Эспрессо".to_string(),
                    price: 200,
                },
            ]),
        }
    }
}
