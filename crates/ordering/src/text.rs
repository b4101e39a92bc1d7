//! Every user-visible message in one place, formatted as Telegram HTML.
//!
//! The reply-keyboard labels live here too: the parser matches inbound text
//! against these exact strings, so keyboards and parsing stay in lock step.

use chrono::{DateTime, FixedOffset};

use crate::{Cafe, Menu, Order};

/// Used when the transport hands over no usable first name.
pub const FALLBACK_NAME: &str = "друг";

pub const LABEL_CONFIRM: &str = "Подтвердить";
pub const LABEL_MENU: &str = "Меню";
pub const LABEL_CANCEL: &str = "🔙 Отмена";
pub const LABEL_PHONE: &str = "📞 Позвонить";
pub const LABEL_HOURS: &str = "⏰ Часы работы";

/// Quantity keycaps in order, quantities 1 through 5.
pub const QUANTITY_KEYS: [&str; 5] = ["1️⃣", "2️⃣", "3️⃣", "4️⃣", "5️⃣"];

/// Interpolated user input must not break the HTML parse mode.
pub(crate) fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn welcome(cafe: &Cafe, user_name: &str, now: DateTime<FixedOffset>) -> String {
    format!(
        "👋 Здравствуйте, {name}!\n\n\
         Добро пожаловать в <b>{cafe_name}</b>\n\n\
         ⏰ {status}\n\n\
         Выберите напиток из меню 👇",
        name = escape_html(user_name),
        cafe_name = cafe.name,
        status = cafe.hours.status_at(now),
    )
}

pub fn menu_prompt() -> String {
    "☕ Выберите напиток из меню 👇".to_string()
}

/// Closed-state block: status, menu, phone, farewell.
pub fn closed(cafe: &Cafe, now: DateTime<FixedOffset>) -> String {
    format!(
        "🔒 <b>{name} сейчас закрыто!</b>\n\n\
         ⏰ {status}\n\n\
         ☕ <b>Наше меню:</b>\n{menu}\n\n\
         📞 <b>Связаться:</b>\n<code>{phone}</code>\n\n\
         ✨ <i>До скорой встречи!</i>",
        name = cafe.name,
        status = cafe.hours.status_at(now),
        menu = menu_line(&cafe.menu),
        phone = cafe.phone,
    )
}

/// Menu joined into one line, `<b>{drink}</b> {price}₽` per entry.
pub(crate) fn menu_line(menu: &Menu) -> String {
    menu.entries()
        .iter()
        .map(|entry| format!("<b>{}</b> {}₽", entry.name, entry.price))
        .collect::<Vec<_>>()
        .join(" • ")
}

pub fn quantity_prompt(drink: &str, price: i64) -> String {
    format!(
        "Отличный выбор! <b>{drink}</b> — {price}₽\n\n\
         Сколько чашек? Выберите от 1 до 5 👇"
    )
}

pub fn quantity_reprompt() -> String {
    "Пожалуйста, выберите количество от 1 до 5 👇".to_string()
}

pub fn summary(drink: &str, quantity: u32, total: i64) -> String {
    format!(
        "📋 <b>Ваш заказ:</b>\n\n\
         {drink} × {quantity}\n\
         💰 Итого: <b>{total}₽</b>\n\n\
         Подтверждаете?"
    )
}

pub fn wait() -> String {
    "⏳ Вы недавно оформили заказ. Подождите минуту и попробуйте снова 🙏".to_string()
}

pub fn retry_later() -> String {
    "😔 Не получилось обработать сообщение. Попробуйте ещё раз чуть позже.".to_string()
}

pub fn fallback() -> String {
    "Я вас не понял 🙈\nВыберите напиток из меню или отправьте /start".to_string()
}

pub fn hours_info(cafe: &Cafe, now: DateTime<FixedOffset>) -> String {
    format!(
        "⏰ {status}\n\nРаботаем ежедневно с {start}:00 до {end}:00 (МСК)",
        status = cafe.hours.status_at(now),
        start = cafe.hours.start(),
        end = cafe.hours.end(),
    )
}

pub fn phone_info(cafe: &Cafe) -> String {
    format!(
        "📞 Позвоните нам:\n<code>{}</code>\n\nБудем рады вашему звонку!",
        cafe.phone
    )
}

pub fn receipt(cafe: &Cafe, order: &Order) -> String {
    format!(
        "✅ <b>Заказ принят!</b>\n\n\
         {drink} × {quantity} — <b>{total}₽</b>\n\n\
         Спасибо, {name}! Ждём вас в {cafe_name} ✨",
        drink = order.drink,
        quantity = order.quantity,
        total = order.total,
        name = escape_html(&order.user_name),
        cafe_name = cafe.name,
    )
}

pub fn admin_notification(order: &Order) -> String {
    format!(
        "🔔 <b>Новый заказ!</b>\n\n\
         {drink} × {quantity} по {unit_price}₽\n\
         💰 Сумма: <b>{total}₽</b>\n\n\
         👤 {name} (<code>{user_id}</code>)\n\
         🕐 {time} (МСК)",
        drink = order.drink,
        quantity = order.quantity,
        unit_price = order.unit_price,
        total = order.total,
        name = escape_html(&order.user_name),
        user_id = order.user_id,
        time = order.placed_at.format("%H:%M"),
    )
}
