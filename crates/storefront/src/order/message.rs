//! Telegram order notification text.
//!
//! Messages are sent with `parse_mode: Markdown` (the legacy flavor), so
//! customer-typed text is escaped with [`escape_markdown`].

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use oleh_garden_core::group_thousands;

use super::{Customer, Order};

/// `uk-UA` date and time, e.g. `05.10.2025, 14:03:27`.
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// Escape the characters legacy Telegram Markdown treats as markup.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Render the notification sent to the shop's chat for a new order.
#[must_use]
pub fn render_message(order: &Order, store_name: &str, placed_at: NaiveDateTime) -> String {
    let mut message = format!(
        "🛒 *Нове замовлення з сайту {}*\n\n",
        escape_markdown(store_name)
    );

    write_customer(&mut message, &order.customer);

    message.push_str("\n📦 *Замовлення:*\n");
    for (index, line) in order.lines.iter().enumerate() {
        let _ = writeln!(
            message,
            "{}. {} — {} шт. × {} = {} грн",
            index + 1,
            escape_markdown(&line.title),
            line.qty,
            line.label,
            group_thousands(line.line_total()),
        );
    }

    message.push_str("\n📊 *Підсумок:*\n");
    let _ = writeln!(message, "Всього позицій: {}", order.lines.len());
    let _ = writeln!(message, "Загальна кількість: {} шт.", order.total_items());
    let _ = writeln!(
        message,
        "До сплати: {} грн",
        group_thousands(order.total_amount())
    );

    let _ = write!(
        message,
        "\n⏰ Час замовлення: {}",
        placed_at.format(TIMESTAMP_FORMAT)
    );
    message
}

fn write_customer(message: &mut String, customer: &Customer) {
    message.push_str("👤 *Клієнт:*\n");
    let _ = writeln!(
        message,
        "Ім'я: {} {}",
        escape_markdown(&customer.name),
        escape_markdown(&customer.surname)
    );
    let _ = writeln!(message, "Телефон: {}", customer.phone);
    if let Some(email) = &customer.email {
        let _ = writeln!(message, "Email: {}", escape_markdown(email.as_str()));
    }
    if let Some(address) = &customer.address {
        let _ = writeln!(message, "Адреса: {}", escape_markdown(address));
    }
    if let Some(comments) = &customer.comments {
        let _ = writeln!(message, "Коментарі: {}", escape_markdown(comments));
    }

    let delivery = &customer.delivery;
    message.push_str("\n🚚 *Доставка Новою Поштою:*\n");
    let city = delivery
        .city_name
        .as_deref()
        .unwrap_or(&delivery.city_ref);
    let _ = writeln!(message, "Місто: {}", escape_markdown(city));

    let warehouse = match (&delivery.warehouse_number, &delivery.warehouse_address) {
        (Some(number), Some(address)) => format!("№{number}, {address}"),
        (Some(number), None) => format!("№{number}"),
        (None, Some(address)) => address.clone(),
        (None, None) => delivery.warehouse_ref.clone(),
    };
    let _ = writeln!(message, "Відділення: {}", escape_markdown(&warehouse));
}
