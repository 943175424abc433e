//! Projection of items into display rows.

use crate::item::{Item, ItemId};
use crate::view::parse_date;

pub const COLUMNS: [&str; 7] = ["Name", "Details", "Qty", "Price", "Date", "Type", "Image"];

/// One table row, every cell already formatted.
///
/// `id` is not displayed; it is what edit and delete act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: ItemId,
    pub cells: [String; 7],
}

/// Full redraw: one row per item, in the given order.
pub fn rows(items: &[Item]) -> Vec<Row> {
    items.iter().map(row).collect()
}

pub fn row(item: &Item) -> Row {
    Row {
        id: item.id.clone(),
        cells: [
            item.name.clone(),
            item.details.clone(),
            item.quantity.to_string(),
            format_price(item.price),
            format_date(&item.date),
            item.kind.clone(),
            describe_image(&item.image),
        ],
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// `M/D/YYYY`, or `Invalid Date` when the stored string does not parse.
pub fn format_date(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%-m/%-d/%Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Short label for an image reference: URLs as-is, data URLs by type and size.
pub fn describe_image(image: &str) -> String {
    let Some(rest) = image.strip_prefix("data:") else {
        return image.to_string();
    };
    let Some((header, payload)) = rest.split_once(',') else {
        return "image".to_string();
    };
    let mime = header.split(';').next().unwrap_or("");
    let mime = if mime.is_empty() { "image" } else { mime };
    // Base64 carries 3 bytes per 4 chars, less one per `=` pad.
    let padding = payload.bytes().rev().take_while(|&b| b == b'=').count();
    let bytes = (payload.len() / 4 * 3).saturating_sub(padding);
    format!("{} ({})", mime, format_size(bytes))
}

fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}
