//! Derived item lists: search filter and sorter.
//!
//! Both start from the full inventory and return a fresh list; the
//! inventory's own order is never touched.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::item::Item;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field the sorter orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Quantity,
    Price,
    Date,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Quantity, SortKey::Price, SortKey::Date];
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quantity" => Ok(SortKey::Quantity),
            "price" => Ok(SortKey::Price),
            "date" => Ok(SortKey::Date),
            _ => Err(format!("unknown sort field: {}", s)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Quantity => write!(f, "quantity"),
            SortKey::Price => write!(f, "price"),
            SortKey::Date => write!(f, "date"),
        }
    }
}

/// Items whose name or details contain `query`, ignoring case.
pub fn search(items: &[Item], query: &str) -> Vec<Item> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches(&needle))
        .cloned()
        .collect()
}

/// A copy of `items` in ascending order of `key`. Ties keep their order.
pub fn sorted(items: &[Item], key: SortKey) -> Vec<Item> {
    let mut out = items.to_vec();
    match key {
        SortKey::Quantity => out.sort_by(|a, b| a.quantity.total_cmp(&b.quantity)),
        SortKey::Price => out.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::Date => out.sort_by(|a, b| compare_dates(&a.date, &b.date)),
    }
    out
}

/// Sorts by a field name as typed by the user.
///
/// Unrecognized names return the list unchanged.
pub fn sorted_by_name(items: &[Item], field: &str) -> Vec<Item> {
    match field.parse::<SortKey>() {
        Ok(key) => sorted(items, key),
        Err(_) => items.to_vec(),
    }
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

// Unparseable dates go last.
fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
