//! Grocery list input checks, flyer store detection and the savings report.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::ValidationError;
use crate::models::PriceEntry;

const KNOWN_STORES: [(&str, &str); 5] = [
    ("walmart", "Walmart"),
    ("target", "Target"),
    ("kroger", "Kroger"),
    ("safeway", "Safeway"),
    ("costco", "Costco"),
];

pub fn supported_stores() -> impl Iterator<Item = &'static str> {
    KNOWN_STORES.iter().map(|(_, name)| *name)
}

/// Store name for a flyer URL, or "Store" if it is not one we recognise.
pub fn store_from_url(url: &str) -> &'static str {
    let lower = url.to_lowercase();
    KNOWN_STORES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, name)| *name)
        .unwrap_or("Store")
}

pub fn validate_item(name: &str, quantity: u32) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if quantity == 0 {
        return Err(ValidationError::InvalidQuantity);
    }
    Ok(())
}

pub fn validate_flyer_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(ValidationError::MissingField("url"));
    }
    Ok(())
}

pub fn validate_price(item: &str, store: &str, price_cents: i64, regular_cents: i64) -> Result<(), ValidationError> {
    if item.trim().is_empty() {
        return Err(ValidationError::MissingField("item"));
    }
    if store.trim().is_empty() {
        return Err(ValidationError::MissingField("store"));
    }
    if price_cents < 0 || price_cents > regular_cents {
        return Err(ValidationError::InvalidPrice);
    }
    Ok(())
}

/// Parses "3.49", "$3.49" or "3" into cents.
pub fn parse_cents(input: &str) -> Option<i64> {
    let s = input.trim().trim_start_matches('$');
    let (whole, frac) = match s.split_once('.') {
        Some((w, f)) => (w, f),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) || frac.len() > 2 {
        return None;
    }
    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().ok()? * 10,
        _ => frac.parse().ok()?,
    };
    whole.checked_mul(100)?.checked_add(frac)
}

pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}${}.{:02}", sign, abs / 100, abs % 100)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemPrices<'a> {
    pub item: &'a str,
    pub entries: Vec<&'a PriceEntry>,
}

impl<'a> ItemPrices<'a> {
    /// Lowest price for the item; the first entry wins a tie.
    pub fn best_deal(&self) -> Option<&'a PriceEntry> {
        self.entries
            .iter()
            .copied()
            .reduce(|best, cur| if cur.price_cents < best.price_cents { cur } else { best })
    }

    fn min_savings(&self) -> i64 {
        self.entries.iter().map(|e| e.savings_cents()).min().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSavings<'a> {
    pub store: &'a str,
    pub savings_cents: i64,
    /// Items for which this store has the lowest price.
    pub best_items: Vec<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsReport<'a> {
    pub items: Vec<ItemPrices<'a>>,
    /// Sum over items of the smallest saving any store offers.
    pub total_savings_cents: i64,
    /// Stores by total savings, highest first.
    pub stores: Vec<StoreSavings<'a>>,
}

impl<'a> SavingsReport<'a> {
    pub fn top_store(&self) -> Option<&StoreSavings<'a>> {
        self.stores.first()
    }
}

pub fn report(prices: &[PriceEntry]) -> SavingsReport<'_> {
    let mut items: Vec<ItemPrices> = Vec::new();
    for entry in prices {
        match items.iter_mut().find(|i| i.item.eq_ignore_ascii_case(&entry.item)) {
            Some(group) => group.entries.push(entry),
            None => items.push(ItemPrices {
                item: &entry.item,
                entries: vec![entry],
            }),
        }
    }

    let total_savings_cents = items.iter().map(ItemPrices::min_savings).sum();

    let mut order: Vec<&str> = Vec::new();
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for entry in prices {
        let store = entry.store.as_str();
        if !totals.contains_key(store) {
            order.push(store);
        }
        *totals.entry(store).or_insert(0) += entry.savings_cents();
    }

    let mut stores: Vec<StoreSavings> = order
        .into_iter()
        .map(|store| {
            let best_items = items
                .iter()
                .filter(|group| {
                    let lowest = group.entries.iter().map(|e| e.price_cents).min();
                    group
                        .entries
                        .iter()
                        .any(|e| e.store == store && Some(e.price_cents) == lowest)
                })
                .map(|group| group.item)
                .collect();
            StoreSavings {
                store,
                savings_cents: totals[store],
                best_items,
            }
        })
        .collect();
    stores.sort_by(|a, b| b.savings_cents.cmp(&a.savings_cents));

    SavingsReport {
        items,
        total_savings_cents,
        stores,
    }
}
