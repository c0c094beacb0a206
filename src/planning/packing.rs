use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Result, TravelError};

/// Standard checked-bag allowance.
pub const DEFAULT_ALLOWANCE_GRAMS: u64 = 23_000;

fn default_quantity() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackingItem {
    /// Item name (e.g., "Rain jacket")
    pub name: String,
    /// Weight of a single unit in grams
    pub weight_grams: u64,
    /// Number of units packed
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl PackingItem {
    pub fn new(name: impl Into<String>, weight_grams: u64, quantity: u32) -> Self {
        Self {
            name: name.into(),
            weight_grams,
            quantity,
        }
    }

    /// Weight × quantity, or `None` when it does not fit in a `u64`.
    pub fn line_weight(&self) -> Option<u64> {
        self.weight_grams.checked_mul(u64::from(self.quantity))
    }
}

/// Items going into one bag, plus the bag's weight allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackingList {
    pub items: Vec<PackingItem>,
    /// Weight limit for the bag in grams; the configured allowance applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance_grams: Option<u64>,
}

impl PackingList {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            allowance_grams: None,
        }
    }

    pub fn with_allowance(mut self, allowance_grams: u64) -> Self {
        self.allowance_grams = Some(allowance_grams);
        self
    }

    pub fn with_item(mut self, item: PackingItem) -> Self {
        self.items.push(item);
        self
    }
}

impl Default for PackingList {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PackingSummary {
    pub total_grams: u64,
    pub item_count: u64,
    /// Allowance the list was checked against
    pub allowance_grams: u64,
    /// Allowance left; negative when the bag is over
    pub remaining_grams: i64,
    /// Total as a whole percent of the allowance, saturating at `u32::MAX`
    pub usage_percent: u32,
    pub over_allowance: bool,
    /// Name of the heaviest line (weight × quantity)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heaviest: Option<String>,
}

/// Total a packing list against its own allowance, or `default_allowance_grams`
/// when the list does not carry one.
pub fn summarize(list: &PackingList, default_allowance_grams: u64) -> Result<PackingSummary> {
    let allowance = list.allowance_grams.unwrap_or(default_allowance_grams);
    if allowance == 0 {
        return Err(TravelError::InvalidAllowance(
            "allowance must be greater than zero".to_string(),
        ));
    }
    if i64::try_from(allowance).is_err() {
        return Err(TravelError::InvalidAllowance(format!(
            "allowance of {allowance} g is out of range"
        )));
    }

    let mut total: u64 = 0;
    let mut item_count: u64 = 0;
    // First line wins on ties.
    let mut heaviest: Option<(&PackingItem, u64)> = None;
    for item in &list.items {
        let line = item.line_weight().ok_or_else(|| {
            TravelError::InvalidPackingList(format!("weight of `{}` is out of range", item.name))
        })?;
        total = total.checked_add(line).ok_or_else(|| {
            TravelError::InvalidPackingList("total weight is out of range".to_string())
        })?;
        item_count += u64::from(item.quantity);

        if heaviest.map_or(true, |(_, best)| line > best) {
            heaviest = Some((item, line));
        }
    }

    let remaining = i64::try_from(i128::from(allowance) - i128::from(total)).map_err(|_| {
        TravelError::InvalidPackingList("total weight is out of range".to_string())
    })?;
    let percent =
        (u128::from(total) * 200 + u128::from(allowance)) / (u128::from(allowance) * 2);

    Ok(PackingSummary {
        total_grams: total,
        item_count,
        allowance_grams: allowance,
        remaining_grams: remaining,
        usage_percent: u32::try_from(percent).unwrap_or(u32::MAX),
        over_allowance: total > allowance,
        heaviest: heaviest.map(|(item, _)| item.name.clone()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_under_allowance() {
        let list = PackingList::new()
            .with_allowance(10_000)
            .with_item(PackingItem::new("Laptop", 1_500, 1))
            .with_item(PackingItem::new("T-shirt", 200, 5))
            .with_item(PackingItem::new("Shoes", 900, 1));

        let summary = summarize(&list, DEFAULT_ALLOWANCE_GRAMS).unwrap();
        assert_eq!(summary.total_grams, 3_400);
        assert_eq!(summary.item_count, 7);
        assert_eq!(summary.allowance_grams, 10_000);
        assert_eq!(summary.remaining_grams, 6_600);
        assert_eq!(summary.usage_percent, 34);
        assert!(!summary.over_allowance);
        assert_eq!(summary.heaviest.as_deref(), Some("Laptop"));
    }

    #[test]
    fn test_summary_over_allowance() {
        let list = PackingList::new()
            .with_allowance(7_000)
            .with_item(PackingItem::new("Camera kit", 4_000, 2));
        let summary = summarize(&list, DEFAULT_ALLOWANCE_GRAMS).unwrap();
        assert!(summary.over_allowance);
        assert_eq!(summary.remaining_grams, -1_000);
        assert_eq!(summary.usage_percent, 114);
    }

    #[test]
    fn test_heaviest_tie_keeps_first() {
        let list = PackingList::new()
            .with_item(PackingItem::new("Book", 500, 2))
            .with_item(PackingItem::new("Boots", 1_000, 1));
        let summary = summarize(&list, 5_000).unwrap();
        assert_eq!(summary.heaviest.as_deref(), Some("Book"));
    }

    #[test]
    fn test_missing_allowance_uses_default() {
        let list = PackingList::new().with_item(PackingItem::new("Tent", 2_400, 1));
        let summary = summarize(&list, 7_000).unwrap();
        assert_eq!(summary.allowance_grams, 7_000);
        assert_eq!(summary.remaining_grams, 4_600);
    }

    #[test]
    fn test_empty_list_and_zero_allowance() {
        let summary = summarize(&PackingList::new(), DEFAULT_ALLOWANCE_GRAMS).unwrap();
        assert_eq!(summary.total_grams, 0);
        assert_eq!(summary.heaviest, None);

        let err = summarize(&PackingList::new().with_allowance(0), DEFAULT_ALLOWANCE_GRAMS)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ALLOWANCE");

        let err = summarize(&PackingList::new(), 0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ALLOWANCE");
    }

    #[test]
    fn test_huge_weights_are_rejected() {
        let list = PackingList::new().with_item(PackingItem::new("Crate", u64::MAX, 2));
        let err = summarize(&list, DEFAULT_ALLOWANCE_GRAMS).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PACKING_LIST");

        let list = PackingList::new()
            .with_item(PackingItem::new("Pallet", u64::MAX - 1, 1))
            .with_item(PackingItem::new("Pallet", 2, 1));
        let err = summarize(&list, DEFAULT_ALLOWANCE_GRAMS).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PACKING_LIST");

        let unbounded = PackingList::new().with_allowance(u64::MAX);
        let err = summarize(&unbounded, DEFAULT_ALLOWANCE_GRAMS).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ALLOWANCE");
    }

    #[test]
    fn test_large_but_representable_weights() {
        let list =
            PackingList::new().with_item(PackingItem::new("Crate", 100_000_000_000_000_000, 1));
        let summary = summarize(&list, DEFAULT_ALLOWANCE_GRAMS).unwrap();
        assert_eq!(summary.usage_percent, u32::MAX);
        assert_eq!(summary.remaining_grams, 23_000 - 100_000_000_000_000_000);

        let list = PackingList::new()
            .with_allowance(1)
            .with_item(PackingItem::new("Boulder", i64::MAX as u64, 1));
        let summary = summarize(&list, DEFAULT_ALLOWANCE_GRAMS).unwrap();
        assert_eq!(summary.remaining_grams, 1 - i64::MAX);
        assert_eq!(summary.usage_percent, u32::MAX);
        assert!(summary.over_allowance);
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let list: PackingList =
            serde_json::from_str(r#"{"items":[{"name":"Hat","weight_grams":120}]}"#).unwrap();
        assert_eq!(list.items[0].quantity, 1);
        assert_eq!(list.allowance_grams, None);
    }
}
