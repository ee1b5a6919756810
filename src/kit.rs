//! Kit item schema
//!
//! Every kit counter the panel knows about is described once here. The
//! employee cards, the quantity steppers in the employee forms, the dashboard
//! counters and the stock grid split all iterate this list instead of
//! hard-coding per-item markup.

use serde::{Deserialize, Serialize};

/// Grouping used when laying out kit fields and stock cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KitGroup {
    /// Bag, pen, diary, bottle
    Essentials,
    /// T-shirt sizes
    Tshirt,
}

/// One kit counter tracked per employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KitItem {
    Bag,
    Pen,
    Diary,
    Bottle,
    TshirtS,
    TshirtM,
    TshirtL,
    TshirtXl,
    TshirtXxl,
    TshirtXxxl,
}

impl KitItem {
    pub fn all() -> &'static [KitItem] {
        &[
            KitItem::Bag,
            KitItem::Pen,
            KitItem::Diary,
            KitItem::Bottle,
            KitItem::TshirtS,
            KitItem::TshirtM,
            KitItem::TshirtL,
            KitItem::TshirtXl,
            KitItem::TshirtXxl,
            KitItem::TshirtXxxl,
        ]
    }

    /// Items of one group, in display order
    pub fn in_group(group: KitGroup) -> impl Iterator<Item = KitItem> {
        Self::all().iter().copied().filter(move |item| item.group() == group)
    }

    pub fn group(&self) -> KitGroup {
        match self {
            KitItem::Bag | KitItem::Pen | KitItem::Diary | KitItem::Bottle => KitGroup::Essentials,
            _ => KitGroup::Tshirt,
        }
    }

    /// Name of the matching stock item on the backend
    pub fn stock_name(&self) -> &'static str {
        match self {
            KitItem::Bag => "bag",
            KitItem::Pen => "pen",
            KitItem::Diary => "diary",
            KitItem::Bottle => "bottle",
            KitItem::TshirtS => "tshirt_s",
            KitItem::TshirtM => "tshirt_m",
            KitItem::TshirtL => "tshirt_l",
            KitItem::TshirtXl => "tshirt_xl",
            KitItem::TshirtXxl => "tshirt_xxl",
            KitItem::TshirtXxxl => "tshirt_xxxl",
        }
    }

    /// Employee form / payload key, e.g. `tshirt_xl_quantity`
    pub fn field_key(&self) -> String {
        format!("{}_quantity", self.stock_name())
    }

    /// Label used on employee badges
    pub fn badge_label(&self) -> &'static str {
        match self {
            KitItem::Bag => "Bag",
            KitItem::Pen => "Pen",
            KitItem::Diary => "Diary",
            KitItem::Bottle => "Bottle",
            KitItem::TshirtS => "T-shirt S",
            KitItem::TshirtM => "T-shirt M",
            KitItem::TshirtL => "T-shirt L",
            KitItem::TshirtXl => "T-shirt XL",
            KitItem::TshirtXxl => "T-shirt XXL",
            KitItem::TshirtXxxl => "T-shirt XXXL",
        }
    }

    /// Short label used next to the form steppers (sizes only show the size)
    pub fn stepper_label(&self) -> &'static str {
        match self {
            KitItem::TshirtS => "S",
            KitItem::TshirtM => "M",
            KitItem::TshirtL => "L",
            KitItem::TshirtXl => "XL",
            KitItem::TshirtXxl => "XXL",
            KitItem::TshirtXxxl => "XXXL",
            other => other.badge_label(),
        }
    }

    /// Element id of the dashboard counter for this item
    pub fn stat_id(&self) -> &'static str {
        match self {
            KitItem::Bag => "bags-distributed",
            KitItem::Pen => "pens-distributed",
            KitItem::Diary => "diaries-distributed",
            KitItem::Bottle => "bottles-distributed",
            KitItem::TshirtS => "tshirt-s-distributed",
            KitItem::TshirtM => "tshirt-m-distributed",
            KitItem::TshirtL => "tshirt-l-distributed",
            KitItem::TshirtXl => "tshirt-xl-distributed",
            KitItem::TshirtXxl => "tshirt-xxl-distributed",
            KitItem::TshirtXxxl => "tshirt-xxxl-distributed",
        }
    }
}

/// Per-employee kit counters, flattened into the employee JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitCounts {
    #[serde(default)]
    pub bag_quantity: u32,
    #[serde(default)]
    pub pen_quantity: u32,
    #[serde(default)]
    pub diary_quantity: u32,
    #[serde(default)]
    pub bottle_quantity: u32,
    #[serde(default)]
    pub tshirt_s_quantity: u32,
    #[serde(default)]
    pub tshirt_m_quantity: u32,
    #[serde(default)]
    pub tshirt_l_quantity: u32,
    #[serde(default)]
    pub tshirt_xl_quantity: u32,
    #[serde(default)]
    pub tshirt_xxl_quantity: u32,
    #[serde(default)]
    pub tshirt_xxxl_quantity: u32,
}

impl KitCounts {
    pub fn get(&self, item: KitItem) -> u32 {
        match item {
            KitItem::Bag => self.bag_quantity,
            KitItem::Pen => self.pen_quantity,
            KitItem::Diary => self.diary_quantity,
            KitItem::Bottle => self.bottle_quantity,
            KitItem::TshirtS => self.tshirt_s_quantity,
            KitItem::TshirtM => self.tshirt_m_quantity,
            KitItem::TshirtL => self.tshirt_l_quantity,
            KitItem::TshirtXl => self.tshirt_xl_quantity,
            KitItem::TshirtXxl => self.tshirt_xxl_quantity,
            KitItem::TshirtXxxl => self.tshirt_xxxl_quantity,
        }
    }
}

/// Whether a stock item belongs to the t-shirt grid
pub fn is_tshirt_stock(item_name: &str) -> bool {
    item_name.starts_with("tshirt_")
}

/// Human readable stock item name
///
/// Known kit items use their badge label; anything else gets its first
/// letter capitalised.
pub fn format_item_name(item_name: &str) -> String {
    if let Some(item) = KitItem::all().iter().find(|item| item.stock_name() == item_name) {
        if item.group() == KitGroup::Tshirt {
            return item.badge_label().to_string();
        }
    }

    let mut chars = item_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_item_name() {
        assert_eq!(format_item_name("pen"), "Pen");
        assert_eq!(format_item_name("tshirt_xl"), "T-shirt XL");
        assert_eq!(format_item_name("tshirt_xxxl"), "T-shirt XXXL");
        assert_eq!(format_item_name("lanyard"), "Lanyard");
        assert_eq!(format_item_name(""), "");
    }

    #[test]
    fn test_field_keys_contain_quantity() {
        for item in KitItem::all() {
            assert!(item.field_key().contains("quantity"));
        }
        assert_eq!(KitItem::TshirtXxl.field_key(), "tshirt_xxl_quantity");
    }

    #[test]
    fn test_groups_partition_items() {
        assert_eq!(KitItem::in_group(KitGroup::Essentials).count(), 4);
        assert_eq!(KitItem::in_group(KitGroup::Tshirt).count(), 6);
        assert!(KitItem::in_group(KitGroup::Tshirt).all(|i| is_tshirt_stock(i.stock_name())));
    }

    #[test]
    fn test_kit_counts_lookup() {
        let counts = KitCounts {
            bag_quantity: 1,
            pen_quantity: 2,
            tshirt_xl_quantity: 3,
            ..Default::default()
        };
        assert_eq!(counts.get(KitItem::TshirtXl), 3);
        assert_eq!(counts.get(KitItem::Diary), 0);
    }
}
