//! Dashboard view
//!
//! Aggregate kit counters plus the low-stock alert list.

use crate::api::{EmployeeStats, LowStockItem};
use crate::components::{action_button, escape};
use crate::events::Action;
use crate::kit::KitItem;

/// Element id of the employee counter
pub const TOTAL_EMPLOYEES_ID: &str = "total-employees";

/// Data behind one dashboard render
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardData {
    pub stats: EmployeeStats,
    pub low_stock: Vec<LowStockItem>,
}

impl DashboardData {
    pub fn low_stock_item(&self, name: &str) -> Option<&LowStockItem> {
        self.low_stock.iter().find(|item| item.name == name)
    }
}

/// Counter element ids with their values, in display order
pub fn stat_counters(stats: &EmployeeStats) -> Vec<(&'static str, u64)> {
    let mut counters = vec![(TOTAL_EMPLOYEES_ID, stats.total_employees)];
    counters.extend(
        KitItem::all()
            .iter()
            .map(|item| (item.stat_id(), stats.distributed(*item))),
    );
    counters
}

/// Alert list, or the "all good" notice when nothing is low
pub fn render_low_stock_alerts(items: &[LowStockItem]) -> String {
    if items.is_empty() {
        return r#"<div class="alert alert-info"><h4>All Good!</h4><p>No items are currently low in stock.</p></div>"#
            .to_string();
    }

    items
        .iter()
        .map(|item| {
            let restock = Action::Restock {
                item: item.name.clone(),
            };
            format!(
                r#"<div class="alert" data-item="{key}"><h4>Low Stock Alert: {name}</h4><p>Current quantity: {quantity} (Danger level: {danger})</p>{button}</div>"#,
                key = escape(&item.name),
                name = escape(&item.name),
                quantity = item.quantity,
                danger = item.danger_level,
                button = action_button("btn btn-primary restock-btn", &restock, "Restock"),
            )
        })
        .collect()
}
