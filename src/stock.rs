//! Stock view
//!
//! Stock cards are split into two grids, standard kit items and t-shirt
//! sizes. Each card flags low stock and carries the update, delete and
//! danger-level edit controls.

use crate::api::{NewStockItem, StockItem};
use crate::components::forms::{
    parse_int_lenient, FormData, FormRules, NonNegativeInteger, Required, ValidationResult,
    ValidatorChain,
};
use crate::components::{action_button, escape};
use crate::events::Action;
use crate::kit::{format_item_name, is_tshirt_stock};

/// Split items into (standard, t-shirt), keeping backend order
pub fn split_stock(items: &[StockItem]) -> (Vec<&StockItem>, Vec<&StockItem>) {
    items.iter().partition(|item| !is_tshirt_stock(&item.item_name))
}

/// Cards for one grid
///
/// `editing` names the item whose danger level is being edited in place.
pub fn render_stock_grid(items: &[&StockItem], editing: Option<&str>) -> String {
    if items.is_empty() {
        return r#"<p class="empty-grid">No items</p>"#.to_string();
    }
    items
        .iter()
        .map(|item| render_stock_card(item, editing == Some(item.item_name.as_str())))
        .collect()
}

fn render_stock_card(item: &StockItem, editing_danger: bool) -> String {
    let key = escape(&item.item_name);
    let danger = if editing_danger {
        format!(
            r#"<input type="number" class="danger-level-input" name="danger_level" data-target="{}" value="{}" min="0" autofocus>"#,
            key, item.danger_level
        )
    } else {
        format!(
            r#"<span class="danger-level-value">{}</span>{}"#,
            item.danger_level,
            action_button(
                "icon-btn edit-danger-level",
                &Action::EditDangerLevel {
                    item: item.item_name.clone()
                },
                "Edit"
            )
        )
    };

    format!(
        r#"<div class="stock-item" data-item="{key}"><div class="stock-item-header"><div class="stock-item-name">{name}</div><div class="stock-quantity{low}">{quantity}</div></div><div class="danger-level-label">Danger Level: {danger}</div><div class="stock-actions">{update}{delete}</div></div>"#,
        key = key,
        name = escape(&format_item_name(&item.item_name)),
        low = if item.is_low() { " low" } else { "" },
        quantity = item.quantity,
        danger = danger,
        update = action_button(
            "btn btn-primary",
            &Action::UpdateStock {
                item: item.item_name.clone()
            },
            "Update"
        ),
        delete = action_button(
            "btn btn-danger delete-stock-btn",
            &Action::DeleteStock {
                item: item.item_name.clone()
            },
            "Delete"
        ),
    )
}

// =============================================================================
// Add item form
// =============================================================================

/// Empty add-item form
pub fn new_item_form() -> FormData {
    FormData::new()
        .text("item_name", "Item Name", "")
        .text("quantity", "Quantity", "")
        .text("danger_level", "Danger Level", "")
}

pub fn new_item_rules() -> FormRules {
    FormRules::new()
        .field(
            "item_name",
            ValidatorChain::new().add(Required::with_message("Item name is required")),
        )
        .field(
            "quantity",
            ValidatorChain::new().add(NonNegativeInteger::with_message(
                "Quantity must be a non-negative number",
            )),
        )
        .field(
            "danger_level",
            ValidatorChain::new().add(NonNegativeInteger::with_message(
                "Danger level must be a non-negative number",
            )),
        )
}

/// Validate the add-item form and build the request
///
/// Blank quantity means 0, blank danger level means `default_danger_level`.
pub fn new_item_request(
    form: &FormData,
    default_danger_level: i64,
) -> Result<NewStockItem, String> {
    if let ValidationResult::Invalid(message) = new_item_rules().validate(form) {
        return Err(message);
    }

    let quantity = form.get("quantity").unwrap_or("").trim();
    let danger = form.get("danger_level").unwrap_or("").trim();
    Ok(NewStockItem {
        item_name: form.get("item_name").unwrap_or("").trim().to_string(),
        quantity: parse_int_lenient(quantity),
        danger_level: if danger.is_empty() {
            default_danger_level
        } else {
            parse_int_lenient(danger)
        },
    })
}

/// Parse the value typed into the in-place danger level editor
pub fn parse_danger_level(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|level| *level >= 0)
}
