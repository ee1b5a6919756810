//! Modal dialog system for the panel
//!
//! Exactly one modal can be open at a time. Each modal carries its own form
//! state so nothing outlives the dialog: closing a modal throws its edits
//! away.

use super::forms::{FormData, NumberInput, StepDirection};
use super::{action_button, escape, render_form_fields};
use crate::events::Action;
use crate::kit::format_item_name;

// ============================================================================
// MODAL KINDS
// ============================================================================

/// The four dialogs of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    AddEmployee,
    UpdateEmployee,
    UpdateStock,
    AddStockItem,
}

impl ModalKind {
    pub fn element_id(&self) -> &'static str {
        match self {
            ModalKind::AddEmployee => "add-employee-modal",
            ModalKind::UpdateEmployee => "update-employee-modal",
            ModalKind::UpdateStock => "update-stock-modal",
            ModalKind::AddStockItem => "add-item-modal",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ModalKind::AddEmployee => "Add New Employee",
            ModalKind::UpdateEmployee => "Update Employee",
            ModalKind::UpdateStock => "Update Stock",
            ModalKind::AddStockItem => "Add New Item",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            ModalKind::AddEmployee => "Add Employee",
            ModalKind::UpdateEmployee => "Update Employee",
            ModalKind::UpdateStock => "Update Stock",
            ModalKind::AddStockItem => "Add Item",
        }
    }
}

/// How a modal was dismissed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    /// The x icon in the header
    Icon,
    /// The cancel button in the footer
    Cancel,
    /// A click on the dimmed area around the dialog
    Backdrop,
}

impl CloseTrigger {
    pub fn from_attr(attr: &str) -> Option<Self> {
        match attr {
            "icon" => Some(CloseTrigger::Icon),
            "cancel" => Some(CloseTrigger::Cancel),
            "backdrop" => Some(CloseTrigger::Backdrop),
            _ => None,
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            CloseTrigger::Icon => "icon",
            CloseTrigger::Cancel => "cancel",
            CloseTrigger::Backdrop => "backdrop",
        }
    }
}

// ============================================================================
// STOCK ADJUSTMENT
// ============================================================================

/// Pending quantity of the stock adjustment modal
///
/// Edits accumulate here and only reach the backend on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAdjustment {
    pub item_name: String,
    /// Quantity when the modal opened
    pub original: i64,
    pending: NumberInput,
}

impl StockAdjustment {
    pub fn new(item_name: impl Into<String>, quantity: i64, step: i64) -> Self {
        Self {
            item_name: item_name.into(),
            original: quantity,
            pending: NumberInput::new().value(quantity).step(step),
        }
    }

    pub fn pending(&self) -> i64 {
        self.pending.get_value()
    }

    pub fn step(&self) -> i64 {
        self.pending.get_step()
    }

    pub fn set_step(&mut self, step: i64) {
        self.pending.set_step(step);
    }

    pub fn adjust(&mut self, direction: StepDirection) {
        self.pending.apply(direction);
    }

    /// Signed difference against the opening quantity
    pub fn delta(&self) -> i64 {
        self.pending() - self.original
    }
}

// ============================================================================
// ACTIVE MODAL
// ============================================================================

/// An open modal together with its form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveModal {
    AddEmployee(FormData),
    UpdateEmployee(FormData),
    UpdateStock(StockAdjustment),
    AddStockItem(FormData),
}

impl ActiveModal {
    pub fn kind(&self) -> ModalKind {
        match self {
            ActiveModal::AddEmployee(_) => ModalKind::AddEmployee,
            ActiveModal::UpdateEmployee(_) => ModalKind::UpdateEmployee,
            ActiveModal::UpdateStock(_) => ModalKind::UpdateStock,
            ActiveModal::AddStockItem(_) => ModalKind::AddStockItem,
        }
    }

    /// Form of the modal, if it has one
    pub fn form_mut(&mut self) -> Option<&mut FormData> {
        match self {
            ActiveModal::AddEmployee(form)
            | ActiveModal::UpdateEmployee(form)
            | ActiveModal::AddStockItem(form) => Some(form),
            ActiveModal::UpdateStock(_) => None,
        }
    }
}

// ============================================================================
// MODAL MANAGER
// ============================================================================

/// Holds the single open modal and its submit state
///
/// Every `open` starts a new generation. Submit results carry the generation
/// they were issued under and only touch the modal if it is still that one.
#[derive(Debug, Default)]
pub struct ModalManager {
    open: Option<ActiveModal>,
    generation: u64,
    submitting: bool,
}

impl ModalManager {
    /// Open a modal, replacing whichever one was open
    pub fn open(&mut self, modal: ActiveModal) {
        self.generation += 1;
        self.open = Some(modal);
        self.submitting = false;
    }

    /// Close the open modal
    pub fn close(&mut self) -> Option<ActiveModal> {
        self.submitting = false;
        self.open.take()
    }

    pub fn kind(&self) -> Option<ModalKind> {
        self.open.as_ref().map(ActiveModal::kind)
    }

    pub fn active(&self) -> Option<&ActiveModal> {
        self.open.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveModal> {
        self.open.as_mut()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.open.is_some() && self.generation == generation
    }

    /// Mark the open modal as submitting; returns its generation and a snapshot
    ///
    /// Returns `None` when nothing is open or a submit is already in flight.
    pub fn begin_submit(&mut self) -> Option<(u64, ActiveModal)> {
        if self.submitting {
            return None;
        }
        let snapshot = self.open.clone()?;
        self.submitting = true;
        Some((self.generation, snapshot))
    }

    /// Clear the in-flight marker if `generation` is still the open modal
    pub fn finish_submit(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.submitting = false;
        }
    }

    /// Close the modal a submit was issued for, if it is still open
    pub fn close_submitted(&mut self, generation: u64) -> Option<ActiveModal> {
        if !self.is_current(generation) {
            return None;
        }
        self.close()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Full markup of the open modal: backdrop, header, body and footer
pub fn render_modal(modal: &ActiveModal, submitting: bool) -> String {
    let kind = modal.kind();
    let body = match modal {
        ActiveModal::AddEmployee(form)
        | ActiveModal::UpdateEmployee(form)
        | ActiveModal::AddStockItem(form) => render_form_fields(form),
        ActiveModal::UpdateStock(adjustment) => render_stock_adjustment(adjustment),
    };

    let submit_attrs = if submitting { " disabled" } else { "" };
    format!(
        r#"<div id="{id}" class="modal active"><div class="modal-backdrop" {backdrop}></div><div class="modal-content"><div class="modal-header"><h3>{title}</h3>{close}</div><form class="modal-body">{body}<div class="form-actions">{cancel}<button type="submit" class="btn btn-primary"{submit_attrs}>{submit}</button></div></form></div></div>"#,
        id = kind.element_id(),
        backdrop = Action::CloseModal(CloseTrigger::Backdrop).attrs(),
        title = kind.title(),
        close = action_button("close", &Action::CloseModal(CloseTrigger::Icon), "&times;"),
        body = body,
        cancel = action_button(
            "btn btn-secondary",
            &Action::CloseModal(CloseTrigger::Cancel),
            "Cancel"
        ),
        submit_attrs = submit_attrs,
        submit = kind.submit_label(),
    )
}

fn render_stock_adjustment(adjustment: &StockAdjustment) -> String {
    let delta = adjustment.delta();
    let delta_class = match delta {
        d if d > 0 => "positive",
        d if d < 0 => "negative",
        _ => "neutral",
    };
    format!(
        r#"<input type="hidden" name="item_name" value="{name}"><div class="form-group"><label>Item</label><input type="text" value="{display}" readonly></div><div class="form-group"><label for="step_amount">Step</label><input type="number" id="step_amount" name="step_amount" value="{step}" min="1"></div><div class="quantity-controls">{minus}<span id="pending-quantity">{pending}</span>{plus}</div><p class="stock-delta {delta_class}">Change: {delta:+}</p>"#,
        name = escape(&adjustment.item_name),
        display = escape(&format_item_name(&adjustment.item_name)),
        step = adjustment.step(),
        minus = action_button(
            "qty-btn minus",
            &Action::AdjustStock(StepDirection::Down),
            "-"
        ),
        pending = adjustment.pending(),
        plus = action_button("qty-btn plus", &Action::AdjustStock(StepDirection::Up), "+"),
        delta_class = delta_class,
        delta = delta,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_one_modal_open() {
        let mut manager = ModalManager::default();
        manager.open(ActiveModal::AddStockItem(FormData::new()));
        manager.open(ActiveModal::UpdateStock(StockAdjustment::new("pen", 5, 1)));
        assert_eq!(manager.kind(), Some(ModalKind::UpdateStock));

        manager.close();
        assert_eq!(manager.kind(), None);
        assert!(manager.active().is_none());
    }

    #[test]
    fn test_submit_guard() {
        let mut manager = ModalManager::default();
        assert!(manager.begin_submit().is_none());

        manager.open(ActiveModal::AddEmployee(FormData::new()));
        let (generation, _) = manager.begin_submit().unwrap();
        assert!(manager.begin_submit().is_none());

        manager.finish_submit(generation);
        assert!(manager.begin_submit().is_some());
    }

    #[test]
    fn test_finish_submit_ignores_reopened_modal() {
        let mut manager = ModalManager::default();
        manager.open(ActiveModal::UpdateStock(StockAdjustment::new("bag", 5, 1)));
        let (generation, _) = manager.begin_submit().unwrap();

        manager.close();
        manager.open(ActiveModal::UpdateStock(StockAdjustment::new("pen", 5, 1)));
        manager.begin_submit().unwrap();
        manager.finish_submit(generation);
        assert!(manager.is_submitting());
        assert!(manager.close_submitted(generation).is_none());
        assert_eq!(manager.kind(), Some(ModalKind::UpdateStock));
    }

    #[test]
    fn test_close_submitted_closes_same_generation() {
        let mut manager = ModalManager::default();
        manager.open(ActiveModal::AddEmployee(FormData::new()));
        let (generation, _) = manager.begin_submit().unwrap();
        assert!(manager.close_submitted(generation).is_some());
        assert_eq!(manager.kind(), None);
        assert!(!manager.is_submitting());
    }

    #[test]
    fn test_stock_adjustment_accumulates() {
        let mut adjustment = StockAdjustment::new("bag", 3, 5);
        adjustment.adjust(StepDirection::Up);
        assert_eq!(adjustment.pending(), 8);
        assert_eq!(adjustment.delta(), 5);

        adjustment.adjust(StepDirection::Down);
        adjustment.adjust(StepDirection::Down);
        assert_eq!(adjustment.pending(), 0);
        assert_eq!(adjustment.delta(), -3);
    }

    #[test]
    fn test_render_stock_modal() {
        let modal = ActiveModal::UpdateStock(StockAdjustment::new("tshirt_m", 12, 2));
        let html = render_modal(&modal, false);
        assert!(html.contains(r#"id="update-stock-modal""#));
        assert!(html.contains("T-shirt M"));
        assert!(html.contains(r#"<span id="pending-quantity">12</span>"#));
        assert!(html.contains(
            r#"<div class="modal-backdrop" data-action="close-modal" data-arg="backdrop"></div><div class="modal-content">"#
        ));
        assert!(html.contains(r#"<div id="update-stock-modal" class="modal active"><div"#));
        assert!(!html.contains("disabled"));
        assert!(render_modal(&modal, true).contains("disabled"));
    }
}
