//! In-memory document model
//!
//! The controller never touches a real DOM. It writes into a [`Document`]:
//! rendered HTML per region, text slots for the dashboard counters, and the
//! handful of flags the page chrome needs. A host mirrors this onto whatever
//! it displays.

use crate::app::Page;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Parts of the page whose markup is replaced wholesale on render
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    LowStockAlerts,
    StockGrid,
    TshirtStockGrid,
    EmployeesGrid,
    /// Body of whichever modal is open
    Modal,
    /// Confirmation prompt overlay
    Confirm,
}

impl Region {
    /// Element id the region renders into
    pub fn element_id(&self) -> &'static str {
        match self {
            Region::LowStockAlerts => "low-stock-alerts",
            Region::StockGrid => "stock-grid",
            Region::TshirtStockGrid => "tshirt-stock-grid",
            Region::EmployeesGrid => "employees-grid",
            Region::Modal => "modal-root",
            Region::Confirm => "confirm-root",
        }
    }
}

/// Toast severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn title(&self) -> &'static str {
        match self {
            ToastKind::Success => "Success",
            ToastKind::Error => "Error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Everything currently visible on the page
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub active_page: Page,
    pub page_title: String,
    pub search_visible: bool,
    pub add_employee_visible: bool,
    /// Search box contents
    pub search_value: String,
    /// Body scroll is locked while a modal is open
    pub scroll_locked: bool,
    /// Id of the active modal element, if any
    pub active_modal: Option<&'static str>,
    pub loading: bool,
    regions: BTreeMap<Region, String>,
    texts: BTreeMap<String, String>,
    toasts: Vec<Toast>,
    next_toast_id: u64,
}

impl Document {
    pub fn region(&self, region: Region) -> &str {
        self.regions.get(&region).map(String::as_str).unwrap_or("")
    }

    pub fn set_region(&mut self, region: Region, html: String) {
        self.regions.insert(region, html);
    }

    pub fn clear_region(&mut self, region: Region) {
        self.regions.remove(&region);
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    pub fn set_text(&mut self, id: &str, text: impl ToString) {
        self.texts.insert(id.to_string(), text.to_string());
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Append a toast and return its id
    pub fn push_toast(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_toast_id += 1;
        let id = self.next_toast_id;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn remove_toast(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Plain-text dump used by the shell
    pub fn snapshot(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {} [{}]", self.page_title, self.active_page.name());
        if self.search_visible {
            let _ = writeln!(out, "search: {:?}", self.search_value);
        }
        if self.loading {
            let _ = writeln!(out, "(loading)");
        }
        if let Some(modal) = self.active_modal {
            let _ = writeln!(out, "modal: {}", modal);
        }
        for (id, text) in &self.texts {
            let _ = writeln!(out, "#{} = {}", id, text);
        }
        for (region, html) in &self.regions {
            let _ = writeln!(out, "-- #{}", region.element_id());
            let _ = writeln!(out, "{}", html.trim());
        }
        for toast in &self.toasts {
            let _ = writeln!(out, "[{}] {}", toast.kind.title(), toast.message);
        }
        out
    }
}
