//! UI events and delegated actions
//!
//! Rendered controls never carry inline handlers. Each clickable element is
//! tagged with `data-action`, plus `data-target` and `data-arg` where the
//! action needs them, and a single delegated handler turns those attributes
//! back into an [`Action`].

use crate::app::Page;
use crate::components::escape;
use crate::components::forms::StepDirection;
use crate::components::modals::CloseTrigger;

/// Something the user clicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Page),
    OpenAddEmployee,
    OpenAddStockItem,
    /// Open the stock adjustment modal for an item
    UpdateStock { item: String },
    DeleteStock { item: String },
    /// Switch an item's danger level into in-place editing
    EditDangerLevel { item: String },
    /// Restock shortcut from a dashboard alert
    Restock { item: String },
    UpdateEmployee { id: String },
    DeleteEmployee { id: String },
    /// Kit quantity stepper inside an employee form
    Step { field: String, direction: StepDirection },
    /// Pending-quantity stepper of the stock adjustment modal
    AdjustStock(StepDirection),
    CloseModal(CloseTrigger),
    /// Answer to the confirmation prompt
    Confirm(bool),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate(_) => "navigate",
            Action::OpenAddEmployee => "add-employee",
            Action::OpenAddStockItem => "add-stock-item",
            Action::UpdateStock { .. } => "update-stock",
            Action::DeleteStock { .. } => "delete-stock",
            Action::EditDangerLevel { .. } => "edit-danger",
            Action::Restock { .. } => "restock",
            Action::UpdateEmployee { .. } => "update-employee",
            Action::DeleteEmployee { .. } => "delete-employee",
            Action::Step { .. } => "step",
            Action::AdjustStock(_) => "adjust-stock",
            Action::CloseModal(_) => "close-modal",
            Action::Confirm(_) => "confirm",
        }
    }

    fn target(&self) -> Option<&str> {
        match self {
            Action::Navigate(page) => Some(page.name()),
            Action::UpdateStock { item }
            | Action::DeleteStock { item }
            | Action::EditDangerLevel { item }
            | Action::Restock { item } => Some(item),
            Action::UpdateEmployee { id } | Action::DeleteEmployee { id } => Some(id),
            Action::Step { field, .. } => Some(field),
            _ => None,
        }
    }

    fn arg(&self) -> Option<&'static str> {
        match self {
            Action::Step { direction, .. } | Action::AdjustStock(direction) => {
                Some(direction.as_attr())
            }
            Action::CloseModal(trigger) => Some(trigger.as_attr()),
            Action::Confirm(true) => Some("yes"),
            Action::Confirm(false) => Some("no"),
            _ => None,
        }
    }

    /// `data-*` attributes for a control that triggers this action
    pub fn attrs(&self) -> String {
        let mut out = format!(r#"data-action="{}""#, self.name());
        if let Some(target) = self.target() {
            out.push_str(&format!(r#" data-target="{}""#, escape(target)));
        }
        if let Some(arg) = self.arg() {
            out.push_str(&format!(r#" data-arg="{}""#, arg));
        }
        out
    }

    /// Rebuild an action from the attributes of the clicked element
    pub fn from_attrs(action: &str, target: Option<&str>, arg: Option<&str>) -> Option<Self> {
        let target = target.map(str::to_string);
        let parsed = match action {
            "navigate" => Action::Navigate(Page::from_name(target.as_deref()?)?),
            "add-employee" => Action::OpenAddEmployee,
            "add-stock-item" => Action::OpenAddStockItem,
            "update-stock" => Action::UpdateStock { item: target? },
            "delete-stock" => Action::DeleteStock { item: target? },
            "edit-danger" => Action::EditDangerLevel { item: target? },
            "restock" => Action::Restock { item: target? },
            "update-employee" => Action::UpdateEmployee { id: target? },
            "delete-employee" => Action::DeleteEmployee { id: target? },
            "step" => Action::Step {
                field: target?,
                direction: StepDirection::from_attr(arg?)?,
            },
            "adjust-stock" => Action::AdjustStock(StepDirection::from_attr(arg?)?),
            "close-modal" => Action::CloseModal(CloseTrigger::from_attr(arg.unwrap_or("icon"))?),
            "confirm" => match arg? {
                "yes" | "ok" | "true" => Action::Confirm(true),
                "no" | "cancel" | "false" => Action::Confirm(false),
                _ => return None,
            },
            _ => return None,
        };
        Some(parsed)
    }
}

/// Input delivered to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Click(Action),
    /// Keystroke in the employee search box (full current value)
    SearchInput(String),
    /// Edit of a field in the open modal
    Input { field: String, value: String },
    /// Blur of the in-place danger level editor
    CommitDangerLevel { item: String, value: String },
    /// Submit of the open modal's form
    Submit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_back(action: &Action) -> Option<Action> {
        let attrs = action.attrs();
        let read = |key: &str| -> Option<String> {
            let needle = format!(r#"{}=""#, key);
            let start = attrs.find(&needle)? + needle.len();
            let end = attrs[start..].find('"')? + start;
            Some(attrs[start..end].to_string())
        };
        Action::from_attrs(
            &read("data-action")?,
            read("data-target").as_deref(),
            read("data-arg").as_deref(),
        )
    }

    #[test]
    fn test_rendered_attrs_parse_back() {
        let actions = vec![
            Action::Navigate(Page::Stock),
            Action::UpdateStock { item: "pen".into() },
            Action::Restock { item: "tshirt_xl".into() },
            Action::DeleteEmployee { id: "E-7".into() },
            Action::Step {
                field: "bag_quantity".into(),
                direction: StepDirection::Down,
            },
            Action::AdjustStock(StepDirection::Up),
            Action::CloseModal(CloseTrigger::Backdrop),
            Action::Confirm(false),
        ];
        for action in actions {
            assert_eq!(parse_back(&action), Some(action));
        }
    }

    #[test]
    fn test_target_is_escaped() {
        let attrs = Action::DeleteStock {
            item: r#"a"b"#.into(),
        }
        .attrs();
        assert!(attrs.contains("a&quot;b"));
    }

    #[test]
    fn test_unknown_or_incomplete_attrs() {
        assert_eq!(Action::from_attrs("explode", None, None), None);
        assert_eq!(Action::from_attrs("update-stock", None, None), None);
        assert_eq!(Action::from_attrs("step", Some("bag_quantity"), None), None);
        assert_eq!(Action::from_attrs("navigate", Some("reports"), None), None);
    }
}
