//! Employee view
//!
//! Employee cards with their kit badges, and the add/update employee forms.

use crate::api::Employee;
use crate::components::forms::{
    FormData, FormRules, MaxLength, Required, ValidationResult, ValidatorChain,
};
use crate::components::{action_button, escape};
use crate::events::Action;
use crate::kit::{KitGroup, KitItem};
use serde_json::{Map, Value};

/// Key of the employee id field; travels in the URL on update
pub const EMPLOYEE_ID_FIELD: &str = "employee_id";

/// Identity fields in form order: (name, label)
pub const IDENTITY_FIELDS: &[(&str, &str)] = &[
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("emergency_no", "Emergency Contact"),
    ("blood_group", "Blood Group"),
    ("department_name", "Department"),
];

fn identity_value<'a>(employee: &'a Employee, field: &str) -> &'a str {
    match field {
        "first_name" => &employee.first_name,
        "last_name" => &employee.last_name,
        "emergency_no" => &employee.emergency_no,
        "blood_group" => &employee.blood_group,
        "department_name" => &employee.department_name,
        _ => "",
    }
}

/// Blank form for a new employee, all kit quantities at 0
pub fn new_employee_form() -> FormData {
    let mut form = FormData::new().text(EMPLOYEE_ID_FIELD, "Employee ID", "");
    for (name, label) in IDENTITY_FIELDS {
        form = form.text(name, label, "");
    }
    with_kit_steppers(form, |_| 0)
}

/// Update form pre-filled from the backend record
///
/// The id is hidden: it identifies the record and is not editable.
pub fn update_employee_form(employee: &Employee) -> FormData {
    let mut form = FormData::new().hidden(EMPLOYEE_ID_FIELD, employee.employee_id.clone());
    for (name, label) in IDENTITY_FIELDS {
        form = form.text(name, label, identity_value(employee, name));
    }
    with_kit_steppers(form, |item| i64::from(employee.kit.get(item)))
}

fn with_kit_steppers(mut form: FormData, quantity: impl Fn(KitItem) -> i64) -> FormData {
    for group in [KitGroup::Essentials, KitGroup::Tshirt] {
        for item in KitItem::in_group(group) {
            form = form.stepper(&item.field_key(), item.stepper_label(), quantity(item));
        }
    }
    form
}

pub fn employee_rules() -> FormRules {
    FormRules::new()
        .field(
            EMPLOYEE_ID_FIELD,
            ValidatorChain::new()
                .add(Required::with_message("Employee ID is required"))
                .add(MaxLength::with_message(50, "Employee ID must be at most 50 characters")),
        )
        .field(
            "first_name",
            ValidatorChain::new().add(Required::with_message("First name is required")),
        )
        .field(
            "last_name",
            ValidatorChain::new().add(Required::with_message("Last name is required")),
        )
}

/// Validate and serialize the add form
pub fn create_payload(form: &FormData) -> Result<Map<String, Value>, String> {
    match employee_rules().validate(form) {
        ValidationResult::Valid => Ok(form.to_payload()),
        ValidationResult::Invalid(message) => Err(message),
    }
}

/// Validate and serialize the update form
///
/// Returns the employee id and the body, which never contains the id.
pub fn update_payload(form: &FormData) -> Result<(String, Map<String, Value>), String> {
    if let ValidationResult::Invalid(message) = employee_rules().validate(form) {
        return Err(message);
    }
    let mut payload = form.to_payload();
    let id = match payload.remove(EMPLOYEE_ID_FIELD) {
        Some(Value::String(id)) => id,
        _ => return Err("Employee ID is required".to_string()),
    };
    Ok((id, payload))
}

/// Employee cards, or the empty state
pub fn render_employee_grid(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return r#"<div class="text-center empty-grid"><h3>No employees found</h3><p>Add some employees to get started.</p></div>"#
            .to_string();
    }
    employees.iter().map(render_employee_card).collect()
}

fn render_employee_card(employee: &Employee) -> String {
    let badges: String = KitItem::all()
        .iter()
        .map(|item| {
            let count = employee.kit.get(*item);
            format!(
                r#"<div class="item-badge{}">{}: {}</div>"#,
                if count > 0 { " has-items" } else { "" },
                item.badge_label(),
                count
            )
        })
        .collect();

    format!(
        r#"<div class="employee-card" data-item="{id}"><div class="employee-header"><div class="employee-info"><h3>{name}</h3><p>{department}</p></div><div class="employee-id">{id}</div></div><div class="employee-details"><p><strong>Blood Group:</strong> {blood}</p><p><strong>Emergency Contact:</strong> {emergency}</p></div><div class="employee-items"><h4>Items Received</h4><div class="items-grid">{badges}</div></div><div class="employee-actions">{update}{delete}</div></div>"#,
        id = escape(&employee.employee_id),
        name = escape(&employee.full_name()),
        department = escape(&employee.department_name),
        blood = escape(&employee.blood_group),
        emergency = escape(&employee.emergency_no),
        badges = badges,
        update = action_button(
            "btn btn-primary",
            &Action::UpdateEmployee {
                id: employee.employee_id.clone()
            },
            "Update"
        ),
        delete = action_button(
            "btn btn-danger",
            &Action::DeleteEmployee {
                id: employee.employee_id.clone()
            },
            "Delete"
        ),
    )
}
