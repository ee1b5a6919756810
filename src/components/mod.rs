//! Reusable UI components for the panel
//!
//! Modal dialogs, form primitives and the small markup helpers shared by
//! every view.

pub mod forms;
pub mod modals;

use crate::events::Action;
use forms::{FormData, StepDirection};

/// Escape text for use in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Button bound to a delegated action
pub fn action_button(class: &str, action: &Action, label: &str) -> String {
    format!(
        r#"<button type="button" class="{}" {}>{}</button>"#,
        class,
        action.attrs(),
        label
    )
}

/// +/- control around a read-only numeric input
pub fn stepper(name: &str, label: &str, value: &str) -> String {
    let minus = Action::Step {
        field: name.to_string(),
        direction: StepDirection::Down,
    };
    let plus = Action::Step {
        field: name.to_string(),
        direction: StepDirection::Up,
    };
    format!(
        r#"<div class="kit-item"><label>{label}</label><div class="quantity-controls">{minus}<input type="number" name="{name}" value="{value}" min="0" readonly>{plus}</div></div>"#,
        label = escape(label),
        minus = action_button("qty-btn minus", &minus, "-"),
        name = escape(name),
        value = escape(value),
        plus = action_button("qty-btn plus", &plus, "+"),
    )
}

/// Render every field of a form in order
///
/// Read-only fields get steppers, hidden fields become hidden inputs.
pub fn render_form_fields(form: &FormData) -> String {
    let mut html = String::new();
    for field in form.fields() {
        if field.hidden {
            html.push_str(&format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                escape(&field.name),
                escape(&field.value)
            ));
        } else if field.readonly {
            html.push_str(&stepper(&field.name, &field.label, &field.value));
        } else {
            html.push_str(&format!(
                r#"<div class="form-group"><label for="{name}">{label}</label><input type="text" id="{name}" name="{name}" value="{value}"></div>"#,
                name = escape(&field.name),
                label = escape(&field.label),
                value = escape(&field.value),
            ));
        }
    }
    html
}
