//! Form components for the panel
//!
//! Field storage, quantity steppers and the validation rules run before a
//! form is submitted.

mod form_data;
mod number_input;
mod validation;

pub use form_data::*;
pub use number_input::*;
pub use validation::*;

/// Apply a stepper click to a numeric form field
///
/// The current value is read leniently (garbage counts as 0) and the result
/// never drops below 0.
pub fn step_field(
    form: &mut FormData,
    name: &str,
    direction: StepDirection,
) -> Result<i64, FieldError> {
    let current = form
        .get(name)
        .map(parse_int_lenient)
        .ok_or_else(|| FieldError::Unknown(name.to_string()))?;

    let mut input = NumberInput::new().value(current);
    input.apply(direction);
    let next = input.get_value();
    form.set(name, next.to_string())?;
    Ok(next)
}
