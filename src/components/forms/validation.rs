//! Form validation utilities
//!
//! Provides validation rules checked before a form is submitted to the
//! backend.

use super::form_data::FormData;

/// Validation result
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid(String),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Validation rule trait
pub trait ValidationRule<T: ?Sized>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;
}

/// Required field validator
pub struct Required {
    message: String,
}

impl Required {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ValidationRule<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.trim().is_empty() {
            ValidationResult::Invalid(self.message.clone())
        } else {
            ValidationResult::Valid
        }
    }
}

/// Maximum length validator
pub struct MaxLength {
    max: usize,
    message: String,
}

impl MaxLength {
    pub fn with_message(max: usize, message: impl Into<String>) -> Self {
        Self {
            max,
            message: message.into(),
        }
    }
}

impl ValidationRule<str> for MaxLength {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.chars().count() > self.max {
            ValidationResult::Invalid(self.message.clone())
        } else {
            ValidationResult::Valid
        }
    }
}

/// Blank or a whole number that is not negative
pub struct NonNegativeInteger {
    message: String,
}

impl NonNegativeInteger {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl ValidationRule<str> for NonNegativeInteger {
    fn validate(&self, value: &str) -> ValidationResult {
        let trimmed = value.trim();
        if trimmed.is_empty() || matches!(trimmed.parse::<i64>(), Ok(n) if n >= 0) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(self.message.clone())
        }
    }
}

/// Validator chain - combines multiple validators
pub struct ValidatorChain<T: ?Sized> {
    validators: Vec<Box<dyn ValidationRule<T>>>,
}

impl<T: ?Sized> ValidatorChain<T> {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    pub fn add(mut self, validator: impl ValidationRule<T> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn validate(&self, value: &T) -> ValidationResult {
        for validator in &self.validators {
            let result = validator.validate(value);
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}

impl<T: ?Sized> Default for ValidatorChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Rules keyed by form field name
#[derive(Default)]
pub struct FormRules {
    fields: Vec<(&'static str, ValidatorChain<str>)>,
}

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, chain: ValidatorChain<str>) -> Self {
        self.fields.push((name, chain));
        self
    }

    /// First failing rule in field order; missing fields validate as blank
    pub fn validate(&self, form: &FormData) -> ValidationResult {
        for (name, chain) in &self.fields {
            let result = chain.validate(form.get(name).unwrap_or(""));
            if !result.is_valid() {
                return result;
            }
        }
        ValidationResult::Valid
    }
}
