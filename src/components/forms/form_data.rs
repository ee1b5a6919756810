//! Form field storage and submit serialization

use serde_json::{Map, Value};

/// One named form control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
    /// Read-only fields change only through steppers
    pub readonly: bool,
    /// Hidden fields are submitted but not shown
    pub hidden: bool,
}

/// Ordered form fields, the way a browser form enumerates its entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<FormField>,
}

/// Why a field edit was refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("no field named {0}")]
    Unknown(String),

    #[error("field {0} is read-only")]
    ReadOnly(String),
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an editable text field
    pub fn text(mut self, name: &str, label: &str, value: impl Into<String>) -> Self {
        self.fields.push(FormField {
            name: name.to_string(),
            label: label.to_string(),
            value: value.into(),
            readonly: false,
            hidden: false,
        });
        self
    }

    /// Add a stepper-driven numeric field
    pub fn stepper(mut self, name: &str, label: &str, value: i64) -> Self {
        self.fields.push(FormField {
            name: name.to_string(),
            label: label.to_string(),
            value: value.to_string(),
            readonly: true,
            hidden: false,
        });
        self
    }

    /// Add a hidden field
    pub fn hidden(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push(FormField {
            name: name.to_string(),
            label: String::new(),
            value: value.into(),
            readonly: true,
            hidden: true,
        });
        self
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.field(name).map(|f| f.value.as_str())
    }

    /// User edit of a field
    pub fn input(&mut self, name: &str, value: impl Into<String>) -> Result<(), FieldError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FieldError::Unknown(name.to_string()))?;
        if field.readonly {
            return Err(FieldError::ReadOnly(name.to_string()));
        }
        field.value = value.into();
        Ok(())
    }

    /// Programmatic write, bypassing the read-only flag
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), FieldError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| FieldError::Unknown(name.to_string()))?;
        field.value = value.into();
        Ok(())
    }

    /// Serialize for submission
    ///
    /// Every field whose name contains `quantity` becomes an integer (0 when
    /// it does not parse); everything else is sent as the raw string.
    pub fn to_payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        for field in &self.fields {
            let value = if field.name.contains("quantity") {
                Value::from(parse_int_lenient(&field.value))
            } else {
                Value::from(field.value.clone())
            };
            payload.insert(field.name.clone(), value);
        }
        payload
    }
}

/// Parse the leading integer of `raw`
///
/// Leading whitespace and a sign are accepted and parsing stops at the first
/// non-digit, so `"12abc"` is 12. Returns 0 when no digits lead the input or
/// the value does not fit.
pub fn parse_int_lenient(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..end]
    };

    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}
