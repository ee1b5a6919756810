//! Quantity stepper
//!
//! Integer input driven by +/- controls. Values are clamped at 0 so no
//! click sequence can drive a quantity negative.

/// Which stepper button was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    /// Parse the `data-dir` attribute (`plus` / `minus`)
    pub fn from_attr(attr: &str) -> Option<Self> {
        match attr {
            "plus" | "+" | "up" => Some(StepDirection::Up),
            "minus" | "-" | "down" => Some(StepDirection::Down),
            _ => None,
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            StepDirection::Up => "plus",
            StepDirection::Down => "minus",
        }
    }
}

/// Number input state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberInput {
    /// Current value
    value: i64,
    /// Minimum value
    min: i64,
    /// Step increment
    step: i64,
}

impl NumberInput {
    pub fn new() -> Self {
        Self {
            value: 0,
            min: 0,
            step: 1,
        }
    }

    pub fn value(mut self, value: i64) -> Self {
        self.set_value(value);
        self
    }

    pub fn step(mut self, step: i64) -> Self {
        self.set_step(step);
        self
    }

    /// Get the current value
    pub fn get_value(&self) -> i64 {
        self.value
    }

    pub fn get_step(&self) -> i64 {
        self.step
    }

    /// Set value, clamped at the minimum
    pub fn set_value(&mut self, value: i64) {
        self.value = value.max(self.min);
    }

    /// Steps below 1 are raised to 1
    pub fn set_step(&mut self, step: i64) {
        self.step = step.max(1);
    }

    /// Increment value by step
    pub fn increment(&mut self) {
        self.set_value(self.value.saturating_add(self.step));
    }

    /// Decrement value by step
    pub fn decrement(&mut self) {
        self.set_value(self.value.saturating_sub(self.step));
    }

    pub fn apply(&mut self, direction: StepDirection) {
        match direction {
            StepDirection::Up => self.increment(),
            StepDirection::Down => self.decrement(),
        }
    }
}

impl Default for NumberInput {
    fn default() -> Self {
        Self::new()
    }
}
