//! Test modules for the kit panel
//!
//! Unit tests for self-contained modules (kit schema, forms, rendering,
//! config) live next to the code. The tests here exercise the controller
//! against an in-memory backend.
//!
//! ## Test Categories
//!
//! - **Unit Tests**
//!   - `api_test` - Endpoint building, body serialization, response parsing
//!   - `app_test` - Controller flows: navigation, modals, submits, toasts
//!
//! - **Integration Tests**
//!   - `integration_test` - Multi-step workflows driven through shell commands
//!
//! `support` holds the mock backend and fixtures. Timer-driven behaviour
//! (toast expiry, search debounce, slow responses) runs on tokio's paused
//! clock, so no test waits in real time.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all tests
//! cargo test
//!
//! # Run specific test module
//! cargo test app_test
//!
//! # Show controller logs
//! RUST_LOG=kit_panel=debug cargo test -- --nocapture
//! ```

#[cfg(test)]
pub mod support;



#[cfg(test)]
pub mod integration_test;
