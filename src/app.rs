//! Page-state controller for the kit panel
//!
//! [`KitPanel`] owns the whole UI session: the active page, the open modal,
//! cached view data and the [`Document`] the host mirrors. Every user input
//! arrives through [`KitPanel::dispatch`]. Network calls run without holding
//! the state lock; their results are applied only if the request token they
//! were issued is still current.

use crate::api::{ApiError, Backend, Employee, StockItem, StockPatch};
use crate::components::forms::{parse_int_lenient, step_field, StepDirection};
use crate::components::modals::{
    render_modal, ActiveModal, CloseTrigger, ModalKind, ModalManager, StockAdjustment,
};
use crate::components::{action_button, escape};
use crate::config::PanelConfig;
use crate::dashboard::{render_low_stock_alerts, stat_counters, DashboardData};
use crate::dom::{Document, Region, ToastKind};
use crate::employees::{
    create_payload, new_employee_form, render_employee_grid, update_employee_form, update_payload,
};
use crate::events::{Action, UiEvent};
use crate::stock::{
    new_item_form, new_item_request, parse_danger_level, render_stock_grid, split_stock,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Loading state for async data
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    NotStarted,
    Loading,
    Loaded(T),
    Error,
}

impl<T> LoadingState<T> {
    #[allow(dead_code)]
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    #[allow(dead_code)]
    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Mark a fetch as started; loaded data stays visible until replaced
    pub fn begin(&mut self) {
        if !self.is_loaded() {
            *self = LoadingState::Loading;
        }
    }
}

// ============================================================================
// PAGES
// ============================================================================

/// Top-level views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Stock,
    Employees,
}

impl Page {
    pub fn all() -> &'static [Page] {
        &[Page::Dashboard, Page::Stock, Page::Employees]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Stock => "stock",
            Page::Employees => "employees",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|page| page.name() == name)
    }

    /// Header title shown while the page is active
    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Stock => "Stock Management",
            Page::Employees => "Employee Management",
        }
    }
}

// ============================================================================
// REQUEST TOKENS
// ============================================================================

/// Independent load channels; each has its own current token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadSlot {
    Dashboard,
    Stock,
    Employees,
    EmployeeDetail,
}

impl LoadSlot {
    fn index(self) -> usize {
        match self {
            LoadSlot::Dashboard => 0,
            LoadSlot::Stock => 1,
            LoadSlot::Employees => 2,
            LoadSlot::EmployeeDetail => 3,
        }
    }
}

/// Monotonic tokens, one current value per slot; 0 matches nothing
#[derive(Debug, Default)]
struct RequestTokens {
    current: [u64; 4],
    next: u64,
}

impl RequestTokens {
    fn issue(&mut self, slot: LoadSlot) -> u64 {
        self.next += 1;
        self.current[slot.index()] = self.next;
        self.next
    }

    fn is_current(&self, slot: LoadSlot, token: u64) -> bool {
        self.current[slot.index()] == token
    }

    fn invalidate(&mut self, slot: LoadSlot) {
        self.current[slot.index()] = 0;
    }

    fn invalidate_all(&mut self) {
        self.current = [0; 4];
    }
}

// ============================================================================
// CONFIRMATION
// ============================================================================

/// Destructive action waiting for the user's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeleteStock(String),
    DeleteEmployee(String),
}

impl Confirmation {
    pub fn prompt(&self) -> &'static str {
        match self {
            Confirmation::DeleteStock(_) => "Are you sure you want to delete this item?",
            Confirmation::DeleteEmployee(_) => "Are you sure you want to delete this employee?",
        }
    }

    fn render(&self) -> String {
        format!(
            r#"<div class="confirm-dialog"><p>{}</p>{}{}</div>"#,
            escape(self.prompt()),
            action_button("btn btn-danger", &Action::Confirm(true), "OK"),
            action_button("btn btn-secondary", &Action::Confirm(false), "Cancel"),
        )
    }
}

/// What to refresh after a successful mutation
#[derive(Debug, Clone, Copy)]
enum Reload {
    StockAndDashboard,
    EmployeesAndDashboard,
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Default)]
struct PanelState {
    page: Page,
    search_query: String,
    search_generation: u64,
    modals: ModalManager,
    confirmation: Option<Confirmation>,
    /// Stock item whose danger level is being edited in place
    editing_danger: Option<String>,
    dashboard: LoadingState<DashboardData>,
    stock: LoadingState<Vec<StockItem>>,
    employees: LoadingState<Vec<Employee>>,
    tokens: RequestTokens,
    /// Round trips currently in flight
    in_flight: usize,
    doc: Document,
}

impl PanelState {
    fn stock_quantity(&self, item: &str) -> Option<i64> {
        self.stock
            .loaded()?
            .iter()
            .find(|stock| stock.item_name == item)
            .map(|stock| stock.quantity)
    }

    fn render_chrome(&mut self) {
        let page = self.page;
        self.doc.active_page = page;
        self.doc.page_title = page.title().to_string();
        self.doc.search_visible = page == Page::Employees;
        self.doc.add_employee_visible = page == Page::Employees;
    }

    /// Replace the open modal; a pending employee detail fetch no longer applies
    fn open_modal(&mut self, modal: ActiveModal) {
        debug!(modal = modal.kind().element_id(), "open modal");
        self.tokens.invalidate(LoadSlot::EmployeeDetail);
        self.modals.open(modal);
        self.render_modal();
    }

    fn render_modal(&mut self) {
        match self.modals.active() {
            Some(modal) => {
                let html = render_modal(modal, self.modals.is_submitting());
                self.doc.active_modal = Some(modal.kind().element_id());
                self.doc.scroll_locked = true;
                self.doc.set_region(Region::Modal, html);
            }
            None => {
                self.doc.active_modal = None;
                self.doc.scroll_locked = false;
                self.doc.clear_region(Region::Modal);
            }
        }
    }

    fn render_confirmation(&mut self) {
        match &self.confirmation {
            Some(confirmation) => {
                let html = confirmation.render();
                self.doc.set_region(Region::Confirm, html);
            }
            None => self.doc.clear_region(Region::Confirm),
        }
    }

    fn render_dashboard(&mut self) {
        let Some(data) = self.dashboard.loaded() else {
            return;
        };
        let counters = stat_counters(&data.stats);
        let alerts = render_low_stock_alerts(&data.low_stock);
        for (id, value) in counters {
            self.doc.set_text(id, value);
        }
        self.doc.set_region(Region::LowStockAlerts, alerts);
    }

    fn render_stock(&mut self) {
        let Some(items) = self.stock.loaded() else {
            return;
        };
        let editing = self.editing_danger.as_deref();
        let (standard, tshirts) = split_stock(items);
        let standard = render_stock_grid(&standard, editing);
        let tshirts = render_stock_grid(&tshirts, editing);
        self.doc.set_region(Region::StockGrid, standard);
        self.doc.set_region(Region::TshirtStockGrid, tshirts);
    }

    fn render_employees(&mut self) {
        let Some(employees) = self.employees.loaded() else {
            return;
        };
        let html = render_employee_grid(employees);
        self.doc.set_region(Region::EmployeesGrid, html);
    }
}

struct Inner {
    backend: Arc<dyn Backend>,
    config: PanelConfig,
    state: Mutex<PanelState>,
}

/// Keeps the loading overlay up while alive
struct LoadingGuard {
    inner: Arc<Inner>,
}

impl LoadingGuard {
    fn new(inner: Arc<Inner>) -> Self {
        {
            let mut state = inner.state.lock();
            state.in_flight += 1;
            state.doc.loading = true;
        }
        Self { inner }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut state = self.inner.state.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        state.doc.loading = state.in_flight > 0;
    }
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// Headless controller of the admin panel
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct KitPanel {
    inner: Arc<Inner>,
}

impl KitPanel {
    pub fn new(backend: Arc<dyn Backend>, config: PanelConfig) -> Self {
        let panel = Self {
            inner: Arc::new(Inner {
                backend,
                config,
                state: Mutex::new(PanelState::default()),
            }),
        };
        panel.inner.state.lock().render_chrome();
        panel
    }

    /// Show the initial page
    pub async fn start(&self) {
        info!(api = %self.inner.config.api_url, "starting kit panel");
        self.show_page(Page::Dashboard).await;
    }

    /// Route one user input
    pub async fn dispatch(&self, event: UiEvent) {
        debug!(?event, "dispatch");
        match event {
            UiEvent::Click(action) => self.handle_action(action).await,
            UiEvent::SearchInput(value) => self.search_input(value),
            UiEvent::Input { field, value } => self.input(&field, &value),
            UiEvent::CommitDangerLevel { item, value } => {
                self.commit_danger_level(&item, &value).await
            }
            UiEvent::Submit => self.submit().await,
        }
    }

    async fn handle_action(&self, action: Action) {
        match action {
            Action::Navigate(page) => self.show_page(page).await,
            Action::OpenAddEmployee => {
                self.open_modal(ActiveModal::AddEmployee(new_employee_form()))
            }
            Action::OpenAddStockItem => {
                self.open_modal(ActiveModal::AddStockItem(new_item_form()))
            }
            Action::UpdateStock { item } => self.open_stock_update(&item, false),
            Action::Restock { item } => self.open_stock_update(&item, true),
            Action::UpdateEmployee { id } => self.open_employee_update(&id).await,
            Action::DeleteStock { item } => self.ask(Confirmation::DeleteStock(item)),
            Action::DeleteEmployee { id } => self.ask(Confirmation::DeleteEmployee(id)),
            Action::EditDangerLevel { item } => self.edit_danger_level(&item),
            Action::Step { field, direction } => self.step(&field, direction),
            Action::AdjustStock(direction) => self.adjust_stock(direction),
            Action::CloseModal(trigger) => self.close_modal(trigger),
            Action::Confirm(accepted) => self.confirm(accepted).await,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Copy of the current document
    pub fn document(&self) -> Document {
        self.inner.state.lock().doc.clone()
    }

    #[allow(dead_code)]
    pub fn page(&self) -> Page {
        self.inner.state.lock().page
    }

    pub fn search_query(&self) -> String {
        self.inner.state.lock().search_query.clone()
    }

    #[allow(dead_code)]
    pub fn open_modal_kind(&self) -> Option<ModalKind> {
        self.inner.state.lock().modals.kind()
    }

    /// Pending quantity of the stock adjustment modal, if open
    #[allow(dead_code)]
    pub fn pending_stock_quantity(&self) -> Option<i64> {
        match self.inner.state.lock().modals.active() {
            Some(ActiveModal::UpdateStock(adjustment)) => Some(adjustment.pending()),
            _ => None,
        }
    }

    /// Value of a field in the open modal's form
    #[allow(dead_code)]
    pub fn form_value(&self, field: &str) -> Option<String> {
        let state = self.inner.state.lock();
        match state.modals.active()? {
            ActiveModal::AddEmployee(form)
            | ActiveModal::UpdateEmployee(form)
            | ActiveModal::AddStockItem(form) => form.get(field).map(str::to_string),
            ActiveModal::UpdateStock(_) => None,
        }
    }

    #[allow(dead_code)]
    pub fn pending_confirmation(&self) -> Option<Confirmation> {
        self.inner.state.lock().confirmation.clone()
    }

    #[allow(dead_code)]
    pub fn is_submitting(&self) -> bool {
        self.inner.state.lock().modals.is_submitting()
    }

    // ------------------------------------------------------------------
    // Navigation and loads
    // ------------------------------------------------------------------

    /// Switch the visible page and load its data
    pub async fn show_page(&self, page: Page) {
        let query = {
            let mut state = self.inner.state.lock();
            state.page = page;
            state.tokens.invalidate_all();
            state.editing_danger = None;
            state.render_chrome();
            state.search_query.clone()
        };
        debug!(page = page.name(), "show page");

        match page {
            Page::Dashboard => self.load_dashboard().await,
            Page::Stock => self.load_stock().await,
            Page::Employees => self.load_employees(&query).await,
        }
    }

    fn begin_loading(&self) -> LoadingGuard {
        LoadingGuard::new(Arc::clone(&self.inner))
    }

    /// Fetch stock and stats together and render the dashboard
    pub async fn load_dashboard(&self) {
        let token = {
            let mut state = self.inner.state.lock();
            state.dashboard.begin();
            state.tokens.issue(LoadSlot::Dashboard)
        };

        let result = {
            let _loading = self.begin_loading();
            let backend = &self.inner.backend;
            tokio::try_join!(backend.list_stock(), backend.employee_stats())
        };

        let failed = {
            let mut state = self.inner.state.lock();
            if !state.tokens.is_current(LoadSlot::Dashboard, token) {
                debug!(token, "dropping stale dashboard response");
                return;
            }
            match result {
                Ok((stock, stats)) => {
                    state.dashboard = LoadingState::Loaded(DashboardData {
                        stats,
                        low_stock: stock.low_stock_items,
                    });
                    state.render_dashboard();
                    false
                }
                Err(err) => {
                    error!(error = %err, "failed to load dashboard");
                    state.dashboard = LoadingState::Error;
                    true
                }
            }
        };
        if failed {
            self.toast(ToastKind::Error, "Error loading dashboard data");
        }
    }

    /// Fetch and render both stock grids
    pub async fn load_stock(&self) {
        let token = {
            let mut state = self.inner.state.lock();
            state.stock.begin();
            state.tokens.issue(LoadSlot::Stock)
        };

        let result = {
            let _loading = self.begin_loading();
            self.inner.backend.list_stock().await
        };

        let failed = {
            let mut state = self.inner.state.lock();
            if !state.tokens.is_current(LoadSlot::Stock, token) {
                debug!(token, "dropping stale stock response");
                return;
            }
            match result {
                Ok(response) => {
                    debug!(count = response.stock_items.len(), "stock loaded");
                    state.stock = LoadingState::Loaded(response.stock_items);
                    state.render_stock();
                    false
                }
                Err(err) => {
                    error!(error = %err, "failed to load stock");
                    state.stock = LoadingState::Error;
                    true
                }
            }
        };
        if failed {
            self.toast(ToastKind::Error, "Error loading stock data");
        }
    }

    /// Fetch and render the employee grid, filtered by `query` when not blank
    pub async fn load_employees(&self, query: &str) {
        let query = query.trim();
        let token = {
            let mut state = self.inner.state.lock();
            state.employees.begin();
            state.tokens.issue(LoadSlot::Employees)
        };

        let result = {
            let _loading = self.begin_loading();
            let search = (!query.is_empty()).then_some(query);
            self.inner.backend.list_employees(search).await
        };

        let failed = {
            let mut state = self.inner.state.lock();
            if !state.tokens.is_current(LoadSlot::Employees, token) {
                debug!(token, query, "dropping stale employee response");
                return;
            }
            match result {
                Ok(employees) => {
                    debug!(count = employees.len(), query, "employees loaded");
                    state.employees = LoadingState::Loaded(employees);
                    state.render_employees();
                    false
                }
                Err(err) => {
                    error!(error = %err, "failed to load employees");
                    state.employees = LoadingState::Error;
                    true
                }
            }
        };
        if failed {
            self.toast(ToastKind::Error, "Error loading employees");
        }
    }

    async fn reload(&self, reload: Reload) {
        match reload {
            Reload::StockAndDashboard => {
                tokio::join!(self.load_stock(), self.load_dashboard());
            }
            Reload::EmployeesAndDashboard => {
                let query = self.search_query();
                tokio::join!(self.load_employees(&query), self.load_dashboard());
            }
        }
    }

    /// Record a search keystroke; the load fires once input settles
    pub fn search_input(&self, value: String) {
        let generation = {
            let mut state = self.inner.state.lock();
            state.doc.search_value = value.clone();
            state.search_query = value;
            state.search_generation += 1;
            state.search_generation
        };

        let panel = self.clone();
        let delay = self.inner.config.search_debounce;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let query = {
                let state = panel.inner.state.lock();
                let settled = state.search_generation == generation;
                (settled && state.page == Page::Employees).then(|| state.search_query.clone())
            };
            match query {
                Some(query) => panel.load_employees(&query).await,
                None => debug!(generation, "search superseded"),
            }
        });
    }

    // ------------------------------------------------------------------
    // Modals
    // ------------------------------------------------------------------

    fn open_modal(&self, modal: ActiveModal) {
        self.inner.state.lock().open_modal(modal);
    }

    fn close_modal(&self, trigger: CloseTrigger) {
        let mut state = self.inner.state.lock();
        state.tokens.invalidate(LoadSlot::EmployeeDetail);
        if let Some(modal) = state.modals.close() {
            debug!(
                modal = modal.kind().element_id(),
                trigger = trigger.as_attr(),
                "close modal"
            );
        }
        state.render_modal();
    }

    /// Open the stock adjustment modal preloaded with the current quantity
    ///
    /// Restock clicks come from dashboard alerts and prefer the alert's value.
    fn open_stock_update(&self, item: &str, from_alert: bool) {
        let quantity = {
            let state = self.inner.state.lock();
            let alert = from_alert
                .then(|| state.dashboard.loaded())
                .flatten()
                .and_then(|data| data.low_stock_item(item))
                .map(|alert| alert.quantity);
            alert.or_else(|| state.stock_quantity(item))
        };

        match quantity {
            Some(quantity) => self.open_modal(ActiveModal::UpdateStock(StockAdjustment::new(
                item,
                quantity,
                self.inner.config.stock_step,
            ))),
            None => {
                warn!(item, "no cached quantity for stock item");
                self.toast(ToastKind::Error, "Error loading stock data");
            }
        }
    }

    /// Fetch an employee and open the update form
    async fn open_employee_update(&self, id: &str) {
        let token = self.inner.state.lock().tokens.issue(LoadSlot::EmployeeDetail);

        let result = {
            let _loading = self.begin_loading();
            self.inner.backend.get_employee(id).await
        };

        let mut state = self.inner.state.lock();
        if !state.tokens.is_current(LoadSlot::EmployeeDetail, token) {
            debug!(id, "dropping stale employee detail");
            return;
        }
        match result {
            Ok(employee) => {
                state.open_modal(ActiveModal::UpdateEmployee(update_employee_form(&employee)))
            }
            Err(err) => {
                drop(state);
                error!(id, error = %err, "failed to load employee");
                self.toast(ToastKind::Error, "Error loading employee data");
            }
        }
    }

    fn step(&self, field: &str, direction: StepDirection) {
        let mut state = self.inner.state.lock();
        let Some(form) = state.modals.active_mut().and_then(ActiveModal::form_mut) else {
            debug!(field, "step without an open form");
            return;
        };
        if let Err(err) = step_field(form, field, direction) {
            warn!(error = %err, "stepper ignored");
            return;
        }
        state.render_modal();
    }

    fn adjust_stock(&self, direction: StepDirection) {
        let mut state = self.inner.state.lock();
        let Some(ActiveModal::UpdateStock(adjustment)) = state.modals.active_mut() else {
            debug!("stock adjustment without the stock modal");
            return;
        };
        adjustment.adjust(direction);
        state.render_modal();
    }

    fn input(&self, field: &str, value: &str) {
        let mut state = self.inner.state.lock();
        match state.modals.active_mut() {
            Some(ActiveModal::UpdateStock(adjustment)) if field == "step_amount" => {
                adjustment.set_step(parse_int_lenient(value));
            }
            Some(modal) => {
                let Some(form) = modal.form_mut() else {
                    debug!(field, "input ignored");
                    return;
                };
                if let Err(err) = form.input(field, value) {
                    warn!(error = %err, "input ignored");
                    return;
                }
            }
            None => {
                debug!(field, "input without an open modal");
                return;
            }
        }
        state.render_modal();
    }

    // ------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------

    /// Submit the open modal
    ///
    /// Ignored while a submit of the same modal is in flight.
    pub async fn submit(&self) {
        let (generation, snapshot) = {
            let mut state = self.inner.state.lock();
            let Some(submitted) = state.modals.begin_submit() else {
                debug!("submit ignored");
                return;
            };
            state.render_modal();
            submitted
        };
        let kind = snapshot.kind();
        let backend = &self.inner.backend;

        match snapshot {
            ActiveModal::AddEmployee(form) => {
                let payload = match create_payload(&form) {
                    Ok(payload) => payload,
                    Err(message) => return self.reject_submit(kind, generation, message),
                };
                let result = {
                    let _loading = self.begin_loading();
                    backend.create_employee(&payload).await
                };
                self.finish_submit(
                    kind,
                    generation,
                    result,
                    ("Employee added successfully!", "Error adding employee"),
                    Reload::EmployeesAndDashboard,
                )
                .await;
            }
            ActiveModal::UpdateEmployee(form) => {
                let (id, payload) = match update_payload(&form) {
                    Ok(parts) => parts,
                    Err(message) => return self.reject_submit(kind, generation, message),
                };
                let result = {
                    let _loading = self.begin_loading();
                    backend.update_employee(&id, &payload).await
                };
                self.finish_submit(
                    kind,
                    generation,
                    result,
                    ("Employee updated successfully!", "Error updating employee"),
                    Reload::EmployeesAndDashboard,
                )
                .await;
            }
            ActiveModal::UpdateStock(adjustment) => {
                let patch = StockPatch::quantity(adjustment.pending());
                let result = {
                    let _loading = self.begin_loading();
                    backend.update_stock(&adjustment.item_name, &patch).await
                };
                self.finish_submit(
                    kind,
                    generation,
                    result,
                    ("Stock updated successfully!", "Error updating stock"),
                    Reload::StockAndDashboard,
                )
                .await;
            }
            ActiveModal::AddStockItem(form) => {
                let request =
                    match new_item_request(&form, self.inner.config.default_danger_level) {
                        Ok(request) => request,
                        Err(message) => return self.reject_submit(kind, generation, message),
                    };
                let result = {
                    let _loading = self.begin_loading();
                    backend.create_stock_item(&request).await
                };
                self.finish_submit(
                    kind,
                    generation,
                    result,
                    ("Item added successfully!", "Error adding item"),
                    Reload::StockAndDashboard,
                )
                .await;
            }
        }
    }

    /// Local validation failed; the modal stays open
    fn reject_submit(&self, kind: ModalKind, generation: u64, message: String) {
        warn!(modal = kind.element_id(), %message, "form rejected");
        {
            let mut state = self.inner.state.lock();
            state.modals.finish_submit(generation);
            state.render_modal();
        }
        self.toast(ToastKind::Error, message);
    }

    /// Apply a submit result: close and reload on success, keep the modal on failure
    ///
    /// Only the modal the submit came from is touched; one opened since stays.
    async fn finish_submit(
        &self,
        kind: ModalKind,
        generation: u64,
        result: Result<Value, ApiError>,
        (success, fallback): (&str, &str),
        reload: Reload,
    ) {
        match result {
            Ok(_) => {
                info!(modal = kind.element_id(), "submit succeeded");
                {
                    let mut state = self.inner.state.lock();
                    if state.modals.close_submitted(generation).is_some() {
                        state.render_modal();
                    }
                }
                self.toast(ToastKind::Success, success);
                self.reload(reload).await;
            }
            Err(err) => {
                error!(modal = kind.element_id(), error = %err, "submit failed");
                {
                    let mut state = self.inner.state.lock();
                    state.modals.finish_submit(generation);
                    state.render_modal();
                }
                self.toast(ToastKind::Error, err.user_message(fallback));
            }
        }
    }

    // ------------------------------------------------------------------
    // Destructive actions
    // ------------------------------------------------------------------

    fn ask(&self, confirmation: Confirmation) {
        let mut state = self.inner.state.lock();
        state.confirmation = Some(confirmation);
        state.render_confirmation();
    }

    /// Answer the pending confirmation prompt
    pub async fn confirm(&self, accepted: bool) {
        let pending = {
            let mut state = self.inner.state.lock();
            let pending = state.confirmation.take();
            state.render_confirmation();
            pending
        };
        let Some(pending) = pending else {
            debug!("no confirmation pending");
            return;
        };
        if !accepted {
            debug!(?pending, "cancelled");
            return;
        }

        let backend = &self.inner.backend;
        let (result, messages, reload) = match &pending {
            Confirmation::DeleteStock(item) => {
                let _loading = self.begin_loading();
                (
                    backend.delete_stock_item(item).await,
                    ("Item deleted successfully!", "Error deleting item"),
                    Reload::StockAndDashboard,
                )
            }
            Confirmation::DeleteEmployee(id) => {
                let _loading = self.begin_loading();
                (
                    backend.delete_employee(id).await,
                    ("Employee deleted successfully!", "Error deleting employee"),
                    Reload::EmployeesAndDashboard,
                )
            }
        };

        match result {
            Ok(_) => {
                info!(?pending, "deleted");
                self.toast(ToastKind::Success, messages.0);
                self.reload(reload).await;
            }
            Err(err) => {
                error!(?pending, error = %err, "delete failed");
                self.toast(ToastKind::Error, err.user_message(messages.1));
            }
        }
    }

    // ------------------------------------------------------------------
    // Danger level
    // ------------------------------------------------------------------

    fn edit_danger_level(&self, item: &str) {
        let mut state = self.inner.state.lock();
        if state.stock_quantity(item).is_none() {
            debug!(item, "edit for unknown stock item");
            return;
        }
        state.editing_danger = Some(item.to_string());
        state.render_stock();
    }

    /// Commit the in-place danger level editor
    pub async fn commit_danger_level(&self, item: &str, value: &str) {
        {
            let mut state = self.inner.state.lock();
            if state.editing_danger.as_deref() != Some(item) {
                debug!(item, "danger level commit without an open editor");
                return;
            }
            state.editing_danger = None;
            state.render_stock();
        }

        let Some(level) = parse_danger_level(value) else {
            warn!(item, value, "invalid danger level");
            self.toast(ToastKind::Error, "Please enter a valid danger level");
            return;
        };

        let result = {
            let _loading = self.begin_loading();
            self.inner
                .backend
                .update_stock(item, &StockPatch::danger_level(level))
                .await
        };

        match result {
            Ok(_) => {
                info!(item, level, "danger level updated");
                self.toast(ToastKind::Success, "Danger level updated!");
                self.reload(Reload::StockAndDashboard).await;
            }
            Err(err) => {
                error!(item, error = %err, "danger level update failed");
                self.toast(
                    ToastKind::Error,
                    err.user_message("Error updating danger level"),
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Toasts
    // ------------------------------------------------------------------

    /// Show a toast and schedule its removal
    pub fn toast(&self, kind: ToastKind, message: impl Into<String>) {
        let id = self.inner.state.lock().doc.push_toast(kind, message);
        let inner = Arc::clone(&self.inner);
        let ttl = self.inner.config.toast_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            inner.state.lock().doc.remove_toast(id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_names_round_trip() {
        for page in Page::all() {
            assert_eq!(Page::from_name(page.name()), Some(*page));
        }
        assert_eq!(Page::from_name("settings"), None);
        assert_eq!(Page::default(), Page::Dashboard);
    }

    #[test]
    fn test_tokens_invalidate() {
        let mut tokens = RequestTokens::default();
        let stock = tokens.issue(LoadSlot::Stock);
        let newer = tokens.issue(LoadSlot::Stock);
        assert!(!tokens.is_current(LoadSlot::Stock, stock));
        assert!(tokens.is_current(LoadSlot::Stock, newer));

        let detail = tokens.issue(LoadSlot::EmployeeDetail);
        tokens.invalidate(LoadSlot::EmployeeDetail);
        assert!(!tokens.is_current(LoadSlot::EmployeeDetail, detail));
        assert!(tokens.is_current(LoadSlot::Stock, newer));

        let dashboard = tokens.issue(LoadSlot::Dashboard);
        tokens.invalidate_all();
        assert!(!tokens.is_current(LoadSlot::Dashboard, dashboard));
        assert!(!tokens.is_current(LoadSlot::Stock, newer));
    }

    #[test]
    fn test_loading_state() {
        let state: LoadingState<u8> = LoadingState::Loaded(3);
        assert!(state.is_loaded());
        assert_eq!(state.loaded(), Some(&3));
        assert!(LoadingState::<u8>::Loading.is_loading());
        assert!(LoadingState::<u8>::Error.is_error());
    }
}
