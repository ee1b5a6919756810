//! In-memory backend and fixtures shared by the controller tests

use crate::api::*;
use crate::app::KitPanel;
use crate::config::PanelConfig;
use crate::kit::{is_tshirt_stock, KitCounts};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListStock,
    CreateStockItem(NewStockItem),
    UpdateStock(String, StockPatch),
    DeleteStockItem(String),
    ListEmployees(Option<String>),
    GetEmployee(String),
    CreateEmployee(Map<String, Value>),
    UpdateEmployee(String, Map<String, Value>),
    DeleteEmployee(String),
    EmployeeStats,
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::ListStock => "list_stock",
            Call::CreateStockItem(_) => "create_stock_item",
            Call::UpdateStock(..) => "update_stock",
            Call::DeleteStockItem(_) => "delete_stock_item",
            Call::ListEmployees(_) => "list_employees",
            Call::GetEmployee(_) => "get_employee",
            Call::CreateEmployee(_) => "create_employee",
            Call::UpdateEmployee(..) => "update_employee",
            Call::DeleteEmployee(_) => "delete_employee",
            Call::EmployeeStats => "employee_stats",
        }
    }
}

#[derive(Default)]
struct MockData {
    stock: Vec<StockItem>,
    employees: Vec<Employee>,
    stats: EmployeeStats,
}

/// Backend double: keeps data in memory and records every call
#[derive(Default)]
pub struct MockBackend {
    data: Mutex<MockData>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
    delays: Mutex<HashMap<&'static str, Duration>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stock(self, items: Vec<StockItem>) -> Self {
        self.data.lock().stock = items;
        self
    }

    pub fn with_employees(self, employees: Vec<Employee>) -> Self {
        self.data.lock().employees = employees;
        self
    }

    pub fn with_stats(self, stats: EmployeeStats) -> Self {
        self.data.lock().stats = stats;
        self
    }

    /// Make every call to `method` fail with `error`
    pub fn fail(&self, method: &'static str, error: ApiError) {
        self.failures.lock().insert(method, error);
    }

    pub fn recover(&self, method: &'static str) {
        self.failures.lock().remove(method);
    }

    /// Hold every call to `method` for `delay`
    pub fn delay(&self, method: &'static str, delay: Duration) {
        self.delays.lock().insert(method, delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|c| c.name() == method).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn stock(&self) -> Vec<StockItem> {
        self.data.lock().stock.clone()
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.data.lock().employees.clone()
    }

    async fn enter(&self, call: Call) -> Result<(), ApiError> {
        let method = call.name();
        self.calls.lock().push(call);
        let delay = self.delays.lock().get(method).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.lock().get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Server {
        status: 404,
        message: Some(format!("{} not found", what)),
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn list_stock(&self) -> Result<StockListResponse, ApiError> {
        self.enter(Call::ListStock).await?;
        let stock = self.stock();
        let low_stock_items = stock
            .iter()
            .filter(|item| item.is_low())
            .map(|item| LowStockItem {
                kind: Some(if is_tshirt_stock(&item.item_name) { "tshirt" } else { "item" }.into()),
                name: item.item_name.clone(),
                quantity: item.quantity,
                danger_level: item.danger_level,
            })
            .collect();
        Ok(StockListResponse {
            stock_items: stock,
            low_stock_items,
        })
    }

    async fn create_stock_item(&self, item: &NewStockItem) -> Result<Value, ApiError> {
        self.enter(Call::CreateStockItem(item.clone())).await?;
        let mut data = self.data.lock();
        let id = data.stock.len() as i64 + 1;
        data.stock.push(StockItem {
            id: Some(id),
            item_name: item.item_name.clone(),
            quantity: item.quantity,
            danger_level: item.danger_level,
        });
        Ok(json!({ "message": "Item added", "id": id }))
    }

    async fn update_stock(&self, item_name: &str, patch: &StockPatch) -> Result<Value, ApiError> {
        self.enter(Call::UpdateStock(item_name.to_string(), patch.clone()))
            .await?;
        let mut data = self.data.lock();
        let item = data
            .stock
            .iter_mut()
            .find(|item| item.item_name == item_name)
            .ok_or_else(|| not_found("Item"))?;
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(level) = patch.danger_level {
            item.danger_level = level;
        }
        Ok(json!({ "message": "Stock updated" }))
    }

    async fn delete_stock_item(&self, item_name: &str) -> Result<Value, ApiError> {
        self.enter(Call::DeleteStockItem(item_name.to_string())).await?;
        let mut data = self.data.lock();
        let before = data.stock.len();
        data.stock.retain(|item| item.item_name != item_name);
        if data.stock.len() == before {
            return Err(not_found("Item"));
        }
        Ok(Value::Null)
    }

    async fn list_employees(&self, search: Option<&str>) -> Result<Vec<Employee>, ApiError> {
        self.enter(Call::ListEmployees(search.map(str::to_string)))
            .await?;
        let employees = self.employees();
        Ok(match search {
            Some(term) => {
                let term = term.to_lowercase();
                employees
                    .into_iter()
                    .filter(|e| {
                        e.full_name().to_lowercase().contains(&term)
                            || e.employee_id.to_lowercase().contains(&term)
                    })
                    .collect()
            }
            None => employees,
        })
    }

    async fn get_employee(&self, employee_id: &str) -> Result<Employee, ApiError> {
        self.enter(Call::GetEmployee(employee_id.to_string())).await?;
        self.employees()
            .into_iter()
            .find(|e| e.employee_id == employee_id)
            .ok_or_else(|| not_found("Employee"))
    }

    async fn create_employee(&self, payload: &Map<String, Value>) -> Result<Value, ApiError> {
        self.enter(Call::CreateEmployee(payload.clone())).await?;
        let employee: Employee = serde_json::from_value(Value::Object(payload.clone()))
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        self.data.lock().employees.push(employee);
        Ok(json!({ "message": "Employee added" }))
    }

    async fn update_employee(
        &self,
        employee_id: &str,
        payload: &Map<String, Value>,
    ) -> Result<Value, ApiError> {
        self.enter(Call::UpdateEmployee(employee_id.to_string(), payload.clone()))
            .await?;
        let mut body = payload.clone();
        body.insert("employee_id".into(), Value::from(employee_id));
        let updated: Employee = serde_json::from_value(Value::Object(body))
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let mut data = self.data.lock();
        let slot = data
            .employees
            .iter_mut()
            .find(|e| e.employee_id == employee_id)
            .ok_or_else(|| not_found("Employee"))?;
        *slot = updated;
        Ok(json!({ "message": "Employee updated" }))
    }

    async fn delete_employee(&self, employee_id: &str) -> Result<Value, ApiError> {
        self.enter(Call::DeleteEmployee(employee_id.to_string())).await?;
        let mut data = self.data.lock();
        let before = data.employees.len();
        data.employees.retain(|e| e.employee_id != employee_id);
        if data.employees.len() == before {
            return Err(not_found("Employee"));
        }
        Ok(json!({ "message": "Employee deleted" }))
    }

    async fn employee_stats(&self) -> Result<EmployeeStats, ApiError> {
        self.enter(Call::EmployeeStats).await?;
        Ok(self.data.lock().stats.clone())
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn stock_item(name: &str, quantity: i64, danger_level: i64) -> StockItem {
    StockItem {
        id: None,
        item_name: name.to_string(),
        quantity,
        danger_level,
    }
}

pub fn employee(id: &str, first: &str, last: &str) -> Employee {
    Employee {
        employee_id: id.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        emergency_no: "555-0100".to_string(),
        blood_group: "A+".to_string(),
        department_name: "Operations".to_string(),
        created_at: None,
        kit: KitCounts::default(),
    }
}

/// Backend with a small stock list and two employees
pub fn seeded_backend() -> Arc<MockBackend> {
    Arc::new(
        MockBackend::new()
            .with_stock(vec![
                stock_item("bag", 40, 10),
                stock_item("pen", 5, 10),
                stock_item("tshirt_m", 20, 5),
                stock_item("tshirt_xl", 2, 5),
            ])
            .with_employees(vec![
                employee("E1", "Ana", "Silva"),
                employee("E2", "Rui", "Costa"),
            ])
            .with_stats(EmployeeStats {
                total_employees: 2,
                pens_distributed: 3,
                ..Default::default()
            }),
    )
}

pub fn panel_with(backend: &Arc<MockBackend>) -> KitPanel {
    let backend: Arc<dyn Backend> = backend.clone();
    KitPanel::new(backend, PanelConfig::default())
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Server {
        status: 400,
        message: Some(message.to_string()),
    }
}
