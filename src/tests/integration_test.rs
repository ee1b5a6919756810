//! Integration tests for the kit panel
//!
//! These tests drive the panel the way the shell host does: text commands
//! parsed into events, dispatched, and checked against the document.

use super::support::*;
use crate::app::{KitPanel, Page};
use crate::dom::Region;
use crate::shell::{parse_command, Command};
use std::time::Duration;

/// Run shell lines against the panel, returning the final snapshot
async fn run(panel: &KitPanel, lines: &[&str]) -> String {
    for line in lines {
        match parse_command(line).unwrap() {
            Command::Event(event) => panel.dispatch(event).await,
            Command::Wait(duration) => tokio::time::sleep(duration).await,
            _ => {}
        }
    }
    panel.document().snapshot()
}

// ============================================================================
// STOCK WORKFLOW
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_restock_workflow_clears_alert() {
    let backend = seeded_backend();
    let panel = panel_with(&backend);
    panel.start().await;
    assert!(panel
        .document()
        .region(Region::LowStockAlerts)
        .contains("Low Stock Alert: pen"));

    run(
        &panel,
        &[
            "click restock pen",
            "input step_amount 10",
            "click adjust-stock plus",
            "submit",
        ],
    )
    .await;

    let pen = backend
        .stock()
        .into_iter()
        .find(|item| item.item_name == "pen")
        .unwrap();
    assert_eq!(pen.quantity, 15);
    let alerts = panel.document().region(Region::LowStockAlerts).to_string();
    assert!(!alerts.contains("Low Stock Alert: pen"));
    assert!(alerts.contains("Low Stock Alert: tshirt_xl"));
}

#[tokio::test(start_paused = true)]
async fn test_add_then_delete_stock_item() {
    let backend = seeded_backend();
    let panel = panel_with(&backend);

    run(
        &panel,
        &[
            "page stock",
            "click add-stock-item",
            "input item_name water_bottle_large",
            "input quantity 3",
            "input danger_level 4",
            "submit",
        ],
    )
    .await;
    assert!(panel
        .document()
        .region(Region::StockGrid)
        .contains("Water_bottle_large"));

    run(&panel, &["click delete-stock water_bottle_large", "confirm yes"]).await;
    assert!(!backend
        .stock()
        .iter()
        .any(|item| item.item_name == "water_bottle_large"));
}

// ============================================================================
// EMPLOYEE WORKFLOW
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_employee_lifecycle() {
    let backend = seeded_backend();
    let panel = panel_with(&backend);

    let snapshot = run(
        &panel,
        &[
            "page employees",
            "click add-employee",
            "input employee_id E9",
            "input first_name Joana",
            "input last_name Pires",
            "input department_name Human Resources",
            "click step tshirt_l_quantity plus",
            "click step bottle_quantity plus",
            "click step bottle_quantity plus",
            "submit",
        ],
    )
    .await;
    assert!(snapshot.contains("Joana Pires"));
    assert!(snapshot.contains("[Success] Employee added successfully!"));

    let added = backend
        .employees()
        .into_iter()
        .find(|e| e.employee_id == "E9")
        .unwrap();
    assert_eq!(added.department_name, "Human Resources");
    assert_eq!(added.kit.bottle_quantity, 2);
    assert_eq!(added.kit.tshirt_l_quantity, 1);

    run(
        &panel,
        &[
            "click update-employee E9",
            "click step bottle_quantity minus",
            "submit",
        ],
    )
    .await;
    let updated = backend
        .employees()
        .into_iter()
        .find(|e| e.employee_id == "E9")
        .unwrap();
    assert_eq!(updated.kit.bottle_quantity, 1);

    run(&panel, &["search joana", "wait 350", "click delete-employee E9", "confirm yes"]).await;
    assert!(backend.employees().iter().all(|e| e.employee_id != "E9"));
    assert!(panel
        .document()
        .region(Region::EmployeesGrid)
        .contains("No employees found"));
}

#[tokio::test(start_paused = true)]
async fn test_toasts_gone_after_ttl() {
    let backend = seeded_backend();
    let panel = panel_with(&backend);

    let snapshot = run(&panel, &["page stock", "click add-stock-item", "submit"]).await;
    assert!(snapshot.contains("[Error] Item name is required"));
    assert!(snapshot.contains("modal: add-item-modal"));

    let snapshot = run(&panel, &["close backdrop", "wait 5001"]).await;
    assert!(!snapshot.contains("[Error]"));
    assert!(!snapshot.contains("modal:"));
}

#[tokio::test(start_paused = true)]
async fn test_page_switches_keep_one_view_current() {
    let backend = seeded_backend();
    backend.delay("employee_stats", Duration::from_millis(50));
    let panel = panel_with(&backend);

    let slow = {
        let panel = panel.clone();
        tokio::spawn(async move { panel.show_page(Page::Dashboard).await })
    };
    tokio::task::yield_now().await;
    run(&panel, &["page stock"]).await;
    slow.await.unwrap();

    let doc = panel.document();
    assert_eq!(doc.active_page, Page::Stock);
    assert_eq!(doc.page_title, "Stock Management");
    assert_eq!(doc.region(Region::LowStockAlerts), "");
    assert!(!doc.region(Region::StockGrid).is_empty());
}
