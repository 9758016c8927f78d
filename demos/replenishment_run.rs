//! 補貨排程示例

use chrono::{Duration, Utc};
use restock::restock_core::{Product, SalesOrder, SupplierProductInfo};
use restock::{EngineConfig, InMemoryStore, ReplenishmentScheduler};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 補貨排程示例 ===\n");

    let store = InMemoryStore::new();
    let now = Utc::now();

    // 產品目錄
    store.upsert_product(
        Product::new("GRINDER".to_string(), "Burr Grinder".to_string())
            .with_stock("WHS-A", 8)
            .with_stock("WHS-B", 4)
            .with_safety_stock(10)
            .with_preferred_supplier("SUP-1".to_string()),
    );
    store.upsert_product(
        Product::new("KETTLE".to_string(), "Gooseneck Kettle".to_string())
            .with_stock("WHS-A", 250)
            .with_safety_stock(20)
            .with_preferred_supplier("SUP-2".to_string()),
    );
    store.upsert_product(
        Product::new("FILTER".to_string(), "Paper Filter".to_string()).with_stock("WHS-B", 3),
    );

    // 供應商目錄
    store.upsert_supplier_product(
        SupplierProductInfo::new(
            "GRINDER".to_string(),
            "SUP-1".to_string(),
            Decimal::from(10),
            Decimal::new(4500, 2),
        )
        .with_minimum_order_quantity(20),
    );
    store.upsert_supplier_product(SupplierProductInfo::new(
        "KETTLE".to_string(),
        "SUP-2".to_string(),
        Decimal::new(145, 1),
        Decimal::new(3200, 2),
    ));

    // 銷售歷史
    store.record_sale(
        SalesOrder::new("SO-1".to_string(), now - Duration::days(3))
            .with_item("GRINDER", 9)
            .with_item("KETTLE", 4),
    );
    store.record_sale(
        SalesOrder::new("SO-2".to_string(), now - Duration::days(18)).with_item("GRINDER", 6),
    );

    let config = EngineConfig::default().with_suppress_when_open_po(true);
    let scheduler = ReplenishmentScheduler::new(&store, &store, &store, &store, config);
    let report = scheduler.run_at(now)?;

    println!("補貨建議:");
    for advice in &report.advices {
        println!(
            "  - 物料: {}, 庫存: {}, 速度: {}/天, 缺貨天數: {}, 補貨: {}",
            advice.sku,
            advice.current_stock,
            advice.sales_velocity_per_day.normalize(),
            advice.days_until_stockout,
            advice.final_order_quantity
        );
    }

    println!("\n採購單:");
    for order in &report.purchase_orders {
        println!("{}", serde_json::to_string_pretty(order)?);
    }

    println!("\n資料品質警告:");
    for warning in &report.warnings {
        println!("  - {}", warning);
    }

    Ok(())
}
