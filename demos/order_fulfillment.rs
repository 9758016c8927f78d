//! 多倉訂單履約示例

use restock::restock_core::{OrderIntake, Product, StockLedger};
use restock::{InMemoryStore, OrderFulfillmentOrchestrator};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== 多倉訂單履約示例 ===\n");

    let store = InMemoryStore::new();
    store.upsert_product(
        Product::new("MUG".to_string(), "Ceramic Mug".to_string())
            .with_stock("A", 40)
            .with_stock("B", 30)
            .with_stock("C", 5),
    );
    store.upsert_product(
        Product::new("CUP".to_string(), "Glass Cup".to_string())
            .with_stock("A", 40)
            .with_stock("B", 20),
    );

    let intake = OrderIntake::new(
        "SO-2001".to_string(),
        "Margaret".to_string(),
        "12 Harbour Rd".to_string(),
    )
    .with_line("MUG", 70, "Ceramic Mug")
    .with_line("CUP", 70, "Glass Cup");

    let orchestrator = OrderFulfillmentOrchestrator::new(&store, &store);
    let report = orchestrator.fulfill(&intake);

    println!("包裝任務:");
    for item in &report.packing_items {
        println!(
            "  - {} x {} @ 倉庫 {}",
            item.sku, item.quantity_to_pack, item.warehouse_id
        );
    }

    println!("\n未分配:");
    for line in &report.unfulfilled {
        println!(
            "  - {} 訂購 {}，缺 {}",
            line.sku, line.quantity_ordered, line.unallocated_quantity
        );
    }

    // 包裝確認時才扣減庫存
    for mut item in store.packing_items()? {
        if let Err(err) = item.confirm_packed(&store) {
            println!("包裝確認失敗: {}", err);
        }
    }

    println!("\n包裝後庫存:");
    for sku in ["MUG", "CUP"] {
        let stock = store.stock_by_warehouse(sku)?;
        for level in stock.iter() {
            println!("  - {} @ {}: {}", sku, level.warehouse_id, level.quantity);
        }
    }

    Ok(())
}
