//! 訂單履約編排

use restock_core::{OrderIntake, PackingItem, PackingQueue, StockLedger, StockSnapshot};
use std::collections::HashMap;

use crate::splitter::WarehouseFulfillmentSplitter;
use crate::{FulfillmentReport, LineFailure, UnfulfilledLine};

/// 訂單履約編排器：逐明細分倉，並將包裝任務送入包裝佇列
pub struct OrderFulfillmentOrchestrator<'a> {
    stock: &'a dyn StockLedger,
    queue: &'a dyn PackingQueue,
}

impl<'a> OrderFulfillmentOrchestrator<'a> {
    /// 創建新的履約編排器
    pub fn new(stock: &'a dyn StockLedger, queue: &'a dyn PackingQueue) -> Self {
        Self { stock, queue }
    }

    /// 處理新接收的訂單
    ///
    /// 各明細獨立處理，單一明細失敗不影響後續明細。同一訂單中較早明細已規劃的庫存，
    /// 會從後續同 SKU 明細的快照中扣除。
    pub fn fulfill(&self, intake: &OrderIntake) -> FulfillmentReport {
        tracing::info!(
            "開始履約：訂單 {}，明細 {} 筆",
            intake.order_id,
            intake.items.len()
        );

        let mut report = FulfillmentReport::new(intake.order_id.clone());
        let mut planned: HashMap<String, StockSnapshot> = HashMap::new();

        for (line_index, line) in intake.items.iter().enumerate() {
            if !planned.contains_key(&line.sku) {
                match self.stock.stock_by_warehouse(&line.sku) {
                    Ok(snapshot) => {
                        planned.insert(line.sku.clone(), snapshot);
                    }
                    Err(err) => {
                        tracing::warn!(
                            "訂單 {} 明細 {} ({}) 庫存查詢失敗: {}",
                            intake.order_id,
                            line_index,
                            line.sku,
                            err
                        );
                        report.failures.push(LineFailure::new(line_index, line.sku.clone(), err));
                        continue;
                    }
                }
            }

            let Some(snapshot) = planned.get_mut(&line.sku) else {
                continue;
            };

            let allocation =
                match WarehouseFulfillmentSplitter::split(&line.sku, line.quantity, snapshot) {
                    Ok(allocation) => allocation,
                    Err(err) => {
                        tracing::warn!(
                            "訂單 {} 明細 {} ({}) 分倉失敗: {}",
                            intake.order_id,
                            line_index,
                            line.sku,
                            err
                        );
                        report.failures.push(LineFailure::new(line_index, line.sku.clone(), err));
                        continue;
                    }
                };

            let mut unallocated = allocation.remainder;

            for portion in &allocation.allocations {
                let item =
                    PackingItem::pending(intake, line, portion.warehouse_id.clone(), portion.quantity);

                match self.queue.enqueue(item.clone()) {
                    Ok(()) => {
                        snapshot.consume(&portion.warehouse_id, portion.quantity);
                        report.packing_items.push(item);
                    }
                    Err(err) => {
                        tracing::warn!(
                            "訂單 {} 明細 {} 包裝任務入列失敗 ({} @ {}): {}",
                            intake.order_id,
                            line_index,
                            portion.quantity,
                            portion.warehouse_id,
                            err
                        );
                        unallocated += portion.quantity;
                        report.failures.push(LineFailure::new(line_index, line.sku.clone(), err));
                    }
                }
            }

            if unallocated > 0 {
                tracing::warn!(
                    "訂單 {} 明細 {} ({}) 未分配 {} / {}，需補貨",
                    intake.order_id,
                    line_index,
                    line.sku,
                    unallocated,
                    line.quantity
                );
                report.unfulfilled.push(UnfulfilledLine {
                    line_index,
                    sku: line.sku.clone(),
                    quantity_ordered: line.quantity,
                    unallocated_quantity: unallocated,
                });
            }
        }

        tracing::info!(
            "訂單 {} 履約完成：包裝任務 {} 筆，未分配 {} 筆，失敗 {} 筆",
            intake.order_id,
            report.packing_items.len(),
            report.unfulfilled.len(),
            report.failures.len()
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restock_core::{InMemoryStore, PackingStatus, Product, RestockError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store.upsert_product(
            Product::new("MUG".to_string(), "Mug".to_string())
                .with_stock("A", 40)
                .with_stock("B", 30)
                .with_stock("C", 5),
        );
        store.upsert_product(
            Product::new("CUP".to_string(), "Cup".to_string())
                .with_stock("A", 40)
                .with_stock("B", 20),
        );
        store
    }

    fn intake() -> OrderIntake {
        OrderIntake::new(
            "SO-100".to_string(),
            "Grace".to_string(),
            "7 Harbour Rd".to_string(),
        )
    }

    #[test]
    fn test_fulfill_split_line() {
        let store = store();
        let orchestrator = OrderFulfillmentOrchestrator::new(&store, &store);
        let report = orchestrator.fulfill(&intake().with_line("MUG", 70, "Mug"));

        assert_eq!(report.packing_items.len(), 2);
        assert!(report.is_fully_allocated());
        assert_eq!(report.total_allocated(), 70);
        assert!(report
            .packing_items
            .iter()
            .all(|p| p.status == PackingStatus::Pending && p.customer_name == "Grace"));
        assert_eq!(store.packing_items().unwrap().len(), 2);

        // 只規劃，不扣減庫存
        assert_eq!(store.stock_by_warehouse("MUG").unwrap().total().unwrap(), 75);
    }

    #[test]
    fn test_partial_line_is_reported() {
        let store = store();
        let orchestrator = OrderFulfillmentOrchestrator::new(&store, &store);
        let report = orchestrator.fulfill(&intake().with_line("CUP", 70, "Cup"));

        assert_eq!(report.total_allocated(), 60);
        assert_eq!(
            report.unfulfilled,
            vec![UnfulfilledLine {
                line_index: 0,
                sku: "CUP".to_string(),
                quantity_ordered: 70,
                unallocated_quantity: 10,
            }]
        );
        assert!(!report.is_fully_allocated());
    }

    #[test]
    fn test_bad_line_does_not_stop_order() {
        let store = store();
        let orchestrator = OrderFulfillmentOrchestrator::new(&store, &store);
        let report = orchestrator.fulfill(
            &intake()
                .with_line("MUG", 0, "Mug")
                .with_line("UNKNOWN", 3, "Ghost")
                .with_line("CUP", 10, "Cup"),
        );

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line_index, 0);
        assert!(matches!(report.failures[0].error, RestockError::InvalidArgument(_)));

        // 未知 SKU 視為零庫存
        assert_eq!(report.unfulfilled.len(), 1);
        assert_eq!(report.unfulfilled[0].sku, "UNKNOWN");
        assert_eq!(report.unfulfilled[0].unallocated_quantity, 3);

        assert_eq!(report.packing_items.len(), 1);
        assert_eq!(report.packing_items[0].sku, "CUP");
    }

    #[test]
    fn test_same_sku_lines_share_planned_stock() {
        let store = store();
        let orchestrator = OrderFulfillmentOrchestrator::new(&store, &store);
        let report = orchestrator.fulfill(
            &intake()
                .with_line("MUG", 40, "Mug")
                .with_line("MUG", 40, "Mug"),
        );

        // 第一筆用完 A；第二筆只能從 B 與 C 取 35
        assert_eq!(report.packing_items[0].warehouse_id, "A");
        assert_eq!(report.total_allocated(), 75);
        assert_eq!(report.total_unallocated(), 5);
    }

    struct FlakyQueue {
        calls: AtomicUsize,
        inner: InMemoryStore,
    }

    impl PackingQueue for FlakyQueue {
        fn enqueue(&self, item: PackingItem) -> restock_core::Result<()> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(RestockError::Store("queue unavailable".to_string()));
            }
            self.inner.enqueue(item)
        }
    }

    #[test]
    fn test_enqueue_failure_counts_as_unallocated() {
        let store = store();
        let queue = FlakyQueue {
            calls: AtomicUsize::new(0),
            inner: InMemoryStore::new(),
        };
        let orchestrator = OrderFulfillmentOrchestrator::new(&store, &queue);
        let report = orchestrator.fulfill(&intake().with_line("MUG", 70, "Mug"));

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.packing_items.len(), 1);
        assert_eq!(report.packing_items[0].warehouse_id, "B");
        assert_eq!(report.unfulfilled[0].unallocated_quantity, 40);
        assert_eq!(queue.inner.packing_items().unwrap().len(), 1);
    }
}
