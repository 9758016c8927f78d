//! 分倉拆單

use restock_core::{RestockError, StockSnapshot};
use serde::{Deserialize, Serialize};

/// 單一倉庫的分配
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseAllocation {
    pub warehouse_id: String,
    pub quantity: u64,
}

/// 訂單明細的分配結果
///
/// 不變式：`allocations` 數量合計 + `remainder` == `quantity_ordered`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAllocation {
    pub sku: String,
    pub quantity_ordered: u64,
    pub allocations: Vec<WarehouseAllocation>,
    /// 未能分配的數量（缺貨待補）
    pub remainder: u64,
}

impl LineAllocation {
    /// 已分配數量
    pub fn allocated(&self) -> u64 {
        self.allocations.iter().map(|a| a.quantity).sum()
    }

    pub fn is_fully_allocated(&self) -> bool {
        self.remainder == 0
    }

    /// 部分分配
    pub fn is_partial(&self) -> bool {
        self.remainder > 0 && self.remainder < self.quantity_ordered
    }

    /// 完全無法分配
    pub fn is_unfulfillable(&self) -> bool {
        self.remainder == self.quantity_ordered
    }

    /// 是否拆分到多個倉庫
    pub fn is_split(&self) -> bool {
        self.allocations.len() > 1
    }
}

/// 分倉拆單器
///
/// 只計算分配計劃，不扣減庫存。
pub struct WarehouseFulfillmentSplitter;

impl WarehouseFulfillmentSplitter {
    /// 分配訂單明細
    ///
    /// 第一階段：按目錄順序找第一個能單獨滿足的倉庫。
    /// 第二階段：依序從有庫存的倉庫分配 `min(剩餘, 庫存)`，直到滿足或倉庫用盡。
    pub fn split(
        sku: &str,
        quantity_ordered: u64,
        stock: &StockSnapshot,
    ) -> restock_core::Result<LineAllocation> {
        if quantity_ordered == 0 {
            return Err(RestockError::InvalidArgument(format!(
                "物料 {} 的訂購數量必須為正數",
                sku
            )));
        }

        // Phase 1: 單倉出貨
        if let Some(level) = stock.iter().find(|l| l.quantity >= quantity_ordered) {
            tracing::debug!(
                "物料 {} 由倉庫 {} 單倉出貨 {}",
                sku,
                level.warehouse_id,
                quantity_ordered
            );
            return Ok(LineAllocation {
                sku: sku.to_string(),
                quantity_ordered,
                allocations: vec![WarehouseAllocation {
                    warehouse_id: level.warehouse_id.clone(),
                    quantity: quantity_ordered,
                }],
                remainder: 0,
            });
        }

        // Phase 2: 拆倉出貨
        let mut remaining = quantity_ordered;
        let mut allocations = Vec::new();

        for level in stock.iter() {
            if remaining == 0 {
                break;
            }
            if level.quantity == 0 {
                continue;
            }

            let take = remaining.min(level.quantity);
            allocations.push(WarehouseAllocation {
                warehouse_id: level.warehouse_id.clone(),
                quantity: take,
            });
            remaining -= take;
        }

        tracing::debug!(
            "物料 {} 拆倉出貨: {} 個倉庫, 剩餘 {}",
            sku,
            allocations.len(),
            remaining
        );

        Ok(LineAllocation {
            sku: sku.to_string(),
            quantity_ordered,
            allocations,
            remainder: remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn snapshot(levels: &[(&str, u64)]) -> StockSnapshot {
        levels
            .iter()
            .map(|(id, qty)| (id.to_string(), *qty))
            .collect()
    }

    fn allocation(warehouse_id: &str, quantity: u64) -> WarehouseAllocation {
        WarehouseAllocation {
            warehouse_id: warehouse_id.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_single_warehouse_preferred() {
        let stock = snapshot(&[("A", 10), ("B", 80), ("C", 100)]);
        let result = WarehouseFulfillmentSplitter::split("SKU", 70, &stock).unwrap();

        // 第一個足量的倉庫是 B，即使 A 也有庫存
        assert_eq!(result.allocations, vec![allocation("B", 70)]);
        assert!(result.is_fully_allocated());
        assert!(!result.is_split());
    }

    #[test]
    fn test_split_across_warehouses() {
        let stock = snapshot(&[("A", 40), ("B", 30), ("C", 5)]);
        let result = WarehouseFulfillmentSplitter::split("SKU", 70, &stock).unwrap();

        assert_eq!(result.allocations, vec![allocation("A", 40), allocation("B", 30)]);
        assert_eq!(result.remainder, 0);
        assert!(result.is_split());
    }

    #[test]
    fn test_partial_fulfillment() {
        let stock = snapshot(&[("A", 40), ("B", 20)]);
        let result = WarehouseFulfillmentSplitter::split("SKU", 70, &stock).unwrap();

        assert_eq!(result.allocations, vec![allocation("A", 40), allocation("B", 20)]);
        assert_eq!(result.remainder, 10);
        assert!(result.is_partial());
    }

    #[test]
    fn test_zero_stock_is_unfulfillable() {
        let stock = snapshot(&[("A", 0), ("B", 0)]);
        let result = WarehouseFulfillmentSplitter::split("SKU", 5, &stock).unwrap();

        assert!(result.allocations.is_empty());
        assert!(result.is_unfulfillable());
        assert!(!result.is_partial());
    }

    #[test]
    fn test_empty_snapshot_is_unfulfillable() {
        let result = WarehouseFulfillmentSplitter::split("SKU", 5, &StockSnapshot::new()).unwrap();
        assert_eq!(result.remainder, 5);
    }

    #[test]
    fn test_zero_quantity_is_invalid() {
        let stock = snapshot(&[("A", 10)]);
        assert!(matches!(
            WarehouseFulfillmentSplitter::split("SKU", 0, &stock),
            Err(RestockError::InvalidArgument(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_split_invariants(
            levels in proptest::collection::vec(0u64..200, 0..8),
            quantity in 1u64..500,
        ) {
            let stock: StockSnapshot = levels
                .iter()
                .enumerate()
                .map(|(i, qty)| (format!("W{}", i), *qty))
                .collect();

            let result = WarehouseFulfillmentSplitter::split("SKU", quantity, &stock).unwrap();

            // 分配量 + 剩餘 == 訂購量
            prop_assert_eq!(result.allocated() + result.remainder, quantity);

            // 不超過倉庫庫存，且不分配 0
            for a in &result.allocations {
                prop_assert!(a.quantity > 0);
                prop_assert!(a.quantity <= stock.quantity(&a.warehouse_id));
            }

            // 有單倉足量時只產生一筆分配
            if levels.iter().any(|qty| *qty >= quantity) {
                prop_assert_eq!(result.allocations.len(), 1);
                prop_assert_eq!(result.remainder, 0);
            }

            // 總庫存足夠時必定完全分配
            if stock.total().unwrap() >= quantity {
                prop_assert_eq!(result.remainder, 0);
            }
        }
    }
}
