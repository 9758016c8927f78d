//! # Restock Fulfillment
//!
//! 多倉訂單履約：分倉拆單與包裝任務產生

pub mod orchestrator;
pub mod splitter;

// Re-export 主要類型
pub use orchestrator::OrderFulfillmentOrchestrator;
pub use splitter::{LineAllocation, WarehouseAllocation, WarehouseFulfillmentSplitter};

use restock_core::{PackingItem, RestockError};
use serde::{Deserialize, Serialize};

/// 訂單履約結果
#[derive(Debug, Clone)]
pub struct FulfillmentReport {
    pub order_id: String,

    /// 已送入包裝佇列的任務
    pub packing_items: Vec<PackingItem>,

    /// 未能分配的明細（缺貨待補）
    pub unfulfilled: Vec<UnfulfilledLine>,

    /// 處理失敗的明細
    pub failures: Vec<LineFailure>,
}

impl FulfillmentReport {
    pub fn new(order_id: String) -> Self {
        Self {
            order_id,
            packing_items: Vec::new(),
            unfulfilled: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// 所有明細均已完全分配且無失敗
    pub fn is_fully_allocated(&self) -> bool {
        self.unfulfilled.is_empty() && self.failures.is_empty()
    }

    /// 已分配總數量（飽和加總）
    pub fn total_allocated(&self) -> u64 {
        self.packing_items
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.quantity_to_pack))
    }

    /// 未分配總數量（飽和加總）
    pub fn total_unallocated(&self) -> u64 {
        self.unfulfilled
            .iter()
            .fold(0u64, |acc, u| acc.saturating_add(u.unallocated_quantity))
    }
}

/// 未能完全分配的明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfulfilledLine {
    pub line_index: usize,
    pub sku: String,
    pub quantity_ordered: u64,
    pub unallocated_quantity: u64,
}

/// 單一明細的處理失敗（可獨立重試）
#[derive(Debug, Clone, PartialEq)]
pub struct LineFailure {
    pub line_index: usize,
    pub sku: String,
    pub error: RestockError,
}

impl LineFailure {
    pub fn new(line_index: usize, sku: String, error: RestockError) -> Self {
        Self {
            line_index,
            sku,
            error,
        }
    }
}
