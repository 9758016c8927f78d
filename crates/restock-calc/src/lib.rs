//! # Restock Calculation Engine
//!
//! 需求驅動的補貨計算引擎

pub mod advisor;
pub mod purchase_order;
pub mod reorder_quantity;
pub mod scheduler;
pub mod stockout;
pub mod velocity;

// Re-export 主要類型
pub use advisor::ReorderAdvisor;
pub use purchase_order::PurchaseOrderGenerator;
pub use reorder_quantity::ReorderQuantityCalculator;
pub use scheduler::ReplenishmentScheduler;
pub use stockout::StockoutPredictor;
pub use velocity::SalesVelocityCalculator;

use restock_core::{DataQualityWarning, PurchaseOrder, ReorderAdvice, RestockError};

/// 補貨計算結果
#[derive(Debug, Clone)]
pub struct ReplenishmentReport {
    /// 所有物料的補貨建議（目錄順序）
    pub advices: Vec<ReorderAdvice>,

    /// 本次產生的採購單
    pub purchase_orders: Vec<PurchaseOrder>,

    /// 因已有在途採購單而略過的物料
    pub suppressed: Vec<String>,

    /// 資料品質警告
    pub warnings: Vec<DataQualityWarning>,

    /// 單一物料的失敗
    pub failures: Vec<SkuFailure>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ReplenishmentReport {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            advices: Vec::new(),
            purchase_orders: Vec::new(),
            suppressed: Vec::new(),
            warnings: Vec::new(),
            failures: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加失敗記錄
    pub fn add_failure(&mut self, failure: SkuFailure) {
        self.failures.push(failure);
    }

    /// 查詢指定物料的建議
    pub fn advice_for(&self, sku: &str) -> Option<&ReorderAdvice> {
        self.advices.iter().find(|a| a.sku == sku)
    }
}

/// 單一物料的處理失敗（可獨立重試）
#[derive(Debug, Clone, PartialEq)]
pub struct SkuFailure {
    pub sku: String,
    pub error: RestockError,
}

impl SkuFailure {
    pub fn new(sku: String, error: RestockError) -> Self {
        Self { sku, error }
    }
}
