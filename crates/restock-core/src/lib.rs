//! # Restock Core
//!
//! 核心資料模型、資料存取介面與類型定義

pub mod advice;
pub mod config;
pub mod memory;
pub mod packing;
pub mod product;
pub mod purchase;
pub mod sales;
pub mod store;
pub mod supplier;

// Re-export 主要類型
pub use advice::{DataQualityWarning, Days, ReorderAdvice};
pub use config::EngineConfig;
pub use memory::InMemoryStore;
pub use packing::{IntakeLine, OrderIntake, PackingItem, PackingStatus};
pub use product::{Product, StockSnapshot, Warehouse, WarehouseStock};
pub use purchase::{PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus};
pub use sales::{OrderItem, SalesOrder};
pub use store::{
    PackingQueue, ProductCatalog, PurchaseOrderStore, SalesHistoryStore, StockLedger,
    SupplierCatalog,
};
pub use supplier::SupplierProductInfo;

/// 補貨引擎錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestockError {
    #[error("找不到物料: {0}")]
    NotFound(String),

    #[error("無效的參數: {0}")]
    InvalidArgument(String),

    #[error("庫存不足: {sku} @ {warehouse_id} 需要 {requested}, 可用 {available}")]
    InsufficientStock {
        sku: String,
        warehouse_id: String,
        requested: u64,
        available: u64,
    },

    #[error("儲存錯誤: {0}")]
    Store(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, RestockError>;
