//! 資料存取介面
//!
//! 引擎只透過這些 trait 讀寫外部資料；實作可由真正的交易型儲存支撐。

use chrono::{DateTime, Utc};

use crate::{
    PackingItem, Product, PurchaseOrder, Result, SalesOrder, StockSnapshot, SupplierProductInfo,
};

/// 產品目錄
pub trait ProductCatalog: Send + Sync {
    /// 查詢產品；不存在時返回 None
    fn product(&self, sku: &str) -> Result<Option<Product>>;

    /// 按目錄順序列出所有 SKU
    fn skus(&self) -> Result<Vec<String>>;
}

/// 庫存查詢/更新（真實庫存數量的外部擁有者）
pub trait StockLedger: Send + Sync {
    /// 各倉庫庫存；未知 SKU 返回空快照
    fn stock_by_warehouse(&self, sku: &str) -> Result<StockSnapshot>;

    /// 扣減庫存，必須對 (SKU, 倉庫) 串行化並驗證非負
    fn decrement_stock(&self, sku: &str, warehouse_id: &str, quantity: u64) -> Result<()>;
}

/// 銷售歷史
pub trait SalesHistoryStore: Send + Sync {
    /// 下單時間落在 `[from, to]` 內的訂單
    fn orders_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<SalesOrder>>;
}

/// 供應商目錄
pub trait SupplierCatalog: Send + Sync {
    fn supplier_product(&self, sku: &str, supplier_id: &str)
        -> Result<Option<SupplierProductInfo>>;
}

/// 採購單儲存（對引擎而言僅追加）
pub trait PurchaseOrderStore: Send + Sync {
    fn append(&self, order: PurchaseOrder) -> Result<()>;

    /// 含有指定 SKU 的在途採購單
    fn open_orders_for(&self, sku: &str) -> Result<Vec<PurchaseOrder>>;
}

/// 包裝佇列
pub trait PackingQueue: Send + Sync {
    fn enqueue(&self, item: PackingItem) -> Result<()>;
}
