//! 產品與倉庫庫存模型

use serde::{Deserialize, Serialize};

use crate::{RestockError, Result};

/// 倉庫（靜態參考資料）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    /// 倉庫ID
    pub warehouse_id: String,

    /// 地點名稱
    pub location_name: String,

    /// 地址
    pub address: String,
}

impl Warehouse {
    /// 創建新的倉庫
    pub fn new(warehouse_id: String, location_name: String, address: String) -> Self {
        Self {
            warehouse_id,
            location_name,
            address,
        }
    }
}

/// 單一倉庫的庫存數量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseStock {
    pub warehouse_id: String,
    pub quantity: u64,
}

/// 物料在各倉庫的庫存快照
///
/// 保留倉庫的目錄順序（插入順序），分倉拆單依此順序迭代。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSnapshot {
    levels: Vec<WarehouseStock>,
}

impl StockSnapshot {
    /// 創建空的快照
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置倉庫庫存
    pub fn with_stock(mut self, warehouse_id: &str, quantity: u64) -> Self {
        self.set(warehouse_id, quantity);
        self
    }

    /// 設置倉庫庫存（已存在則覆寫，保留原位置）
    pub fn set(&mut self, warehouse_id: &str, quantity: u64) {
        match self.levels.iter_mut().find(|l| l.warehouse_id == warehouse_id) {
            Some(level) => level.quantity = quantity,
            None => self.levels.push(WarehouseStock {
                warehouse_id: warehouse_id.to_string(),
                quantity,
            }),
        }
    }

    /// 查詢倉庫庫存；未知倉庫視為 0
    pub fn quantity(&self, warehouse_id: &str) -> u64 {
        self.levels
            .iter()
            .find(|l| l.warehouse_id == warehouse_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// 所有倉庫庫存合計；溢出時返回 `InvalidArgument`
    pub fn total(&self) -> Result<u64> {
        self.levels.iter().try_fold(0u64, |acc, level| {
            acc.checked_add(level.quantity).ok_or_else(|| {
                RestockError::InvalidArgument(format!(
                    "倉庫 {} 的庫存使合計溢出",
                    level.warehouse_id
                ))
            })
        })
    }

    /// 按目錄順序迭代
    pub fn iter(&self) -> impl Iterator<Item = &WarehouseStock> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// 扣減快照中的數量（僅用於規劃，不足時歸零）
    pub fn consume(&mut self, warehouse_id: &str, quantity: u64) {
        if let Some(level) = self.levels.iter_mut().find(|l| l.warehouse_id == warehouse_id) {
            level.quantity = level.quantity.saturating_sub(quantity);
        }
    }
}

impl FromIterator<(String, u64)> for StockSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut snapshot = StockSnapshot::new();
        for (warehouse_id, quantity) in iter {
            snapshot.set(&warehouse_id, quantity);
        }
        snapshot
    }
}

/// 產品
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// SKU（唯一鍵）
    pub sku: String,

    /// 品名
    pub name: String,

    /// 各倉庫現有庫存
    pub current_stock: StockSnapshot,

    /// 安全庫存
    pub safety_stock_quantity: u64,

    /// 首選供應商
    pub preferred_supplier_id: Option<String>,
}

impl Product {
    /// 創建新的產品
    pub fn new(sku: String, name: String) -> Self {
        Self {
            sku,
            name,
            current_stock: StockSnapshot::new(),
            safety_stock_quantity: 0,
            preferred_supplier_id: None,
        }
    }

    /// 建構器模式：設置倉庫庫存
    pub fn with_stock(mut self, warehouse_id: &str, quantity: u64) -> Self {
        self.current_stock.set(warehouse_id, quantity);
        self
    }

    /// 建構器模式：設置安全庫存
    pub fn with_safety_stock(mut self, quantity: u64) -> Self {
        self.safety_stock_quantity = quantity;
        self
    }

    /// 建構器模式：設置首選供應商
    pub fn with_preferred_supplier(mut self, supplier_id: String) -> Self {
        self.preferred_supplier_id = Some(supplier_id);
        self
    }

    /// 所有倉庫的庫存合計
    pub fn total_stock(&self) -> Result<u64> {
        self.current_stock.total().map_err(|err| match err {
            RestockError::InvalidArgument(msg) => {
                RestockError::InvalidArgument(format!("物料 {}: {}", self.sku, msg))
            }
            other => other,
        })
    }

    /// 檢查庫存是否低於安全庫存
    pub fn is_below_safety_stock(&self) -> Result<bool> {
        Ok(self.total_stock()? < self.safety_stock_quantity)
    }
}
