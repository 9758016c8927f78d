//! 揀貨包裝任務與訂單接收模型

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::StockLedger;
use crate::{RestockError, Result};

/// 包裝任務狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackingStatus {
    Pending,
    Packed,
    Shipped,
    OnHold,
    Cancelled,
}

impl PackingStatus {
    /// 檢查狀態轉換是否合法
    pub fn can_transition_to(&self, next: PackingStatus) -> bool {
        use PackingStatus::*;
        matches!(
            (*self, next),
            (Pending, Packed)
                | (Pending, OnHold)
                | (Pending, Cancelled)
                | (Packed, Shipped)
                | (Packed, OnHold)
                | (Packed, Cancelled)
                | (OnHold, Pending)
                | (OnHold, Cancelled)
        )
    }
}

/// 包裝任務：指示倉庫從指定倉庫揀出指定數量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingItem {
    pub packing_id: Uuid,
    pub order_id: String,
    pub sku: String,
    pub product_name: String,
    pub quantity_to_pack: u64,
    pub warehouse_id: String,
    pub status: PackingStatus,
    pub customer_name: String,
    pub delivery_address: String,
}

impl PackingItem {
    /// 由訂單明細與分配結果創建待處理任務
    pub fn pending(
        intake: &OrderIntake,
        line: &IntakeLine,
        warehouse_id: String,
        quantity_to_pack: u64,
    ) -> Self {
        Self {
            packing_id: Uuid::new_v4(),
            order_id: intake.order_id.clone(),
            sku: line.sku.clone(),
            product_name: line.product_name.clone(),
            quantity_to_pack,
            warehouse_id,
            status: PackingStatus::Pending,
            customer_name: intake.customer_name.clone(),
            delivery_address: intake.delivery_address.clone(),
        }
    }

    /// 轉換狀態
    pub fn transition(&mut self, next: PackingStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(RestockError::InvalidArgument(format!(
                "包裝任務 {} 不允許由 {:?} 轉為 {:?}",
                self.packing_id, self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    /// 確認包裝完成並扣減庫存
    ///
    /// 扣減時由庫存帳重新驗證非負；庫存不足時任務轉為 `OnHold` 並返回錯誤，交由人工處理。
    pub fn confirm_packed(&mut self, ledger: &dyn StockLedger) -> Result<()> {
        if !self.status.can_transition_to(PackingStatus::Packed) {
            return Err(RestockError::InvalidArgument(format!(
                "包裝任務 {} 狀態為 {:?}，無法確認包裝",
                self.packing_id, self.status
            )));
        }

        match ledger.decrement_stock(&self.sku, &self.warehouse_id, self.quantity_to_pack) {
            Ok(()) => {
                self.status = PackingStatus::Packed;
                Ok(())
            }
            Err(err @ RestockError::InsufficientStock { .. }) => {
                tracing::warn!("包裝時庫存不足，任務 {} 暫停: {}", self.packing_id, err);
                self.status = PackingStatus::OnHold;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}

/// 訂單接收明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeLine {
    pub sku: String,
    pub quantity: u64,
    pub product_name: String,
}

impl IntakeLine {
    pub fn new(sku: String, quantity: u64, product_name: String) -> Self {
        Self {
            sku,
            quantity,
            product_name,
        }
    }
}

/// 訂單接收請求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntake {
    pub order_id: String,
    pub customer_name: String,
    pub delivery_address: String,
    pub items: Vec<IntakeLine>,
}

impl OrderIntake {
    /// 創建新的訂單接收請求
    pub fn new(order_id: String, customer_name: String, delivery_address: String) -> Self {
        Self {
            order_id,
            customer_name,
            delivery_address,
            items: Vec::new(),
        }
    }

    /// 建構器模式：添加明細
    pub fn with_line(mut self, sku: &str, quantity: u64, product_name: &str) -> Self {
        self.items.push(IntakeLine::new(
            sku.to_string(),
            quantity,
            product_name.to_string(),
        ));
        self
    }
}
