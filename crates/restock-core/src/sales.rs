//! 銷售歷史模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{RestockError, Result};

/// 銷售訂單明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub sku: String,
    pub quantity: u64,
}

impl OrderItem {
    pub fn new(sku: String, quantity: u64) -> Self {
        Self { sku, quantity }
    }
}

/// 銷售訂單（建立後不可變，作為銷售速度的歷史記錄）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrder {
    /// 訂單號
    pub order_id: String,

    /// 下單時間
    pub order_date: DateTime<Utc>,

    /// 訂單明細（保留順序）
    pub items: Vec<OrderItem>,
}

impl SalesOrder {
    /// 創建新的銷售訂單
    pub fn new(order_id: String, order_date: DateTime<Utc>) -> Self {
        Self {
            order_id,
            order_date,
            items: Vec::new(),
        }
    }

    /// 建構器模式：添加明細
    pub fn with_item(mut self, sku: &str, quantity: u64) -> Self {
        self.items.push(OrderItem::new(sku.to_string(), quantity));
        self
    }

    /// 該訂單中指定 SKU 的總數量；溢出時返回 `InvalidArgument`
    pub fn quantity_of(&self, sku: &str) -> Result<u64> {
        self.items
            .iter()
            .filter(|item| item.sku == sku)
            .try_fold(0u64, |acc, item| {
                acc.checked_add(item.quantity).ok_or_else(|| {
                    RestockError::InvalidArgument(format!(
                        "訂單 {} 中物料 {} 的數量合計溢出",
                        self.order_id, sku
                    ))
                })
            })
    }
}
