//! 採購單模型

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 採購單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    Pending,
    Ordered,
    PartiallyReceived,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    /// 是否仍在途（尚未收貨完成或取消）
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PurchaseOrderStatus::Pending
                | PurchaseOrderStatus::Ordered
                | PurchaseOrderStatus::PartiallyReceived
        )
    }
}

/// 採購單明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub sku: String,
    pub quantity: u64,
    pub unit_cost: Decimal,
}

impl PurchaseOrderLine {
    /// 明細金額；溢出時返回 None
    pub fn line_cost(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_cost)
    }
}

/// 採購單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// 採購單ID
    pub po_id: Uuid,

    /// 建立時間
    pub creation_date: DateTime<Utc>,

    /// 供應商
    pub supplier_id: String,

    /// 明細
    pub items: Vec<PurchaseOrderLine>,

    /// 預計到貨時間
    pub expected_delivery_date: DateTime<Utc>,

    pub status: PurchaseOrderStatus,
}

impl PurchaseOrder {
    /// 創建新的待處理採購單
    pub fn new(
        supplier_id: String,
        creation_date: DateTime<Utc>,
        expected_delivery_date: DateTime<Utc>,
    ) -> Self {
        Self {
            po_id: Uuid::new_v4(),
            creation_date,
            supplier_id,
            items: Vec::new(),
            expected_delivery_date,
            status: PurchaseOrderStatus::Pending,
        }
    }

    /// 建構器模式：添加明細
    pub fn with_line(mut self, sku: String, quantity: u64, unit_cost: Decimal) -> Self {
        self.items.push(PurchaseOrderLine {
            sku,
            quantity,
            unit_cost,
        });
        self
    }

    /// 採購總金額；任一明細或合計溢出時返回 None
    pub fn total_cost(&self) -> Option<Decimal> {
        self.items
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.line_cost()?))
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// 是否包含指定 SKU
    pub fn covers(&self, sku: &str) -> bool {
        self.items.iter().any(|line| line.sku == sku)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_create_purchase_order() {
        let now = Utc::now();
        let po = PurchaseOrder::new("SUP-1".to_string(), now, now + Duration::days(10))
            .with_line("SKU-1".to_string(), 20, Decimal::new(250, 2));

        assert_eq!(po.status, PurchaseOrderStatus::Pending);
        assert!(po.is_open());
        assert!(po.covers("SKU-1"));
        assert!(!po.covers("SKU-2"));
        assert_eq!(po.total_cost(), Some(Decimal::from(50)));
    }

    #[test]
    fn test_total_cost_overflow_is_none() {
        let now = Utc::now();
        let po = PurchaseOrder::new("SUP-1".to_string(), now, now)
            .with_line("SKU-1".to_string(), 2, Decimal::MAX);
        assert_eq!(po.items[0].line_cost(), None);
        assert_eq!(po.total_cost(), None);
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&PurchaseOrderStatus::PartiallyReceived).unwrap();
        assert_eq!(json, "\"partially_received\"");
        assert!(!PurchaseOrderStatus::Received.is_open());
        assert!(!PurchaseOrderStatus::Cancelled.is_open());
    }
}
