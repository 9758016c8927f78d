//! 供應商物料資料

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 供應商物料資訊，以 (SKU, 供應商) 為鍵
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierProductInfo {
    /// SKU
    pub sku: String,

    /// 供應商ID
    pub supplier_id: String,

    /// 提前期（天，可為小數）
    pub lead_time_days: Decimal,

    /// 單位成本
    pub unit_cost: Decimal,

    /// 最小訂購量
    pub minimum_order_quantity: u64,
}

impl SupplierProductInfo {
    /// 創建新的供應商物料資訊
    pub fn new(
        sku: String,
        supplier_id: String,
        lead_time_days: Decimal,
        unit_cost: Decimal,
    ) -> Self {
        Self {
            sku,
            supplier_id,
            lead_time_days,
            unit_cost,
            minimum_order_quantity: 0,
        }
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_minimum_order_quantity(mut self, quantity: u64) -> Self {
        self.minimum_order_quantity = quantity;
        self
    }

    /// 依最小訂購量調整訂購數量
    pub fn adjust_order_quantity(&self, quantity: u64) -> u64 {
        quantity.max(self.minimum_order_quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_order_quantity() {
        let info = SupplierProductInfo::new(
            "SKU-001".to_string(),
            "SUP-1".to_string(),
            Decimal::from(10),
            Decimal::new(250, 2),
        )
        .with_minimum_order_quantity(20);

        // 低於最小訂購量
        assert_eq!(info.adjust_order_quantity(13), 20);
        // 已滿足最小訂購量
        assert_eq!(info.adjust_order_quantity(35), 35);
    }
}
