//! 補貨建議模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 天數（可為無窮大）
///
/// `Infinite` 排序在所有有限值之後，因此 `Infinite <= Infinite` 成立。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Days {
    Finite(Decimal),
    Infinite,
}

impl Days {
    pub const ZERO: Days = Days::Finite(Decimal::ZERO);

    pub fn from_whole(days: u32) -> Self {
        Days::Finite(Decimal::from(days))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Days::Infinite)
    }

    /// 有限天數；無窮大時返回 None
    pub fn finite(&self) -> Option<Decimal> {
        match self {
            Days::Finite(days) => Some(*days),
            Days::Infinite => None,
        }
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Days::Finite(days) => write!(f, "{}", days.normalize()),
            Days::Infinite => write!(f, "inf"),
        }
    }
}

/// 資料品質警告（不中斷處理）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataQualityWarning {
    /// 產品未設置首選供應商
    MissingPreferredSupplier { sku: String },

    /// 找不到 (SKU, 供應商) 的供應商物料資訊
    MissingSupplierProduct { sku: String, supplier_id: String },

    /// 單位成本未知，無法安全產生採購單
    UnknownUnitCost { sku: String, supplier_id: String },

    /// 單位成本已知，但 數量 × 單價 超出金額範圍
    CostOverflow {
        sku: String,
        supplier_id: String,
        quantity: u64,
        unit_cost: Decimal,
    },
}

impl DataQualityWarning {
    pub fn sku(&self) -> &str {
        match self {
            DataQualityWarning::MissingPreferredSupplier { sku }
            | DataQualityWarning::MissingSupplierProduct { sku, .. }
            | DataQualityWarning::UnknownUnitCost { sku, .. }
            | DataQualityWarning::CostOverflow { sku, .. } => sku,
        }
    }
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataQualityWarning::MissingPreferredSupplier { sku } => {
                write!(f, "物料 {} 未設置首選供應商", sku)
            }
            DataQualityWarning::MissingSupplierProduct { sku, supplier_id } => {
                write!(f, "找不到物料 {} 在供應商 {} 的供應資訊", sku, supplier_id)
            }
            DataQualityWarning::UnknownUnitCost { sku, supplier_id } => {
                write!(f, "物料 {} 在供應商 {} 的單位成本未知", sku, supplier_id)
            }
            DataQualityWarning::CostOverflow {
                sku,
                supplier_id,
                quantity,
                unit_cost,
            } => write!(
                f,
                "物料 {} 在供應商 {} 的採購金額溢出: {} × {}",
                sku, supplier_id, quantity, unit_cost
            ),
        }
    }
}

/// 補貨建議（每次計算重新產生，不可變）
///
/// 欄位總是完整填充，下游只需依 `should_reorder` 分支。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderAdvice {
    pub sku: String,

    /// 是否建議補貨
    pub should_reorder: bool,

    /// 所有倉庫的現有庫存合計
    pub current_stock: u64,

    /// 安全庫存
    pub safety_stock: u64,

    /// 每日銷售速度
    pub sales_velocity_per_day: Decimal,

    /// 預計缺貨天數
    pub days_until_stockout: Days,

    /// 供應商提前期
    pub lead_time_days: Days,

    /// 計算出的補貨數量（未套用最小訂購量）
    pub reorder_quantity: u64,

    pub preferred_supplier_id: Option<String>,

    pub minimum_order_quantity: u64,

    /// 最終訂購數量（已套用最小訂購量）
    pub final_order_quantity: u64,

    /// 單位成本；None 表示未知（無窮大）
    pub unit_cost: Option<Decimal>,

    /// 預估成本；None 表示未知（無窮大）
    pub estimated_cost: Option<Decimal>,

    /// 資料品質警告
    pub warnings: Vec<DataQualityWarning>,
}

impl ReorderAdvice {
    /// 不補貨的建議，所有衍生數量歸零
    pub fn no_reorder(sku: String, current_stock: u64, safety_stock: u64) -> Self {
        Self {
            sku,
            should_reorder: false,
            current_stock,
            safety_stock,
            sales_velocity_per_day: Decimal::ZERO,
            days_until_stockout: Days::Infinite,
            lead_time_days: Days::Infinite,
            reorder_quantity: 0,
            preferred_supplier_id: None,
            minimum_order_quantity: 0,
            final_order_quantity: 0,
            unit_cost: None,
            estimated_cost: Some(Decimal::ZERO),
            warnings: Vec::new(),
        }
    }

    /// 檢查資料是否足以產生採購單
    pub fn is_actionable(&self) -> bool {
        self.should_reorder
            && self.final_order_quantity > 0
            && self.preferred_supplier_id.is_some()
            && self.estimated_cost.is_some()
    }
}
