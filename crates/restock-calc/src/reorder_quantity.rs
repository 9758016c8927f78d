//! 補貨數量計算（目標庫存模型）

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 補貨數量計算器
pub struct ReorderQuantityCalculator;

impl ReorderQuantityCalculator {
    /// 預設需求預測週期（天）
    pub const DEFAULT_FORECAST_PERIOD_DAYS: u32 = 30;

    /// 計算補貨數量
    ///
    /// 目標庫存 = 銷售速度 × 預測週期 + 安全庫存，補貨量 = max(0, 目標庫存 - 現有庫存)
    pub fn calculate(
        current_stock: u64,
        safety_stock: u64,
        sales_velocity_per_day: Decimal,
        forecast_period_days: u32,
    ) -> Decimal {
        let forecast_demand = sales_velocity_per_day
            .max(Decimal::ZERO)
            .checked_mul(Decimal::from(forecast_period_days))
            .unwrap_or(Decimal::MAX);
        let target_stock = forecast_demand.saturating_add(Decimal::from(safety_stock));
        let need = target_stock.saturating_sub(Decimal::from(current_stock));

        need.max(Decimal::ZERO)
    }

    /// 取整為整數單位（無條件進位）
    pub fn whole_units(quantity: Decimal) -> u64 {
        if quantity <= Decimal::ZERO {
            return 0;
        }
        quantity.ceil().to_u64().unwrap_or(u64::MAX)
    }
}
