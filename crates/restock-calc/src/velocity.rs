//! 銷售速度計算

use chrono::{DateTime, Duration, Utc};
use restock_core::{RestockError, SalesOrder};
use rust_decimal::Decimal;

/// 銷售速度計算器
pub struct SalesVelocityCalculator;

impl SalesVelocityCalculator {
    /// 預設回看窗口（天）
    pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

    /// 回看窗口 `[as_of - lookback_days, as_of]`
    pub fn window(
        as_of: DateTime<Utc>,
        lookback_days: u32,
    ) -> restock_core::Result<(DateTime<Utc>, DateTime<Utc>)> {
        if lookback_days == 0 {
            return Err(RestockError::InvalidArgument(
                "回看窗口必須為正數".to_string(),
            ));
        }
        let from = as_of
            .checked_sub_signed(Duration::days(i64::from(lookback_days)))
            .ok_or_else(|| RestockError::InvalidArgument("回看窗口超出日期範圍".to_string()))?;
        Ok((from, as_of))
    }

    /// 計算每日平均銷量
    ///
    /// 分母固定為整個窗口天數，銷售稀疏時平均值會被稀釋。無銷售時返回 0。
    pub fn calculate(
        sku: &str,
        lookback_days: u32,
        orders: &[SalesOrder],
        as_of: DateTime<Utc>,
    ) -> restock_core::Result<Decimal> {
        let (from, to) = Self::window(as_of, lookback_days)?;

        let total_sold = orders
            .iter()
            .filter(|o| o.order_date >= from && o.order_date <= to)
            .try_fold(0u64, |acc, order| {
                acc.checked_add(order.quantity_of(sku)?).ok_or_else(|| {
                    RestockError::InvalidArgument(format!("物料 {} 的銷量合計溢出", sku))
                })
            })?;

        if total_sold == 0 {
            return Ok(Decimal::ZERO);
        }

        Ok(Decimal::from(total_sold) / Decimal::from(lookback_days))
    }
}
