//! 缺貨天數預測

use restock_core::Days;
use rust_decimal::Decimal;

/// 缺貨預測器
pub struct StockoutPredictor;

impl StockoutPredictor {
    /// 計算距離跌破安全庫存的天數
    ///
    /// - 銷售速度 <= 0：無法預測消耗，返回無窮大
    /// - 可用量（現有 - 安全庫存）<= 0：已在安全線以下，返回 0
    /// - 其餘：可用量 / 銷售速度（不取整）；商超出 `Decimal` 範圍時視為無窮大
    pub fn days_until_stockout(
        current_stock: u64,
        safety_stock: u64,
        sales_velocity_per_day: Decimal,
    ) -> Days {
        if sales_velocity_per_day <= Decimal::ZERO {
            return Days::Infinite;
        }

        let available = Decimal::from(current_stock) - Decimal::from(safety_stock);
        if available <= Decimal::ZERO {
            return Days::ZERO;
        }

        match available.checked_div(sales_velocity_per_day) {
            Some(days) => Days::Finite(days),
            None => Days::Infinite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, 10, Decimal::new(5, 1), Days::Finite(Decimal::from(180)))]
    #[case(12, 10, Decimal::new(5, 1), Days::Finite(Decimal::from(4)))]
    #[case(10, 10, Decimal::new(5, 1), Days::ZERO)]
    #[case(3, 10, Decimal::from(2), Days::ZERO)]
    #[case(0, 0, Decimal::ZERO, Days::Infinite)]
    #[case(5, 10, Decimal::ZERO, Days::Infinite)]
    #[case(5, 0, Decimal::new(-1, 0), Days::Infinite)]
    #[case(u64::MAX, 0, Decimal::new(1, 28), Days::Infinite)]
    fn test_days_until_stockout(
        #[case] current: u64,
        #[case] safety: u64,
        #[case] velocity: Decimal,
        #[case] expected: Days,
    ) {
        assert_eq!(
            StockoutPredictor::days_until_stockout(current, safety, velocity),
            expected
        );
    }

    #[test]
    fn test_result_is_not_rounded() {
        let days = StockoutPredictor::days_until_stockout(11, 10, Decimal::from(4));
        assert_eq!(days, Days::Finite(Decimal::new(25, 2)));
    }
}
