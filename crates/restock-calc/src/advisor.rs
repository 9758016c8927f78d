//! 補貨建議

use chrono::{DateTime, Utc};
use restock_core::{
    DataQualityWarning, Days, EngineConfig, ProductCatalog, ReorderAdvice, SalesHistoryStore,
    SupplierCatalog,
};
use rust_decimal::Decimal;

use crate::reorder_quantity::ReorderQuantityCalculator;
use crate::stockout::StockoutPredictor;
use crate::velocity::SalesVelocityCalculator;

/// 補貨顧問：組合銷售速度、缺貨預測與補貨數量，產生單一 SKU 的建議
pub struct ReorderAdvisor<'a> {
    products: &'a dyn ProductCatalog,
    suppliers: &'a dyn SupplierCatalog,
    sales: &'a dyn SalesHistoryStore,
    config: EngineConfig,
}

impl<'a> ReorderAdvisor<'a> {
    /// 創建新的補貨顧問
    pub fn new(
        products: &'a dyn ProductCatalog,
        suppliers: &'a dyn SupplierCatalog,
        sales: &'a dyn SalesHistoryStore,
        config: EngineConfig,
    ) -> Self {
        Self {
            products,
            suppliers,
            sales,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 計算補貨建議
    ///
    /// SKU 不在產品目錄中時返回 `Ok(None)`。資料品質問題記錄在建議的 `warnings` 中，不返回錯誤。
    pub fn advise(
        &self,
        sku: &str,
        as_of: DateTime<Utc>,
    ) -> restock_core::Result<Option<ReorderAdvice>> {
        let product = match self.products.product(sku)? {
            Some(product) => product,
            None => {
                tracing::debug!("物料 {} 不在產品目錄中", sku);
                return Ok(None);
            }
        };

        let current_stock = product.total_stock()?;
        let safety_stock = product.safety_stock_quantity;

        let (from, to) = SalesVelocityCalculator::window(as_of, self.config.lookback_days)?;
        let history = self.sales.orders_between(from, to)?;
        let velocity =
            SalesVelocityCalculator::calculate(sku, self.config.lookback_days, &history, as_of)?;
        let days_until_stockout =
            StockoutPredictor::days_until_stockout(current_stock, safety_stock, velocity);

        let mut advice = ReorderAdvice::no_reorder(sku.to_string(), current_stock, safety_stock);
        advice.sales_velocity_per_day = velocity;
        advice.days_until_stockout = days_until_stockout;

        let supplier_id = match product.preferred_supplier_id {
            Some(supplier_id) => supplier_id,
            None => {
                let warning = DataQualityWarning::MissingPreferredSupplier {
                    sku: sku.to_string(),
                };
                tracing::warn!("{}", warning);
                advice.warnings.push(warning);
                return Ok(Some(advice));
            }
        };

        // 缺少供應商物料資訊：提前期與單位成本視為無窮大，最小訂購量為 0
        let (lead_time_days, unit_cost, minimum_order_quantity) =
            match self.suppliers.supplier_product(sku, &supplier_id)? {
                Some(info) => (
                    Days::Finite(info.lead_time_days),
                    Some(info.unit_cost),
                    info.minimum_order_quantity,
                ),
                None => {
                    let warning = DataQualityWarning::MissingSupplierProduct {
                        sku: sku.to_string(),
                        supplier_id: supplier_id.clone(),
                    };
                    tracing::warn!("{}", warning);
                    advice.warnings.push(warning);
                    (Days::Infinite, None, 0)
                }
            };

        advice.preferred_supplier_id = Some(supplier_id.clone());
        advice.lead_time_days = lead_time_days;
        advice.unit_cost = unit_cost;
        advice.minimum_order_quantity = minimum_order_quantity;

        if days_until_stockout > lead_time_days {
            tracing::debug!(
                "物料 {} 無需補貨：缺貨天數 {} > 提前期 {}",
                sku,
                days_until_stockout,
                lead_time_days
            );
            return Ok(Some(advice));
        }

        let reorder_quantity = ReorderQuantityCalculator::whole_units(
            ReorderQuantityCalculator::calculate(
                current_stock,
                safety_stock,
                velocity,
                self.config.forecast_period_days,
            ),
        );
        let final_order_quantity = reorder_quantity.max(minimum_order_quantity);

        // 提前期觸發但計算需求為零，不算補貨
        if final_order_quantity == 0 {
            tracing::debug!("物料 {} 觸發補貨但需求為 0，不補貨", sku);
            return Ok(Some(advice));
        }

        advice.should_reorder = true;
        advice.reorder_quantity = reorder_quantity;
        advice.final_order_quantity = final_order_quantity;
        // 成本未知或金額溢出時 estimated_cost 為 None，採購單產生器會拒絕
        let (estimated_cost, cost_warning) = match unit_cost {
            Some(cost) => match Decimal::from(final_order_quantity).checked_mul(cost) {
                Some(total) => (Some(total), None),
                None => (
                    None,
                    Some(DataQualityWarning::CostOverflow {
                        sku: sku.to_string(),
                        supplier_id,
                        quantity: final_order_quantity,
                        unit_cost: cost,
                    }),
                ),
            },
            None => (
                None,
                Some(DataQualityWarning::UnknownUnitCost {
                    sku: sku.to_string(),
                    supplier_id,
                }),
            ),
        };
        advice.estimated_cost = estimated_cost;

        if let Some(warning) = cost_warning {
            tracing::warn!("{}，無法安全產生採購單", warning);
            advice.warnings.push(warning);
        }

        tracing::debug!(
            "物料 {} 建議補貨 {}（計算 {}, 最小訂購量 {}）",
            sku,
            advice.final_order_quantity,
            advice.reorder_quantity,
            advice.minimum_order_quantity
        );

        Ok(Some(advice))
    }
}
