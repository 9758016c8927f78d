//! 補貨排程

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use restock_core::{
    EngineConfig, ProductCatalog, PurchaseOrder, PurchaseOrderStore, ReorderAdvice, RestockError,
    SalesHistoryStore, SupplierCatalog,
};

use crate::advisor::ReorderAdvisor;
use crate::purchase_order::PurchaseOrderGenerator;
use crate::{ReplenishmentReport, SkuFailure};

/// 補貨排程器：遍歷整個產品目錄，為需要補貨的 SKU 產生採購單
pub struct ReplenishmentScheduler<'a> {
    products: &'a dyn ProductCatalog,
    suppliers: &'a dyn SupplierCatalog,
    sales: &'a dyn SalesHistoryStore,
    purchase_orders: &'a dyn PurchaseOrderStore,
    config: EngineConfig,
}

impl<'a> ReplenishmentScheduler<'a> {
    /// 創建新的補貨排程器
    pub fn new(
        products: &'a dyn ProductCatalog,
        suppliers: &'a dyn SupplierCatalog,
        sales: &'a dyn SalesHistoryStore,
        purchase_orders: &'a dyn PurchaseOrderStore,
        config: EngineConfig,
    ) -> Self {
        Self {
            products,
            suppliers,
            sales,
            purchase_orders,
            config,
        }
    }

    /// 補貨觸發入口：以當前時間執行，返回本次產生的採購單
    pub fn run_replenishment(
        &self,
        demand_forecast_period_days: u32,
    ) -> restock_core::Result<Vec<PurchaseOrder>> {
        let config = self
            .config
            .clone()
            .with_forecast_period_days(demand_forecast_period_days);
        let report = self.run_with(config, Utc::now())?;
        Ok(report.purchase_orders)
    }

    /// 以指定時間點執行一次補貨，返回完整報告
    pub fn run_at(&self, as_of: DateTime<Utc>) -> restock_core::Result<ReplenishmentReport> {
        self.run_with(self.config.clone(), as_of)
    }

    fn run_with(
        &self,
        config: EngineConfig,
        as_of: DateTime<Utc>,
    ) -> restock_core::Result<ReplenishmentReport> {
        config.validate()?;
        let start_time = std::time::Instant::now();

        let skus = self.products.skus()?;
        tracing::info!("開始補貨計算：物料 {} 筆", skus.len());

        let advisor =
            ReorderAdvisor::new(self.products, self.suppliers, self.sales, config.clone());

        // Step 1: 逐物料計算補貨建議（唯讀，可並行）
        let outcomes: Vec<(String, restock_core::Result<Option<ReorderAdvice>>)> =
            if config.parallel {
                skus.par_iter()
                    .map(|sku| (sku.clone(), advisor.advise(sku, as_of)))
                    .collect()
            } else {
                skus.iter()
                    .map(|sku| (sku.clone(), advisor.advise(sku, as_of)))
                    .collect()
            };

        // Step 2: 按目錄順序產生採購單
        let generator =
            PurchaseOrderGenerator::new(self.suppliers, self.purchase_orders, config.clone());
        let mut report = ReplenishmentReport::empty();

        for (sku, outcome) in outcomes {
            let advice = match outcome {
                Ok(Some(advice)) => advice,
                Ok(None) => {
                    tracing::warn!("物料 {} 在計算期間自目錄移除", sku);
                    report.add_failure(SkuFailure::new(sku.clone(), RestockError::NotFound(sku)));
                    continue;
                }
                Err(err) => {
                    tracing::warn!("物料 {} 補貨計算失敗: {}", sku, err);
                    report.add_failure(SkuFailure::new(sku, err));
                    continue;
                }
            };

            report.warnings.extend(advice.warnings.iter().cloned());

            if advice.should_reorder {
                if let Err(err) = self.place_order(&generator, &config, &advice, as_of, &mut report)
                {
                    tracing::warn!("物料 {} 採購單產生失敗: {}", sku, err);
                    report.add_failure(SkuFailure::new(sku, err));
                }
            }

            report.advices.push(advice);
        }

        report.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("補貨計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "採購單數量: {}，失敗: {}，略過: {}",
            report.purchase_orders.len(),
            report.failures.len(),
            report.suppressed.len()
        );

        Ok(report)
    }

    fn place_order(
        &self,
        generator: &PurchaseOrderGenerator<'_>,
        config: &EngineConfig,
        advice: &ReorderAdvice,
        as_of: DateTime<Utc>,
        report: &mut ReplenishmentReport,
    ) -> restock_core::Result<()> {
        if config.suppress_when_open_po {
            let open = self.purchase_orders.open_orders_for(&advice.sku)?;
            if !open.is_empty() {
                tracing::debug!(
                    "物料 {} 已有 {} 張在途採購單，略過",
                    advice.sku,
                    open.len()
                );
                report.suppressed.push(advice.sku.clone());
                return Ok(());
            }
        }

        if let Some(order) = generator.generate(advice, as_of)? {
            report.purchase_orders.push(order);
        }
        Ok(())
    }
}
