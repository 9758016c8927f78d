//! 採購單產生

use chrono::{DateTime, Duration, Utc};
use restock_core::{
    Days, EngineConfig, PurchaseOrder, PurchaseOrderStore, ReorderAdvice, RestockError,
    SupplierCatalog,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 採購單產生器
pub struct PurchaseOrderGenerator<'a> {
    suppliers: &'a dyn SupplierCatalog,
    store: &'a dyn PurchaseOrderStore,
    config: EngineConfig,
}

impl<'a> PurchaseOrderGenerator<'a> {
    /// 創建新的採購單產生器
    pub fn new(
        suppliers: &'a dyn SupplierCatalog,
        store: &'a dyn PurchaseOrderStore,
        config: EngineConfig,
    ) -> Self {
        Self {
            suppliers,
            store,
            config,
        }
    }

    /// 依補貨建議組裝採購單（不寫入儲存）
    ///
    /// 建議不可執行時返回 `Ok(None)`。單位成本一律於產生時重新向供應商目錄查詢，
    /// 不使用由預估成本反推的值。
    pub fn build(
        &self,
        advice: &ReorderAdvice,
        as_of: DateTime<Utc>,
    ) -> restock_core::Result<Option<PurchaseOrder>> {
        if !advice.should_reorder || advice.final_order_quantity == 0 {
            return Ok(None);
        }

        let supplier_id = match &advice.preferred_supplier_id {
            Some(supplier_id) => supplier_id,
            None => {
                tracing::warn!("物料 {} 無首選供應商，拒絕產生採購單", advice.sku);
                return Ok(None);
            }
        };

        if advice.estimated_cost.is_none() {
            tracing::warn!("物料 {} 預估成本未知，拒絕產生採購單", advice.sku);
            return Ok(None);
        }

        let info = match self.suppliers.supplier_product(&advice.sku, supplier_id)? {
            Some(info) => info,
            None => {
                tracing::warn!(
                    "物料 {} 在供應商 {} 的供應資訊已不存在，拒絕產生採購單",
                    advice.sku,
                    supplier_id
                );
                return Ok(None);
            }
        };

        let expected_delivery_date = Self::expected_delivery_date(
            as_of,
            advice.lead_time_days,
            self.config.unknown_lead_time_horizon_days,
        )?;

        let order = PurchaseOrder::new(supplier_id.clone(), as_of, expected_delivery_date)
            .with_line(advice.sku.clone(), advice.final_order_quantity, info.unit_cost);

        if order.total_cost().is_none() {
            tracing::warn!(
                "物料 {} 依單價 {} 計算的採購金額溢出，拒絕產生採購單",
                advice.sku,
                info.unit_cost
            );
            return Ok(None);
        }

        Ok(Some(order))
    }

    /// 產生採購單並追加到儲存
    pub fn generate(
        &self,
        advice: &ReorderAdvice,
        as_of: DateTime<Utc>,
    ) -> restock_core::Result<Option<PurchaseOrder>> {
        let order = match self.build(advice, as_of)? {
            Some(order) => order,
            None => return Ok(None),
        };

        self.store.append(order.clone())?;

        tracing::info!(
            "產生採購單 {}: {} x {} 向 {}，預計 {} 到貨",
            order.po_id,
            advice.sku,
            advice.final_order_quantity,
            order.supplier_id,
            order.expected_delivery_date
        );

        Ok(Some(order))
    }

    /// 計算預計到貨時間
    ///
    /// 提前期無窮大（或超出可表示範圍）時，使用 `horizon_days` 作為時界。
    pub fn expected_delivery_date(
        as_of: DateTime<Utc>,
        lead_time_days: Days,
        horizon_days: u32,
    ) -> restock_core::Result<DateTime<Utc>> {
        let finite = lead_time_days
            .finite()
            .and_then(|days| days.checked_mul(Decimal::from(86_400)))
            .and_then(|seconds| seconds.round().to_i64())
            .and_then(Duration::try_seconds)
            .and_then(|offset| as_of.checked_add_signed(offset));

        if let Some(date) = finite {
            return Ok(date);
        }

        as_of
            .checked_add_signed(Duration::days(i64::from(horizon_days)))
            .ok_or_else(|| RestockError::InvalidArgument("到貨時界超出日期範圍".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use restock_core::{InMemoryStore, PurchaseOrderStatus, SupplierProductInfo};

    fn as_of() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 30, 12, 0, 0).unwrap()
    }

    fn reorder_advice() -> ReorderAdvice {
        let mut advice = ReorderAdvice::no_reorder("SKU-1".to_string(), 12, 10);
        advice.should_reorder = true;
        advice.preferred_supplier_id = Some("SUP-1".to_string());
        advice.lead_time_days = Days::from_whole(10);
        advice.reorder_quantity = 13;
        advice.minimum_order_quantity = 20;
        advice.final_order_quantity = 20;
        advice.unit_cost = Some(Decimal::new(250, 2));
        advice.estimated_cost = Some(Decimal::from(50));
        advice
    }

    fn store_with_supplier(unit_cost: Decimal) -> InMemoryStore {
        let store = InMemoryStore::new();
        store.upsert_supplier_product(SupplierProductInfo::new(
            "SKU-1".to_string(),
            "SUP-1".to_string(),
            Decimal::from(10),
            unit_cost,
        ));
        store
    }

    #[test]
    fn test_generate_purchase_order() {
        let store = store_with_supplier(Decimal::new(250, 2));
        let generator = PurchaseOrderGenerator::new(&store, &store, EngineConfig::default());

        let order = generator.generate(&reorder_advice(), as_of()).unwrap().unwrap();

        assert_eq!(order.status, PurchaseOrderStatus::Pending);
        assert_eq!(order.supplier_id, "SUP-1");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 20);
        assert_eq!(order.expected_delivery_date, as_of() + Duration::days(10));
        assert_eq!(order.total_cost(), Some(Decimal::from(50)));
        assert_eq!(store.purchase_orders().unwrap(), vec![order]);
    }

    #[test]
    fn test_unit_cost_is_looked_up_fresh() {
        // 建議產生後供應商調價，採購單使用最新單價
        let store = store_with_supplier(Decimal::from(3));
        let generator = PurchaseOrderGenerator::new(&store, &store, EngineConfig::default());

        let order = generator.build(&reorder_advice(), as_of()).unwrap().unwrap();
        assert_eq!(order.items[0].unit_cost, Decimal::from(3));
        assert!(store.purchase_orders().unwrap().is_empty());
    }

    #[test]
    fn test_refuses_unsafe_advice() {
        let store = store_with_supplier(Decimal::ONE);
        let generator = PurchaseOrderGenerator::new(&store, &store, EngineConfig::default());

        let mut no_quantity = reorder_advice();
        no_quantity.final_order_quantity = 0;
        assert!(generator.generate(&no_quantity, as_of()).unwrap().is_none());

        let mut no_supplier = reorder_advice();
        no_supplier.preferred_supplier_id = None;
        assert!(generator.generate(&no_supplier, as_of()).unwrap().is_none());

        let mut unknown_cost = reorder_advice();
        unknown_cost.estimated_cost = None;
        assert!(generator.generate(&unknown_cost, as_of()).unwrap().is_none());

        let mut not_reordering = reorder_advice();
        not_reordering.should_reorder = false;
        assert!(generator.generate(&not_reordering, as_of()).unwrap().is_none());

        assert!(store.purchase_orders().unwrap().is_empty());
    }

    #[test]
    fn test_refuses_when_fresh_cost_overflows() {
        // 供應商調價後 20 × 單價 超出金額範圍
        let store = store_with_supplier(Decimal::MAX);
        let generator = PurchaseOrderGenerator::new(&store, &store, EngineConfig::default());

        assert!(generator.generate(&reorder_advice(), as_of()).unwrap().is_none());
        assert!(store.purchase_orders().unwrap().is_empty());
    }

    #[test]
    fn test_refuses_when_supplier_link_disappeared() {
        let store = InMemoryStore::new();
        let generator = PurchaseOrderGenerator::new(&store, &store, EngineConfig::default());
        assert!(generator.generate(&reorder_advice(), as_of()).unwrap().is_none());
    }

    #[test]
    fn test_expected_delivery_date() {
        let half_day = PurchaseOrderGenerator::expected_delivery_date(
            as_of(),
            Days::Finite(Decimal::new(5, 1)),
            3650,
        )
        .unwrap();
        assert_eq!(half_day, as_of() + Duration::hours(12));

        let sentinel =
            PurchaseOrderGenerator::expected_delivery_date(as_of(), Days::Infinite, 3650).unwrap();
        assert_eq!(sentinel, as_of() + Duration::days(3650));
    }
}
