//! 記憶體內儲存
//!
//! 實作所有資料存取 trait，供測試與單機使用。庫存扣減在寫鎖內完成，
//! 同一時間只有一個扣減能讀取並修改庫存。

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::store::{
    PackingQueue, ProductCatalog, PurchaseOrderStore, SalesHistoryStore, StockLedger,
    SupplierCatalog,
};
use crate::{
    PackingItem, Product, PurchaseOrder, RestockError, Result, SalesOrder, StockSnapshot,
    SupplierProductInfo, Warehouse,
};

#[derive(Debug, Default)]
struct Catalog {
    order: Vec<String>,
    products: HashMap<String, Product>,
}

/// 記憶體內儲存
#[derive(Debug, Default)]
pub struct InMemoryStore {
    catalog: RwLock<Catalog>,
    warehouses: RwLock<Vec<Warehouse>>,
    sales: RwLock<Vec<SalesOrder>>,
    suppliers: RwLock<HashMap<(String, String), SupplierProductInfo>>,
    purchase_orders: RwLock<Vec<PurchaseOrder>>,
    packing_items: RwLock<Vec<PackingItem>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| RestockError::Store("讀鎖已中毒".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| RestockError::Store("寫鎖已中毒".to_string()))
}

impl InMemoryStore {
    /// 創建空的儲存
    pub fn new() -> Self {
        Self::default()
    }

    /// 新增或更新產品（新 SKU 追加在目錄末尾）
    pub fn upsert_product(&self, product: Product) {
        let mut catalog = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        if !catalog.products.contains_key(&product.sku) {
            catalog.order.push(product.sku.clone());
        }
        catalog.products.insert(product.sku.clone(), product);
    }

    /// 登記倉庫
    pub fn add_warehouse(&self, warehouse: Warehouse) {
        let mut warehouses = self.warehouses.write().unwrap_or_else(PoisonError::into_inner);
        warehouses.retain(|w| w.warehouse_id != warehouse.warehouse_id);
        warehouses.push(warehouse);
    }

    /// 所有倉庫
    pub fn warehouses(&self) -> Result<Vec<Warehouse>> {
        Ok(read(&self.warehouses)?.clone())
    }

    /// 記錄銷售訂單
    pub fn record_sale(&self, order: SalesOrder) {
        self.sales
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(order);
    }

    /// 新增或更新供應商物料資訊
    pub fn upsert_supplier_product(&self, info: SupplierProductInfo) {
        self.suppliers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((info.sku.clone(), info.supplier_id.clone()), info);
    }

    /// 所有採購單（按追加順序）
    pub fn purchase_orders(&self) -> Result<Vec<PurchaseOrder>> {
        Ok(read(&self.purchase_orders)?.clone())
    }

    /// 所有包裝任務（按入列順序）
    pub fn packing_items(&self) -> Result<Vec<PackingItem>> {
        Ok(read(&self.packing_items)?.clone())
    }

    /// 收貨入庫
    pub fn increment_stock(&self, sku: &str, warehouse_id: &str, quantity: u64) -> Result<()> {
        let mut catalog = write(&self.catalog)?;
        let product = catalog
            .products
            .get_mut(sku)
            .ok_or_else(|| RestockError::NotFound(sku.to_string()))?;

        let current = product.current_stock.quantity(warehouse_id);
        let updated = current.checked_add(quantity).ok_or_else(|| {
            RestockError::InvalidArgument(format!("物料 {} 庫存溢出", sku))
        })?;
        product.current_stock.set(warehouse_id, updated);
        Ok(())
    }
}

impl ProductCatalog for InMemoryStore {
    fn product(&self, sku: &str) -> Result<Option<Product>> {
        Ok(read(&self.catalog)?.products.get(sku).cloned())
    }

    fn skus(&self) -> Result<Vec<String>> {
        Ok(read(&self.catalog)?.order.clone())
    }
}

impl StockLedger for InMemoryStore {
    fn stock_by_warehouse(&self, sku: &str) -> Result<StockSnapshot> {
        Ok(read(&self.catalog)?
            .products
            .get(sku)
            .map(|p| p.current_stock.clone())
            .unwrap_or_default())
    }

    fn decrement_stock(&self, sku: &str, warehouse_id: &str, quantity: u64) -> Result<()> {
        let mut catalog = write(&self.catalog)?;
        let product = catalog
            .products
            .get_mut(sku)
            .ok_or_else(|| RestockError::NotFound(sku.to_string()))?;

        let available = product.current_stock.quantity(warehouse_id);
        if quantity > available {
            return Err(RestockError::InsufficientStock {
                sku: sku.to_string(),
                warehouse_id: warehouse_id.to_string(),
                requested: quantity,
                available,
            });
        }

        product.current_stock.set(warehouse_id, available - quantity);
        tracing::debug!(
            "扣減庫存: {} @ {} -{} (剩餘 {})",
            sku,
            warehouse_id,
            quantity,
            available - quantity
        );
        Ok(())
    }
}

impl SalesHistoryStore for InMemoryStore {
    fn orders_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<SalesOrder>> {
        Ok(read(&self.sales)?
            .iter()
            .filter(|o| o.order_date >= from && o.order_date <= to)
            .cloned()
            .collect())
    }
}

impl SupplierCatalog for InMemoryStore {
    fn supplier_product(
        &self,
        sku: &str,
        supplier_id: &str,
    ) -> Result<Option<SupplierProductInfo>> {
        Ok(read(&self.suppliers)?
            .get(&(sku.to_string(), supplier_id.to_string()))
            .cloned())
    }
}

impl PurchaseOrderStore for InMemoryStore {
    fn append(&self, order: PurchaseOrder) -> Result<()> {
        write(&self.purchase_orders)?.push(order);
        Ok(())
    }

    fn open_orders_for(&self, sku: &str) -> Result<Vec<PurchaseOrder>> {
        Ok(read(&self.purchase_orders)?
            .iter()
            .filter(|po| po.is_open() && po.covers(sku))
            .cloned()
            .collect())
    }
}

impl PackingQueue for InMemoryStore {
    fn enqueue(&self, item: PackingItem) -> Result<()> {
        write(&self.packing_items)?.push(item);
        Ok(())
    }
}
