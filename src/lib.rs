//! # Restock
//!
//! 需求驅動補貨與多倉訂單履約引擎
//!
//! - [`restock_core`]：資料模型、資料存取介面、記憶體內儲存
//! - [`restock_calc`]：銷售速度、缺貨預測、補貨建議、採購單產生與補貨排程
//! - [`restock_fulfillment`]：分倉拆單與包裝任務產生

pub use restock_calc;
pub use restock_core;
pub use restock_fulfillment;

pub use restock_calc::{ReorderAdvisor, ReplenishmentReport, ReplenishmentScheduler};
pub use restock_core::{EngineConfig, InMemoryStore, RestockError, Result};
pub use restock_fulfillment::{FulfillmentReport, OrderFulfillmentOrchestrator};
