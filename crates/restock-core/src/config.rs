//! 補貨引擎配置

use serde::{Deserialize, Serialize};

use crate::{RestockError, Result};

/// 補貨引擎配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// 銷售速度回看窗口（天）
    pub lookback_days: u32,

    /// 需求預測週期（天）
    pub forecast_period_days: u32,

    /// 提前期未知時使用的到貨時界（天）
    pub unknown_lead_time_horizon_days: u32,

    /// 是否在已有在途採購單時跳過產生新採購單
    /// - false: 不去重，重複執行可能產生重複採購單（預設）
    /// - true: 同一 SKU 已有 pending/ordered/partially_received 採購單時跳過
    pub suppress_when_open_po: bool,

    /// 是否並行計算各 SKU 的補貨建議
    pub parallel: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            lookback_days: 30,
            forecast_period_days: 30,
            unknown_lead_time_horizon_days: 3650,
            suppress_when_open_po: false,
            parallel: true,
        }
    }

    /// 建構器模式：設置回看窗口
    pub fn with_lookback_days(mut self, days: u32) -> Self {
        self.lookback_days = days;
        self
    }

    /// 建構器模式：設置預測週期
    pub fn with_forecast_period_days(mut self, days: u32) -> Self {
        self.forecast_period_days = days;
        self
    }

    /// 建構器模式：設置未知提前期的到貨時界
    pub fn with_unknown_lead_time_horizon_days(mut self, days: u32) -> Self {
        self.unknown_lead_time_horizon_days = days;
        self
    }

    /// 建構器模式：設置是否以在途採購單去重
    pub fn with_suppress_when_open_po(mut self, suppress: bool) -> Self {
        self.suppress_when_open_po = suppress;
        self
    }

    /// 建構器模式：設置是否並行計算
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.lookback_days == 0 {
            return Err(RestockError::InvalidArgument(
                "回看窗口必須為正數".to_string(),
            ));
        }
        if self.unknown_lead_time_horizon_days == 0 {
            return Err(RestockError::InvalidArgument(
                "未知提前期的到貨時界必須為正數".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
