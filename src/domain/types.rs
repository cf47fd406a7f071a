// ==========================================
// 可生产订单分析 - 领域类型定义
// ==========================================
// 需求层级 / 物料类型 / 订单渠道 / 数据质量等级
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 需求层级 (Demand Tier)
// ==========================================
// Firm: 已下达的固定订单（COOIS），先于新需求扣减
// Forecast: 新需求订单（ZCO41），按订单原子化顺序预留
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DemandTier {
    Firm,
    Forecast,
}

impl DemandTier {
    /// 订单号在说明文本中的称谓
    pub fn order_label(&self) -> &'static str {
        match self {
            DemandTier::Firm => "Sales document",
            DemandTier::Forecast => "Sales Order",
        }
    }
}

impl fmt::Display for DemandTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemandTier::Firm => write!(f, "FIRM"),
            DemandTier::Forecast => write!(f, "FORECAST"),
        }
    }
}

// ==========================================
// 物料类型 (Material Type)
// ==========================================
// 物料描述以 SS 结尾为 SS，其余为 DC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialType {
    Dc,
    Ss,
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialType::Dc => write!(f, "DC"),
            MaterialType::Ss => write!(f, "SS"),
        }
    }
}

// ==========================================
// 订单渠道 (Order Channel)
// ==========================================
// 由销售办公室 (Sales office) 归并得到
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderChannel {
    Bdv,
    Ecm,
}

impl fmt::Display for OrderChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderChannel::Bdv => write!(f, "BDV"),
            OrderChannel::Ecm => write!(f, "ECM"),
        }
    }
}

// ==========================================
// 数据质量等级 (DQ Level)
// ==========================================
// Error: 行被排除（但记录在 DQ 报告中）
// Warning: 行被就地修复（数量置 0 / 日期置空）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,
    Warning,
    Info,
}

impl fmt::Display for DqLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DqLevel::Error => write!(f, "ERROR"),
            DqLevel::Warning => write!(f, "WARNING"),
            DqLevel::Info => write!(f, "INFO"),
        }
    }
}

// ==========================================
// 数据来源 (Record Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordSource {
    Equivalence,
    Inventory,
    FirmOrders,
    ForecastOrders,
}

impl From<DemandTier> for RecordSource {
    fn from(tier: DemandTier) -> Self {
        match tier {
            DemandTier::Firm => RecordSource::FirmOrders,
            DemandTier::Forecast => RecordSource::ForecastOrders,
        }
    }
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::Equivalence => write!(f, "EQUIVALENCE"),
            RecordSource::Inventory => write!(f, "INVENTORY"),
            RecordSource::FirmOrders => write!(f, "FIRM_ORDERS"),
            RecordSource::ForecastOrders => write!(f, "FORECAST_ORDERS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_display_and_label() {
        assert_eq!(DemandTier::Firm.to_string(), "FIRM");
        assert_eq!(DemandTier::Forecast.order_label(), "Sales Order");
        assert_eq!(
            RecordSource::from(DemandTier::Forecast),
            RecordSource::ForecastOrders
        );
    }

    #[test]
    fn test_serde_screaming_case() {
        let json = serde_json::to_string(&OrderChannel::Ecm).unwrap();
        assert_eq!(json, "\"ECM\"");
        let tier: DemandTier = serde_json::from_str("\"FORECAST\"").unwrap();
        assert_eq!(tier, DemandTier::Forecast);
    }
}
