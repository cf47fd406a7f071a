// ==========================================
// 可生产订单分析 - 分析结果模型
// ==========================================
// 可用量分层表 / 订单判定 / 缺料说明 / 渠道汇总
// ==========================================

use crate::domain::demand::{DemandLine, OrderId};
use crate::domain::quality::DqReport;
use crate::domain::types::{DemandTier, OrderChannel};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// AvailabilityRow - 单物料分层可用量
// ==========================================
// available_after_firm = on_hand - firm_demand
// available_after_all  = available_after_firm - forecast_demand（仅用于汇总展示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRow {
    pub material_id: String,
    pub on_hand_qty: f64,
    pub firm_demand_qty: f64,
    pub forecast_demand_qty: f64,
    pub available_after_firm: f64,
    pub available_after_all: f64,
}

// ==========================================
// LineEvaluation - 需求行判定
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineEvaluation {
    pub line: DemandLine,
    pub available_at_evaluation: f64, // 判定时该物料的可用量
    pub checked: bool,                // false = 订单已在前序行短路
    pub passed: bool,
}

// ==========================================
// OrderDecision - 订单级判定
// ==========================================
// producible 作用于订单的全部需求行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDecision {
    pub order_id: OrderId,
    pub tier: DemandTier,
    pub producible: bool,
    pub failed_line: Option<usize>, // 首个失败行在 lines 中的下标
    pub lines: Vec<LineEvaluation>,
}

// ==========================================
// ShortageLine - 不可生产订单的行级缺料说明
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortageLine {
    pub order_id: OrderId,
    pub tier: DemandTier,
    pub material_id: String,
    pub requested_qty: f64,
    pub available_qty: f64,      // 判定时可用量
    pub tier_available_qty: f64, // 层级口径：固定订单=在库，新需求=固定订单后
    pub shortage_qty: f64,       // requested - available
    pub net_inventory: f64,      // available - requested
    pub due_date: Option<NaiveDate>,
    pub reason: String,
}

// ==========================================
// MaterialShortage - 物料级缺料汇总（降序）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialShortage {
    pub material_id: String,
    pub source_codes: Vec<String>, // 映射到该规范编码的 B 体系编码
    pub shortage_qty: f64,
}

// ==========================================
// ChannelSummary - 订单渠道数量汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub tier: DemandTier,
    pub channel: OrderChannel,
    pub quantity: f64,
}

// ==========================================
// AnalysisReport - 单次分析的完整结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub today: NaiveDate,
    pub availability: Vec<AvailabilityRow>,
    pub firm_decisions: Vec<OrderDecision>,
    pub forecast_decisions: Vec<OrderDecision>,
    pub firm_shortages: Vec<ShortageLine>,
    pub forecast_shortages: Vec<ShortageLine>,
    pub firm_past_due: Vec<ShortageLine>,
    pub forecast_past_due: Vec<ShortageLine>,
    pub material_shortages: Vec<MaterialShortage>,
    pub channel_summary: Vec<ChannelSummary>,
    pub committed_ledger: BTreeMap<String, f64>,
    pub dq_report: DqReport,
}

impl AnalysisReport {
    /// 指定层级下可生产/不可生产订单数
    pub fn order_counts(&self, tier: DemandTier) -> (usize, usize) {
        let decisions = match tier {
            DemandTier::Firm => &self.firm_decisions,
            DemandTier::Forecast => &self.forecast_decisions,
        };
        let ok = decisions.iter().filter(|d| d.producible).count();
        (ok, decisions.len() - ok)
    }

    /// 查找订单判定
    pub fn decision(&self, tier: DemandTier, order_id: &str) -> Option<&OrderDecision> {
        let decisions = match tier {
            DemandTier::Firm => &self.firm_decisions,
            DemandTier::Forecast => &self.forecast_decisions,
        };
        decisions.iter().find(|d| d.order_id.as_str() == order_id)
    }

    /// 可生产的新需求订单行
    pub fn producible_forecast_lines(&self) -> impl Iterator<Item = &LineEvaluation> {
        self.forecast_decisions
            .iter()
            .filter(|d| d.producible)
            .flat_map(|d| d.lines.iter())
    }

    pub fn availability_of(&self, material_id: &str) -> Option<&AvailabilityRow> {
        self.availability
            .iter()
            .find(|r| r.material_id == material_id)
    }
}
