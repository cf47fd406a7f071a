// ==========================================
// 可生产订单分析 - 原始数据集
// ==========================================
// 导入层产出、规范化器消费的四类输入
// ==========================================

use crate::domain::demand::RawDemandRecord;
use crate::domain::material::{EquivalenceEntry, RawInventoryRecord};
use crate::domain::quality::DqReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDataset {
    pub equivalence: Vec<EquivalenceEntry>,
    pub inventory: Vec<RawInventoryRecord>, // 已按源编码合计
    pub firm_orders: Vec<RawDemandRecord>,
    pub forecast_orders: Vec<RawDemandRecord>,
    pub dq_report: DqReport,
}
