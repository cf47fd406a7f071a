// ==========================================
// 可生产订单分析 - 需求领域模型
// ==========================================
// 固定订单（COOIS）与新需求订单（ZCO41）的需求行
// ==========================================

use crate::domain::types::{DemandTier, MaterialType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// OrderId - 订单号
// ==========================================
// 排序即订单优先级：见 order_priority
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn numeric_value(&self) -> Option<u128> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse::<u128>().ok()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 订单优先级比较器（升序 = 优先级从高到低）
///
/// 规则:
/// 1) 两个订单号都是纯数字 → 按数值比较（"9" 先于 "10"）
/// 2) 纯数字订单号先于非数字订单号
/// 3) 其余按字典序比较
///
/// 数值相同但字面不同（如 "007" 与 "7"）时按字典序兜底，保证全序
pub fn order_priority(a: &OrderId, b: &OrderId) -> Ordering {
    match (a.numeric_value(), b.numeric_value()) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.0.cmp(&b.0)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.0.cmp(&b.0),
    }
}

impl Ord for OrderId {
    fn cmp(&self, other: &Self) -> Ordering {
        order_priority(self, other)
    }
}

impl PartialOrd for OrderId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ==========================================
// RawDemandRecord - 需求导入中间结构体
// ==========================================
// 数量/日期已完成容错解析（异常值已记入 DQ 报告）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDemandRecord {
    pub order_id: String,
    pub material_code: String,
    pub quantity: f64,
    pub due_date: Option<NaiveDate>,
    pub sales_office: Option<String>,
    pub description: Option<String>, // 用于 DC/SS 分类的物料描述
    pub row_number: usize,
}

// ==========================================
// DemandLine - 规范化后的需求行
// ==========================================
// 红线: 读入后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandLine {
    pub order_id: OrderId,
    pub material_id: String, // 规范编码
    pub requested_qty: f64,  // >= 0
    pub due_date: Option<NaiveDate>,
    pub tier: DemandTier,
    pub sales_office: Option<String>,
    pub material_type: MaterialType,
    pub row_number: usize,
}

// ==========================================
// Order - 订单（需求行按源顺序）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub tier: DemandTier,
    pub lines: Vec<DemandLine>,
}

impl Order {
    pub fn total_requested(&self) -> f64 {
        self.lines.iter().map(|l| l.requested_qty).sum()
    }
}
