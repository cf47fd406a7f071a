// ==========================================
// 可生产订单分析 - 库存池与预留账本
// ==========================================
// InventoryPool: 规范编码 → 在库数量（只读）
// Ledger: 规范编码 → 剩余可预留数量（分配循环唯一写入者）
// ==========================================
// 红线: Ledger 数量永不为负；未出现的编码视为 0
// ==========================================

use crate::domain::material::MaterialRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// InventoryPool - 在库数量
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryPool {
    on_hand: BTreeMap<String, f64>,
}

impl InventoryPool {
    /// 由规范化后的库存记录构建（重复编码按合计处理）
    pub fn from_records(records: &[MaterialRecord]) -> Self {
        let mut on_hand = BTreeMap::new();
        for record in records {
            *on_hand.entry(record.material_id.clone()).or_insert(0.0) += record.on_hand_qty;
        }
        Self { on_hand }
    }

    /// 在库数量（库存中不存在的物料返回 0）
    pub fn on_hand(&self, material_id: &str) -> f64 {
        self.on_hand.get(material_id).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, material_id: &str) -> bool {
        self.on_hand.contains_key(material_id)
    }

    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.on_hand.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.on_hand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.on_hand.is_empty()
    }
}

// ==========================================
// Ledger - 预留账本
// ==========================================
// committed 账本与 working 副本共用此类型：
// 订单评估时 clone 出 working 副本，成功后整体替换 committed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    remaining: BTreeMap<String, f64>,
}

/// 预留失败：请求量超过剩余量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shortfall {
    pub requested: f64,
    pub available: f64,
}

impl Shortfall {
    pub fn quantity(&self) -> f64 {
        self.requested - self.available
    }
}

impl Ledger {
    /// 以（物料, 数量）初始化；负数按 0 入账
    pub fn seeded<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let remaining = entries
            .into_iter()
            .map(|(id, qty)| (id.into(), qty.max(0.0)))
            .collect();
        Self { remaining }
    }

    pub fn available(&self, material_id: &str) -> f64 {
        self.remaining.get(material_id).copied().unwrap_or(0.0)
    }

    /// 尝试预留：剩余量 >= 请求量则扣减，否则账本不变
    pub fn try_reserve(&mut self, material_id: &str, qty: f64) -> Result<(), Shortfall> {
        let available = self.available(material_id);
        if available >= qty {
            if let Some(slot) = self.remaining.get_mut(material_id) {
                *slot = (available - qty).max(0.0);
            }
            Ok(())
        } else {
            Err(Shortfall {
                requested: qty,
                available,
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.remaining.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn into_map(self) -> BTreeMap<String, f64> {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_sums_duplicates_and_defaults_missing() {
        let pool = InventoryPool::from_records(&[
            MaterialRecord::new("CUP-A", 3.0),
            MaterialRecord::new("CUP-A", 2.0),
            MaterialRecord::new("CUP-B", 1.0),
        ]);
        assert_eq!(pool.on_hand("CUP-A"), 5.0);
        assert_eq!(pool.on_hand("CUP-Z"), 0.0);
        assert!(!pool.contains("CUP-Z"));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_ledger_seed_clamps_negative() {
        let ledger = Ledger::seeded(vec![("CUP-A", -4.0), ("CUP-B", 6.0)]);
        assert_eq!(ledger.available("CUP-A"), 0.0);
        assert_eq!(ledger.available("CUP-B"), 6.0);
    }

    #[test]
    fn test_try_reserve_success_and_failure() {
        let mut ledger = Ledger::seeded(vec![("CUP-A", 6.0)]);
        assert!(ledger.try_reserve("CUP-A", 5.0).is_ok());
        assert_eq!(ledger.available("CUP-A"), 1.0);

        let err = ledger.try_reserve("CUP-A", 2.0).unwrap_err();
        assert_eq!(err.quantity(), 1.0);
        assert_eq!(ledger.available("CUP-A"), 1.0);
    }

    #[test]
    fn test_zero_request_on_missing_material() {
        let mut ledger = Ledger::default();
        assert!(ledger.try_reserve("CUP-A", 0.0).is_ok());
        assert!(ledger.try_reserve("CUP-A", 0.5).is_err());
        assert_eq!(ledger.available("CUP-A"), 0.0);
    }
}
