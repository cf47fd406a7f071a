// ==========================================
// 可生产订单分析 - 可用量分层计算
// ==========================================
// on_hand → available_after_firm → available_after_all
// ==========================================
// 红线: 逐物料独立计算，不感知订单
// available_after_all 仅用于缺料汇总展示，不参与订单判定
// ==========================================

use crate::domain::report::AvailabilityRow;
use crate::engine::inventory_pool::{InventoryPool, Ledger};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument};

// ==========================================
// AvailabilityTable - 分层可用量表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityTable {
    rows: BTreeMap<String, AvailabilityRow>,
}

impl AvailabilityTable {
    pub fn row(&self, material_id: &str) -> Option<&AvailabilityRow> {
        self.rows.get(material_id)
    }

    pub fn on_hand(&self, material_id: &str) -> f64 {
        self.rows.get(material_id).map(|r| r.on_hand_qty).unwrap_or(0.0)
    }

    pub fn available_after_firm(&self, material_id: &str) -> f64 {
        self.rows
            .get(material_id)
            .map(|r| r.available_after_firm)
            .unwrap_or(0.0)
    }

    /// 以 available_after_firm 为种子的 committed 账本
    pub fn seed_ledger(&self) -> Ledger {
        Ledger::seeded(
            self.rows
                .iter()
                .map(|(id, row)| (id.clone(), row.available_after_firm)),
        )
    }

    pub fn rows(&self) -> impl Iterator<Item = &AvailabilityRow> {
        self.rows.values()
    }

    pub fn into_rows(self) -> Vec<AvailabilityRow> {
        self.rows.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// AvailabilityCascade
// ==========================================
pub struct AvailabilityCascade {
    // 无状态
}

impl AvailabilityCascade {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算分层可用量
    ///
    /// 物料集合 = 库存 ∪ 固定需求 ∪ 新需求；库存中缺失的物料在库按 0
    #[instrument(skip_all, fields(materials = pool.len()))]
    pub fn compute(
        &self,
        pool: &InventoryPool,
        firm_demand: &BTreeMap<String, f64>,
        forecast_demand: &BTreeMap<String, f64>,
    ) -> AvailabilityTable {
        let materials: BTreeSet<&str> = pool
            .materials()
            .chain(firm_demand.keys().map(String::as_str))
            .chain(forecast_demand.keys().map(String::as_str))
            .collect();

        let rows = materials
            .into_iter()
            .map(|id| {
                let on_hand_qty = pool.on_hand(id);
                let firm_demand_qty = firm_demand.get(id).copied().unwrap_or(0.0);
                let forecast_demand_qty = forecast_demand.get(id).copied().unwrap_or(0.0);
                let available_after_firm = on_hand_qty - firm_demand_qty;
                let available_after_all = available_after_firm - forecast_demand_qty;

                if !pool.contains(id) {
                    debug!(material_id = id, "需求物料不在库存中，在库按 0 计");
                }

                (
                    id.to_string(),
                    AvailabilityRow {
                        material_id: id.to_string(),
                        on_hand_qty,
                        firm_demand_qty,
                        forecast_demand_qty,
                        available_after_firm,
                        available_after_all,
                    },
                )
            })
            .collect();

        AvailabilityTable { rows }
    }
}

impl Default for AvailabilityCascade {
    fn default() -> Self {
        Self::new()
    }
}
