// ==========================================
// 可生产订单分析 - 缺料说明
// ==========================================
// 行级: shortage = requested - available_at_evaluation
// 物料级: 两层级不可生产行的正缺口按物料合计，降序
// 红线: 只读，不修改任何账本
// ==========================================

use crate::domain::report::{MaterialShortage, OrderDecision, ShortageLine};
use crate::domain::types::DemandTier;
use crate::engine::availability_cascade::AvailabilityTable;
use crate::engine::normalizer::EquivalenceMap;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub struct ShortageExplainer<'a> {
    table: &'a AvailabilityTable,
}

impl<'a> ShortageExplainer<'a> {
    pub fn new(table: &'a AvailabilityTable) -> Self {
        Self { table }
    }

    /// 不可生产订单的全部行 → 行级缺料说明
    pub fn explain(&self, decisions: &[OrderDecision]) -> Vec<ShortageLine> {
        decisions
            .iter()
            .filter(|d| !d.producible)
            .flat_map(|d| d.lines.iter())
            .map(|eval| {
                let line = &eval.line;
                let tier_available_qty = match line.tier {
                    DemandTier::Firm => self.table.on_hand(&line.material_id),
                    DemandTier::Forecast => self.table.available_after_firm(&line.material_id),
                };
                let available = eval.available_at_evaluation;
                let shortage_qty = line.requested_qty - available;

                ShortageLine {
                    order_id: line.order_id.clone(),
                    tier: line.tier,
                    material_id: line.material_id.clone(),
                    requested_qty: line.requested_qty,
                    available_qty: available,
                    tier_available_qty,
                    shortage_qty,
                    net_inventory: available - line.requested_qty,
                    due_date: line.due_date,
                    reason: format!(
                        "{} {} needs {} units of '{}', but only {} are available. Shortage: {}",
                        line.tier.order_label(),
                        line.order_id,
                        line.requested_qty,
                        line.material_id,
                        available,
                        shortage_qty
                    ),
                }
            })
            .collect()
    }

    /// 物料级缺料排行（降序；同量按编码升序）
    ///
    /// 仅累计正缺口，单行可满足的行不抵减其他行的缺口
    pub fn rank_by_material<'s>(
        &self,
        shortages: impl IntoIterator<Item = &'s ShortageLine>,
        map: &EquivalenceMap,
    ) -> Vec<MaterialShortage> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for shortage in shortages {
            if shortage.shortage_qty > 0.0 {
                *totals.entry(shortage.material_id.as_str()).or_insert(0.0) +=
                    shortage.shortage_qty;
            }
        }

        let mut ranked: Vec<MaterialShortage> = totals
            .into_iter()
            .map(|(material_id, shortage_qty)| MaterialShortage {
                material_id: material_id.to_string(),
                source_codes: map.source_codes(material_id).to_vec(),
                shortage_qty,
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.shortage_qty
                .partial_cmp(&a.shortage_qty)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.material_id.cmp(&b.material_id))
        });
        ranked
    }

    /// 交期早于 today 的不可生产行
    pub fn past_due(&self, shortages: &[ShortageLine], today: NaiveDate) -> Vec<ShortageLine> {
        shortages
            .iter()
            .filter(|s| s.due_date.is_some_and(|d| d < today))
            .cloned()
            .collect()
    }
}
