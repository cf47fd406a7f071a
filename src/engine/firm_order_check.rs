// ==========================================
// 可生产订单分析 - 固定订单齐套检查
// ==========================================
// 规则: 每行独立与在库数量比较（requested <= on_hand），不扣减、不排序
// 订单可生产 = 全部行通过
// ==========================================
// 注意: 与新需求订单不同，固定订单之间不做顺序预留。
// 两张固定订单争用同一物料时可能同时判定为可生产（保持既有口径）
// ==========================================

use crate::domain::demand::Order;
use crate::domain::report::{LineEvaluation, OrderDecision};
use crate::engine::availability_cascade::AvailabilityTable;
use tracing::{info, instrument};

pub struct FirmOrderChecker {
    // 无状态
}

impl FirmOrderChecker {
    pub fn new() -> Self {
        Self {}
    }

    #[instrument(skip_all, fields(orders = orders.len()))]
    pub fn evaluate(&self, table: &AvailabilityTable, orders: &[Order]) -> Vec<OrderDecision> {
        let decisions: Vec<OrderDecision> = orders
            .iter()
            .map(|order| {
                let lines: Vec<LineEvaluation> = order
                    .lines
                    .iter()
                    .map(|line| {
                        let available = table.on_hand(&line.material_id);
                        LineEvaluation {
                            line: line.clone(),
                            available_at_evaluation: available,
                            checked: true,
                            passed: line.requested_qty <= available,
                        }
                    })
                    .collect();

                let failed_line = lines.iter().position(|l| !l.passed);
                OrderDecision {
                    order_id: order.order_id.clone(),
                    tier: order.tier,
                    producible: failed_line.is_none(),
                    failed_line,
                    lines,
                }
            })
            .collect();

        info!(
            producible = decisions.iter().filter(|d| d.producible).count(),
            total = decisions.len(),
            "固定订单齐套检查完成"
        );
        decisions
    }
}

impl Default for FirmOrderChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::demand::{DemandLine, OrderId};
    use crate::domain::material::MaterialRecord;
    use crate::domain::types::{DemandTier, MaterialType};
    use crate::engine::availability_cascade::AvailabilityCascade;
    use crate::engine::inventory_pool::InventoryPool;
    use std::collections::BTreeMap;

    fn firm_order(id: &str, lines: &[(&str, f64)]) -> Order {
        Order {
            order_id: OrderId::new(id),
            tier: DemandTier::Firm,
            lines: lines
                .iter()
                .map(|(material, qty)| DemandLine {
                    order_id: OrderId::new(id),
                    material_id: material.to_string(),
                    requested_qty: *qty,
                    due_date: None,
                    tier: DemandTier::Firm,
                    sales_office: None,
                    material_type: MaterialType::Dc,
                    row_number: 2,
                })
                .collect(),
        }
    }

    #[test]
    fn test_competing_firm_orders_both_producible() {
        let pool = InventoryPool::from_records(&[MaterialRecord::new("X", 10.0)]);
        let firm: BTreeMap<String, f64> = [("X".to_string(), 16.0)].into_iter().collect();
        let table = AvailabilityCascade::new().compute(&pool, &firm, &BTreeMap::new());

        let decisions = FirmOrderChecker::new().evaluate(
            &table,
            &[firm_order("A1", &[("X", 8.0)]), firm_order("A2", &[("X", 8.0)])],
        );
        assert!(decisions.iter().all(|d| d.producible));
    }

    #[test]
    fn test_single_failing_line_fails_order() {
        let pool = InventoryPool::from_records(&[MaterialRecord::new("X", 10.0)]);
        let table = AvailabilityCascade::new().compute(&pool, &BTreeMap::new(), &BTreeMap::new());

        let decisions = FirmOrderChecker::new()
            .evaluate(&table, &[firm_order("A1", &[("X", 4.0), ("MISSING", 1.0)])]);
        assert!(!decisions[0].producible);
        assert_eq!(decisions[0].failed_line, Some(1));
        assert!(decisions[0].lines[0].passed);
    }
}
