// ==========================================
// 可生产订单分析 - 需求汇总器
// ==========================================
// 职责: 按物料汇总需求量；按订单分组需求行
// 订单顺序由 order_priority 决定（升序），行顺序保持源顺序
// ==========================================

use crate::domain::demand::{order_priority, DemandLine, Order, OrderId};
use std::collections::{BTreeMap, HashMap};

pub struct DemandAggregator {
    // 无状态
}

impl DemandAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 规范编码 → 需求总量
    pub fn total_by_material(&self, lines: &[DemandLine]) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for line in lines {
            *totals.entry(line.material_id.clone()).or_insert(0.0) += line.requested_qty;
        }
        totals
    }

    /// 按订单分组，订单按优先级升序
    ///
    /// 同一订单的行保持源出现顺序，与订单在源中的位置无关
    pub fn group_by_order(&self, lines: &[DemandLine]) -> Vec<Order> {
        let mut index: HashMap<&OrderId, usize> = HashMap::new();
        let mut orders: Vec<Order> = Vec::new();

        for line in lines {
            match index.get(&line.order_id) {
                Some(&pos) => orders[pos].lines.push(line.clone()),
                None => {
                    index.insert(&line.order_id, orders.len());
                    orders.push(Order {
                        order_id: line.order_id.clone(),
                        tier: line.tier,
                        lines: vec![line.clone()],
                    });
                }
            }
        }

        orders.sort_by(|a, b| order_priority(&a.order_id, &b.order_id));
        orders
    }
}

impl Default for DemandAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{DemandTier, MaterialType};

    fn line(order: &str, material: &str, qty: f64, row: usize) -> DemandLine {
        DemandLine {
            order_id: OrderId::new(order),
            material_id: material.to_string(),
            requested_qty: qty,
            due_date: None,
            tier: DemandTier::Forecast,
            sales_office: None,
            material_type: MaterialType::Dc,
            row_number: row,
        }
    }

    #[test]
    fn test_total_by_material() {
        let aggregator = DemandAggregator::new();
        let totals = aggregator.total_by_material(&[
            line("1", "X", 2.0, 2),
            line("2", "X", 3.0, 3),
            line("2", "Y", 1.0, 4),
        ]);
        assert_eq!(totals["X"], 5.0);
        assert_eq!(totals["Y"], 1.0);
    }

    #[test]
    fn test_group_by_order_priority_and_line_sequence() {
        let aggregator = DemandAggregator::new();
        let orders = aggregator.group_by_order(&[
            line("20", "Z", 1.0, 2),
            line("3", "B", 1.0, 3),
            line("20", "A", 1.0, 4),
            line("3", "A", 1.0, 5),
        ]);

        let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "20"]);

        let order_20: Vec<&str> = orders[1].lines.iter().map(|l| l.material_id.as_str()).collect();
        assert_eq!(order_20, vec!["Z", "A"]);
        assert_eq!(orders[0].total_requested(), 2.0);
    }
}
