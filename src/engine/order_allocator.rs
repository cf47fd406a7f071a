// ==========================================
// 可生产订单分析 - 新需求订单分配引擎
// ==========================================
// 职责: 订单优先级顺序 + 订单级原子预留
// 输入: 以 available_after_firm 为种子的 committed 账本 + 按订单分组的新需求
// 输出: 每订单一个 producible 判定 + 分配后的 committed 账本
// ==========================================
// 红线:
// 1) 订单按 order_priority 升序逐个评估，前序订单先提交
// 2) 每订单在 working 副本上逐行预留，首个不足即短路
// 3) 全部行成功才以 working 副本替换 committed；失败则丢弃，committed 不变
// ==========================================

use crate::domain::demand::{order_priority, Order};
use crate::domain::report::{LineEvaluation, OrderDecision};
use crate::engine::inventory_pool::Ledger;
use tracing::{debug, info, instrument};

// ==========================================
// AllocationOutcome - 分配结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    pub decisions: Vec<OrderDecision>, // 按评估顺序
    pub committed: Ledger,             // 全部订单处理后的账本
}

impl AllocationOutcome {
    pub fn producible_count(&self) -> usize {
        self.decisions.iter().filter(|d| d.producible).count()
    }
}

// ==========================================
// OrderAllocator
// ==========================================
pub struct OrderAllocator {
    // 无状态引擎；账本作为参数显式传入并返回
}

impl OrderAllocator {
    pub fn new() -> Self {
        Self {}
    }

    /// 顺序分配
    ///
    /// # 参数
    /// - `committed`: 初始账本（所有权转入，单写者）
    /// - `orders`: 新需求订单（顺序不要求，内部按优先级重排）
    #[instrument(skip_all, fields(orders = orders.len()))]
    pub fn allocate(&self, mut committed: Ledger, orders: &[Order]) -> AllocationOutcome {
        let mut sequence: Vec<&Order> = orders.iter().collect();
        sequence.sort_by(|a, b| order_priority(&a.order_id, &b.order_id));

        let mut decisions = Vec::with_capacity(sequence.len());
        for order in sequence {
            let (decision, working) = self.evaluate(&committed, order);
            if let Some(working) = working {
                committed = working;
            }
            decisions.push(decision);
        }

        let outcome = AllocationOutcome {
            decisions,
            committed,
        };
        info!(
            producible = outcome.producible_count(),
            total = outcome.decisions.len(),
            "新需求订单分配完成"
        );
        outcome
    }

    /// 单订单评估
    ///
    /// # 返回
    /// - OrderDecision: 订单判定（所有行共享同一 producible）
    /// - Some(Ledger): 成功时的 working 副本，供调用方提交
    /// - None: 失败，committed 账本不受影响
    pub fn evaluate(&self, committed: &Ledger, order: &Order) -> (OrderDecision, Option<Ledger>) {
        let mut working = committed.clone();
        let mut failed_line: Option<usize> = None;
        let mut lines = Vec::with_capacity(order.lines.len());

        for (idx, line) in order.lines.iter().enumerate() {
            let available = working.available(&line.material_id);

            // 短路后的行不再检查，仅记录中止时的可用量
            if failed_line.is_some() {
                lines.push(LineEvaluation {
                    line: line.clone(),
                    available_at_evaluation: available,
                    checked: false,
                    passed: false,
                });
                continue;
            }

            let passed = match working.try_reserve(&line.material_id, line.requested_qty) {
                Ok(()) => true,
                Err(shortfall) => {
                    debug!(
                        order_id = %order.order_id,
                        material_id = %line.material_id,
                        requested = shortfall.requested,
                        available = shortfall.available,
                        "订单行可用量不足，订单整体不可生产"
                    );
                    failed_line = Some(idx);
                    false
                }
            };

            lines.push(LineEvaluation {
                line: line.clone(),
                available_at_evaluation: available,
                checked: true,
                passed,
            });
        }

        let producible = failed_line.is_none();
        let decision = OrderDecision {
            order_id: order.order_id.clone(),
            tier: order.tier,
            producible,
            failed_line,
            lines,
        };

        (decision, producible.then_some(working))
    }
}

impl Default for OrderAllocator {
    fn default() -> Self {
        Self::new()
    }
}
