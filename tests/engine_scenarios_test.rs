// ==========================================
// 分析引擎场景测试
// ==========================================
// 测试目标: 分层可用量 / 新需求订单顺序原子分配 / 缺料说明
// 覆盖范围: 典型场景 + 原子性、优先级、守恒、幂等、确定性
// ==========================================


use producible_orders::domain::{DemandLine, DemandTier, MaterialType, Order, OrderId, RecordSource};
use producible_orders::engine::{
    Classifier, EngineError, EquivalenceMap, Ledger, MaterialCodeNormalizer, OrderAllocator,
};
use std::collections::BTreeMap;
use test_helpers::{date, run, DatasetBuilder};

fn forecast_line(order: &str, material: &str, qty: f64) -> DemandLine {
    DemandLine {
        order_id: OrderId::new(order),
        material_id: material.to_string(),
        requested_qty: qty,
        due_date: None,
        tier: DemandTier::Forecast,
        sales_office: None,
        material_type: MaterialType::Dc,
        row_number: 2,
    }
}

fn order(id: &str, lines: &[(&str, f64)]) -> Order {
    Order {
        order_id: OrderId::new(id),
        tier: DemandTier::Forecast,
        lines: lines
            .iter()
            .map(|(m, q)| forecast_line(id, m, *q))
            .collect(),
    }
}

// ==========================================
// 典型场景
// ==========================================

#[test]
fn test_later_order_sees_committed_reservation() {
    println!("\n=== 测试：先到订单预留后，后续订单按剩余量判定 ===");

    let dataset = DatasetBuilder::new()
        .material("X")
        .stock("X", 10.0)
        .firm("F1", "X", 4.0)
        .forecast("1", "X", 5.0)
        .forecast("2", "X", 2.0)
        .build();

    let report = run(&dataset).unwrap();

    let row = report.availability_of("X").unwrap();
    assert_eq!(row.available_after_firm, 6.0);

    assert!(report.decision(DemandTier::Forecast, "1").unwrap().producible);
    let second = report.decision(DemandTier::Forecast, "2").unwrap();
    assert!(!second.producible);
    assert_eq!(second.lines[0].available_at_evaluation, 1.0);

    assert_eq!(report.forecast_shortages.len(), 1);
    assert_eq!(report.forecast_shortages[0].shortage_qty, 1.0);
    assert_eq!(report.forecast_shortages[0].tier_available_qty, 6.0);
    assert_eq!(report.committed_ledger["X"], 1.0);
    println!("✓ 订单 2 缺 1，账本保持 1");
}

#[test]
fn test_failed_order_leaves_ledger_for_next_order() {
    println!("\n=== 测试：失败订单不影响后续订单 ===");

    let dataset = DatasetBuilder::new()
        .material("X")
        .stock("X", 5.0)
        .forecast("4", "X", 3.0)
        .forecast("3", "X", 6.0)
        .build();

    let report = run(&dataset).unwrap();

    let ids: Vec<&str> = report
        .forecast_decisions
        .iter()
        .map(|d| d.order_id.as_str())
        .collect();
    assert_eq!(ids, vec!["3", "4"]);
    assert!(!report.decision(DemandTier::Forecast, "3").unwrap().producible);

    let fourth = report.decision(DemandTier::Forecast, "4").unwrap();
    assert!(fourth.producible);
    assert_eq!(fourth.lines[0].available_at_evaluation, 5.0);
    assert_eq!(report.committed_ledger["X"], 2.0);
}

#[test]
fn test_unmapped_identifier_aborts_whole_batch() {
    println!("\n=== 测试：未映射编码导致整批失败 ===");

    let dataset = DatasetBuilder::new()
        .material("X")
        .stock("X", 5.0)
        .forecast("1", "X", 1.0)
        .forecast("2", "WIDGET-A", 1.0)
        .forecast("3", "WIDGET-A", 2.0)
        .build();

    let err = run(&dataset).unwrap_err();
    let report = err.validation_report().expect("validation report");

    assert_eq!(report.len(), 1);
    assert_eq!(report.unresolved[0].raw_code, "WIDGET-A");
    assert_eq!(report.unresolved[0].source, RecordSource::ForecastOrders);
    assert_eq!(report.unresolved[0].row_numbers.len(), 2);
    assert!(matches!(err, EngineError::UnresolvedIdentifiers(_)));
}

#[test]
fn test_unreferenced_material_listed_but_never_short() {
    println!("\n=== 测试：无需求物料仅出现在可用量表 ===");

    let dataset = DatasetBuilder::new()
        .material("X")
        .material("Y")
        .stock("X", 1.0)
        .stock("Y", 20.0)
        .forecast("1", "X", 3.0)
        .build();

    let report = run(&dataset).unwrap();

    let row = report.availability_of("Y").unwrap();
    assert_eq!(row.on_hand_qty, 20.0);
    assert_eq!(row.available_after_firm, 20.0);
    assert_eq!(row.available_after_all, 20.0);
    assert!(report.material_shortages.iter().all(|s| s.material_id != "Y"));
    assert_eq!(report.material_shortages[0].material_id, "X");
}

#[test]
fn test_competing_firm_orders_both_reported_producible() {
    println!("\n=== 测试：固定订单逐行对照在库量（不做顺序预留）===");

    let dataset = DatasetBuilder::new()
        .material("X")
        .stock("X", 10.0)
        .firm("A", "X", 8.0)
        .firm("B", "X", 8.0)
        .build();

    let report = run(&dataset).unwrap();

    assert_eq!(report.order_counts(DemandTier::Firm), (2, 0));
    assert!(report.firm_shortages.is_empty());

    let row = report.availability_of("X").unwrap();
    assert_eq!(row.available_after_firm, -6.0);
    // 账本按 0 入账
    assert_eq!(report.committed_ledger["X"], 0.0);
}

#[test]
fn test_material_missing_from_inventory_is_a_shortage() {
    let dataset = DatasetBuilder::new()
        .material("X")
        .material("Z")
        .stock("X", 1.0)
        .firm("A", "Z", 2.0)
        .build();

    let report = run(&dataset).unwrap();

    assert_eq!(report.availability_of("Z").unwrap().on_hand_qty, 0.0);
    assert_eq!(report.firm_shortages.len(), 1);
    assert_eq!(report.firm_shortages[0].shortage_qty, 2.0);
    assert!(report.firm_shortages[0]
        .reason
        .starts_with("Sales document A needs 2 units of 'Z'"));
}

// ==========================================
// 性质
// ==========================================

#[test]
fn test_order_atomicity_restores_ledger() {
    println!("\n=== 测试：订单原子性 ===");

    let allocator = OrderAllocator::new();
    let committed = Ledger::seeded([("X", 10.0), ("Y", 2.0)]);

    // 第一行可满足，第二行不足 → 整单失败，账本不变
    let (decision, working) =
        allocator.evaluate(&committed, &order("1", &[("X", 3.0), ("Y", 5.0), ("X", 1.0)]));
    assert!(!decision.producible);
    assert_eq!(decision.failed_line, Some(1));
    assert!(working.is_none());
    assert!(decision.lines[0].passed && decision.lines[0].checked);
    assert!(!decision.lines[2].checked);
    // 短路后的行记录中止时的 working 可用量
    assert_eq!(decision.lines[2].available_at_evaluation, 7.0);
    assert_eq!(committed.available("X"), 10.0);

    let outcome = allocator.allocate(
        committed.clone(),
        &[
            order("1", &[("X", 3.0), ("Y", 5.0)]),
            order("2", &[("X", 10.0)]),
        ],
    );
    assert!(!outcome.decisions[0].producible);
    assert!(outcome.decisions[1].producible);
    assert_eq!(outcome.committed.available("X"), 0.0);
    assert_eq!(outcome.committed.available("Y"), 2.0);
}

#[test]
fn test_priority_uses_identifier_not_source_order() {
    println!("\n=== 测试：按订单号数值优先 ===");

    let outcome = OrderAllocator::new().allocate(
        Ledger::seeded([("X", 5.0)]),
        &[order("10", &[("X", 5.0)]), order("9", &[("X", 5.0)])],
    );

    assert_eq!(outcome.decisions[0].order_id.as_str(), "9");
    assert!(outcome.decisions[0].producible);
    assert_eq!(outcome.decisions[1].order_id.as_str(), "10");
    assert!(!outcome.decisions[1].producible);
}

#[test]
fn test_ledger_conservation() {
    println!("\n=== 测试：账本守恒 ===");

    let dataset = DatasetBuilder::new()
        .material("X")
        .material("Y")
        .stock("X", 30.0)
        .stock("Y", 12.0)
        .firm("F1", "X", 5.0)
        .firm("F2", "Y", 2.0)
        .forecast("1", "X", 10.0)
        .forecast("1", "Y", 4.0)
        .forecast("2", "Y", 7.0)
        .forecast("3", "X", 8.0)
        .forecast("4", "X", 9.0)
        .forecast("5", "Y", 6.0)
        .build();

    let report = run(&dataset).unwrap();

    let mut consumed: BTreeMap<String, f64> = BTreeMap::new();
    for decision in report.forecast_decisions.iter().filter(|d| d.producible) {
        for eval in &decision.lines {
            *consumed.entry(eval.line.material_id.clone()).or_insert(0.0) += eval.line.requested_qty;
        }
    }

    for row in &report.availability {
        let expected =
            row.on_hand_qty - row.firm_demand_qty - consumed.get(&row.material_id).copied().unwrap_or(0.0);
        assert_eq!(report.committed_ledger[&row.material_id], expected, "{}", row.material_id);
    }
    // X: 25 → #1(10) → #3(8) → #4 失败(7 < 9)；Y: 10 → #1(4) → #2 失败(6 < 7) → #5(6)
    assert_eq!(report.committed_ledger["X"], 7.0);
    assert_eq!(report.committed_ledger["Y"], 0.0);
    assert_eq!(report.order_counts(DemandTier::Forecast), (3, 2));
}

#[test]
fn test_normalization_is_idempotent() {
    println!("\n=== 测试：规范化幂等 ===");

    let raw = DatasetBuilder::new()
        .map("CUP 12OZ", "cup-12")
        .stock("cup-12", 4.0)
        .forecast("1", "CUP 12OZ", 1.0)
        .build();
    let canonical = DatasetBuilder::new()
        .map("CUP 12OZ", "cup-12")
        .stock("CUP 12OZ", 4.0)
        .forecast("1", "CUP 12OZ", 1.0)
        .build();

    let map = EquivalenceMap::from_entries(&raw.equivalence).unwrap();
    let classifier = Classifier::default();
    let normalizer = MaterialCodeNormalizer::new(&map, &classifier);

    assert_eq!(normalizer.normalize_code("CUP 12OZ").as_deref(), Some("CUP 12OZ"));
    assert_eq!(normalizer.normalize_code("cup-12").as_deref(), Some("CUP 12OZ"));

    let first = normalizer.normalize(&raw).unwrap();
    let second = normalizer.normalize(&canonical).unwrap();
    assert_eq!(first.materials, second.materials);
    assert_eq!(first.forecast_lines, second.forecast_lines);
}

#[test]
fn test_repeated_runs_are_deterministic() {
    println!("\n=== 测试：结果确定性 ===");

    let dataset = DatasetBuilder::new()
        .material("X")
        .material("Y")
        .stock("X", 9.0)
        .stock("Y", 3.0)
        .forecast("B-7", "X", 4.0)
        .forecast("12", "Y", 2.0)
        .forecast("2", "X", 6.0)
        .forecast("A-1", "Y", 2.0)
        .forecast_due("12", "X", 1.0, date(2026, 1, 2))
        .build();

    let first = run(&dataset).unwrap();
    let second = run(&dataset).unwrap();

    assert_ne!(first.run_id, second.run_id);
    assert_eq!(first.forecast_decisions, second.forecast_decisions);
    assert_eq!(first.committed_ledger, second.committed_ledger);
    assert_eq!(first.material_shortages, second.material_shortages);

    let ids: Vec<&str> = first
        .forecast_decisions
        .iter()
        .map(|d| d.order_id.as_str())
        .collect();
    assert_eq!(ids, vec!["2", "12", "A-1", "B-7"]);
}

#[test]
fn test_past_due_only_for_infeasible_lines() {
    let dataset = DatasetBuilder::new()
        .material("X")
        .stock("X", 2.0)
        .forecast_due("1", "X", 1.0, date(2026, 1, 1))
        .forecast_due("2", "X", 5.0, date(2026, 1, 10))
        .forecast_due("3", "X", 5.0, date(2026, 2, 1))
        .build();

    let report = run(&dataset).unwrap();

    let past_due: Vec<&str> = report
        .forecast_past_due
        .iter()
        .map(|s| s.order_id.as_str())
        .collect();
    assert_eq!(past_due, vec!["2"]);
}
