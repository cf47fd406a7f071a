// ==========================================
// 报表导出测试
// ==========================================
// 测试目标: AnalysisReport → CSV 结果表 + report.json
// ==========================================


use producible_orders::export::csv_exporter::{
    AVAILABILITY_FILE, FORECAST_NOK_FILE, FORECAST_OK_FILE, MATERIAL_SHORTAGE_FILE,
};
use producible_orders::export::{export_report, JsonExporter};
use std::fs;
use tempfile::tempdir;
use test_helpers::{date, run, DatasetBuilder};

fn sample_report() -> producible_orders::AnalysisReport {
    let dataset = DatasetBuilder::new()
        .map("CUP 12OZ", "cup-12")
        .material("LID 90")
        .stock("cup-12", 10.0)
        .stock("LID 90", 3.0)
        .firm("F1", "CUP 12OZ", 4.0)
        .forecast("1", "CUP 12OZ", 5.0)
        .forecast_due("2", "CUP 12OZ", 2.0, date(2026, 1, 3))
        .build();
    run(&dataset).unwrap()
}

#[test]
fn test_export_writes_all_reports() {
    println!("\n=== 测试：导出全部报表 ===");

    let dir = tempdir().unwrap();
    let out_dir = dir.path().join("nested").join("out");
    let report = sample_report();

    let written = export_report(&report, &out_dir).unwrap();

    assert_eq!(written.len(), 10);
    for path in &written {
        assert!(path.exists(), "{} missing", path.display());
    }

    let ok = fs::read_to_string(out_dir.join(FORECAST_OK_FILE)).unwrap();
    let ok_lines: Vec<&str> = ok.lines().collect();
    assert_eq!(ok_lines.len(), 2);
    assert!(ok_lines[0].starts_with("order_id,material_id,requested_qty"));
    assert!(ok_lines[1].starts_with("1,CUP 12OZ,5,6,"));

    let nok = fs::read_to_string(out_dir.join(FORECAST_NOK_FILE)).unwrap();
    assert!(nok.contains("Sales Order 2 needs 2 units of 'CUP 12OZ', but only 1 are available. Shortage: 1"));

    let shortage = fs::read_to_string(out_dir.join(MATERIAL_SHORTAGE_FILE)).unwrap();
    assert_eq!(
        shortage.lines().collect::<Vec<_>>(),
        vec!["material_id,source_codes,shortage_qty", "CUP 12OZ,cup-12,1"]
    );

    let availability = fs::read_to_string(out_dir.join(AVAILABILITY_FILE)).unwrap();
    assert!(availability.contains("LID 90,3,0,3,0,3"));
}

#[test]
fn test_json_report_round_trip() {
    let dir = tempdir().unwrap();
    let report = sample_report();

    let path = JsonExporter::export(&report, dir.path()).unwrap();
    let restored = JsonExporter::read(&path).unwrap();

    assert_eq!(restored.run_id, report.run_id);
    assert_eq!(restored.forecast_decisions, report.forecast_decisions);
    assert_eq!(restored.committed_ledger, report.committed_ledger);
    assert_eq!(restored.forecast_past_due.len(), 1);
}
