// ==========================================
// 可生产订单分析 - CSV 报表导出
// ==========================================
// 每个结果表一个文件，表头固定
// ==========================================

use crate::domain::quality::DqReport;
use crate::domain::report::{
    AnalysisReport, AvailabilityRow, ChannelSummary, LineEvaluation, MaterialShortage,
    ShortageLine,
};
use crate::export::error::ExportResult;
use csv::Writer;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const FORECAST_OK_FILE: &str = "forecast_ok.csv";
pub const FORECAST_NOK_FILE: &str = "forecast_nok.csv";
pub const FIRM_NOK_FILE: &str = "firm_nok.csv";
pub const FORECAST_PAST_DUE_FILE: &str = "forecast_past_due.csv";
pub const FIRM_PAST_DUE_FILE: &str = "firm_past_due.csv";
pub const MATERIAL_SHORTAGE_FILE: &str = "material_shortage.csv";
pub const AVAILABILITY_FILE: &str = "availability.csv";
pub const CHANNEL_SUMMARY_FILE: &str = "channel_summary.csv";
pub const DQ_REPORT_FILE: &str = "dq_report.csv";

const PRODUCIBLE_HEADER: [&str; 7] = [
    "order_id",
    "material_id",
    "requested_qty",
    "available_at_evaluation",
    "due_date",
    "sales_office",
    "material_type",
];

const SHORTAGE_HEADER: [&str; 9] = [
    "order_id",
    "material_id",
    "requested_qty",
    "available_qty",
    "tier_available_qty",
    "shortage_qty",
    "net_inventory",
    "due_date",
    "reason",
];

fn date_cell(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn producible_row(eval: &LineEvaluation) -> Vec<String> {
    vec![
        eval.line.order_id.to_string(),
        eval.line.material_id.clone(),
        eval.line.requested_qty.to_string(),
        eval.available_at_evaluation.to_string(),
        date_cell(eval.line.due_date),
        eval.line.sales_office.clone().unwrap_or_default(),
        eval.line.material_type.to_string(),
    ]
}

fn shortage_row(line: &ShortageLine) -> Vec<String> {
    vec![
        line.order_id.to_string(),
        line.material_id.clone(),
        line.requested_qty.to_string(),
        line.available_qty.to_string(),
        line.tier_available_qty.to_string(),
        line.shortage_qty.to_string(),
        line.net_inventory.to_string(),
        date_cell(line.due_date),
        line.reason.clone(),
    ]
}

fn availability_row(row: &AvailabilityRow) -> Vec<String> {
    vec![
        row.material_id.clone(),
        row.on_hand_qty.to_string(),
        row.firm_demand_qty.to_string(),
        row.available_after_firm.to_string(),
        row.forecast_demand_qty.to_string(),
        row.available_after_all.to_string(),
    ]
}

fn material_shortage_row(row: &MaterialShortage) -> Vec<String> {
    vec![
        row.material_id.clone(),
        row.source_codes.join("; "),
        row.shortage_qty.to_string(),
    ]
}

fn channel_row(row: &ChannelSummary) -> Vec<String> {
    vec![
        row.tier.to_string(),
        row.channel.to_string(),
        row.quantity.to_string(),
    ]
}

// ==========================================
// CsvExporter
// ==========================================
pub struct CsvExporter;

impl CsvExporter {
    /// 写入单个表（表头 + 数据行）
    pub fn write_table<I>(path: &Path, header: &[&str], rows: I) -> ExportResult<usize>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let file = File::create(path)?;
        let mut wtr = Writer::from_writer(file);

        wtr.write_record(header)?;
        let mut count = 0;
        for row in rows {
            wtr.write_record(&row)?;
            count += 1;
        }
        wtr.flush()?;

        debug!(file = %path.display(), rows = count, "CSV 写入完成");
        Ok(count)
    }

    fn write_shortages(path: &Path, lines: &[ShortageLine]) -> ExportResult<usize> {
        Self::write_table(path, &SHORTAGE_HEADER, lines.iter().map(shortage_row))
    }

    fn write_dq_report(path: &Path, report: &DqReport) -> ExportResult<usize> {
        Self::write_table(
            path,
            &["source", "row_number", "level", "field", "message"],
            report.violations.iter().map(|v| {
                vec![
                    v.source.to_string(),
                    v.row_number.to_string(),
                    v.level.to_string(),
                    v.field.clone(),
                    v.message.clone(),
                ]
            }),
        )
    }

    /// 导出全部 CSV 结果表，返回写出的文件路径
    pub fn export(report: &AnalysisReport, out_dir: &Path) -> ExportResult<Vec<PathBuf>> {
        let mut written = Vec::new();
        let mut target = |name: &str| {
            let path = out_dir.join(name);
            written.push(path.clone());
            path
        };

        Self::write_table(
            &target(FORECAST_OK_FILE),
            &PRODUCIBLE_HEADER,
            report.producible_forecast_lines().map(producible_row),
        )?;
        Self::write_shortages(&target(FORECAST_NOK_FILE), &report.forecast_shortages)?;
        Self::write_shortages(&target(FIRM_NOK_FILE), &report.firm_shortages)?;
        Self::write_shortages(&target(FORECAST_PAST_DUE_FILE), &report.forecast_past_due)?;
        Self::write_shortages(&target(FIRM_PAST_DUE_FILE), &report.firm_past_due)?;
        Self::write_table(
            &target(MATERIAL_SHORTAGE_FILE),
            &["material_id", "source_codes", "shortage_qty"],
            report.material_shortages.iter().map(material_shortage_row),
        )?;
        Self::write_table(
            &target(AVAILABILITY_FILE),
            &[
                "material_id",
                "on_hand_qty",
                "firm_demand_qty",
                "available_after_firm",
                "forecast_demand_qty",
                "available_after_all",
            ],
            report.availability.iter().map(availability_row),
        )?;
        Self::write_table(
            &target(CHANNEL_SUMMARY_FILE),
            &["tier", "channel", "quantity"],
            report.channel_summary.iter().map(channel_row),
        )?;
        Self::write_dq_report(&target(DQ_REPORT_FILE), &report.dq_report)?;

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_write_table_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");

        let count = CsvExporter::write_table(
            &path,
            &["a", "b"],
            vec![vec!["1".to_string(), "x, y".to_string()]],
        )
        .unwrap();

        assert_eq!(count, 1);
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "a,b\n1,\"x, y\"\n");
    }

    #[test]
    fn test_whole_numbers_render_without_fraction() {
        assert_eq!(5.0_f64.to_string(), "5");
        assert_eq!(2.5_f64.to_string(), "2.5");
    }
}
