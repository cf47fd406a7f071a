// ==========================================
// 可生产订单分析 - JSON 报表导出
// ==========================================
// 输出完整 AnalysisReport（含 run_id、DQ 报告、已提交台账）
// ==========================================

use crate::domain::report::AnalysisReport;
use crate::export::error::ExportResult;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const REPORT_JSON_FILE: &str = "report.json";

pub struct JsonExporter;

impl JsonExporter {
    pub fn export(report: &AnalysisReport, out_dir: &Path) -> ExportResult<PathBuf> {
        let path = out_dir.join(REPORT_JSON_FILE);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.flush()?;

        debug!(file = %path.display(), run_id = %report.run_id, "JSON 报告写入完成");
        Ok(path)
    }

    /// 读取已导出的报告
    pub fn read(path: &Path) -> ExportResult<AnalysisReport> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}
