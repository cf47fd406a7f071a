// ==========================================
// 可生产订单分析 - 导出层
// ==========================================
// 职责: 分析结果 → CSV 结果表 + JSON 报告
// 红线: 仅接受完整的 AnalysisReport（校验失败时不存在该对象）
// ==========================================

pub mod csv_exporter;
pub mod error;
pub mod json_exporter;

pub use csv_exporter::CsvExporter;
pub use error::{ExportError, ExportResult};
pub use json_exporter::JsonExporter;

use crate::domain::report::AnalysisReport;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// 导出全部报表到目录（不存在则创建）
#[instrument(skip(report), fields(run_id = %report.run_id))]
pub fn export_report(report: &AnalysisReport, out_dir: &Path) -> ExportResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|e| ExportError::OutputDirError {
        path: out_dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut written = CsvExporter::export(report, out_dir)?;
    written.push(JsonExporter::export(report, out_dir)?);

    info!(dir = %out_dir.display(), files = written.len(), "报表导出完成");
    Ok(written)
}
