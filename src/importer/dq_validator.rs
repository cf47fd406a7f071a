// ==========================================
// 可生产订单分析 - 数据质量校验器实现
// ==========================================
// 规则:
// - 主键缺失（物料编码/订单号）→ ERROR，行排除但记录
// - 数量无法解析/为负 → WARNING，按 0 计
// - 数量为空 → INFO，按 0 计
// - 日期无法解析 → WARNING，日期置空
// ==========================================

use crate::domain::quality::{DqReport, DqSummary, DqViolation};
use crate::domain::types::{DqLevel, RecordSource};
use chrono::NaiveDate;

pub struct DqValidator {
    source: RecordSource,
}

impl DqValidator {
    pub fn new(source: RecordSource) -> Self {
        Self { source }
    }

    fn violation(&self, row: usize, level: DqLevel, field: &str, message: String) -> DqViolation {
        DqViolation {
            source: self.source,
            row_number: row,
            level,
            field: field.to_string(),
            message,
        }
    }

    /// 校验必填字段
    pub fn validate_required(
        &self,
        row: usize,
        field: &str,
        value: Option<String>,
    ) -> Result<String, DqViolation> {
        value.ok_or_else(|| {
            self.violation(row, DqLevel::Error, field, format!("{} 为空，行已排除", field))
        })
    }

    /// 校验数量（容错：异常值按 0 计）
    pub fn validate_quantity(
        &self,
        row: usize,
        field: &str,
        parsed: Result<Option<f64>, String>,
    ) -> (f64, Option<DqViolation>) {
        match parsed {
            Ok(Some(v)) if v < 0.0 => (
                0.0,
                Some(self.violation(
                    row,
                    DqLevel::Warning,
                    field,
                    format!("数量为负数: {}，按 0 计", v),
                )),
            ),
            Ok(Some(v)) => (v, None),
            Ok(None) => (
                0.0,
                Some(self.violation(row, DqLevel::Info, field, "数量为空，按 0 计".to_string())),
            ),
            Err(raw) => (
                0.0,
                Some(self.violation(
                    row,
                    DqLevel::Warning,
                    field,
                    format!("无法解析为数量: '{}'，按 0 计", raw),
                )),
            ),
        }
    }

    /// 校验日期（容错：无法解析 → None）
    pub fn validate_date(
        &self,
        row: usize,
        field: &str,
        parsed: Result<Option<NaiveDate>, String>,
    ) -> (Option<NaiveDate>, Option<DqViolation>) {
        match parsed {
            Ok(date) => (date, None),
            Err(raw) => (
                None,
                Some(self.violation(
                    row,
                    DqLevel::Warning,
                    field,
                    format!("日期格式无法识别: '{}'，交期未定", raw),
                )),
            ),
        }
    }

    /// 生成 DQ 报告
    pub fn generate_dq_report(&self, total_rows: usize, violations: Vec<DqViolation>) -> DqReport {
        let count = |level: DqLevel| violations.iter().filter(|v| v.level == level).count();

        DqReport {
            summary: DqSummary {
                total_rows,
                excluded: count(DqLevel::Error),
                warning: count(DqLevel::Warning),
                info: count(DqLevel::Info),
            },
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_missing() {
        let validator = DqValidator::new(RecordSource::Inventory);
        let err = validator
            .validate_required(5, "Material description", None)
            .unwrap_err();
        assert_eq!(err.level, DqLevel::Error);
        assert_eq!(err.row_number, 5);
    }

    #[test]
    fn test_validate_quantity_recovers() {
        let validator = DqValidator::new(RecordSource::ForecastOrders);

        let (qty, violation) = validator.validate_quantity(2, "Pln.Or Qty", Err("abc".to_string()));
        assert_eq!(qty, 0.0);
        assert_eq!(violation.unwrap().level, DqLevel::Warning);

        let (qty, violation) = validator.validate_quantity(3, "Pln.Or Qty", Ok(Some(-2.0)));
        assert_eq!(qty, 0.0);
        assert!(violation.unwrap().message.contains("负数"));

        let (qty, violation) = validator.validate_quantity(4, "Pln.Or Qty", Ok(Some(7.0)));
        assert_eq!(qty, 7.0);
        assert!(violation.is_none());
    }

    #[test]
    fn test_generate_dq_report_counts() {
        let validator = DqValidator::new(RecordSource::FirmOrders);
        let mut violations = Vec::new();
        violations.extend(validator.validate_quantity(2, "q", Ok(None)).1);
        violations.extend(validator.validate_date(3, "d", Err("x".to_string())).1);
        violations.push(validator.validate_required(4, "o", None).unwrap_err());

        let report = validator.generate_dq_report(10, violations);
        assert_eq!(report.summary.total_rows, 10);
        assert_eq!(report.summary.excluded, 1);
        assert_eq!(report.summary.warning, 1);
        assert_eq!(report.summary.info, 1);
    }
}
