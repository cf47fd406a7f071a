// ==========================================
// 可生产订单分析 - 数据质量与校验报告
// ==========================================
// DqViolation/DqReport: 行级数据质量问题（可降级）
// ValidationReport: 未映射物料编码（致命，阻断分析）
// ==========================================

use crate::domain::types::{DqLevel, RecordSource};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// DqViolation - 单条数据质量问题
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub source: RecordSource,
    pub row_number: usize,
    pub level: DqLevel,
    pub field: String,
    pub message: String,
}

// ==========================================
// DqSummary / DqReport
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize,
    pub excluded: usize, // Error 级（行被排除）
    pub warning: usize,  // Warning 级（行被就地修复）
    pub info: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// 合并另一份报告（多数据源汇总）
    pub fn merge(&mut self, other: DqReport) {
        self.summary.total_rows += other.summary.total_rows;
        self.summary.excluded += other.summary.excluded;
        self.summary.warning += other.summary.warning;
        self.summary.info += other.summary.info;
        self.violations.extend(other.violations);
    }
}

// ==========================================
// UnresolvedIdentifier - 未映射的物料编码
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedIdentifier {
    pub raw_code: String,
    pub source: RecordSource,
    pub row_numbers: Vec<usize>,
}

// ==========================================
// ValidationReport - 规范化校验报告
// ==========================================
// 非空即整体失败，下游不得产出任何结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub unresolved: Vec<UnresolvedIdentifier>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.unresolved.is_empty()
    }

    pub fn len(&self) -> usize {
        self.unresolved.len()
    }

    /// 记录一次未映射（同来源同编码合并行号）
    pub fn record(&mut self, raw_code: &str, source: RecordSource, row_number: usize) {
        if let Some(existing) = self
            .unresolved
            .iter_mut()
            .find(|u| u.raw_code == raw_code && u.source == source)
        {
            existing.row_numbers.push(row_number);
            return;
        }
        self.unresolved.push(UnresolvedIdentifier {
            raw_code: raw_code.to_string(),
            source,
            row_numbers: vec![row_number],
        });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 个物料编码在等价表中无映射", self.unresolved.len())?;
        for item in &self.unresolved {
            write!(
                f,
                "\n  - [{}] '{}' (行 {:?})",
                item.source, item.raw_code, item.row_numbers
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_report_groups_rows() {
        let mut report = ValidationReport::default();
        report.record("WIDGET-A", RecordSource::ForecastOrders, 3);
        report.record("WIDGET-A", RecordSource::ForecastOrders, 7);
        report.record("WIDGET-A", RecordSource::Inventory, 2);

        assert_eq!(report.len(), 2);
        assert_eq!(report.unresolved[0].row_numbers, vec![3, 7]);
        assert!(report.to_string().contains("WIDGET-A"));
    }

    #[test]
    fn test_dq_report_merge() {
        let mut a = DqReport {
            summary: DqSummary {
                total_rows: 3,
                excluded: 1,
                warning: 0,
                info: 0,
            },
            violations: vec![],
        };
        let b = DqReport {
            summary: DqSummary {
                total_rows: 2,
                excluded: 0,
                warning: 1,
                info: 0,
            },
            violations: vec![DqViolation {
                source: RecordSource::Inventory,
                row_number: 2,
                level: DqLevel::Warning,
                field: "Open Quantity".to_string(),
                message: "无法解析".to_string(),
            }],
        };
        a.merge(b);
        assert_eq!(a.summary.total_rows, 5);
        assert_eq!(a.summary.warning, 1);
        assert!(!a.is_clean());
    }
}
