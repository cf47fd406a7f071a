// ==========================================
// 可生产订单分析 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::quality::ValidationReport;
use thiserror::Error;

/// 引擎错误类型
///
/// 以下错误均为整批致命：分析不产出任何部分结果
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("物料编码规范化失败: {0}")]
    UnresolvedIdentifiers(ValidationReport),

    #[error("等价表冲突 (行 {row}): '{non_custom_code}' 同时映射到 '{existing}' 与 '{conflicting}'")]
    EquivalenceConflict {
        row: usize,
        non_custom_code: String,
        existing: String,
        conflicting: String,
    },

    #[error("等价表为空")]
    EmptyEquivalenceTable,
}

impl EngineError {
    /// 取出未映射报告（仅 UnresolvedIdentifiers）
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            EngineError::UnresolvedIdentifiers(report) => Some(report),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
