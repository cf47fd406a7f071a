// ==========================================
// 可生产订单分析 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

/// 原始行记录（列名 → 单元格文本）
pub type RawRow = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - sheet_name: 工作表名（CSV 忽略；Excel 缺失时回退到首个工作表）
    ///
    /// # 返回
    /// - Ok(Vec<(行号, RawRow)>): 行号为文件中的 1 基行号（表头为第 1 行）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_rows(
        &self,
        file_path: &Path,
        sheet_name: Option<&str>,
    ) -> ImportResult<Vec<(usize, RawRow)>>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 1）
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM，可选 UPPER）
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// 标准化 NULL 值（空字符串/空白/"nan"/"null" → None）
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 解析数量（支持千分位）
    ///
    /// # 返回
    /// - Ok(None): 空值
    /// - Ok(Some(f64)): 解析成功
    /// - Err(原文): 无法解析
    fn parse_quantity(&self, value: Option<&str>) -> Result<Option<f64>, String>;

    /// 解析日期（多格式 + Excel 序列号）
    fn parse_date(&self, value: Option<&str>) -> Result<Option<NaiveDate>, String>;
}
