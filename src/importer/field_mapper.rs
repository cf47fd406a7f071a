// ==========================================
// 可生产订单分析 - 字段映射器实现
// ==========================================
// 职责: 源列名 → 逻辑字段（别名匹配）+ 容错类型转换
// 输出: 导入中间结构体 + DQ 问题列表
// ==========================================

use crate::config::column_mapping::{ColumnMapping, DemandColumns};
use crate::domain::demand::RawDemandRecord;
use crate::domain::material::{EquivalenceEntry, RawInventoryRecord};
use crate::domain::quality::{DqReport, DqViolation};
use crate::domain::types::{DemandTier, RecordSource};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::dq_validator::DqValidator;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{DataCleaner as _, RawRow};
use tracing::warn;

/// 映射结果：记录 + 该数据源的 DQ 报告
pub type Mapped<T> = (Vec<T>, DqReport);

pub struct FieldMapper {
    columns: ColumnMapping,
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new(columns: ColumnMapping) -> Self {
        Self {
            columns,
            cleaner: DataCleaner,
        }
    }

    /// 在首行中查找第一个存在的别名
    fn find_column(rows: &[(usize, RawRow)], aliases: &[String]) -> Option<String> {
        let (_, first) = rows.first()?;
        aliases.iter().find(|a| first.contains_key(a.as_str())).cloned()
    }

    /// 必需列：不存在即报错（无数据行时不检查）
    fn require_column(
        rows: &[(usize, RawRow)],
        source: RecordSource,
        field: &str,
        aliases: &[String],
    ) -> ImportResult<Option<String>> {
        if rows.is_empty() {
            return Ok(None);
        }
        Self::find_column(rows, aliases)
            .map(Some)
            .ok_or_else(|| ImportError::MissingColumn {
                source_name: source.to_string(),
                field: field.to_string(),
                aliases: aliases.to_vec(),
            })
    }

    /// 可选列：不存在时记录日志
    fn optional_column(
        rows: &[(usize, RawRow)],
        source: RecordSource,
        field: &str,
        aliases: &[String],
    ) -> Option<String> {
        let found = Self::find_column(rows, aliases);
        if found.is_none() && !rows.is_empty() {
            warn!(source = %source, field, ?aliases, "可选列不存在，字段置空");
        }
        found
    }

    fn cell<'r>(&self, row: &'r RawRow, column: Option<&String>) -> Option<&'r str> {
        column.and_then(|c| row.get(c)).map(String::as_str)
    }

    // ==========================================
    // 等价表
    // ==========================================
    pub fn map_equivalence(&self, rows: &[(usize, RawRow)]) -> ImportResult<Mapped<EquivalenceEntry>> {
        let source = RecordSource::Equivalence;
        let validator = DqValidator::new(source);
        let custom_col = Self::require_column(rows, source, "custom", &self.columns.equivalence_custom)?;
        let non_custom_col =
            Self::require_column(rows, source, "non_custom", &self.columns.equivalence_non_custom)?;

        let mut entries = Vec::with_capacity(rows.len());
        let mut violations: Vec<DqViolation> = Vec::new();

        for (row_number, row) in rows {
            let custom = self.cleaner.normalize_null(self.cell(row, custom_col.as_ref()));
            let non_custom = self.cleaner.normalize_null(self.cell(row, non_custom_col.as_ref()));

            let custom = match validator.validate_required(*row_number, "Custom", custom) {
                Ok(v) => v,
                Err(v) => {
                    violations.push(v);
                    continue;
                }
            };
            let non_custom = match validator.validate_required(*row_number, "Non Custom", non_custom) {
                Ok(v) => v,
                Err(v) => {
                    violations.push(v);
                    continue;
                }
            };

            entries.push(EquivalenceEntry {
                custom_code: custom,
                non_custom_code: non_custom,
                row_number: *row_number,
            });
        }

        Ok((entries, validator.generate_dq_report(rows.len(), violations)))
    }

    // ==========================================
    // 库存（MB52）
    // ==========================================
    pub fn map_inventory(&self, rows: &[(usize, RawRow)]) -> ImportResult<Mapped<RawInventoryRecord>> {
        let source = RecordSource::Inventory;
        let validator = DqValidator::new(source);
        let material_col =
            Self::require_column(rows, source, "material", &self.columns.inventory_material)?;
        let quantity_col =
            Self::require_column(rows, source, "quantity", &self.columns.inventory_quantity)?;
        let qty_field = quantity_col.clone().unwrap_or_default();

        let mut records = Vec::with_capacity(rows.len());
        let mut violations = Vec::new();

        for (row_number, row) in rows {
            let material = self.cleaner.normalize_null(self.cell(row, material_col.as_ref()));
            let material_code = match validator.validate_required(*row_number, "material", material) {
                Ok(v) => v,
                Err(v) => {
                    violations.push(v);
                    continue;
                }
            };

            let (quantity, issue) = validator.validate_quantity(
                *row_number,
                &qty_field,
                self.cleaner.parse_quantity(self.cell(row, quantity_col.as_ref())),
            );
            violations.extend(issue);

            records.push(RawInventoryRecord {
                material_code,
                quantity,
                row_number: *row_number,
            });
        }

        Ok((records, validator.generate_dq_report(rows.len(), violations)))
    }

    // ==========================================
    // 需求（COOIS / ZCO41）
    // ==========================================
    pub fn map_demand(
        &self,
        rows: &[(usize, RawRow)],
        tier: DemandTier,
    ) -> ImportResult<Mapped<RawDemandRecord>> {
        let source = RecordSource::from(tier);
        let validator = DqValidator::new(source);
        let cols: &DemandColumns = match tier {
            DemandTier::Firm => &self.columns.firm,
            DemandTier::Forecast => &self.columns.forecast,
        };

        let order_col = Self::require_column(rows, source, "order_id", &cols.order_id)?;
        let material_col = Self::require_column(rows, source, "material", &cols.material)?;
        let quantity_col = Self::require_column(rows, source, "quantity", &cols.quantity)?;
        let due_col = Self::optional_column(rows, source, "due_date", &cols.due_date);
        let office_col = Self::optional_column(rows, source, "sales_office", &cols.sales_office);
        let desc_col = Self::optional_column(rows, source, "description", &cols.description);
        let qty_field = quantity_col.clone().unwrap_or_default();
        let due_field = due_col.clone().unwrap_or_default();

        let mut records = Vec::with_capacity(rows.len());
        let mut violations = Vec::new();

        for (row_number, row) in rows {
            let order = self.cleaner.normalize_null(self.cell(row, order_col.as_ref()));
            let order_id = match validator.validate_required(*row_number, "order_id", order) {
                Ok(v) => v,
                Err(v) => {
                    violations.push(v);
                    continue;
                }
            };
            let material = self.cleaner.normalize_null(self.cell(row, material_col.as_ref()));
            let material_code = match validator.validate_required(*row_number, "material", material) {
                Ok(v) => v,
                Err(v) => {
                    violations.push(v);
                    continue;
                }
            };

            let (quantity, qty_issue) = validator.validate_quantity(
                *row_number,
                &qty_field,
                self.cleaner.parse_quantity(self.cell(row, quantity_col.as_ref())),
            );
            let (due_date, date_issue) = validator.validate_date(
                *row_number,
                &due_field,
                self.cleaner.parse_date(self.cell(row, due_col.as_ref())),
            );
            violations.extend(qty_issue);
            violations.extend(date_issue);

            records.push(RawDemandRecord {
                order_id: self.cleaner.clean_text(&order_id, false),
                material_code,
                quantity,
                due_date,
                sales_office: self.cleaner.normalize_null(self.cell(row, office_col.as_ref())),
                description: self.cleaner.normalize_null(self.cell(row, desc_col.as_ref())),
                row_number: *row_number,
            });
        }

        Ok((records, validator.generate_dq_report(rows.len(), violations)))
    }
}
