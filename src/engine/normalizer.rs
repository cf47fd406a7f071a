// ==========================================
// 可生产订单分析 - 物料编码规范化器
// ==========================================
// 职责: 两套源编码（Custom / Non Custom）→ 规范编码（Custom）
// 红线: 任何未映射编码 → 整批失败，不做部分规范化
// ==========================================

use crate::domain::dataset::RawDataset;
use crate::domain::demand::{DemandLine, OrderId, RawDemandRecord};
use crate::domain::material::{EquivalenceEntry, MaterialRecord};
use crate::domain::quality::ValidationReport;
use crate::domain::types::{DemandTier, RecordSource};
use crate::engine::classification::Classifier;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info, instrument, warn};

// ==========================================
// EquivalenceMap - 编码等价表
// ==========================================
// 多对一: 多个 Non Custom 编码可映射到同一 Custom 编码
// 规范编码自身也可解析（幂等）
#[derive(Debug, Clone, Default)]
pub struct EquivalenceMap {
    to_canonical: HashMap<String, String>,
    source_codes: BTreeMap<String, Vec<String>>,
}

impl EquivalenceMap {
    /// 由等价表行构建
    ///
    /// # 错误
    /// - EmptyEquivalenceTable: 无任何行
    /// - EquivalenceConflict: 同一编码指向两个不同的规范编码
    pub fn from_entries(entries: &[EquivalenceEntry]) -> EngineResult<Self> {
        if entries.is_empty() {
            return Err(EngineError::EmptyEquivalenceTable);
        }

        let mut map = Self::default();
        for entry in entries {
            let canonical = entry.custom_code.trim();
            let source = entry.non_custom_code.trim();
            if canonical.is_empty() {
                continue;
            }

            map.bind(canonical, canonical, entry.row_number)?;
            if !source.is_empty() {
                map.bind(source, canonical, entry.row_number)?;
                let codes = map.source_codes.entry(canonical.to_string()).or_default();
                if source != canonical && !codes.iter().any(|c| c == source) {
                    codes.push(source.to_string());
                }
            }
        }

        if map.to_canonical.is_empty() {
            return Err(EngineError::EmptyEquivalenceTable);
        }
        Ok(map)
    }

    fn bind(&mut self, code: &str, canonical: &str, row: usize) -> EngineResult<()> {
        match self.to_canonical.get(code) {
            Some(existing) if existing != canonical => Err(EngineError::EquivalenceConflict {
                row,
                non_custom_code: code.to_string(),
                existing: existing.clone(),
                conflicting: canonical.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.to_canonical
                    .insert(code.to_string(), canonical.to_string());
                Ok(())
            }
        }
    }

    /// 解析任一体系的编码
    pub fn resolve(&self, raw_code: &str) -> Option<&str> {
        self.to_canonical.get(raw_code.trim()).map(String::as_str)
    }

    /// 映射到该规范编码的 Non Custom 编码
    pub fn source_codes(&self, canonical: &str) -> &[String] {
        self.source_codes
            .get(canonical)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn canonical_count(&self) -> usize {
        self.to_canonical
            .iter()
            .filter(|(code, canonical)| code == canonical)
            .count()
    }
}

// ==========================================
// NormalizedDataset - 规范化输出
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedDataset {
    pub materials: Vec<MaterialRecord>, // 按规范编码合计，每编码一条
    pub firm_lines: Vec<DemandLine>,
    pub forecast_lines: Vec<DemandLine>,
}

// ==========================================
// MaterialCodeNormalizer
// ==========================================
pub struct MaterialCodeNormalizer<'a> {
    map: &'a EquivalenceMap,
    classifier: &'a Classifier,
}

impl<'a> MaterialCodeNormalizer<'a> {
    pub fn new(map: &'a EquivalenceMap, classifier: &'a Classifier) -> Self {
        Self { map, classifier }
    }

    /// 单个编码规范化
    pub fn normalize_code(&self, raw_code: &str) -> Option<String> {
        self.map.resolve(raw_code).map(str::to_string)
    }

    /// 整批规范化
    ///
    /// 先收集全部未映射编码，报告非空则整体失败（不返回任何部分结果）
    #[instrument(skip_all, fields(
        inventory = dataset.inventory.len(),
        firm = dataset.firm_orders.len(),
        forecast = dataset.forecast_orders.len()
    ))]
    pub fn normalize(&self, dataset: &RawDataset) -> EngineResult<NormalizedDataset> {
        let mut report = ValidationReport::default();

        for record in &dataset.inventory {
            if self.map.resolve(&record.material_code).is_none() {
                report.record(
                    record.material_code.trim(),
                    RecordSource::Inventory,
                    record.row_number,
                );
            }
        }
        self.collect_unresolved(&dataset.firm_orders, DemandTier::Firm, &mut report);
        self.collect_unresolved(&dataset.forecast_orders, DemandTier::Forecast, &mut report);

        if !report.is_empty() {
            warn!(unresolved = report.len(), "存在未映射物料编码，终止分析");
            return Err(EngineError::UnresolvedIdentifiers(report));
        }

        // 同一规范编码的库存合计（多对一映射）
        let mut on_hand: BTreeMap<String, f64> = BTreeMap::new();
        for record in &dataset.inventory {
            if let Some(canonical) = self.map.resolve(&record.material_code) {
                *on_hand.entry(canonical.to_string()).or_insert(0.0) += record.quantity;
            }
        }
        let materials = on_hand
            .into_iter()
            .map(|(id, qty)| MaterialRecord::new(id, qty))
            .collect::<Vec<_>>();

        let firm_lines = self.to_lines(&dataset.firm_orders, DemandTier::Firm);
        let forecast_lines = self.to_lines(&dataset.forecast_orders, DemandTier::Forecast);

        info!(
            materials = materials.len(),
            firm_lines = firm_lines.len(),
            forecast_lines = forecast_lines.len(),
            "物料编码规范化完成"
        );

        Ok(NormalizedDataset {
            materials,
            firm_lines,
            forecast_lines,
        })
    }

    fn collect_unresolved(
        &self,
        records: &[RawDemandRecord],
        tier: DemandTier,
        report: &mut ValidationReport,
    ) {
        for record in records {
            if self.map.resolve(&record.material_code).is_none() {
                report.record(record.material_code.trim(), tier.into(), record.row_number);
            }
        }
    }

    fn to_lines(&self, records: &[RawDemandRecord], tier: DemandTier) -> Vec<DemandLine> {
        records
            .iter()
            .filter_map(|record| {
                let canonical = self.map.resolve(&record.material_code)?;
                debug!(raw = %record.material_code, canonical, "编码映射");
                Some(DemandLine {
                    order_id: OrderId::new(record.order_id.trim()),
                    material_id: canonical.to_string(),
                    requested_qty: record.quantity.max(0.0),
                    due_date: record.due_date,
                    tier,
                    sales_office: record.sales_office.clone(),
                    material_type: self
                        .classifier
                        .material_type(record.description.as_deref().or(Some(canonical))),
                    row_number: record.row_number,
                })
            })
            .collect()
    }
}
