// ==========================================
// 可生产订单分析 - 数据集加载器
// ==========================================
// 流程: 文件解析 → 字段映射/清洗/DQ → 库存按源编码合计 → RawDataset
// ==========================================

use crate::config::ConfigManager;
use crate::domain::dataset::RawDataset;
use crate::domain::material::RawInventoryRecord;
use crate::domain::quality::DqReport;
use crate::domain::types::{DemandTier, RecordSource};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FileParser, RawRow};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// 四个输入文件路径
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub equivalence: PathBuf,
    pub inventory: PathBuf,
    pub firm: PathBuf,
    pub forecast: PathBuf,
}

pub struct DatasetLoader {
    parser: Box<dyn FileParser>,
    mapper: FieldMapper,
    sheets: HashMap<RecordSource, String>,
}

impl DatasetLoader {
    pub fn new(config: &ConfigManager) -> Self {
        Self::with_parser(config, Box::new(UniversalFileParser))
    }

    pub fn with_parser(config: &ConfigManager, parser: Box<dyn FileParser>) -> Self {
        let sheets = [
            RecordSource::Equivalence,
            RecordSource::Inventory,
            RecordSource::FirmOrders,
            RecordSource::ForecastOrders,
        ]
        .into_iter()
        .map(|source| (source, config.sheet_name(source)))
        .collect();

        Self {
            parser,
            mapper: FieldMapper::new(config.column_mapping()),
            sheets,
        }
    }

    fn parse(&self, path: &Path, source: RecordSource) -> ImportResult<Vec<(usize, RawRow)>> {
        let sheet = self.sheets.get(&source).map(String::as_str);
        let rows = self.parser.parse_to_raw_rows(path, sheet)?;
        debug!(source = %source, file = %path.display(), rows = rows.len(), "文件解析完成");
        Ok(rows)
    }

    /// 加载全部数据源
    #[instrument(skip_all, fields(equivalence = %paths.equivalence.display()))]
    pub fn load(&self, paths: &InputPaths) -> ImportResult<RawDataset> {
        let mut dq_report = DqReport::default();

        // === 步骤 1: 等价表 ===
        let rows = self.parse(&paths.equivalence, RecordSource::Equivalence)?;
        let (equivalence, dq) = self.mapper.map_equivalence(&rows)?;
        dq_report.merge(dq);

        // === 步骤 2: 库存（按源编码合计）===
        let rows = self.parse(&paths.inventory, RecordSource::Inventory)?;
        let (inventory, dq) = self.mapper.map_inventory(&rows)?;
        dq_report.merge(dq);
        let inventory = aggregate_inventory(inventory);

        // === 步骤 3: 需求 ===
        let rows = self.parse(&paths.firm, RecordSource::FirmOrders)?;
        let (firm_orders, dq) = self.mapper.map_demand(&rows, DemandTier::Firm)?;
        dq_report.merge(dq);

        let rows = self.parse(&paths.forecast, RecordSource::ForecastOrders)?;
        let (forecast_orders, dq) = self.mapper.map_demand(&rows, DemandTier::Forecast)?;
        dq_report.merge(dq);

        info!(
            equivalence = equivalence.len(),
            inventory = inventory.len(),
            firm_lines = firm_orders.len(),
            forecast_lines = forecast_orders.len(),
            dq_excluded = dq_report.summary.excluded,
            dq_warning = dq_report.summary.warning,
            "数据集加载完成"
        );

        Ok(RawDataset {
            equivalence,
            inventory,
            firm_orders,
            forecast_orders,
            dq_report,
        })
    }
}

/// 库存按源编码合计（保留首次出现顺序与行号）
pub fn aggregate_inventory(records: Vec<RawInventoryRecord>) -> Vec<RawInventoryRecord> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut merged: Vec<RawInventoryRecord> = Vec::new();

    for record in records {
        let code = record.material_code.trim().to_string();
        match index.get(&code) {
            Some(&i) => merged[i].quantity += record.quantity,
            None => {
                index.insert(code.clone(), merged.len());
                merged.push(RawInventoryRecord {
                    material_code: code,
                    ..record
                });
            }
        }
    }
    merged
}
