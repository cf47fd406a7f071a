// ==========================================
// 可生产订单分析 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: JSON 文件（扁平 key-value），缺省值内置
// ==========================================

use crate::config::column_mapping::{ColumnMapping, DemandColumns};
use crate::domain::types::RecordSource;
use crate::importer::error::{ImportError, ImportResult};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // ===== 工作表 =====
    pub const SHEET_EQUIVALENCE: &str = "sheet.equivalence";
    pub const SHEET_INVENTORY: &str = "sheet.inventory";
    pub const SHEET_FIRM: &str = "sheet.firm";
    pub const SHEET_FORECAST: &str = "sheet.forecast";

    // ===== 列名（多个别名以 | 分隔）=====
    pub const COL_EQUIVALENCE_CUSTOM: &str = "columns.equivalence.custom";
    pub const COL_EQUIVALENCE_NON_CUSTOM: &str = "columns.equivalence.non_custom";
    pub const COL_INVENTORY_MATERIAL: &str = "columns.inventory.material";
    pub const COL_INVENTORY_QUANTITY: &str = "columns.inventory.quantity";

    // 需求列后缀: columns.firm.<field> / columns.forecast.<field>
    pub const DEMAND_FIELDS: [&str; 6] = [
        "order_id",
        "material",
        "quantity",
        "due_date",
        "sales_office",
        "description",
    ];

    // ===== 分析参数 =====
    pub const ANALYSIS_TODAY: &str = "analysis.today";
    pub const SS_SUFFIX: &str = "classification.ss_suffix";
}

const ALIAS_SEPARATOR: &str = "|";
const APP_CONFIG_DIR: &str = "producible-orders";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 仅使用内置缺省值
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文本加载
    ///
    /// 值可为字符串、数字、布尔或字符串数组（数组按别名列表处理）
    pub fn from_json_str(json: &str) -> ImportResult<Self> {
        let raw: HashMap<String, Value> =
            serde_json::from_str(json).map_err(|e| ImportError::ConfigReadError {
                key: "<root>".to_string(),
                message: e.to_string(),
            })?;

        let mut values = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Array(items) => items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s.clone()),
                        other => Err(ImportError::ConfigValueError {
                            key: key.clone(),
                            value: other.to_string(),
                            message: "别名数组只允许字符串".to_string(),
                        }),
                    })
                    .collect::<ImportResult<Vec<_>>>()?
                    .join(ALIAS_SEPARATOR),
                other => {
                    return Err(ImportError::ConfigValueError {
                        key,
                        value: other.to_string(),
                        message: "不支持的配置值类型".to_string(),
                    })
                }
            };
            values.insert(key, text);
        }

        Ok(Self { values })
    }

    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> ImportResult<Self> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(path)?;
        let manager = Self::from_json_str(&text)?;
        info!(path = %path.display(), keys = manager.values.len(), "配置文件加载完成");
        Ok(manager)
    }

    /// 默认配置文件位置（用户配置目录）
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    /// 加载默认位置的配置文件；不存在则使用内置缺省值
    pub fn load_default() -> ImportResult<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                debug!("未找到默认配置文件，使用内置缺省值");
                Ok(Self::new())
            }
        }
    }

    /// 覆写配置项（命令行参数优先）
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// 读取配置值，带默认值
    pub fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .unwrap_or(default)
            .to_string()
    }

    fn get_aliases_or(&self, key: &str, default: Vec<String>) -> Vec<String> {
        match self.get_config_value(key) {
            Some(raw) => raw
                .split(ALIAS_SEPARATOR)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => default,
        }
    }

    // ==========================================
    // 类型化读取
    // ==========================================

    /// 数据源对应的工作表名
    pub fn sheet_name(&self, source: RecordSource) -> String {
        match source {
            RecordSource::Equivalence => {
                self.get_config_or_default(config_keys::SHEET_EQUIVALENCE, "CROSSREFERENCE SAP")
            }
            RecordSource::Inventory => self.get_config_or_default(config_keys::SHEET_INVENTORY, "Sheet1"),
            RecordSource::FirmOrders => self.get_config_or_default(config_keys::SHEET_FIRM, "Sheet1"),
            RecordSource::ForecastOrders => {
                self.get_config_or_default(config_keys::SHEET_FORECAST, "Sheet1")
            }
        }
    }

    /// 列名映射（配置覆写缺省别名）
    pub fn column_mapping(&self) -> ColumnMapping {
        let defaults = ColumnMapping::default();
        ColumnMapping {
            equivalence_custom: self
                .get_aliases_or(config_keys::COL_EQUIVALENCE_CUSTOM, defaults.equivalence_custom),
            equivalence_non_custom: self.get_aliases_or(
                config_keys::COL_EQUIVALENCE_NON_CUSTOM,
                defaults.equivalence_non_custom,
            ),
            inventory_material: self
                .get_aliases_or(config_keys::COL_INVENTORY_MATERIAL, defaults.inventory_material),
            inventory_quantity: self
                .get_aliases_or(config_keys::COL_INVENTORY_QUANTITY, defaults.inventory_quantity),
            firm: self.demand_columns("firm", defaults.firm),
            forecast: self.demand_columns("forecast", defaults.forecast),
        }
    }

    fn demand_columns(&self, prefix: &str, defaults: DemandColumns) -> DemandColumns {
        let key = |field: &str| format!("columns.{}.{}", prefix, field);
        DemandColumns {
            order_id: self.get_aliases_or(&key("order_id"), defaults.order_id),
            material: self.get_aliases_or(&key("material"), defaults.material),
            quantity: self.get_aliases_or(&key("quantity"), defaults.quantity),
            due_date: self.get_aliases_or(&key("due_date"), defaults.due_date),
            sales_office: self.get_aliases_or(&key("sales_office"), defaults.sales_office),
            description: self.get_aliases_or(&key("description"), defaults.description),
        }
    }

    /// 逾期判定基准日（未配置返回 None）
    pub fn today(&self) -> ImportResult<Option<NaiveDate>> {
        match self.get_config_value(config_keys::ANALYSIS_TODAY) {
            None => Ok(None),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(Some)
                .map_err(|e| ImportError::ConfigValueError {
                    key: config_keys::ANALYSIS_TODAY.to_string(),
                    value: raw.to_string(),
                    message: e.to_string(),
                }),
        }
    }

    /// SS 物料描述后缀
    pub fn ss_suffix(&self) -> String {
        self.get_config_or_default(config_keys::SS_SUFFIX, "SS")
    }

    /// 未被识别的配置键（便于排查拼写错误）
    pub fn unknown_keys(&self) -> Vec<&str> {
        let known = [
            config_keys::SHEET_EQUIVALENCE,
            config_keys::SHEET_INVENTORY,
            config_keys::SHEET_FIRM,
            config_keys::SHEET_FORECAST,
            config_keys::COL_EQUIVALENCE_CUSTOM,
            config_keys::COL_EQUIVALENCE_NON_CUSTOM,
            config_keys::COL_INVENTORY_MATERIAL,
            config_keys::COL_INVENTORY_QUANTITY,
            config_keys::ANALYSIS_TODAY,
            config_keys::SS_SUFFIX,
        ];
        let mut unknown: Vec<&str> = self
            .values
            .keys()
            .map(String::as_str)
            .filter(|key| {
                if known.contains(key) {
                    return false;
                }
                !["firm", "forecast"].iter().any(|prefix| {
                    config_keys::DEMAND_FIELDS
                        .iter()
                        .any(|field| *key == format!("columns.{}.{}", prefix, field))
                })
            })
            .collect();
        unknown.sort_unstable();
        unknown
    }
}
