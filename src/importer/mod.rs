// ==========================================
// 可生产订单分析 - 导入层
// ==========================================
// 职责: 外部报表导入（等价表 / MB52 库存 / COOIS / ZCO41）
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dataset_loader;
pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dataset_loader::{aggregate_inventory, DatasetLoader, InputPaths};
pub use dq_validator::DqValidator;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, FileParser, RawRow};
