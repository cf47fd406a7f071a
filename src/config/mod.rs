// ==========================================
// 可生产订单分析 - 配置层
// ==========================================
// 职责: 工作表名、列名别名、分析参数
// 存储: JSON 文件（可选），缺省值内置
// ==========================================

pub mod column_mapping;
pub mod config_manager;

// 重导出核心配置管理器
pub use column_mapping::{ColumnMapping, DemandColumns};
pub use config_manager::{config_keys, ConfigManager};
