// ==========================================
// 可生产订单分析 - 核心库
// ==========================================
// 输入: 物料等价表 / 库存 / 固定订单 / 新需求订单
// 输出: 订单可生产判定 + 缺料说明
// 系统定位: 决策支持（只读分析，不修改任何源数据）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分析规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 导出层 - 结果报表
pub mod export;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DemandTier, DqLevel, MaterialType, OrderChannel, RecordSource};

// 领域实体
pub use domain::{
    AnalysisReport, AvailabilityRow, DemandLine, MaterialRecord, Order, OrderDecision, OrderId,
    RawDataset, ShortageLine, ValidationReport,
};

// 引擎
pub use engine::{
    AnalysisOptions, AnalysisOrchestrator, AvailabilityCascade, EngineError, FirmOrderChecker,
    MaterialCodeNormalizer, OrderAllocator, ShortageExplainer,
};

// 导入 / 配置 / 导出
pub use config::ConfigManager;
pub use export::export_report;
pub use importer::{DatasetLoader, InputPaths};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "可生产订单分析";
