// ==========================================
// 可生产订单分析 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、分析结果
// 红线: 不含文件访问逻辑,不含引擎逻辑
// ==========================================

pub mod dataset;
pub mod demand;
pub mod material;
pub mod quality;
pub mod report;
pub mod types;

// 重导出核心类型
pub use dataset::RawDataset;
pub use demand::{order_priority, DemandLine, Order, OrderId, RawDemandRecord};
pub use material::{EquivalenceEntry, MaterialRecord, RawInventoryRecord};
pub use quality::{DqReport, DqSummary, DqViolation, UnresolvedIdentifier, ValidationReport};
pub use report::{
    AnalysisReport, AvailabilityRow, ChannelSummary, LineEvaluation, MaterialShortage,
    OrderDecision, ShortageLine,
};
pub use types::{DemandTier, DqLevel, MaterialType, OrderChannel, RecordSource};
