// ==========================================
// 可生产订单分析 - 引擎层
// ==========================================
// 职责: 编码规范化、分层可用量、订单分配、缺料说明
// 红线: 引擎不读文件，所有不可生产判定必须输出原因
// ==========================================

pub mod availability_cascade;
pub mod classification;
pub mod demand_aggregator;
pub mod error;
pub mod firm_order_check;
pub mod inventory_pool;
pub mod normalizer;
pub mod orchestrator;
pub mod order_allocator;
pub mod shortage_explainer;

// 重导出核心引擎
pub use availability_cascade::{AvailabilityCascade, AvailabilityTable};
pub use classification::Classifier;
pub use demand_aggregator::DemandAggregator;
pub use error::{EngineError, EngineResult};
pub use firm_order_check::FirmOrderChecker;
pub use inventory_pool::{InventoryPool, Ledger, Shortfall};
pub use normalizer::{EquivalenceMap, MaterialCodeNormalizer, NormalizedDataset};
pub use orchestrator::{AnalysisOptions, AnalysisOrchestrator};
pub use order_allocator::{AllocationOutcome, OrderAllocator};
pub use shortage_explainer::ShortageExplainer;
