// ==========================================
// 可生产订单分析 - 分析编排器
// ==========================================
// 流程: 等价表 → 规范化 → 库存池 → 需求汇总 → 分层可用量
//       → 固定订单检查 → 新需求订单分配 → 缺料说明
// ==========================================
// 红线: 规范化失败即终止，不产出任何部分结果
// ==========================================

use crate::domain::dataset::RawDataset;
use crate::domain::report::AnalysisReport;
use crate::engine::availability_cascade::AvailabilityCascade;
use crate::engine::classification::Classifier;
use crate::engine::demand_aggregator::DemandAggregator;
use crate::engine::error::EngineResult;
use crate::engine::firm_order_check::FirmOrderChecker;
use crate::engine::inventory_pool::InventoryPool;
use crate::engine::normalizer::{EquivalenceMap, MaterialCodeNormalizer};
use crate::engine::order_allocator::OrderAllocator;
use crate::engine::shortage_explainer::ShortageExplainer;
use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// AnalysisOptions - 单次分析参数
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    pub today: NaiveDate,  // 逾期判定基准日
    pub ss_suffix: String, // SS 物料描述后缀
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            today: Utc::now().date_naive(),
            ss_suffix: "SS".to_string(),
        }
    }
}

// ==========================================
// AnalysisOrchestrator
// ==========================================
pub struct AnalysisOrchestrator {
    options: AnalysisOptions,
    classifier: Classifier,
    aggregator: DemandAggregator,
    cascade: AvailabilityCascade,
    firm_checker: FirmOrderChecker,
    allocator: OrderAllocator,
}

impl AnalysisOrchestrator {
    pub fn new(options: AnalysisOptions) -> Self {
        let classifier = Classifier::new(options.ss_suffix.clone());
        Self {
            options,
            classifier,
            aggregator: DemandAggregator::new(),
            cascade: AvailabilityCascade::new(),
            firm_checker: FirmOrderChecker::new(),
            allocator: OrderAllocator::new(),
        }
    }

    /// 执行完整分析
    ///
    /// # 错误
    /// - 等价表为空/冲突
    /// - 存在未映射物料编码（附完整报告）
    #[instrument(skip_all, fields(run_id))]
    pub fn run(&self, dataset: &RawDataset) -> EngineResult<AnalysisReport> {
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());
        info!(today = %self.options.today, "开始可生产订单分析");

        // 1. 编码规范化（失败即终止）
        let map = EquivalenceMap::from_entries(&dataset.equivalence)?;
        info!(canonical = map.canonical_count(), "等价表加载完成");
        let normalized = MaterialCodeNormalizer::new(&map, &self.classifier).normalize(dataset)?;

        // 2. 库存池 + 需求汇总
        let pool = InventoryPool::from_records(&normalized.materials);
        let firm_totals = self.aggregator.total_by_material(&normalized.firm_lines);
        let forecast_totals = self.aggregator.total_by_material(&normalized.forecast_lines);
        let firm_orders = self.aggregator.group_by_order(&normalized.firm_lines);
        let forecast_orders = self.aggregator.group_by_order(&normalized.forecast_lines);

        // 3. 分层可用量
        let table = self.cascade.compute(&pool, &firm_totals, &forecast_totals);

        // 4. 固定订单（在库口径，逐行独立）
        let firm_decisions = self.firm_checker.evaluate(&table, &firm_orders);

        // 5. 新需求订单（固定订单后口径，顺序原子预留）
        let outcome = self.allocator.allocate(table.seed_ledger(), &forecast_orders);

        // 6. 缺料说明
        let explainer = ShortageExplainer::new(&table);
        let firm_shortages = explainer.explain(&firm_decisions);
        let forecast_shortages = explainer.explain(&outcome.decisions);
        let material_shortages =
            explainer.rank_by_material(firm_shortages.iter().chain(forecast_shortages.iter()), &map);
        let firm_past_due = explainer.past_due(&firm_shortages, self.options.today);
        let forecast_past_due = explainer.past_due(&forecast_shortages, self.options.today);

        let channel_summary = self
            .classifier
            .channel_summary(normalized.firm_lines.iter().chain(normalized.forecast_lines.iter()));

        info!(
            materials = table.len(),
            firm_orders = firm_decisions.len(),
            forecast_orders = outcome.decisions.len(),
            forecast_producible = outcome.producible_count(),
            short_materials = material_shortages.len(),
            "可生产订单分析完成"
        );

        Ok(AnalysisReport {
            run_id,
            generated_at: Utc::now(),
            today: self.options.today,
            availability: table.into_rows(),
            firm_decisions,
            forecast_decisions: outcome.decisions,
            firm_shortages,
            forecast_shortages,
            firm_past_due,
            forecast_past_due,
            material_shortages,
            channel_summary,
            committed_ledger: outcome.committed.into_map(),
            dq_report: dataset.dq_report.clone(),
        })
    }
}
