// ==========================================
// 可生产订单分析 - 分类规则
// ==========================================
// 物料类型: 描述以 SS 结尾 → SS，否则 DC
// 订单渠道: BDV/CTL → BDV，ECM/YRD → ECM，其余（含空）→ BDV
// ==========================================

use crate::domain::demand::DemandLine;
use crate::domain::report::ChannelSummary;
use crate::domain::types::{DemandTier, MaterialType, OrderChannel};
use std::collections::BTreeMap;

pub struct Classifier {
    ss_suffix: String,
}

impl Classifier {
    pub fn new(ss_suffix: impl Into<String>) -> Self {
        Self {
            ss_suffix: ss_suffix.into(),
        }
    }

    /// 物料类型判定（缺失描述视为 DC）
    pub fn material_type(&self, description: Option<&str>) -> MaterialType {
        match description {
            Some(desc) if !self.ss_suffix.is_empty() && desc.trim().ends_with(&self.ss_suffix) => {
                MaterialType::Ss
            }
            _ => MaterialType::Dc,
        }
    }

    /// 销售办公室 → 订单渠道
    pub fn order_channel(&self, sales_office: Option<&str>) -> OrderChannel {
        match sales_office.map(str::trim) {
            Some("BDV") | Some("CTL") => OrderChannel::Bdv,
            Some("ECM") | Some("YRD") => OrderChannel::Ecm,
            _ => OrderChannel::Bdv,
        }
    }

    /// 按 (层级, 渠道) 汇总需求数量
    pub fn channel_summary<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a DemandLine>,
    ) -> Vec<ChannelSummary> {
        let mut totals: BTreeMap<(DemandTier, OrderChannel), f64> = BTreeMap::new();
        for line in lines {
            let channel = self.order_channel(line.sales_office.as_deref());
            *totals.entry((line.tier, channel)).or_insert(0.0) += line.requested_qty;
        }

        totals
            .into_iter()
            .map(|((tier, channel), quantity)| ChannelSummary {
                tier,
                channel,
                quantity,
            })
            .collect()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new("SS")
    }
}
