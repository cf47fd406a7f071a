// ==========================================
// 可生产订单分析 - 物料领域模型
// ==========================================
// 库存（MB52）与等价表（CROSSREFERENCE）的记录
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RawInventoryRecord - 库存导入中间结构体
// ==========================================
// 用途: 导入管道中间产物，物料号仍为源系统编码
// 生命周期: 仅在导入 → 规范化之间
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInventoryRecord {
    pub material_code: String, // 源物料编码（通常为 Non Custom 体系）
    pub quantity: f64,         // 在库数量（同编码已合计）
    pub row_number: usize,     // 首次出现的原始行号
}

// ==========================================
// EquivalenceEntry - 等价表行
// ==========================================
// custom_code 为规范编码（A 体系），non_custom_code 为 B 体系
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceEntry {
    pub custom_code: String,
    pub non_custom_code: String,
    pub row_number: usize,
}

// ==========================================
// MaterialRecord - 规范化后的库存记录
// ==========================================
// 红线: 每个规范编码只有一条记录，数量非负
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub material_id: String,
    pub on_hand_qty: f64,
}

impl MaterialRecord {
    pub fn new(material_id: impl Into<String>, on_hand_qty: f64) -> Self {
        Self {
            material_id: material_id.into(),
            on_hand_qty: on_hand_qty.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_record_clamps_negative() {
        let record = MaterialRecord::new("CUP-12", -3.0);
        assert_eq!(record.on_hand_qty, 0.0);
        assert_eq!(record.material_id, "CUP-12");
    }
}
