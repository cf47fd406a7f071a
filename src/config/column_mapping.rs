// ==========================================
// 可生产订单分析 - 列名映射
// ==========================================
// 职责: 逻辑字段 → 可接受的源列名（按顺序匹配，先到先得）
// 默认值与 SAP 报表导出列名一致
// ==========================================

use serde::{Deserialize, Serialize};

fn aliases(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ==========================================
// DemandColumns - 需求报表列
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandColumns {
    pub order_id: Vec<String>,
    pub material: Vec<String>,
    pub quantity: Vec<String>,
    pub due_date: Vec<String>,
    pub sales_office: Vec<String>,
    pub description: Vec<String>,
}

impl DemandColumns {
    /// COOIS（固定订单）
    pub fn firm_default() -> Self {
        Self {
            order_id: aliases(&["Sales document", "Sales Document"]),
            material: aliases(&["Master Material Description", "Custom Description"]),
            quantity: aliases(&["Order Quantity (Item)", "Order Quantity"]),
            due_date: aliases(&["Estimated Ship Date (header)", "Estimated Ship Date"]),
            sales_office: aliases(&["Sales office", "Sales Office"]),
            description: aliases(&["Master Material Description", "Custom Description"]),
        }
    }

    /// ZCO41（新需求订单）
    pub fn forecast_default() -> Self {
        Self {
            order_id: aliases(&["Sales Order", "Sales order"]),
            material: aliases(&["Material description", "Custom Description"]),
            quantity: aliases(&["Pln.Or Qty", "Planned Order Quantity"]),
            due_date: aliases(&["Estimated Ship Date", "Estimated Ship Date (header)"]),
            sales_office: aliases(&["Sales office", "Sales Office"]),
            description: aliases(&["Material description", "Custom Description"]),
        }
    }
}

// ==========================================
// ColumnMapping - 全部数据源列映射
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub equivalence_custom: Vec<String>,
    pub equivalence_non_custom: Vec<String>,
    pub inventory_material: Vec<String>,
    pub inventory_quantity: Vec<String>,
    pub firm: DemandColumns,
    pub forecast: DemandColumns,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            equivalence_custom: aliases(&["Custom", "Custom Description"]),
            equivalence_non_custom: aliases(&["Non Custom", "Material description"]),
            inventory_material: aliases(&["Material description", "Non Custom"]),
            inventory_quantity: aliases(&["Open Quantity", "Unrestricted"]),
            firm: DemandColumns::firm_default(),
            forecast: DemandColumns::forecast_default(),
        }
    }
}
