// ==========================================
// 可生产订单分析 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数量与日期容错解析
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

// 表格工具导出时常见的空值写法
const NULL_MARKERS: [&str; 4] = ["nan", "nat", "null", "none"];

// Excel 序列日期起点（1900 日期系统，含闰年缺陷偏移）
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed.to_lowercase().as_str()) {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn parse_quantity(&self, value: Option<&str>) -> Result<Option<f64>, String> {
        let Some(raw) = self.normalize_null(value) else {
            return Ok(None);
        };

        let compact: String = raw.chars().filter(|c| *c != ',' && *c != '_').collect();
        match compact.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(raw),
        }
    }

    fn parse_date(&self, value: Option<&str>) -> Result<Option<NaiveDate>, String> {
        let Some(raw) = self.normalize_null(value) else {
            return Ok(None);
        };

        const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%d.%m.%Y", "%Y/%m/%d"];
        for fmt in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(&raw, fmt) {
                return Ok(Some(date));
            }
        }

        const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(&raw, fmt) {
                return Ok(Some(dt.date()));
            }
        }

        self.excel_serial_date(&raw).map(Some).ok_or(raw)
    }
}

impl DataCleaner {
    /// Excel 序列号（如 45678 或 45678.5）→ 日期
    fn excel_serial_date(&self, raw: &str) -> Option<NaiveDate> {
        let serial = raw.parse::<f64>().ok()?;
        if !(1.0..=2_958_465.0).contains(&serial) {
            return None;
        }
        let (y, m, d) = EXCEL_EPOCH;
        NaiveDate::from_ymd_opt(y, m, d)?.checked_add_signed(Duration::days(serial.trunc() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  hello  ", false), "hello");
        assert_eq!(cleaner.clean_text("  hello  ", true), "HELLO");
    }

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("  ")), None);
        assert_eq!(cleaner.normalize_null(Some("NaN")), None);
        assert_eq!(cleaner.normalize_null(Some("null")), None);
        assert_eq!(
            cleaner.normalize_null(Some("  value  ")),
            Some("value".to_string())
        );
        assert_eq!(cleaner.normalize_null(None), None);
    }

    #[test]
    fn test_parse_quantity() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.parse_quantity(Some("1,250")), Ok(Some(1250.0)));
        assert_eq!(cleaner.parse_quantity(Some("12.5")), Ok(Some(12.5)));
        assert_eq!(cleaner.parse_quantity(Some("")), Ok(None));
        assert_eq!(cleaner.parse_quantity(Some("abc")), Err("abc".to_string()));
        assert!(cleaner.parse_quantity(Some("inf")).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        let cleaner = DataCleaner;
        let expected = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        assert_eq!(cleaner.parse_date(Some("2025-01-20")), Ok(Some(expected)));
        assert_eq!(cleaner.parse_date(Some("20250120")), Ok(Some(expected)));
        assert_eq!(cleaner.parse_date(Some("01/20/2025")), Ok(Some(expected)));
        assert_eq!(cleaner.parse_date(Some("20.01.2025")), Ok(Some(expected)));
        assert_eq!(cleaner.parse_date(Some("2025-01-20 00:00:00")), Ok(Some(expected)));
        assert_eq!(cleaner.parse_date(Some("NaT")), Ok(None));
        assert!(cleaner.parse_date(Some("soon")).is_err());
    }

    #[test]
    fn test_parse_excel_serial_date() {
        let cleaner = DataCleaner;
        // 45677 = 2025-01-20
        assert_eq!(
            cleaner.parse_date(Some("45677")),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 20))
        );
    }
}
