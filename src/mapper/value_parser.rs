// ==========================================
// 表格映射校验引擎 - 值转换
// ==========================================
// 职责: 原始字符串 → 字段值（与区域设置无关）
// 失败返回 None,由调用方记录"非法值"
// ==========================================

use crate::domain::types::{excel_serial_to_datetime, FieldValue, ValueKind};
use chrono::{NaiveDate, NaiveDateTime};

// 日期文本格式（依次尝试）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d.%m.%Y", "%Y%m%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// 按字段类别转换
pub fn parse_value(kind: ValueKind, value: &str) -> Option<FieldValue> {
    match kind {
        ValueKind::Text => Some(FieldValue::Text(value.to_string())),
        ValueKind::Integer => parse_integer(value).map(FieldValue::Integer),
        ValueKind::Decimal => parse_decimal(value).map(FieldValue::Decimal),
        ValueKind::Boolean => parse_boolean(value).map(FieldValue::Boolean),
        ValueKind::Date => parse_date(value).map(FieldValue::Date),
    }
}

pub fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// 解析小数（只接受有限值）
pub fn parse_decimal(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// 解析布尔（true / false,不区分大小写）
pub fn parse_boolean(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// 解析日期
///
/// # 支持格式
/// - YYYY-MM-DD / YYYY/MM/DD / DD.MM.YYYY / YYYYMMDD
/// - YYYY-MM-DD HH:MM:SS（取日期部分）
/// - Excel 日期序列号（如 45292）
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }

    parse_decimal(value)
        .and_then(excel_serial_to_datetime)
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("30"), Some(30));
        assert_eq!(parse_integer("-7"), Some(-7));
        assert_eq!(parse_integer("3.5"), None);
        assert_eq!(parse_integer(""), None);
        assert_eq!(parse_integer("abc"), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("3.14"), Some(3.14));
        assert_eq!(parse_decimal("30"), Some(30.0));
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn test_parse_boolean() {
        assert_eq!(parse_boolean("TRUE"), Some(true));
        assert_eq!(parse_boolean("false"), Some(false));
        assert_eq!(parse_boolean("1"), None);
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 20);
        assert_eq!(parse_date("2025-01-20"), expected);
        assert_eq!(parse_date("2025/01/20"), expected);
        assert_eq!(parse_date("20.01.2025"), expected);
        assert_eq!(parse_date("20250120"), expected);
        assert_eq!(parse_date("2025-01-20 08:30:00"), expected);
        assert_eq!(parse_date("45292"), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_text_always_converts() {
        assert_eq!(
            parse_value(ValueKind::Text, "3,14"),
            Some(FieldValue::Text("3,14".to_string()))
        );
        assert_eq!(parse_value(ValueKind::Text, ""), Some(FieldValue::Text(String::new())));
    }
}
