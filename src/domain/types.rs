// ==========================================
// 表格映射校验引擎 - 领域类型定义
// ==========================================
// 职责: 字段值类别 / 转换后字段值 / 解码后单元格
// 红线: 类别集合封闭,按字段声明静态选定,不做运行时类型探测
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 字段值类别 (Value Kind)
// ==========================================
// 序列化格式: snake_case (与 schema 配置文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Integer, // 整数 (i64)
    Decimal, // 小数 (f64)
    Text,    // 文本
    Boolean, // 布尔
    Date,    // 日期
}

impl ValueKind {
    /// 是否数值类别（数值类别读取时小数逗号替换为小数点）
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Integer | ValueKind::Decimal)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Decimal => write!(f, "decimal"),
            ValueKind::Text => write!(f, "text"),
            ValueKind::Boolean => write!(f, "boolean"),
            ValueKind::Date => write!(f, "date"),
        }
    }
}

// ==========================================
// 字段值 (Field Value)
// ==========================================
// 转换成功后交给记录 setter 的值; Null 表示可空字段的缺省状态
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Decimal(f64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
}

impl FieldValue {
    /// 指定类别的零值（可空字段为 Null）
    pub fn zero(kind: ValueKind, nullable: bool) -> Self {
        if nullable {
            return FieldValue::Null;
        }
        match kind {
            ValueKind::Integer => FieldValue::Integer(0),
            ValueKind::Decimal => FieldValue::Decimal(0.0),
            ValueKind::Text => FieldValue::Text(String::new()),
            ValueKind::Boolean => FieldValue::Boolean(false),
            ValueKind::Date => FieldValue::Date(NaiveDate::default()),
        }
    }

    pub fn into_integer(self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_decimal(self) -> Option<f64> {
        match self {
            FieldValue::Decimal(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_boolean(self) -> Option<bool> {
        match self {
            FieldValue::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_date(self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(v) => Some(v),
            _ => None,
        }
    }
}

// ==========================================
// 单元格 (Cell Value)
// ==========================================
// 由解码器产出; 空白 / 文本 / 整数 / 数值 / 布尔 / 日期 / 错误
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Blank,
    Text(String),
    /// 整数单元格（保持 i64 精度）
    Integer(i64),
    Number(f64),
    Boolean(bool),
    /// 日期单元格（解码器已按工作簿日期系统换算）
    Date(NaiveDateTime),
    /// 公式错误（#DIV/0! 等）
    Error(String),
}

impl CellValue {
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Blank)
    }

    /// 单元格的文本表示（表头匹配使用）
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Blank => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Boolean(b) => {
                if *b {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            CellValue::Date(dt) => format_datetime(dt),
            CellValue::Error(e) => e.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Blank
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// 与区域设置无关的数值文本: 30.0 → "30", 3.14 → "3.14"
pub fn format_number(value: f64) -> String {
    value.to_string()
}

/// Excel 日期序列号 → 日期时间（仅用于纯数字文本）
///
/// 1900 日期系统: 序列号 60 为不存在的 1900-02-29, 60 之前的序列号以 1899-12-31 为 1 日起算
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    // 2958465 = 9999-12-31, Excel 可表示的最大日期
    if !serial.is_finite() || serial < 0.0 || serial >= 2_958_466.0 {
        return None;
    }
    let epoch = if serial < 60.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };
    let days = serial.trunc() as i64;
    let seconds = ((serial - serial.trunc()) * 86_400.0).round() as i64;
    epoch
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(seconds))
}

/// 日期时间 → 1900 日期系统序列号（1900-03-01 之前按 1899-12-31 起算）
pub fn datetime_to_excel_serial(dt: &NaiveDateTime) -> f64 {
    let day_start = |y: i32, m: u32, d: u32| {
        NaiveDate::from_ymd_opt(y, m, d).and_then(|date| date.and_hms_opt(0, 0, 0))
    };
    let epoch = match day_start(1900, 3, 1) {
        Some(leap_bug_end) if *dt < leap_bug_end => day_start(1899, 12, 31),
        _ => day_start(1899, 12, 30),
    };
    match epoch {
        Some(epoch) => (*dt - epoch).num_milliseconds() as f64 / 86_400_000.0,
        None => 0.0,
    }
}

/// 日期时间的 ISO-8601 文本（无时间部分时只保留日期）
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    if dt.num_seconds_from_midnight() == 0 {
        dt.format("%Y-%m-%d").to_string()
    } else {
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
