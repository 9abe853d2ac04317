// ==========================================
// 表格映射校验引擎 - 单元格取值
// ==========================================
// 职责: 单元格 → 原始字符串值（转换与校验前）
// 规则:
// - 缺失 / 空白 / 错误单元格 → 字段默认值（原样）
// - 文本单元格 → 文本; 数值类别字段把小数逗号替换为小数点
// - 数值 / 布尔 / 日期单元格 → 与区域设置无关的文本（日期在数值类别下取 1900 序列号）
// - 最终值去首尾空白
// ==========================================

use crate::domain::types::{datetime_to_excel_serial, format_datetime, format_number, CellValue};
use crate::mapper::schema::FieldSpec;

pub fn read_raw_value(cell: Option<&CellValue>, spec: &FieldSpec) -> String {
    let numeric = spec.kind.is_numeric();

    let value = match cell {
        None | Some(CellValue::Blank) | Some(CellValue::Error(_)) => {
            return spec.default_value.clone();
        }
        Some(CellValue::Text(text)) => {
            if numeric {
                text.replace(',', ".")
            } else {
                text.clone()
            }
        }
        Some(CellValue::Integer(i)) => i.to_string(),
        Some(CellValue::Number(n)) => format_number(*n),
        Some(CellValue::Boolean(b)) => CellValue::Boolean(*b).display_text(),
        Some(CellValue::Date(dt)) => {
            if numeric {
                format_number(datetime_to_excel_serial(dt))
            } else {
                format_datetime(dt)
            }
        }
    };

    value.trim().to_string()
}
