// ==========================================
// 表格映射校验引擎 - 行转换器
// ==========================================
// 职责: 一个非空白数据行 → 一条记录 + 该行的违规列表
// 流程: 取值 → 必填校验 → 字符校验 → 类型转换（按字段声明顺序）
// ==========================================

use crate::domain::types::CellValue;
use crate::mapper::cell_reader::read_raw_value;
use crate::mapper::header_resolver::ColumnIndex;
use crate::mapper::schema::RecordSchema;
use crate::mapper::validators::{check_allowed_chars, check_required, convert, ViolationKind};
use tracing::trace;

/// 单元格违规: (字段声明序号, 类别)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    pub field_index: usize,
    pub kind: ViolationKind,
}

#[derive(Debug)]
pub struct RowConversion<T> {
    pub record: T,
    pub violations: Vec<FieldViolation>,
}

/// 整行空白判定（缺失行或全部单元格为空白）
pub fn is_blank_row(row: Option<&[CellValue]>) -> bool {
    match row {
        None => true,
        Some(cells) => cells.iter().all(CellValue::is_blank),
    }
}

pub struct RowConverter<'a, T> {
    schema: &'a RecordSchema<T>,
    columns: &'a ColumnIndex,
}

impl<'a, T> RowConverter<'a, T> {
    pub fn new(schema: &'a RecordSchema<T>, columns: &'a ColumnIndex) -> Self {
        Self { schema, columns }
    }

    /// 转换一行; 调用方负责跳过空白行
    pub fn convert_row(&self, cells: &[CellValue], row_number: usize) -> RowConversion<T> {
        let mut record = self.schema.new_record();
        let mut violations = Vec::new();

        for (field_index, binding) in self.schema.bindings().iter().enumerate() {
            let spec = binding.spec();
            let cell = self
                .columns
                .position_at(field_index)
                .and_then(|idx| cells.get(idx));
            let value = read_raw_value(cell, spec);

            let converted = convert(spec, &value);
            let checks = [
                check_required(spec, &value),
                check_allowed_chars(spec, &value),
                converted.as_ref().err().copied(),
            ];
            for kind in checks.into_iter().flatten() {
                trace!(
                    row = row_number,
                    column = %spec.column_name,
                    violation = %kind,
                    "单元格校验未通过"
                );
                violations.push(FieldViolation { field_index, kind });
            }

            if let Ok(field_value) = converted {
                binding.assign(&mut record, field_value);
            }
        }

        RowConversion { record, violations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::header_resolver::resolve_columns;

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        code: String,
        qty: i64,
        price: Option<f64>,
    }

    fn schema() -> RecordSchema<Item> {
        RecordSchema::builder()
            .text("Code", |i: &mut Item, v| i.code = v)
            .required()
            .allowed_chars("[A-Z0-9]*")
            .integer("Qty", |i: &mut Item, v| i.qty = v)
            .default_value("1")
            .optional_decimal("Price", |i: &mut Item, v| i.price = v)
            .build()
            .unwrap()
    }

    fn cells(values: &[&str]) -> Vec<CellValue> {
        values.iter().map(|v| CellValue::from(*v)).collect()
    }

    #[test]
    fn test_convert_valid_row() {
        let schema = schema();
        let columns = resolve_columns(schema.fields(), &cells(&["Price", "Code", "Qty"])).unwrap();
        let converter = RowConverter::new(&schema, &columns);

        let result = converter.convert_row(&cells(&["3,5", "A1", "4"]), 2);
        assert!(result.violations.is_empty());
        assert_eq!(
            result.record,
            Item {
                code: "A1".to_string(),
                qty: 4,
                price: Some(3.5)
            }
        );
    }

    #[test]
    fn test_default_and_null_substitution() {
        let schema = schema();
        let columns = resolve_columns(schema.fields(), &cells(&["Code", "Qty", "Price"])).unwrap();
        let converter = RowConverter::new(&schema, &columns);

        // 短行: Qty / Price 单元格缺失
        let result = converter.convert_row(&cells(&["B2"]), 3);
        assert!(result.violations.is_empty());
        assert_eq!(result.record.qty, 1);
        assert_eq!(result.record.price, None);
    }

    #[test]
    fn test_violations_collected_and_record_kept() {
        let schema = schema();
        let columns = resolve_columns(schema.fields(), &cells(&["Code", "Qty", "Price"])).unwrap();
        let converter = RowConverter::new(&schema, &columns);

        let result = converter.convert_row(&cells(&["ab", "x", "y"]), 4);
        assert_eq!(
            result.violations,
            vec![
                FieldViolation {
                    field_index: 0,
                    kind: ViolationKind::DisallowedCharacter
                },
                FieldViolation {
                    field_index: 1,
                    kind: ViolationKind::InvalidValue
                },
                FieldViolation {
                    field_index: 2,
                    kind: ViolationKind::InvalidValue
                },
            ]
        );
        // 字符校验不阻止转换; 转换失败保持初值
        assert_eq!(result.record.code, "ab");
        assert_eq!(result.record.qty, 0);
        assert_eq!(result.record.price, None);
    }

    #[test]
    fn test_blank_row_detection() {
        assert!(is_blank_row(None));
        let blank = vec![CellValue::Blank, CellValue::Blank];
        assert!(is_blank_row(Some(blank.as_slice())));

        let errored = vec![CellValue::Blank, CellValue::Error("#N/A".to_string())];
        assert!(!is_blank_row(Some(errored.as_slice())));

        let partial = cells(&["", "x"]);
        assert!(!is_blank_row(Some(partial.as_slice())));
    }
}
