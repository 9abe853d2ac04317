// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 内存工作表构建、xlsx 测试文件生成、测试用目标记录类型
// ==========================================

#![allow(dead_code)]

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use sheet_mapper::{CellValue, MapResult, RecordSchema, Sheet, SheetRecord};

/// 测试用单元格（写入 xlsx）
pub enum XCell<'a> {
    Text(&'a str),
    Number(f64),
    Bool(bool),
    Date(f64),
    Empty,
}

/// 字符串行列表 → 内存工作表（空串视为空白单元格）
pub fn sheet(name: &str, rows: &[&[&str]]) -> Sheet {
    Sheet::from_rows(
        name,
        rows.iter()
            .map(|row| row.iter().map(|v| CellValue::from(*v)).collect())
            .collect(),
    )
}

/// 生成单工作表 xlsx 字节
pub fn xlsx_bytes(sheet_name: &str, rows: &[Vec<XCell>]) -> Result<Vec<u8>, XlsxError> {
    xlsx_bytes_multi(&[(sheet_name, rows)])
}

/// 生成多工作表 xlsx 字节
pub fn xlsx_bytes_multi(sheets: &[(&str, &[Vec<XCell>])]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name)?;

        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (r, c) = (row_idx as u32, col_idx as u16);
                match cell {
                    XCell::Text(s) => {
                        worksheet.write_string(r, c, *s)?;
                    }
                    XCell::Number(n) => {
                        worksheet.write_number(r, c, *n)?;
                    }
                    XCell::Bool(b) => {
                        worksheet.write_boolean(r, c, *b)?;
                    }
                    XCell::Date(serial) => {
                        worksheet.write_number_with_format(r, c, *serial, &date_format)?;
                    }
                    XCell::Empty => {}
                }
            }
        }
    }

    workbook.save_to_buffer()
}

// ==========================================
// Person - 测试用目标记录
// ==========================================
// Name: 必填,仅字母; Age: 小数; City: 可空文本; Member: 布尔,默认 false
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: f64,
    pub city: Option<String>,
    pub member: bool,
}

impl SheetRecord for Person {
    fn schema() -> MapResult<RecordSchema<Self>> {
        RecordSchema::builder()
            .text("Name", |p: &mut Person, v| p.name = v)
            .required()
            .allowed_chars("^[A-Za-z]*$")
            .decimal("Age", |p: &mut Person, v| p.age = v)
            .optional_text("City", |p: &mut Person, v| p.city = v)
            .boolean("Member", |p: &mut Person, v| p.member = v)
            .default_value("false")
            .build()
    }
}
