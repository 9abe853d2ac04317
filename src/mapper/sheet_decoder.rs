// ==========================================
// 表格映射校验引擎 - 解码器实现
// ==========================================
// 支持: 工作簿 (.xlsx/.xlsm/.xlsb/.xls/.ods) / CSV (.csv)
// 约定: 只读取第一个工作表; 物理行列位置保持不变
// ==========================================

use crate::domain::sheet::Sheet;
use crate::domain::types::CellValue;
use crate::mapper::error::{MapResult, MappingError};
use crate::mapper::mapper_trait::SheetDecoder;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

// CSV 没有工作表名时使用的默认名
pub const DEFAULT_CSV_SHEET_NAME: &str = "Sheet1";

// ==========================================
// 工作簿解码器（calamine 自动识别格式）
// ==========================================
pub struct CalamineDecoder;

impl SheetDecoder for CalamineDecoder {
    fn decode_first_sheet(&self, bytes: Vec<u8>) -> MapResult<Sheet> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or(MappingError::NoWorksheet)?;

        let range = workbook.worksheet_range(&sheet_name)?;
        debug!(
            sheet = %sheet_name,
            sheet_count = sheet_names.len(),
            start = ?range.start(),
            "工作表读取完成"
        );

        Ok(sheet_from_range(sheet_name, &range))
    }
}

/// 已用区域 → 物理网格（区域起点之前补空行/空列）
fn sheet_from_range(name: String, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    let Some((start_row, start_col)) = range.start() else {
        return sheet;
    };

    for _ in 0..start_row {
        sheet.push_row(None);
    }
    for row in range.rows() {
        let mut cells = vec![CellValue::Blank; start_col as usize];
        cells.extend(row.iter().map(cell_from_data));
        sheet.push_row(Some(cells));
    }
    sheet
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Blank,
        Data::String(s) if s.is_empty() => CellValue::Blank,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Boolean(*b),
        // as_datetime 已处理 1904 日期系统; 时长单元格保留原始数值
        Data::DateTime(dt) if dt.is_datetime() => match dt.as_datetime() {
            Some(datetime) => CellValue::Date(datetime),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

// ==========================================
// CSV 解码器
// ==========================================
// 所有单元格均为文本; 空字段视为空白单元格
pub struct CsvDecoder {
    sheet_name: String,
}

impl CsvDecoder {
    pub fn new() -> Self {
        Self::named(DEFAULT_CSV_SHEET_NAME)
    }

    pub fn named(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetDecoder for CsvDecoder {
    fn decode_first_sheet(&self, bytes: Vec<u8>) -> MapResult<Sheet> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes.as_slice());

        let mut sheet = Sheet::new(self.sheet_name.clone());
        for result in reader.records() {
            let record = result?;
            sheet.push_row(Some(record.iter().map(CellValue::from).collect()));
        }

        debug!(sheet = %self.sheet_name, rows = sheet.row_count(), "CSV 读取完成");
        Ok(sheet)
    }
}

// ==========================================
// 按扩展名选择解码器
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderKind {
    Workbook,
    Csv,
}

impl DecoderKind {
    pub fn from_extension(ext: &str) -> MapResult<Self> {
        match ext.to_lowercase().as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(DecoderKind::Workbook),
            "csv" => Ok(DecoderKind::Csv),
            other => Err(MappingError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path(path: &Path) -> MapResult<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    /// 构建解码器; CSV 工作表以文件名（不含扩展名）命名
    pub fn decoder_for(self, path: Option<&Path>) -> Box<dyn SheetDecoder> {
        match self {
            DecoderKind::Workbook => Box::new(CalamineDecoder),
            DecoderKind::Csv => {
                let name = path
                    .and_then(|p| p.file_stem())
                    .and_then(|s| s.to_str())
                    .unwrap_or(DEFAULT_CSV_SHEET_NAME);
                Box::new(CsvDecoder::named(name))
            }
        }
    }
}
