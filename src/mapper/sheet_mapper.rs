// ==========================================
// 表格映射校验引擎 - 映射器实现
// ==========================================
// 职责: 整合映射流程,从字节流到解析结果
// 流程: 读取 → 解码 → 表头解析 → 逐行转换 → 违规汇总 → 结果组装
// 红线: 单元格内容错误只汇总不中断; 结构性错误立即终止
// ==========================================

use crate::domain::outcome::{ParseOutcome, ValidationResult};
use crate::domain::sheet::Sheet;
use crate::mapper::error::{MapResult, MappingError};
use crate::mapper::header_resolver::resolve_columns;
use crate::mapper::mapper_trait::SheetDecoder;
use crate::mapper::row_converter::{is_blank_row, RowConverter};
use crate::mapper::schema::{RecordSchema, SheetRecord};
use crate::mapper::sheet_decoder::{CalamineDecoder, DecoderKind};
use crate::mapper::violations::ViolationSet;
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// 无数据行时的唯一错误
pub const EMPTY_DOCUMENT_MESSAGE: &str = "document is empty";

// ==========================================
// SheetMapper - 映射器
// ==========================================
// decoder 为 None 时: 字节流按工作簿解码,文件按扩展名选择解码器
#[derive(Default)]
pub struct SheetMapper {
    decoder: Option<Box<dyn SheetDecoder>>,
}

impl SheetMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// 固定使用指定解码器
    pub fn with_decoder(decoder: Box<dyn SheetDecoder>) -> Self {
        Self {
            decoder: Some(decoder),
        }
    }

    /// 按目标类型自身的字段声明解析
    pub fn parse<T: SheetRecord, R: Read>(&self, reader: R) -> MapResult<ParseOutcome<T>> {
        let schema = T::schema()?;
        self.parse_with_schema(reader, &schema)
    }

    /// 从字节流解析
    ///
    /// # 返回
    /// - Ok(ParseOutcome): 记录 + 汇总校验结果（内容错误不会返回 Err）
    /// - Err: 流读取失败 / 容器损坏 / 无工作表
    #[instrument(skip_all, fields(fields = schema.len()))]
    pub fn parse_with_schema<T, R: Read>(
        &self,
        mut reader: R,
        schema: &RecordSchema<T>,
    ) -> MapResult<ParseOutcome<T>> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        debug!(bytes = bytes.len(), "输入流读取完成");

        let sheet = match &self.decoder {
            Some(decoder) => decoder.decode_first_sheet(bytes)?,
            None => CalamineDecoder.decode_first_sheet(bytes)?,
        };
        Ok(map_sheet(&sheet, schema))
    }

    /// 从文件解析
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn parse_file<T, P: AsRef<Path>>(
        &self,
        path: P,
        schema: &RecordSchema<T>,
    ) -> MapResult<ParseOutcome<T>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MappingError::FileNotFound(path.display().to_string()));
        }

        let bytes = std::fs::read(path)?;
        let sheet = match &self.decoder {
            Some(decoder) => decoder.decode_first_sheet(bytes)?,
            None => DecoderKind::from_path(path)?
                .decoder_for(Some(path))
                .decode_first_sheet(bytes)?,
        };
        Ok(map_sheet(&sheet, schema))
    }
}

/// 已解码工作表 → 解析结果
///
/// # 步骤
/// 1. 表头解析（缺列立即返回唯一错误）
/// 2. 逐行转换（跳过空白行,违规按列汇总）
/// 3. 无记录 → 唯一错误"document is empty"
/// 4. 渲染汇总错误
pub fn map_sheet<T>(sheet: &Sheet, schema: &RecordSchema<T>) -> ParseOutcome<T> {
    let start_time = Instant::now();
    info!(sheet = %sheet.name, rows = sheet.row_count(), "开始映射工作表");

    // === 步骤 1: 表头解析 ===
    let header = sheet.header().unwrap_or(&[]);
    let columns = match resolve_columns(schema.fields(), header) {
        Ok(columns) => columns,
        Err(missing) => {
            warn!(column = %missing.0, "表头缺少声明列,终止解析");
            return ParseOutcome::rejected(sheet.name.clone(), missing.message());
        }
    };
    debug!(columns = ?columns, "表头解析完成");

    // === 步骤 2: 逐行转换 ===
    let converter = RowConverter::new(schema, &columns);
    let mut violations = ViolationSet::new(schema.column_names());
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (row_number, row) in sheet.data_rows() {
        let cells = match row {
            Some(cells) if !is_blank_row(Some(cells)) => cells,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let conversion = converter.convert_row(cells, row_number);
        for violation in conversion.violations {
            violations.record(violation.field_index, violation.kind, row_number);
        }
        records.push(conversion.record);
    }
    debug!(
        records = records.len(),
        skipped = skipped,
        violations = violations.total(),
        "逐行转换完成"
    );

    // === 步骤 3: 空文档 ===
    if records.is_empty() {
        warn!(sheet = %sheet.name, "文档无数据行");
        return ParseOutcome::rejected(sheet.name.clone(), EMPTY_DOCUMENT_MESSAGE);
    }

    // === 步骤 4: 汇总错误 ===
    let validation = ValidationResult::from_failures(violations.render().into_iter().map(Some));

    info!(
        sheet = %sheet.name,
        records = records.len(),
        errors = validation.errors().len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "工作表映射完成"
    );

    ParseOutcome {
        records,
        sheet_name: sheet.name.clone(),
        validation,
    }
}
