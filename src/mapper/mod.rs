// ==========================================
// 表格映射校验引擎 - 映射层
// ==========================================
// 职责: 表格 → 强类型记录 + 汇总校验报告
// 支持: Excel / ODS (calamine), CSV
// ==========================================

// 模块声明
pub mod cell_reader;
pub mod error;
pub mod header_resolver;
pub mod mapper_trait;
pub mod row_converter;
pub mod schema;
pub mod sheet_decoder;
pub mod sheet_mapper;
pub mod validators;
pub mod value_parser;
pub mod violations;

// 重导出核心类型
pub use error::{MapResult, MappingError};
pub use header_resolver::{resolve_columns, ColumnIndex, MissingColumn};
pub use row_converter::{FieldViolation, RowConversion, RowConverter};
pub use schema::{AllowedChars, FieldBinding, FieldSpec, RecordSchema, SchemaBuilder, SheetRecord};
pub use sheet_decoder::{CalamineDecoder, CsvDecoder, DecoderKind};
pub use sheet_mapper::{map_sheet, SheetMapper, EMPTY_DOCUMENT_MESSAGE};
pub use validators::ViolationKind;
pub use violations::{ViolationSet, ERROR_ROW_LIMIT};

// 重导出 Trait 接口
pub use mapper_trait::SheetDecoder;
