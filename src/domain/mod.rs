// ==========================================
// 表格映射校验引擎 - 领域模型层
// ==========================================
// 职责: 定义单元格、字段值、工作表与解析结果
// 红线: 不含解码逻辑,不含校验逻辑
// ==========================================

pub mod dynamic_record;
pub mod outcome;
pub mod sheet;
pub mod types;

// 重导出核心类型
pub use dynamic_record::DynamicRecord;
pub use outcome::{ParseOutcome, ValidationResult};
pub use sheet::Sheet;
pub use types::{CellValue, FieldValue, ValueKind};
