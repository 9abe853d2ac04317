// ==========================================
// 表格映射校验引擎 - 核心库
// ==========================================
// 输入: 电子表格字节流（xlsx/xls/xlsb/ods/csv）
// 输出: 强类型记录列表 + 按列汇总的校验报告
// 定位: 不因单个坏单元格失败,所有内容错误汇总返回
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 单元格 / 字段值 / 解析结果
pub mod domain;

// 映射层 - 表头解析 / 行转换 / 违规汇总
pub mod mapper;

// 配置层 - 字段声明文件 / 运行参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{CellValue, DynamicRecord, FieldValue, ParseOutcome, Sheet, ValidationResult, ValueKind};

pub use mapper::{
    map_sheet, CalamineDecoder, CsvDecoder, FieldSpec, MapResult, MappingError, RecordSchema,
    SheetDecoder, SheetMapper, SheetRecord, ViolationKind,
};

pub use config::{MapperConfig, SchemaConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
