// ==========================================
// 表格映射校验引擎 - 映射模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 范围: 仅结构性错误（文件/容器/schema）; 单元格内容错误走汇总报告
// ==========================================

use thiserror::Error;

/// 映射模块错误类型
#[derive(Error, Debug)]
pub enum MappingError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm/.xlsb/.xls/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("工作簿解析失败: {0}")]
    WorkbookParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("工作簿无工作表")]
    NoWorksheet,

    // ===== schema 声明错误 =====
    #[error("字符白名单表达式无效 (列 {column}): {source}")]
    InvalidPattern {
        column: String,
        #[source]
        source: regex::Error,
    },

    #[error("列名重复声明: {0}")]
    DuplicateColumn(String),

    #[error("schema 配置错误: {0}")]
    SchemaConfigError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for MappingError {
    fn from(err: std::io::Error) -> Self {
        MappingError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for MappingError {
    fn from(err: csv::Error) -> Self {
        MappingError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for MappingError {
    fn from(err: calamine::Error) -> Self {
        MappingError::WorkbookParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for MappingError {
    fn from(err: serde_json::Error) -> Self {
        MappingError::SchemaConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type MapResult<T> = Result<T, MappingError>;
