// ==========================================
// 表格映射校验引擎 - 解析结果
// ==========================================
// 职责: 记录列表 + 工作表名 + 汇总校验结果
// 红线: is_valid 当且仅当 errors 为空; 返回后不再修改
// ==========================================

use serde::Serialize;

// ==========================================
// ValidationResult - 汇总校验结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由失败列表构建，忽略 None
    pub fn from_failures<I>(failures: I) -> Self
    where
        I: IntoIterator<Item = Option<String>>,
    {
        Self {
            errors: failures.into_iter().flatten().collect(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    /// 全部错误，按行拼接
    pub fn error_message(&self) -> String {
        self.errors.join("\n")
    }
}

// 序列化时附带 is_valid 字段
#[derive(Serialize)]
struct ValidationView<'a> {
    is_valid: bool,
    errors: &'a [String],
}

// ==========================================
// ParseOutcome - 解析结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutcome<T> {
    pub records: Vec<T>,
    pub sheet_name: String,
    pub validation: ValidationResult,
}

impl<T> ParseOutcome<T> {
    /// 结构性失败 / 空文档: 单条错误，无记录
    pub fn rejected(sheet_name: impl Into<String>, error: impl Into<String>) -> Self {
        let mut validation = ValidationResult::new();
        validation.push(error);
        Self {
            records: Vec::new(),
            sheet_name: sheet_name.into(),
            validation,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn errors(&self) -> &[String] {
        self.validation.errors()
    }
}

impl<T: Serialize> Serialize for ParseOutcome<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ParseOutcome", 3)?;
        state.serialize_field("records", &self.records)?;
        state.serialize_field("sheet_name", &self.sheet_name)?;
        state.serialize_field(
            "validation",
            &ValidationView {
                is_valid: self.validation.is_valid(),
                errors: self.validation.errors(),
            },
        )?;
        state.end()
    }
}
