// ==========================================
// 表格映射校验引擎 - 字段声明 (Record Schema)
// ==========================================
// 职责: 目标记录类型的字段声明（列名 / 必填 / 字符白名单 / 默认值 / 值类别）
// 生命周期: 解析开始前构建一次,之后只读
// ==========================================

use crate::domain::types::{FieldValue, ValueKind};
use crate::mapper::error::{MapResult, MappingError};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

// ==========================================
// AllowedChars - 字符白名单
// ==========================================
// 整个值必须匹配表达式（自动加 ^(?:...)$ 锚定）
#[derive(Clone)]
pub struct AllowedChars {
    pattern: String,
    regex: Regex,
}

impl AllowedChars {
    pub fn compile(column: &str, pattern: &str) -> MapResult<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
            MappingError::InvalidPattern {
                column: column.to_string(),
                source,
            }
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn permits(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl fmt::Debug for AllowedChars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AllowedChars").field(&self.pattern).finish()
    }
}

// ==========================================
// FieldSpec - 单个字段声明
// ==========================================
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub column_name: String,          // 表头匹配键（不区分大小写）
    pub kind: ValueKind,              // 值类别
    pub nullable: bool,               // 是否接受缺省状态（Option）
    pub required: bool,               // 是否必填
    pub allowed_chars: Option<AllowedChars>, // 字符白名单（None = 不限制）
    pub default_value: String,        // 单元格空白时的替代值
}

/// 字段赋值器
pub type Assign<T> = Box<dyn Fn(&mut T, FieldValue) + Send + Sync>;

pub struct FieldBinding<T> {
    spec: FieldSpec,
    assign: Assign<T>,
}

impl<T> FieldBinding<T> {
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    pub fn assign(&self, record: &mut T, value: FieldValue) {
        (self.assign)(record, value)
    }
}

// ==========================================
// RecordSchema - 目标记录的全部字段声明
// ==========================================
// 字段顺序 = 声明顺序（决定转换顺序与报告中的列顺序）
pub struct RecordSchema<T> {
    bindings: Vec<FieldBinding<T>>,
    factory: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T: 'static> RecordSchema<T> {
    pub fn builder() -> SchemaBuilder<T> {
        SchemaBuilder::new()
    }
}

impl<T> RecordSchema<T> {
    pub fn bindings(&self) -> &[FieldBinding<T>] {
        &self.bindings
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.bindings.iter().map(|b| &b.spec)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.fields().map(|f| f.column_name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 新建一条空记录（转换失败的字段保持此处的初值）
    pub fn new_record(&self) -> T {
        (self.factory)()
    }
}

impl<T> fmt::Debug for RecordSchema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.fields()).finish()
    }
}

/// 目标记录类型: 提供自身的字段声明
pub trait SheetRecord: Default + Sized + 'static {
    fn schema() -> MapResult<RecordSchema<Self>>;
}

// ==========================================
// SchemaBuilder - 字段声明构建器
// ==========================================
// 用法: .text("Name", |r, v| r.name = v).required().allowed_chars("[A-Za-z]*")
// required / allowed_chars / default_value 作用于最近声明的字段
struct PendingField<T> {
    column_name: String,
    kind: ValueKind,
    nullable: bool,
    required: bool,
    pattern: String,
    default_value: String,
    assign: Assign<T>,
}

pub struct SchemaBuilder<T> {
    pending: Vec<PendingField<T>>,
}

impl<T: 'static> Default for SchemaBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> SchemaBuilder<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// 通用字段声明（动态记录使用）
    pub fn field<F>(mut self, column: &str, kind: ValueKind, nullable: bool, set: F) -> Self
    where
        F: Fn(&mut T, FieldValue) + Send + Sync + 'static,
    {
        self.pending.push(PendingField {
            column_name: column.to_string(),
            kind,
            nullable,
            required: false,
            pattern: String::new(),
            default_value: String::new(),
            assign: Box::new(set),
        });
        self
    }

    pub fn text<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, String) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Text, false, move |r, v| {
            if let Some(v) = v.into_text() {
                set(r, v)
            }
        })
    }

    pub fn optional_text<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, Option<String>) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Text, true, move |r, v| set(r, v.into_text()))
    }

    pub fn integer<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, i64) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Integer, false, move |r, v| {
            if let Some(v) = v.into_integer() {
                set(r, v)
            }
        })
    }

    pub fn optional_integer<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, Option<i64>) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Integer, true, move |r, v| {
            set(r, v.into_integer())
        })
    }

    pub fn decimal<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, f64) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Decimal, false, move |r, v| {
            if let Some(v) = v.into_decimal() {
                set(r, v)
            }
        })
    }

    pub fn optional_decimal<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, Option<f64>) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Decimal, true, move |r, v| {
            set(r, v.into_decimal())
        })
    }

    pub fn boolean<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, bool) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Boolean, false, move |r, v| {
            if let Some(v) = v.into_boolean() {
                set(r, v)
            }
        })
    }

    pub fn optional_boolean<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, Option<bool>) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Boolean, true, move |r, v| {
            set(r, v.into_boolean())
        })
    }

    pub fn date<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, NaiveDate) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Date, false, move |r, v| {
            if let Some(v) = v.into_date() {
                set(r, v)
            }
        })
    }

    pub fn optional_date<F>(self, column: &str, set: F) -> Self
    where
        F: Fn(&mut T, Option<NaiveDate>) + Send + Sync + 'static,
    {
        self.field(column, ValueKind::Date, true, move |r, v| set(r, v.into_date()))
    }

    /// 最近声明的字段设为必填
    pub fn required(mut self) -> Self {
        if let Some(last) = self.pending.last_mut() {
            last.required = true;
        }
        self
    }

    /// 最近声明的字段设置字符白名单（空串 = 不限制）
    pub fn allowed_chars(mut self, pattern: &str) -> Self {
        if let Some(last) = self.pending.last_mut() {
            last.pattern = pattern.to_string();
        }
        self
    }

    /// 最近声明的字段设置默认值
    pub fn default_value(mut self, value: &str) -> Self {
        if let Some(last) = self.pending.last_mut() {
            last.default_value = value.to_string();
        }
        self
    }

    /// 构建 schema; 记录初值取 T::default()
    pub fn build(self) -> MapResult<RecordSchema<T>>
    where
        T: Default,
    {
        self.build_with(T::default)
    }

    /// 构建 schema,记录初值由 factory 提供
    pub fn build_with<F>(self, factory: F) -> MapResult<RecordSchema<T>>
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let mut seen = HashSet::new();
        let mut bindings = Vec::with_capacity(self.pending.len());

        for field in self.pending {
            if !seen.insert(field.column_name.to_lowercase()) {
                return Err(MappingError::DuplicateColumn(field.column_name));
            }

            let allowed_chars = if field.pattern.is_empty() {
                None
            } else {
                Some(AllowedChars::compile(&field.column_name, &field.pattern)?)
            };

            bindings.push(FieldBinding {
                spec: FieldSpec {
                    column_name: field.column_name,
                    kind: field.kind,
                    nullable: field.nullable,
                    required: field.required,
                    allowed_chars,
                    default_value: field.default_value,
                },
                assign: field.assign,
            });
        }

        Ok(RecordSchema {
            bindings,
            factory: Box::new(factory),
        })
    }
}
