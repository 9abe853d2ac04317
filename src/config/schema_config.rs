// ==========================================
// 表格映射校验引擎 - schema 配置文件
// ==========================================
// 职责: JSON 字段声明文件 → RecordSchema<DynamicRecord>
// 默认值: 非必填 / 不限制字符 / 默认值为空串 / 类别 text / 不可空
// ==========================================

use crate::domain::dynamic_record::DynamicRecord;
use crate::domain::types::{FieldValue, ValueKind};
use crate::mapper::error::{MapResult, MappingError};
use crate::mapper::schema::RecordSchema;
use serde::Deserialize;
use std::path::Path;

// ==========================================
// FieldConfig - 单个字段配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub column: String,
    #[serde(default = "default_kind")]
    pub kind: ValueKind,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub allowed_chars: String,
    #[serde(default)]
    pub default_value: String,
}

fn default_kind() -> ValueKind {
    ValueKind::Text
}

// ==========================================
// SchemaConfig - 字段配置文件
// ==========================================
// 示例:
// {
//   "fields": [
//     { "column": "Name", "required": true, "allowed_chars": "[A-Za-z]*" },
//     { "column": "Age", "kind": "integer", "nullable": true }
//   ]
// }
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    pub fields: Vec<FieldConfig>,
}

impl SchemaConfig {
    pub fn from_json(json: &str) -> MapResult<Self> {
        let config: SchemaConfig = serde_json::from_str(json)?;
        if config.fields.is_empty() {
            return Err(MappingError::SchemaConfigError(
                "未声明任何字段".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> MapResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MappingError::FileNotFound(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// 构建动态记录 schema
    ///
    /// 新记录按声明顺序预置各列零值（可空列为 null）,转换失败的列保持零值
    pub fn to_schema(&self) -> MapResult<RecordSchema<DynamicRecord>> {
        let mut builder = RecordSchema::<DynamicRecord>::builder();

        for field in &self.fields {
            let column = field.column.clone();
            builder = builder.field(&field.column, field.kind, field.nullable, move |r, v| {
                r.set(&column, v)
            });
            if field.required {
                builder = builder.required();
            }
            builder = builder
                .allowed_chars(&field.allowed_chars)
                .default_value(&field.default_value);
        }

        let initial: Vec<(String, FieldValue)> = self
            .fields
            .iter()
            .map(|f| (f.column.clone(), FieldValue::zero(f.kind, f.nullable)))
            .collect();

        builder.build_with(move || {
            let mut record = DynamicRecord::new();
            for (column, value) in &initial {
                record.set(column, value.clone());
            }
            record
        })
    }
}
