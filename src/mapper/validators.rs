// ==========================================
// 表格映射校验引擎 - 单元格校验器
// ==========================================
// 职责: 必填 / 字符白名单 / 类型转换 三项独立校验
// 红线: 三项校验互不短路,任一失败都不阻止其余校验与转换
// ==========================================

use crate::domain::types::FieldValue;
use crate::mapper::schema::FieldSpec;
use crate::mapper::value_parser::parse_value;
use serde::Serialize;
use std::fmt;

// ==========================================
// ViolationKind - 违规类别
// ==========================================
// 声明顺序即报告输出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    InvalidValue,        // 类型转换失败
    DisallowedCharacter, // 含白名单外字符
    MissingValue,        // 必填为空
}

impl ViolationKind {
    pub const ALL: [ViolationKind; 3] = [
        ViolationKind::InvalidValue,
        ViolationKind::DisallowedCharacter,
        ViolationKind::MissingValue,
    ];

    /// 报告短语
    pub fn phrase(self) -> &'static str {
        match self {
            ViolationKind::InvalidValue => "contain an invalid value",
            ViolationKind::DisallowedCharacter => "contain a disallowed character",
            ViolationKind::MissingValue => "are missing a required value",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::InvalidValue => write!(f, "INVALID_VALUE"),
            ViolationKind::DisallowedCharacter => write!(f, "DISALLOWED_CHARACTER"),
            ViolationKind::MissingValue => write!(f, "MISSING_VALUE"),
        }
    }
}

/// 必填校验（使用转换前的值）
pub fn check_required(spec: &FieldSpec, value: &str) -> Option<ViolationKind> {
    if spec.required && value.is_empty() {
        Some(ViolationKind::MissingValue)
    } else {
        None
    }
}

/// 字符白名单校验（空值不校验）
pub fn check_allowed_chars(spec: &FieldSpec, value: &str) -> Option<ViolationKind> {
    match &spec.allowed_chars {
        Some(chars) if !value.is_empty() && !chars.permits(value) => {
            Some(ViolationKind::DisallowedCharacter)
        }
        _ => None,
    }
}

/// 类型转换
///
/// # 返回
/// - Ok(FieldValue::Null): 可空字段且值为空白
/// - Ok(value): 转换成功
/// - Err(InvalidValue): 转换失败（字段保持初值）
pub fn convert(spec: &FieldSpec, value: &str) -> Result<FieldValue, ViolationKind> {
    if spec.nullable && value.trim().is_empty() {
        return Ok(FieldValue::Null);
    }
    parse_value(spec.kind, value).ok_or(ViolationKind::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ValueKind;
    use crate::mapper::schema::AllowedChars;

    fn spec(kind: ValueKind, nullable: bool, required: bool, pattern: Option<&str>) -> FieldSpec {
        FieldSpec {
            column_name: "Col".to_string(),
            kind,
            nullable,
            required,
            allowed_chars: pattern.map(|p| AllowedChars::compile("Col", p).unwrap()),
            default_value: String::new(),
        }
    }

    #[test]
    fn test_required_only_flags_empty() {
        let s = spec(ValueKind::Text, false, true, None);
        assert_eq!(check_required(&s, ""), Some(ViolationKind::MissingValue));
        assert_eq!(check_required(&s, "x"), None);

        let optional = spec(ValueKind::Text, false, false, None);
        assert_eq!(check_required(&optional, ""), None);
    }

    #[test]
    fn test_allowed_chars_skips_empty() {
        let s = spec(ValueKind::Text, false, false, Some("[A-Za-z]+"));
        assert_eq!(check_allowed_chars(&s, ""), None);
        assert_eq!(check_allowed_chars(&s, "John"), None);
        assert_eq!(
            check_allowed_chars(&s, "J0hn"),
            Some(ViolationKind::DisallowedCharacter)
        );
    }

    #[test]
    fn test_convert_nullable_blank_is_null() {
        let s = spec(ValueKind::Integer, true, false, None);
        assert_eq!(convert(&s, "  "), Ok(FieldValue::Null));
        assert_eq!(convert(&s, "5"), Ok(FieldValue::Integer(5)));
    }

    #[test]
    fn test_convert_non_nullable_blank_fails_for_numbers() {
        let s = spec(ValueKind::Integer, false, false, None);
        assert_eq!(convert(&s, ""), Err(ViolationKind::InvalidValue));

        let text = spec(ValueKind::Text, false, false, None);
        assert_eq!(convert(&text, ""), Ok(FieldValue::Text(String::new())));
    }

    #[test]
    fn test_checks_are_independent() {
        // 必填 + 数值字段为空: 同时出现缺失与非法值
        let s = spec(ValueKind::Decimal, false, true, Some("[0-9.]*"));
        let violations: Vec<_> = [
            check_required(&s, ""),
            check_allowed_chars(&s, ""),
            convert(&s, "").err(),
        ]
        .into_iter()
        .flatten()
        .collect();
        assert_eq!(
            violations,
            vec![ViolationKind::MissingValue, ViolationKind::InvalidValue]
        );
    }

    #[test]
    fn test_phrase_order() {
        assert_eq!(ViolationKind::ALL[0].phrase(), "contain an invalid value");
        assert_eq!(ViolationKind::ALL[2].phrase(), "are missing a required value");
    }
}
