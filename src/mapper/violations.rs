// ==========================================
// 表格映射校验引擎 - 违规汇总
// ==========================================
// 职责: 按列收集违规行号,渲染为分类错误消息
// 输出顺序: 非法值 → 非法字符 → 必填缺失; 类别内按字段声明顺序
// 每条消息最多列出前 15 个行号,超出部分静默截断
// ==========================================

use crate::mapper::validators::ViolationKind;

/// 单条消息列出的最大行号数
pub const ERROR_ROW_LIMIT: usize = 15;

#[derive(Debug, Clone, Default)]
struct ColumnViolations {
    invalid_value: Vec<usize>,
    disallowed_character: Vec<usize>,
    missing_value: Vec<usize>,
}

impl ColumnViolations {
    fn rows(&self, kind: ViolationKind) -> &[usize] {
        match kind {
            ViolationKind::InvalidValue => &self.invalid_value,
            ViolationKind::DisallowedCharacter => &self.disallowed_character,
            ViolationKind::MissingValue => &self.missing_value,
        }
    }

    fn rows_mut(&mut self, kind: ViolationKind) -> &mut Vec<usize> {
        match kind {
            ViolationKind::InvalidValue => &mut self.invalid_value,
            ViolationKind::DisallowedCharacter => &mut self.disallowed_character,
            ViolationKind::MissingValue => &mut self.missing_value,
        }
    }
}

// ==========================================
// ViolationSet - 每个声明列三组行号
// ==========================================
#[derive(Debug, Clone)]
pub struct ViolationSet {
    columns: Vec<(String, ColumnViolations)>,
}

impl ViolationSet {
    pub fn new(column_names: Vec<String>) -> Self {
        Self {
            columns: column_names
                .into_iter()
                .map(|name| (name, ColumnViolations::default()))
                .collect(),
        }
    }

    /// 记录违规（field_index 为字段声明序号,row 为 Excel 行号）
    pub fn record(&mut self, field_index: usize, kind: ViolationKind, row: usize) {
        if let Some((_, column)) = self.columns.get_mut(field_index) {
            column.rows_mut(kind).push(row);
        }
    }

    /// 某列某类别的全部行号（按记录顺序）
    pub fn rows(&self, column: &str, kind: ViolationKind) -> &[usize] {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, c)| c.rows(kind))
            .unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.columns
            .iter()
            .map(|(_, c)| {
                ViolationKind::ALL
                    .iter()
                    .map(|kind| c.rows(*kind).len())
                    .sum::<usize>()
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// 渲染错误消息
    pub fn render(&self) -> Vec<String> {
        let mut messages = Vec::new();
        for kind in ViolationKind::ALL {
            for (name, column) in &self.columns {
                let rows = column.rows(kind);
                if !rows.is_empty() {
                    messages.push(format_message(name, rows, kind));
                }
            }
        }
        messages
    }
}

/// column "<name>": rows <list> <phrase>.
fn format_message(column: &str, rows: &[usize], kind: ViolationKind) -> String {
    let list = rows
        .iter()
        .take(ERROR_ROW_LIMIT)
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("column \"{}\": rows {} {}.", column, list, kind.phrase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> ViolationSet {
        ViolationSet::new(vec!["Name".to_string(), "Age".to_string()])
    }

    #[test]
    fn test_render_category_then_column_order() {
        let mut violations = set();
        violations.record(0, ViolationKind::MissingValue, 3);
        violations.record(1, ViolationKind::InvalidValue, 5);
        violations.record(0, ViolationKind::InvalidValue, 4);
        violations.record(0, ViolationKind::DisallowedCharacter, 4);

        assert_eq!(
            violations.render(),
            vec![
                "column \"Name\": rows 4 contain an invalid value.".to_string(),
                "column \"Age\": rows 5 contain an invalid value.".to_string(),
                "column \"Name\": rows 4 contain a disallowed character.".to_string(),
                "column \"Name\": rows 3 are missing a required value.".to_string(),
            ]
        );
        assert_eq!(violations.total(), 4);
    }

    #[test]
    fn test_truncates_to_first_fifteen() {
        let mut violations = set();
        for row in 2..22 {
            violations.record(1, ViolationKind::InvalidValue, row);
        }

        let messages = violations.render();
        assert_eq!(messages.len(), 1);
        let expected_rows = (2..17).map(|r| r.to_string()).collect::<Vec<_>>().join(", ");
        assert_eq!(
            messages[0],
            format!("column \"Age\": rows {} contain an invalid value.", expected_rows)
        );
        // 原始行号不截断
        assert_eq!(violations.rows("Age", ViolationKind::InvalidValue).len(), 20);
    }

    #[test]
    fn test_keeps_encounter_order() {
        let mut violations = set();
        violations.record(0, ViolationKind::MissingValue, 9);
        violations.record(0, ViolationKind::MissingValue, 2);
        assert_eq!(
            violations.render(),
            vec!["column \"Name\": rows 9, 2 are missing a required value.".to_string()]
        );
    }

    #[test]
    fn test_empty_set_renders_nothing() {
        let violations = set();
        assert!(violations.is_empty());
        assert!(violations.render().is_empty());
    }
}
