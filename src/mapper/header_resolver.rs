// ==========================================
// 表格映射校验引擎 - 表头解析
// ==========================================
// 职责: 声明列名 → 物理列号
// 规则: 按声明顺序逐列查找表头（不区分大小写的完全匹配,取第一个命中）
//       第一个找不到的列立即终止整个解析
// ==========================================

use crate::domain::types::CellValue;
use crate::mapper::schema::FieldSpec;

// ==========================================
// ColumnIndex - 列名 → 物理列号（0 起）
// ==========================================
// 顺序与字段声明顺序一致
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: Vec<(String, usize)>,
}

impl ColumnIndex {
    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, idx)| *idx)
    }

    /// 第 n 个声明字段的列号
    pub fn position_at(&self, field_index: usize) -> Option<usize> {
        self.positions.get(field_index).map(|(_, idx)| *idx)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// 表头缺列（结构性错误,不与行级错误合并）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumn(pub String);

impl MissingColumn {
    pub fn message(&self) -> String {
        format!("column \"{}\" is missing", self.0)
    }
}

pub fn resolve_columns<'a, I>(fields: I, header: &[CellValue]) -> Result<ColumnIndex, MissingColumn>
where
    I: IntoIterator<Item = &'a FieldSpec>,
{
    let header_texts: Vec<String> = header
        .iter()
        .map(|cell| cell.display_text().to_lowercase())
        .collect();

    let mut positions = Vec::new();
    for field in fields {
        let wanted = field.column_name.to_lowercase();
        let Some(idx) = header_texts.iter().position(|text| *text == wanted) else {
            return Err(MissingColumn(field.column_name.clone()));
        };
        positions.push((field.column_name.clone(), idx));
    }

    Ok(ColumnIndex { positions })
}
