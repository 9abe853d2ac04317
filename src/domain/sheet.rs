// ==========================================
// 表格映射校验引擎 - 工作表网格
// ==========================================
// 职责: 解码器输出的第一个工作表（物理行列位置保持不变）
// 约定: 行下标 0 为表头; 缺失行为 None
// ==========================================

use crate::domain::types::CellValue;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    rows: Vec<Option<Vec<CellValue>>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// 由完整行列表构建（测试与 CSV 解码使用）
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows: rows.into_iter().map(Some).collect(),
        }
    }

    /// 追加一行; None 表示该物理行不存在
    pub fn push_row(&mut self, row: Option<Vec<CellValue>>) {
        self.rows.push(row);
    }

    /// 物理行数（含表头）
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.rows.get(index).and_then(|r| r.as_deref())
    }

    /// 表头行（物理第 1 行）
    pub fn header(&self) -> Option<&[CellValue]> {
        self.row(0)
    }

    /// 数据行迭代: (Excel 行号, 行内容)，行号从 2 开始
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, Option<&[CellValue]>)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| (idx + 1, row.as_deref()))
    }
}
