// ==========================================
// 表格映射校验引擎 - 解码器 Trait
// ==========================================
// 职责: 定义表格容器解码接口（不包含实现）
// ==========================================

use crate::domain::sheet::Sheet;
use crate::mapper::error::MapResult;

// ==========================================
// SheetDecoder Trait
// ==========================================
// 用途: 字节流 → 第一个工作表的单元格网格
// 实现者: CalamineDecoder, CsvDecoder
pub trait SheetDecoder: Send + Sync {
    /// 解码第一个工作表
    ///
    /// # 参数
    /// - bytes: 完整的文件内容（一次性顺序读入）
    ///
    /// # 返回
    /// - Ok(Sheet): 工作表名 + 物理行列网格
    /// - Err: 容器损坏、无工作表等结构性错误
    fn decode_first_sheet(&self, bytes: Vec<u8>) -> MapResult<Sheet>;
}
