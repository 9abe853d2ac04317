// ==========================================
// 表格映射校验引擎 - 运行配置
// ==========================================
// 来源: 环境变量（未设置时取默认值）
// - SHEET_MAPPER_PRETTY=1   输出格式化 JSON（默认关闭）
// - SHEET_MAPPER_FORMAT=csv 强制指定解码器（默认按扩展名）
// ==========================================

use crate::mapper::error::MapResult;
use crate::mapper::sheet_decoder::DecoderKind;
use crate::mapper::sheet_mapper::SheetMapper;

pub mod config_keys {
    pub const PRETTY: &str = "SHEET_MAPPER_PRETTY";
    pub const FORMAT: &str = "SHEET_MAPPER_FORMAT";
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapperConfig {
    pub pretty: bool,
    pub format: Option<DecoderKind>,
}

impl MapperConfig {
    pub fn from_env() -> MapResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取（测试使用）
    pub fn from_lookup<F>(lookup: F) -> MapResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pretty = lookup(config_keys::PRETTY)
            .map(|v| is_true(&v))
            .unwrap_or(false);

        let format = match lookup(config_keys::FORMAT) {
            Some(v) if !v.trim().is_empty() => Some(DecoderKind::from_extension(v.trim())?),
            _ => None,
        };

        Ok(Self { pretty, format })
    }

    /// 按配置构建映射器
    pub fn build_mapper(&self) -> SheetMapper {
        match self.format {
            Some(kind) => SheetMapper::with_decoder(kind.decoder_for(None)),
            None => SheetMapper::new(),
        }
    }
}
