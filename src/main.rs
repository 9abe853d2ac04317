// ==========================================
// 表格映射校验引擎 - 命令行入口
// ==========================================
// 用法:
//   sheet-mapper <schema.json> <input.xlsx|.csv>
//
// 解析结果以 JSON 输出到 stdout; 校验未通过时退出码为 2
// ==========================================

use anyhow::{bail, Context, Result};
use sheet_mapper::{logging, MapperConfig, SchemaConfig};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let (Some(schema_path), Some(input_path)) = (args.next(), args.next()) else {
        bail!("用法: sheet-mapper <schema.json> <input-file>");
    };

    let config = MapperConfig::from_env().context("读取运行配置失败")?;
    let schema = SchemaConfig::load(&schema_path)
        .and_then(|c| c.to_schema())
        .with_context(|| format!("加载字段声明失败: {}", schema_path))?;

    tracing::info!(
        version = sheet_mapper::VERSION,
        schema = %schema_path,
        input = %input_path,
        "开始解析"
    );

    let outcome = config
        .build_mapper()
        .parse_file(&input_path, &schema)
        .with_context(|| format!("解析文件失败: {}", input_path))?;

    let json = if config.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{}", json);

    if outcome.is_valid() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(errors = outcome.errors().len(), "校验未通过");
        Ok(ExitCode::from(2))
    }
}
