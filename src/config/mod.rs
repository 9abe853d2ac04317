// ==========================================
// 表格映射校验引擎 - 配置层
// ==========================================
// 职责: 字段声明配置文件加载 / 运行参数读取
// ==========================================

pub mod mapper_config;
pub mod schema_config;

// 重导出核心配置
pub use mapper_config::{config_keys, MapperConfig};
pub use schema_config::{FieldConfig, SchemaConfig};
