// ==========================================
// 排班导入系统 - 配置层
// ==========================================
// 职责: 导入相关配置读取，键不存在时回退默认值
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager, DefaultImportConfig, DEFAULT_UI_LOCALE};
pub use import_config_trait::ImportConfigReader;
