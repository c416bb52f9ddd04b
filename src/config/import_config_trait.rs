// ==========================================
// 排班导入系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）、DefaultImportConfig（内置默认值）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取允许导入的文件扩展名
    ///
    /// # 返回
    /// - Vec<String>: 小写扩展名列表（不含点）
    ///
    /// # 默认值
    /// - ["csv"]
    async fn get_allowed_extensions(&self) -> ImportResult<Vec<String>>;

    /// 获取单个文件大小上限（字节）
    ///
    /// # 默认值
    /// - 5242880（5 MiB）
    async fn get_max_payload_bytes(&self) -> ImportResult<u64>;

    /// 获取演示同步的来源名
    ///
    /// # 默认值
    /// - "horarios_demo.csv"
    async fn get_demo_source_name(&self) -> ImportResult<String>;

    /// 获取界面语言
    ///
    /// # 默认值
    /// - "es"
    async fn get_ui_locale(&self) -> ImportResult<String>;
}
