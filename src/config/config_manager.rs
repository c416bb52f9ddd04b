// ==========================================
// 排班导入系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (key-value + scope)，键不存在时回退默认值
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::db::{init_schema, open_sqlite_connection};
use crate::importer::demo::DEFAULT_DEMO_SOURCE_NAME;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::payload_source::{DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_PAYLOAD_BYTES};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// 默认界面语言
pub const DEFAULT_UI_LOCALE: &str = "es";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> ImportResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> ImportResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ImportError::InternalError(format!("锁获取失败: {}", e)))
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> ImportResult<Option<String>> {
        let conn = self.lock()?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map_err(|e| ImportError::ConfigReadError {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(value)
    }

    /// 写入 global 配置（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> ImportResult<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// 获取所有 global 配置（按键排序）
    pub fn list_global_configs(&self) -> ImportResult<BTreeMap<String, String>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut configs = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            configs.insert(key, value);
        }
        Ok(configs)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ImportResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }
}

/// 解析逗号分隔的扩展名列表
fn parse_extension_list(key: &str, value: &str) -> ImportResult<Vec<String>> {
    let extensions: Vec<String> = value
        .split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    if extensions.is_empty() {
        return Err(ImportError::ConfigValueError {
            key: key.to_string(),
            value: value.to_string(),
            message: "扩展名列表不能为空".to_string(),
        });
    }
    Ok(extensions)
}

// ==========================================
// ImportConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_allowed_extensions(&self) -> ImportResult<Vec<String>> {
        let value = self.get_config_or_default(
            config_keys::ALLOWED_EXTENSIONS,
            &DEFAULT_ALLOWED_EXTENSIONS.join(","),
        )?;
        parse_extension_list(config_keys::ALLOWED_EXTENSIONS, &value)
    }

    async fn get_max_payload_bytes(&self) -> ImportResult<u64> {
        let value = self.get_config_or_default(
            config_keys::MAX_PAYLOAD_BYTES,
            &DEFAULT_MAX_PAYLOAD_BYTES.to_string(),
        )?;
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| ImportError::ConfigValueError {
                key: config_keys::MAX_PAYLOAD_BYTES.to_string(),
                value: value.clone(),
                message: e.to_string(),
            })
    }

    async fn get_demo_source_name(&self) -> ImportResult<String> {
        let value =
            self.get_config_or_default(config_keys::DEMO_SOURCE_NAME, DEFAULT_DEMO_SOURCE_NAME)?;
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Ok(DEFAULT_DEMO_SOURCE_NAME.to_string())
        } else {
            Ok(trimmed.to_string())
        }
    }

    async fn get_ui_locale(&self) -> ImportResult<String> {
        let value = self.get_config_or_default(config_keys::UI_LOCALE, DEFAULT_UI_LOCALE)?;
        Ok(value.trim().to_string())
    }
}

// ==========================================
// DefaultImportConfig - 内置默认配置（无数据库）
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultImportConfig;

#[async_trait]
impl ImportConfigReader for DefaultImportConfig {
    async fn get_allowed_extensions(&self) -> ImportResult<Vec<String>> {
        Ok(DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }

    async fn get_max_payload_bytes(&self) -> ImportResult<u64> {
        Ok(DEFAULT_MAX_PAYLOAD_BYTES)
    }

    async fn get_demo_source_name(&self) -> ImportResult<String> {
        Ok(DEFAULT_DEMO_SOURCE_NAME.to_string())
    }

    async fn get_ui_locale(&self) -> ImportResult<String> {
        Ok(DEFAULT_UI_LOCALE.to_string())
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 导入
    pub const ALLOWED_EXTENSIONS: &str = "import/allowed_extensions";
    pub const MAX_PAYLOAD_BYTES: &str = "import/max_payload_bytes";
    pub const DEMO_SOURCE_NAME: &str = "import/demo_source_name";

    // 界面
    pub const UI_LOCALE: &str = "ui/locale";
}
