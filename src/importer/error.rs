// ==========================================
// 排班导入系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 单行错误不在此列（以诊断信息形式进入报告）
//       只有获取原始数据失败才会中止整次导入
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（允许的扩展名: {1}）")]
    UnsupportedFormat(String, String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("文件过大: {size} 字节（上限 {limit} 字节）")]
    PayloadTooLarge { size: u64, limit: u64 },

    // ===== 配置错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    // ===== 数据错误 =====
    #[error("可信记录未通过校验 (id={0})")]
    InvalidTrustedRecord(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<rusqlite::Error>（配置表读取）
impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::ConfigReadError {
            key: "config_kv".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
