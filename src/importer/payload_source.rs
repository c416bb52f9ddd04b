// ==========================================
// 排班导入系统 - 原始数据获取
// ==========================================
// 阶段 0: 文件 → 文本（导入管道唯一的异步等待点）
// 失败即中止整次导入，不产出部分报告；不做重试
// ==========================================

use crate::config::ImportConfigReader;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::schedule_importer_trait::{Payload, PayloadSource};
use async_trait::async_trait;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::{debug, error};

/// 默认允许的扩展名
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["csv"];

/// 默认文件大小上限（5 MiB）
pub const DEFAULT_MAX_PAYLOAD_BYTES: u64 = 5 * 1024 * 1024;

// ==========================================
// FilePayloadSource - 本地文件读取
// ==========================================
#[derive(Debug, Clone)]
pub struct FilePayloadSource {
    allowed_extensions: Vec<String>, // 小写，不含点
    max_payload_bytes: u64,
}

impl Default for FilePayloadSource {
    fn default() -> Self {
        Self::new(
            DEFAULT_ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            DEFAULT_MAX_PAYLOAD_BYTES,
        )
    }
}

impl FilePayloadSource {
    pub fn new(allowed_extensions: Vec<String>, max_payload_bytes: u64) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            max_payload_bytes,
        }
    }

    /// 由配置构造
    pub async fn from_config<C: ImportConfigReader + ?Sized>(config: &C) -> ImportResult<Self> {
        let allowed = config.get_allowed_extensions().await?;
        let max_bytes = config.get_max_payload_bytes().await?;
        Ok(Self::new(allowed, max_bytes))
    }

    /// 检查扩展名（大小写不敏感）
    fn check_extension(&self, path: &Path) -> ImportResult<()> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if self.allowed_extensions.iter().any(|allowed| *allowed == ext) {
            Ok(())
        } else {
            Err(ImportError::UnsupportedFormat(
                if ext.is_empty() { "<无扩展名>".to_string() } else { ext },
                self.allowed_extensions.join(", "),
            ))
        }
    }
}

/// 最多读取 limit + 1 字节，超出即拒绝
///
/// 文件可能在 metadata 之后继续增长，读取时再限一次长度
async fn read_bounded(path: &Path, limit: u64) -> ImportResult<Vec<u8>> {
    let file = tokio::fs::File::open(path).await?;
    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .await?;

    if bytes.len() as u64 > limit {
        return Err(ImportError::PayloadTooLarge {
            size: bytes.len() as u64,
            limit,
        });
    }
    Ok(bytes)
}

#[async_trait]
impl PayloadSource for FilePayloadSource {
    async fn acquire(&self, path: &Path) -> ImportResult<Payload> {
        let path_str = path.display().to_string();

        self.check_extension(path)?;

        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!(file = %path_str, "文件不存在");
                return Err(ImportError::FileNotFound(path_str));
            }
            Err(e) => return Err(e.into()),
        };

        if metadata.len() > self.max_payload_bytes {
            return Err(ImportError::PayloadTooLarge {
                size: metadata.len(),
                limit: self.max_payload_bytes,
            });
        }

        let bytes = read_bounded(path, self.max_payload_bytes).await?;
        let content = String::from_utf8(bytes)
            .map_err(|e| ImportError::FileReadError(format!("{}: 非 UTF-8 编码 ({})", path_str, e)))?;

        let source_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        debug!(file = %path_str, bytes = content.len(), "原始数据读取完成");

        Ok(Payload {
            source_name,
            content,
        })
    }
}
