// ==========================================
// 排班导入系统 - 导入历史 Repository Trait
// ==========================================
// 职责: 定义导入报告历史的数据访问接口（不包含业务逻辑）
// 红线: 只追加；不提供修改、删除
// ==========================================

use crate::domain::import::ImportReport;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ImportReportRepository Trait
// ==========================================
// 用途: 导入报告审计历史
// 实现者: ImportReportRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait ImportReportRepository: Send + Sync {
    /// 追加一份报告
    ///
    /// # 返回
    /// - Err(UniqueConstraintViolation): 同一报告 ID 已存在
    async fn append(&self, report: &ImportReport) -> RepositoryResult<()>;

    /// 按时间倒序列出最近的报告（最新在前）
    async fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ImportReport>>;

    /// 按 ID 查询
    async fn find_by_id(&self, report_id: &str) -> RepositoryResult<Option<ImportReport>>;

    /// 报告总数
    async fn count(&self) -> RepositoryResult<usize>;
}
