// ==========================================
// 排班导入系统 - 看板 API
// ==========================================
// 职责: 负责人集合统计、检索，导入历史汇总
// 红线: 只读，不修改负责人集合与历史
// ==========================================

use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::import::ImportHistorySummary;
use crate::domain::owner::Owner;
use crate::engine::dashboard::{DashboardEngine, DirectoryStats};
use crate::repository::{ImportReportRepository, ImportReportRepositoryImpl};

// ==========================================
// DashboardApi - 看板 API
// ==========================================
pub struct DashboardApi {
    engine: DashboardEngine,
    owners: Arc<Mutex<Vec<Owner>>>,
    report_repo: Arc<ImportReportRepositoryImpl>,
}

impl DashboardApi {
    pub fn new(owners: Arc<Mutex<Vec<Owner>>>, report_repo: Arc<ImportReportRepositoryImpl>) -> Self {
        Self {
            engine: DashboardEngine::new(),
            owners,
            report_repo,
        }
    }

    fn owners(&self) -> ApiResult<MutexGuard<'_, Vec<Owner>>> {
        self.owners
            .lock()
            .map_err(|e| ApiError::InternalError(format!("负责人集合锁获取失败: {}", e)))
    }

    /// 负责人集合快照
    pub fn list_owners(&self) -> ApiResult<Vec<Owner>> {
        Ok(self.owners()?.clone())
    }

    pub fn get_directory_stats(&self) -> ApiResult<DirectoryStats> {
        let owners = self.owners()?;
        Ok(self.engine.directory_stats(&owners))
    }

    /// 按姓名/邮箱/部门检索（不区分大小写）
    pub fn search_owners(&self, term: &str) -> ApiResult<Vec<Owner>> {
        let owners = self.owners()?;
        Ok(self
            .engine
            .search_owners(&owners, term)
            .into_iter()
            .cloned()
            .collect())
    }

    /// 导入历史汇总（全部历史）
    pub async fn get_history_summary(&self) -> ApiResult<ImportHistorySummary> {
        let total = self.report_repo.count().await?;
        if total == 0 {
            return Ok(ImportHistorySummary::default());
        }
        let reports = self.report_repo.list_recent(total).await?;
        Ok(self.engine.history_summary(&reports))
    }
}
