// ==========================================
// 排班导入API
// ==========================================
// 职责: 封装排班导入相关功能（导入 → 入历史 → 合并）
// 红线: 合并在负责人集合锁内串行执行，锁内不挂起
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::import::{ImportReport, ImportReportExport};
use crate::domain::owner::Owner;
use crate::engine::merge::{MergeEngine, MergeSummary};
use crate::importer::{FilePayloadSource, ScheduleImporter, ScheduleImporterImpl};
use crate::repository::{ImportReportRepository, ImportReportRepositoryImpl};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// 历史列表单页上限
const MAX_LIST_LIMIT: usize = 100;

/// 导入API响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportApiResponse {
    /// 导入报告（含诊断）
    pub report: ImportReport,
    /// 合并统计
    pub merge: MergeSummary,
}

/// 审计导出响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportExportResponse {
    /// 建议下载文件名: reporte_<来源名>_<毫秒>.json
    pub file_name: String,
    pub document: ImportReportExport,
}

/// 导入API
pub struct ImportApi {
    importer: ScheduleImporterImpl<FilePayloadSource>,
    merge_engine: MergeEngine,
    report_repo: Arc<ImportReportRepositoryImpl>,
    owners: Arc<Mutex<Vec<Owner>>>,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    ///
    /// # 参数
    /// - importer: 排班导入器
    /// - report_repo: 导入历史仓储
    /// - owners: 调用方持有的负责人集合
    pub fn new(
        importer: ScheduleImporterImpl<FilePayloadSource>,
        report_repo: Arc<ImportReportRepositoryImpl>,
        owners: Arc<Mutex<Vec<Owner>>>,
    ) -> Self {
        Self {
            importer,
            merge_engine: MergeEngine::new(),
            report_repo,
            owners,
        }
    }

    /// 导入排班文件
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 报告 + 合并统计（行级问题在报告诊断中）
    /// - Err(ApiError): 文件获取失败，或历史写入失败
    pub async fn import_file(&self, file_path: &str) -> ApiResult<ImportApiResponse> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("文件路径不能为空".to_string()));
        }

        let report = self.importer.import_from_source(file_path).await?;
        self.commit(report).await
    }

    /// 导入已获取的文本（如前端已读取的文件内容）
    pub async fn import_text(&self, content: &str, source_name: &str) -> ApiResult<ImportApiResponse> {
        let report = self.importer.import_from_text(content, source_name);
        self.commit(report).await
    }

    /// 同步演示数据
    pub async fn import_demo(&self) -> ApiResult<ImportApiResponse> {
        let report = self.importer.import_demo()?;
        self.commit(report).await
    }

    /// 批量导入
    ///
    /// 获取阶段并发；入历史与合并按路径顺序逐个执行
    pub async fn import_files(&self, file_paths: Vec<String>) -> Vec<Result<ImportApiResponse, String>> {
        let results = self.importer.batch_import(file_paths).await;

        let mut responses = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(report) => {
                    let id = report.id().to_string();
                    responses.push(
                        self.commit(report)
                            .await
                            .map_err(|e| format!("报告 {} 提交失败: {}", id, e)),
                    );
                }
                Err(msg) => responses.push(Err(msg)),
            }
        }
        responses
    }

    /// 查询最近导入（新的在前）
    pub async fn list_imports(&self, limit: usize) -> ApiResult<Vec<ImportReport>> {
        let limit = limit.clamp(1, MAX_LIST_LIMIT);
        Ok(self.report_repo.list_recent(limit).await?)
    }

    /// 查询单个报告
    pub async fn get_report(&self, report_id: &str) -> ApiResult<ImportReport> {
        self.report_repo
            .find_by_id(report_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("导入报告不存在: {}", report_id)))
    }

    /// 导出审计文档
    pub async fn export_report(&self, report_id: &str) -> ApiResult<ReportExportResponse> {
        let report = self.get_report(report_id).await?;
        Ok(ReportExportResponse {
            file_name: report.export_file_name(Utc::now()),
            document: report.to_export(),
        })
    }

    // ==========================================
    // 内部: 入历史 → 合并
    // ==========================================

    async fn commit(&self, report: ImportReport) -> ApiResult<ImportApiResponse> {
        // 锁已中毒则合并必然失败，不写历史
        if self.owners.is_poisoned() {
            return Err(ApiError::InternalError(
                "负责人集合锁已中毒，拒绝提交".to_string(),
            ));
        }

        // 先写历史: 写入失败时负责人集合保持不变
        self.report_repo.append(&report).await?;
        let merge = self.merge_into_owners(&report)?;

        tracing::info!(
            report_id = %report.id(),
            source = %report.source_name(),
            success = report.success_count(),
            failed = report.failure_count(),
            appended = merge.appended,
            unmatched = merge.unmatched_records,
            "导入已提交"
        );

        Ok(ImportApiResponse { report, merge })
    }

    fn merge_into_owners(&self, report: &ImportReport) -> ApiResult<MergeSummary> {
        let mut owners = self
            .owners
            .lock()
            .map_err(|e| ApiError::InternalError(format!("负责人集合锁获取失败: {}", e)))?;
        Ok(self.merge_engine.merge_into(&mut owners, report))
    }
}
