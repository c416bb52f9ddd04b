// ==========================================
// 排班导入系统 - 排班导入器实现
// ==========================================
// 职责: 整合导入流程，从原始数据到导入报告
// 流程: 获取 → 行解析 → 逐行校验 → 汇总
// 说明: 获取原始文本后全部同步执行，不再挂起
// ==========================================

use crate::domain::import::ImportReport;
use crate::importer::error::ImportResult;
use crate::importer::import_aggregator::ImportAggregator;
use crate::importer::line_parser::LineParser;
use crate::importer::schedule_importer_trait::{DemoRecordSource, PayloadSource, ScheduleImporter};
use chrono::Utc;
use std::path::Path;
use tracing::{error, info, instrument};
use uuid::Uuid;

// ==========================================
// ScheduleImporterImpl - 排班导入器实现
// ==========================================
pub struct ScheduleImporterImpl<S>
where
    S: PayloadSource,
{
    // 原始数据获取（外部协作方）
    payload_source: S,

    // 导入组件
    line_parser: LineParser,
    aggregator: ImportAggregator,
    demo_source: Box<dyn DemoRecordSource>,
}

impl<S> ScheduleImporterImpl<S>
where
    S: PayloadSource,
{
    /// 创建新的 ScheduleImporter 实例
    ///
    /// # 参数
    /// - payload_source: 原始数据获取
    /// - line_parser: 行解析器
    /// - aggregator: 导入汇总器（内含行校验器）
    /// - demo_source: 演示记录集
    pub fn new(
        payload_source: S,
        line_parser: LineParser,
        aggregator: ImportAggregator,
        demo_source: Box<dyn DemoRecordSource>,
    ) -> Self {
        Self {
            payload_source,
            line_parser,
            aggregator,
            demo_source,
        }
    }
}

#[async_trait::async_trait]
impl<S> ScheduleImporter for ScheduleImporterImpl<S>
where
    S: PayloadSource,
{
    fn import_from_text(&self, content: &str, source_name: &str) -> ImportReport {
        let rows = self.line_parser.parse(content);
        self.aggregator.aggregate(&rows, source_name, Utc::now())
    }

    #[instrument(skip(self, file_path))]
    async fn import_from_source<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportReport> {
        let path = file_path.as_ref();
        info!(file = %path.display(), "开始导入排班数据");

        // === 步骤 1: 获取原始文本（唯一等待点）===
        let payload = self.payload_source.acquire(path).await.map_err(|e| {
            error!(file = %path.display(), error = %e, "原始数据获取失败");
            e
        })?;

        // === 步骤 2-4: 解析 → 校验 → 汇总 ===
        let report = self.import_from_text(&payload.content, &payload.source_name);

        info!(
            report_id = %report.id(),
            total = report.total_rows(),
            success = report.success_count(),
            failed = report.failure_count(),
            "排班数据导入完成"
        );
        Ok(report)
    }

    fn import_demo(&self) -> ImportResult<ImportReport> {
        let records = self.demo_source.demo_records();
        let report = ImportAggregator::from_trusted_records(
            format!("demo_{}", Uuid::new_v4()),
            &self.demo_source.source_name(),
            Utc::now(),
            records,
        )
        .map_err(|e| {
            error!(error = %e, "演示记录未通过校验");
            e
        })?;
        info!(report_id = %report.id(), records = report.success_count(), "演示数据同步完成");
        Ok(report)
    }

    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<Result<ImportReport, String>> {
        use futures::future::join_all;

        info!(count = file_paths.len(), "开始批量导入文件");

        let import_tasks = file_paths.into_iter().map(|path| {
            let path_str = path.as_ref().display().to_string();
            async move {
                self.import_from_source(path)
                    .await
                    .map_err(|e| format!("文件 {} 导入失败: {}", path_str, e))
            }
        });

        // 并发获取，各自独立汇总
        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );

        results
    }
}
