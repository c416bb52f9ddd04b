// ==========================================
// 排班导入系统 - 导入汇总器
// ==========================================
// 阶段 3: 逐行调用校验器，拆分为 记录/诊断 两组并构造报告
// 红线: 任何输入都产出报告（全部失败也是合法输出）
// ==========================================

use crate::domain::import::ImportReport;
use crate::domain::schedule::{ParsedRow, ScheduleRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::schedule_importer_trait::RowValidator;
use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

pub struct ImportAggregator {
    row_validator: Box<dyn RowValidator>,
}

impl ImportAggregator {
    pub fn new(row_validator: Box<dyn RowValidator>) -> Self {
        Self { row_validator }
    }

    /// 汇总一次导入
    ///
    /// # 参数
    /// - rows: 行解析器产出的数据行（按原始顺序）
    /// - source_name: 来源标签
    /// - imported_at: 处理时间
    pub fn aggregate(
        &self,
        rows: &[ParsedRow],
        source_name: &str,
        imported_at: DateTime<Utc>,
    ) -> ImportReport {
        let mut records = Vec::new();
        let mut diagnostics = Vec::new();

        for row in rows {
            match self.row_validator.validate_row(row) {
                Ok(record) => records.push(record),
                Err(rejection) => {
                    debug!(line = rejection.line(), reason = %rejection, "行被拒绝");
                    diagnostics.push(rejection.to_string());
                }
            }
        }

        info!(
            source = %source_name,
            total_rows = rows.len(),
            success = records.len(),
            failed = diagnostics.len(),
            "导入汇总完成"
        );

        ImportReport::new(
            Uuid::new_v4().to_string(),
            source_name,
            imported_at,
            records,
            diagnostics,
        )
    }

    /// 由可信记录直接构造报告（演示同步路径，跳过解析）
    ///
    /// 任一记录不满足行校验条件时整体拒绝，不产出报告
    pub fn from_trusted_records(
        report_id: impl Into<String>,
        source_name: &str,
        imported_at: DateTime<Utc>,
        records: Vec<ScheduleRecord>,
    ) -> ImportResult<ImportReport> {
        if let Some(bad) = records.iter().find(|r| !record_passes_validation(r)) {
            return Err(ImportError::InvalidTrustedRecord(bad.id.clone()));
        }
        Ok(ImportReport::new(
            report_id,
            source_name,
            imported_at,
            records,
            Vec::new(),
        ))
    }
}

/// 记录是否满足行校验的成功条件（必填字段非空；状态由类型保证）
pub fn record_passes_validation(record: &ScheduleRecord) -> bool {
    record.has_required_fields()
}
