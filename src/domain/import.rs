// ==========================================
// 排班导入系统 - 导入报告领域模型
// ==========================================
// 红线: total_rows == success_count + diagnostics.len()
// 红线: 报告构造后即为终态，只追加进历史，不修改不删除
// ==========================================

use crate::domain::schedule::ScheduleRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// ImportReport - 导入报告
// ==========================================
// 字段私有: 计数由构造函数从记录/诊断推导，外部无法破坏不变量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawImportReport")]
pub struct ImportReport {
    id: String,
    source_name: String,
    imported_at: DateTime<Utc>,
    total_rows: usize,
    success_count: usize,
    diagnostics: Vec<String>,
    records: Vec<ScheduleRecord>,
}

impl ImportReport {
    /// 由记录与诊断构造报告（计数自动推导）
    pub fn new(
        id: impl Into<String>,
        source_name: impl Into<String>,
        imported_at: DateTime<Utc>,
        records: Vec<ScheduleRecord>,
        diagnostics: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_name: source_name.into(),
            imported_at,
            total_rows: records.len() + diagnostics.len(),
            success_count: records.len(),
            diagnostics,
            records,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn imported_at(&self) -> DateTime<Utc> {
        self.imported_at
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn failure_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn records(&self) -> &[ScheduleRecord] {
        &self.records
    }

    /// 是否存在被拒绝的行
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// 导出审计文档（纯读取，无独立逻辑）
    pub fn to_export(&self) -> ImportReportExport {
        ImportReportExport {
            file_name: self.source_name.clone(),
            import_date: self.imported_at,
            summary: ExportSummary {
                total_records: self.total_rows,
                successful: self.success_count,
                errors: self.diagnostics.len(),
            },
            schedules: self.records.clone(),
            errors: self.diagnostics.clone(),
        }
    }

    /// 审计文档下载文件名: reporte_<来源名>_<毫秒时间戳>.json
    pub fn export_file_name(&self, now: DateTime<Utc>) -> String {
        format!("reporte_{}_{}.json", self.source_name, now.timestamp_millis())
    }
}

// 反序列化中间结构（从历史库读取时校验不变量）
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawImportReport {
    id: String,
    source_name: String,
    imported_at: DateTime<Utc>,
    total_rows: usize,
    success_count: usize,
    diagnostics: Vec<String>,
    records: Vec<ScheduleRecord>,
}

/// 历史报告不满足不变量
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReport {
    /// 计数与内容不一致
    CountMismatch {
        total_rows: usize,
        success_count: usize,
        records: usize,
        diagnostics: usize,
    },
    /// 记录未满足行校验条件
    UnvalidatedRecord { record_id: String },
}

impl fmt::Display for InvalidReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReport::CountMismatch {
                total_rows,
                success_count,
                records,
                diagnostics,
            } => write!(
                f,
                "导入报告计数不一致: total_rows={}, success_count={}, records={}, diagnostics={}",
                total_rows, success_count, records, diagnostics
            ),
            InvalidReport::UnvalidatedRecord { record_id } => {
                write!(f, "导入报告包含必填字段为空的记录: id={}", record_id)
            }
        }
    }
}

impl TryFrom<RawImportReport> for ImportReport {
    type Error = InvalidReport;

    fn try_from(raw: RawImportReport) -> Result<Self, Self::Error> {
        if raw.success_count != raw.records.len()
            || raw.total_rows != raw.records.len() + raw.diagnostics.len()
        {
            return Err(InvalidReport::CountMismatch {
                total_rows: raw.total_rows,
                success_count: raw.success_count,
                records: raw.records.len(),
                diagnostics: raw.diagnostics.len(),
            });
        }

        if let Some(bad) = raw.records.iter().find(|r| !r.has_required_fields()) {
            return Err(InvalidReport::UnvalidatedRecord {
                record_id: bad.id.clone(),
            });
        }

        Ok(ImportReport::new(
            raw.id,
            raw.source_name,
            raw.imported_at,
            raw.records,
            raw.diagnostics,
        ))
    }
}

// ==========================================
// ImportReportExport - 审计导出文档
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReportExport {
    pub file_name: String,
    pub import_date: DateTime<Utc>,
    pub summary: ExportSummary,
    pub schedules: Vec<ScheduleRecord>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub total_records: usize,
    pub successful: usize,
    pub errors: usize,
}

// ==========================================
// ImportHistorySummary - 导入历史汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportHistorySummary {
    pub total_imports: usize,    // 导入次数
    pub imported_records: usize, // 累计成功记录
    pub error_count: usize,      // 累计诊断条数
}
