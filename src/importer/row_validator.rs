// ==========================================
// 排班导入系统 - 行校验器实现
// ==========================================
// 阶段 2: (行号, 字段列表) → ScheduleRecord | 诊断
// 校验顺序（首个失败即返回，后续检查不再执行）:
// 1. 列数必须为 6
// 2. ownerId/date/startTime/endTime/activity 非空
// 3. status ∈ {active, pending, completed}（大小写敏感）
// ==========================================

use crate::domain::schedule::{ParsedRow, ScheduleRecord, SCHEDULE_COLUMN_COUNT};
use crate::domain::types::{InvalidStatus, ScheduleStatus};
use crate::importer::schedule_importer_trait::RowValidator as RowValidatorTrait;
use thiserror::Error;
use uuid::Uuid;

/// 导入记录 ID 前缀
pub const IMPORTED_ID_PREFIX: &str = "imported";

// ==========================================
// RowRejection - 行拒绝原因
// ==========================================
// Display 输出即诊断文本
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowRejection {
    #[error("Line {line}: wrong column count, expected {}", SCHEDULE_COLUMN_COUNT)]
    WrongColumnCount { line: usize, found: usize },

    #[error("Line {line}: missing required field(s)")]
    MissingRequiredFields { line: usize },

    #[error("Line {line}: {status}")]
    InvalidStatus { line: usize, status: InvalidStatus },
}

impl RowRejection {
    pub fn line(&self) -> usize {
        match self {
            RowRejection::WrongColumnCount { line, .. }
            | RowRejection::MissingRequiredFields { line }
            | RowRejection::InvalidStatus { line, .. } => *line,
        }
    }
}

pub struct RowValidator;

impl RowValidator {
    fn next_record_id() -> String {
        format!("{}_{}", IMPORTED_ID_PREFIX, Uuid::new_v4())
    }
}

impl RowValidatorTrait for RowValidator {
    fn validate_row(&self, row: &ParsedRow) -> Result<ScheduleRecord, RowRejection> {
        let line = row.line_number;

        let [owner_id, date, start_time, end_time, activity, status] = match row.tokens.as_slice()
        {
            [a, b, c, d, e, f] => [a, b, c, d, e, f],
            other => {
                return Err(RowRejection::WrongColumnCount {
                    line,
                    found: other.len(),
                })
            }
        };

        // status 不在必填检查范围内，空值在枚举检查中被拒绝
        let required = [owner_id, date, start_time, end_time, activity];
        if required.iter().any(|v| v.trim().is_empty()) {
            return Err(RowRejection::MissingRequiredFields { line });
        }

        let status: ScheduleStatus = status
            .parse()
            .map_err(|status| RowRejection::InvalidStatus { line, status })?;

        Ok(ScheduleRecord {
            id: Self::next_record_id(),
            owner_id: owner_id.clone(),
            date: date.clone(),
            start_time: start_time.clone(),
            end_time: end_time.clone(),
            activity: activity.clone(),
            status,
        })
    }
}
