// ==========================================
// 排班导入系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod import;
pub mod owner;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use import::{ExportSummary, ImportHistorySummary, ImportReport, ImportReportExport};
pub use owner::Owner;
pub use schedule::{ParsedRow, ScheduleRecord, SCHEDULE_COLUMN_COUNT};
pub use types::{InvalidStatus, ScheduleStatus};
