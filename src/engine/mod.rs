// ==========================================
// 排班导入系统 - 引擎层
// ==========================================
// 职责: 合并与统计规则，不拼 SQL
// 红线: Engine 不直接写库，只计算
// ==========================================

pub mod dashboard;
pub mod merge;

// 重导出核心引擎
pub use dashboard::{DashboardEngine, DirectoryStats};
pub use merge::{MergeEngine, MergeOutcome, MergeSummary};
