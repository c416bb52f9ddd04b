// ==========================================
// 排班导入系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行/前端调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod import_api;

// 重导出核心类型
pub use dashboard_api::DashboardApi;
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, ImportApiResponse, ReportExportResponse};
