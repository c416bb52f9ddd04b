// ==========================================
// 排班导入系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 管理后台排班数据导入（解析 → 校验 → 汇总 → 合并）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 导入历史
pub mod repository;

// 引擎层 - 合并与统计
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::ScheduleStatus;

// 领域实体
pub use domain::{ImportReport, ImportReportExport, Owner, ParsedRow, ScheduleRecord};

// 导入
pub use importer::{ImportAggregator, LineParser, ScheduleImporter, ScheduleImporterImpl};

// 引擎
pub use engine::{DashboardEngine, MergeEngine, MergeOutcome};

// API
pub use api::{DashboardApi, ImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "schedule-sync";
