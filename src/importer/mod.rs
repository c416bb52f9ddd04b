// ==========================================
// 排班导入系统 - 导入层
// ==========================================
// 职责: 外部排班数据导入，生成导入报告
// 支持: 逗号分隔文本（固定 6 列，无引号/转义）
// 红线: 单行错误只产出诊断，绝不升级为整次导入失败
// ==========================================

// 模块声明
pub mod demo;
pub mod error;
pub mod import_aggregator;
pub mod line_parser;
pub mod payload_source;
pub mod row_validator;
pub mod schedule_importer_impl;
pub mod schedule_importer_trait;

// 重导出核心类型
pub use demo::FixedDemoRecords;
pub use error::{ImportError, ImportResult};
pub use import_aggregator::{record_passes_validation, ImportAggregator};
pub use line_parser::LineParser;
pub use payload_source::FilePayloadSource;
pub use row_validator::{RowRejection, RowValidator as RowValidatorImpl};
pub use schedule_importer_impl::ScheduleImporterImpl;

// 重导出 Trait 接口
pub use schedule_importer_trait::{
    DemoRecordSource, Payload, PayloadSource, RowValidator, ScheduleImporter,
};
