// ==========================================
// 排班导入系统 - 排班导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 获取原始文本 → 行解析 → 行校验 → 汇总报告
// ==========================================

use crate::domain::import::ImportReport;
use crate::domain::schedule::{ParsedRow, ScheduleRecord};
use crate::importer::error::ImportResult;
use crate::importer::row_validator::RowRejection;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// ScheduleImporter Trait
// ==========================================
// 用途: 排班导入主接口
// 实现者: ScheduleImporterImpl
#[async_trait]
pub trait ScheduleImporter: Send + Sync {
    /// 从内存文本导入（纯转换，不会失败）
    ///
    /// # 参数
    /// - content: 原始分隔文本
    /// - source_name: 来源标签（通常为文件名）
    fn import_from_text(&self, content: &str, source_name: &str) -> ImportReport;

    /// 从文件导入
    ///
    /// # 返回
    /// - Ok(ImportReport): 即使所有行都失败也返回报告
    /// - Err: 原始数据获取失败（整次导入中止，不产出部分报告）
    ///
    /// # 导入流程
    /// 1. 获取原始文本（唯一的异步等待点）
    /// 2. 行解析
    /// 3. 逐行校验
    /// 4. 汇总报告
    async fn import_from_source<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportReport>;

    /// 演示同步：绕过解析，直接由固定记录构造报告
    ///
    /// # 返回
    /// - Err(InvalidTrustedRecord): 演示记录存在空的必填字段
    fn import_demo(&self) -> ImportResult<ImportReport>;

    /// 批量导入多个文件（并发获取原始文本）
    ///
    /// # 说明
    /// - 每个文件独立，某个文件失败不影响其他文件
    /// - 只产出报告，合并由调用方逐个串行执行
    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<Result<ImportReport, String>>;
}

// ==========================================
// PayloadSource Trait
// ==========================================
// 用途: 获取原始文本（阶段 0，外部协作方）
// 实现者: FilePayloadSource
#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// 读取原始文本
    ///
    /// # 返回
    /// - Ok(Payload): 来源标签 + 文本
    /// - Err: 文件不存在、格式不允许、过大、非 UTF-8 等
    async fn acquire(&self, path: &Path) -> ImportResult<Payload>;
}

/// 已获取的原始数据
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub source_name: String,
    pub content: String,
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 单行校验接口（阶段 2）
// 实现者: RowValidatorImpl
pub trait RowValidator: Send + Sync {
    /// 校验单行
    ///
    /// # 返回
    /// - Ok(ScheduleRecord): 通过校验，已生成新 ID
    /// - Err(RowRejection): 首个失败原因（Display 即诊断文本）
    fn validate_row(&self, row: &ParsedRow) -> Result<ScheduleRecord, RowRejection>;
}

// ==========================================
// DemoRecordSource Trait
// ==========================================
// 用途: 提供演示记录集（仅演示同步使用）
// 约束: 返回的记录必须满足行校验的全部成功条件
pub trait DemoRecordSource: Send + Sync {
    fn source_name(&self) -> String;

    fn demo_records(&self) -> Vec<ScheduleRecord>;
}
