// ==========================================
// 排班导入系统 - 排班记录领域模型
// ==========================================
// 红线: 系统中存在的每条 ScheduleRecord 都已通过行校验
// 生命周期: 创建后不可变，仅随整个负责人集合/导入历史一起丢弃
// ==========================================

use crate::domain::types::ScheduleStatus;
use serde::{Deserialize, Serialize};

/// 导入文件的列数（ownerId, date, startTime, endTime, activity, status）
pub const SCHEDULE_COLUMN_COUNT: usize = 6;

// ==========================================
// ScheduleRecord - 排班记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub id: String,             // 导入时生成，不来自输入
    pub owner_id: String,       // 负责人 ID（解析阶段不校验存在性）
    pub date: String,           // 日期（原样保留，不做合法性校验）
    pub start_time: String,     // 开始时间（原样保留）
    pub end_time: String,       // 结束时间（不校验与开始时间的先后）
    pub activity: String,       // 活动名称，非空
    pub status: ScheduleStatus, // 已校验的状态
}

impl ScheduleRecord {
    /// 是否处于进行中状态
    pub fn is_active(&self) -> bool {
        self.status == ScheduleStatus::Active
    }

    /// 必填字段是否全部非空（状态由类型保证）
    pub fn has_required_fields(&self) -> bool {
        [
            &self.owner_id,
            &self.date,
            &self.start_time,
            &self.end_time,
            &self.activity,
        ]
        .iter()
        .all(|v| !v.trim().is_empty())
    }
}

// ==========================================
// ParsedRow - 行解析中间产物
// ==========================================
// 用途: 行解析器 → 行校验器
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    pub line_number: usize,  // 1 起始，含表头，空白行不计数
    pub tokens: Vec<String>, // 已去除首尾空白的字段
}

impl ParsedRow {
    pub fn new(line_number: usize, tokens: Vec<String>) -> Self {
        Self {
            line_number,
            tokens,
        }
    }
}
