// ==========================================
// 排班导入系统 - 领域类型定义
// ==========================================
// 职责: 封闭枚举，导入边界处将不可信文本转换为类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 排班状态 (Schedule Status)
// ==========================================
// 红线: 大小写敏感，不做任何标准化
// 序列化格式: lowercase（与导入文件一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Active,    // 进行中
    Pending,   // 待定
    Completed, // 已完成
}

impl ScheduleStatus {
    /// 全部合法取值（按导入文件约定的顺序）
    pub const ALL: [ScheduleStatus; 3] = [
        ScheduleStatus::Active,
        ScheduleStatus::Pending,
        ScheduleStatus::Completed,
    ];

    /// 导入文件中的原始写法
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Active => "active",
            ScheduleStatus::Pending => "pending",
            ScheduleStatus::Completed => "completed",
        }
    }

    /// 当前语言下的展示名称
    pub fn label(&self) -> String {
        crate::i18n::t(&format!("status.{}", self.as_str()))
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 非法状态值（携带原始文本，用于诊断信息）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status \"{}\"", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

impl FromStr for ScheduleStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ScheduleStatus::Active),
            "pending" => Ok(ScheduleStatus::Pending),
            "completed" => Ok(ScheduleStatus::Completed),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}
