// ==========================================
// 排班导入系统 - 负责人（用户/部门）领域模型
// ==========================================
// 红线: 合并只追加，不删除、不重排已有排班
// ==========================================

use crate::domain::schedule::ScheduleRecord;
use serde::{Deserialize, Serialize};

// ==========================================
// Owner - 排班负责人
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub schedules: Vec<ScheduleRecord>, // 有序，合并时在尾部追加
}

impl Owner {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            department: department.into(),
            schedules: Vec::new(),
        }
    }

    /// 附带初始排班
    pub fn with_schedules(mut self, schedules: Vec<ScheduleRecord>) -> Self {
        self.schedules = schedules;
        self
    }

    /// 进行中的排班数量
    pub fn active_schedule_count(&self) -> usize {
        self.schedules.iter().filter(|s| s.is_active()).count()
    }
}
