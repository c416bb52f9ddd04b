// ==========================================
// 排班导入系统 - 看板统计引擎
// ==========================================
// 职责: 负责人集合统计、检索，导入历史汇总
// 红线: 只读计算，不修改负责人集合与历史
// ==========================================

use crate::domain::import::{ImportHistorySummary, ImportReport};
use crate::domain::owner::Owner;
use serde::Serialize;
use std::collections::BTreeSet;

// ==========================================
// DirectoryStats - 负责人集合统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    pub total_owners: usize,
    pub total_schedules: usize,
    pub active_schedules: usize,
    pub departments: usize, // 不同部门数
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardEngine;

impl DashboardEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn directory_stats(&self, owners: &[Owner]) -> DirectoryStats {
        let departments: BTreeSet<&str> = owners.iter().map(|o| o.department.as_str()).collect();

        DirectoryStats {
            total_owners: owners.len(),
            total_schedules: owners.iter().map(|o| o.schedules.len()).sum(),
            active_schedules: owners.iter().map(Owner::active_schedule_count).sum(),
            departments: departments.len(),
        }
    }

    /// 按姓名/邮箱/部门模糊检索（不区分大小写，空串返回全部）
    pub fn search_owners<'a>(&self, owners: &'a [Owner], term: &str) -> Vec<&'a Owner> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return owners.iter().collect();
        }

        owners
            .iter()
            .filter(|o| {
                o.name.to_lowercase().contains(&needle)
                    || o.email.to_lowercase().contains(&needle)
                    || o.department.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn history_summary(&self, reports: &[ImportReport]) -> ImportHistorySummary {
        reports
            .iter()
            .fold(ImportHistorySummary::default(), |mut acc, r| {
                acc.total_imports += 1;
                acc.imported_records += r.success_count();
                acc.error_count += r.failure_count();
                acc
            })
    }
}
