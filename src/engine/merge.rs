// ==========================================
// 排班导入系统 - 合并引擎
// ==========================================
// 职责: 将导入报告中的记录按 ownerId 追加到负责人集合
// 红线: 只追加，不删除、不重排已有记录
// 规则:
// - 记录按 ownerId 分组，组内保持报告顺序
// - ownerId 不在集合中的记录不进入负责人视图，也不创建新负责人
//   （记录仍保留在报告自身的 records 中，供审计）
// - 同一报告重复合并会重复追加（不按 ID 去重）
// ==========================================

use crate::domain::import::ImportReport;
use crate::domain::owner::Owner;
use crate::domain::schedule::ScheduleRecord;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument, warn};

// ==========================================
// MergeSummary - 合并统计（仅供调用方参考，不产生诊断）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    pub appended: usize,                  // 追加到负责人的记录数
    pub unmatched_records: usize,         // 未匹配负责人的记录数
    pub unmatched_owner_ids: Vec<String>, // 未匹配的 ownerId（去重，首次出现顺序）
}

// ==========================================
// MergeOutcome - 合并结果
// ==========================================
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub owners: Vec<Owner>,
    pub summary: MergeSummary,
}

// ==========================================
// MergeEngine - 合并引擎
// ==========================================
// 红线: 不直接写库,只计算
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeEngine;

impl MergeEngine {
    pub fn new() -> Self {
        Self
    }

    /// 纯函数合并：当前集合 × 报告 → 新集合
    pub fn merge(&self, owners: &[Owner], report: &ImportReport) -> MergeOutcome {
        let mut updated = owners.to_vec();
        let summary = self.merge_into(&mut updated, report);
        MergeOutcome {
            owners: updated,
            summary,
        }
    }

    /// 原地合并（调用方持有集合时使用）
    ///
    /// 调用方需保证合并期间没有其他对同一集合的修改
    #[instrument(skip(self, owners, report), fields(report_id = %report.id()))]
    pub fn merge_into(&self, owners: &mut [Owner], report: &ImportReport) -> MergeSummary {
        let partition = partition_by_owner(report.records());

        let mut appended = 0;
        for owner in owners.iter_mut() {
            if let Some(records) = partition.get(owner.id.as_str()) {
                owner.schedules.extend(records.iter().map(|r| (*r).clone()));
                appended += records.len();
            }
        }

        let known: HashSet<&str> = owners.iter().map(|o| o.id.as_str()).collect();
        let mut seen = HashSet::new();
        let mut unmatched_owner_ids = Vec::new();
        let mut unmatched_records = 0;
        for record in report.records() {
            if !known.contains(record.owner_id.as_str()) {
                unmatched_records += 1;
                if seen.insert(record.owner_id.as_str()) {
                    unmatched_owner_ids.push(record.owner_id.clone());
                }
            }
        }

        if unmatched_records > 0 {
            warn!(
                unmatched = unmatched_records,
                owner_ids = ?unmatched_owner_ids,
                "部分记录的负责人不存在，未进入负责人视图（仅保留在导入报告中）"
            );
        }
        info!(appended, unmatched = unmatched_records, "合并完成");

        MergeSummary {
            appended,
            unmatched_records,
            unmatched_owner_ids,
        }
    }
}

/// 按 ownerId 分组，组内保持原顺序
fn partition_by_owner(records: &[ScheduleRecord]) -> HashMap<&str, Vec<&ScheduleRecord>> {
    let mut groups: HashMap<&str, Vec<&ScheduleRecord>> = HashMap::new();
    for record in records {
        groups.entry(record.owner_id.as_str()).or_default().push(record);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ScheduleStatus;
    use chrono::Utc;

    fn record(id: &str, owner: &str) -> ScheduleRecord {
        ScheduleRecord {
            id: id.to_string(),
            owner_id: owner.to_string(),
            date: "2025-01-10".to_string(),
            start_time: "08:00".to_string(),
            end_time: "16:00".to_string(),
            activity: format!("activity {}", id),
            status: ScheduleStatus::Pending,
        }
    }

    fn owner(id: &str, existing: &[&str]) -> Owner {
        Owner::new(id, format!("Owner {}", id), format!("{}@empresa.com", id), "Desarrollo")
            .with_schedules(existing.iter().map(|e| record(e, id)).collect())
    }

    fn report(records: Vec<ScheduleRecord>) -> ImportReport {
        ImportReport::new("r1", "test.csv", Utc::now(), records, vec![])
    }

    #[test]
    fn test_appends_in_report_order_after_existing() {
        let owners = vec![owner("A", &["s1", "s2"])];
        let rep = report(vec![record("n1", "A"), record("n2", "A")]);

        let outcome = MergeEngine::new().merge(&owners, &rep);
        let ids: Vec<&str> = outcome.owners[0]
            .schedules
            .iter()
            .map(|s| s.id.as_str())
            .collect();

        assert_eq!(ids, vec!["s1", "s2", "n1", "n2"]);
        assert_eq!(outcome.summary.appended, 2);
    }

    #[test]
    fn test_unmatched_owner_dropped_silently() {
        let owners = vec![owner("A", &["s1"])];
        let rep = report(vec![
            record("n1", "A"),
            record("z1", "Z"),
            record("n2", "A"),
            record("z2", "Z"),
        ]);

        let outcome = MergeEngine::new().merge(&owners, &rep);

        assert_eq!(outcome.owners.len(), 1);
        assert_eq!(outcome.owners[0].schedules.len(), 3);
        assert!(outcome.owners.iter().all(|o| o.id != "Z"));
        assert_eq!(outcome.summary.unmatched_records, 2);
        assert_eq!(outcome.summary.unmatched_owner_ids, vec!["Z".to_string()]);
        // 报告本身不变，Z 的记录仍在
        assert_eq!(rep.records().iter().filter(|r| r.owner_id == "Z").count(), 2);
        assert!(rep.diagnostics().is_empty());
    }

    #[test]
    fn test_input_collection_untouched() {
        let owners = vec![owner("A", &["s1"])];
        let rep = report(vec![record("n1", "A")]);

        let _ = MergeEngine::new().merge(&owners, &rep);
        assert_eq!(owners[0].schedules.len(), 1);
    }

    #[test]
    fn test_remerge_duplicates_records() {
        let mut owners = vec![owner("A", &[]), owner("B", &["b0"])];
        let rep = report(vec![record("n1", "A"), record("n2", "B")]);
        let engine = MergeEngine::new();

        engine.merge_into(&mut owners, &rep);
        engine.merge_into(&mut owners, &rep);

        let a_ids: Vec<&str> = owners[0].schedules.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(a_ids, vec!["n1", "n1"]);
        assert_eq!(owners[1].schedules.len(), 3);
    }

    #[test]
    fn test_owner_order_and_untouched_owners_preserved() {
        let owners = vec![owner("C", &["c0"]), owner("A", &[]), owner("B", &["b0"])];
        let rep = report(vec![record("n1", "A")]);

        let outcome = MergeEngine::new().merge(&owners, &rep);
        let order: Vec<&str> = outcome.owners.iter().map(|o| o.id.as_str()).collect();

        assert_eq!(order, vec!["C", "A", "B"]);
        assert_eq!(outcome.owners[0], owners[0]);
        assert_eq!(outcome.owners[2], owners[2]);
    }

    #[test]
    fn test_empty_report_is_noop() {
        let owners = vec![owner("A", &["s1"])];
        let outcome = MergeEngine::new().merge(&owners, &report(vec![]));
        assert_eq!(outcome.owners, owners);
        assert_eq!(outcome.summary, MergeSummary::default());
    }
}
