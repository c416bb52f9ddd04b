// ==========================================
// 排班导入系统 - 演示数据
// ==========================================
// 用途: 演示同步按钮使用的固定记录集，绕过解析/校验
// ==========================================

use crate::domain::schedule::ScheduleRecord;
use crate::domain::types::ScheduleStatus;
use crate::importer::schedule_importer_trait::DemoRecordSource;

/// 演示导入的默认来源名
pub const DEFAULT_DEMO_SOURCE_NAME: &str = "horarios_demo.csv";

// ==========================================
// FixedDemoRecords - 固定演示记录
// ==========================================
pub struct FixedDemoRecords {
    source_name: String,
}

impl Default for FixedDemoRecords {
    fn default() -> Self {
        Self::new(DEFAULT_DEMO_SOURCE_NAME)
    }
}

impl FixedDemoRecords {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }
}

fn demo_record(
    n: usize,
    owner_id: &str,
    start_time: &str,
    end_time: &str,
    activity: &str,
    status: ScheduleStatus,
) -> ScheduleRecord {
    ScheduleRecord {
        id: format!("demo_{}", n),
        owner_id: owner_id.to_string(),
        date: "2025-01-10".to_string(),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        activity: activity.to_string(),
        status,
    }
}

impl DemoRecordSource for FixedDemoRecords {
    fn source_name(&self) -> String {
        self.source_name.clone()
    }

    fn demo_records(&self) -> Vec<ScheduleRecord> {
        vec![
            demo_record(1, "1", "08:00", "16:00", "Desarrollo Backend", ScheduleStatus::Active),
            demo_record(2, "2", "09:00", "17:00", "Revisión de diseños", ScheduleStatus::Pending),
            demo_record(3, "3", "10:00", "18:00", "Análisis de mercado", ScheduleStatus::Active),
        ]
    }
}
