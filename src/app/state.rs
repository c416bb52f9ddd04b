// ==========================================
// 排班导入系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 负责人集合由调用方显式持有，不使用全局单例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{DashboardApi, ImportApi};
use crate::config::{ConfigManager, ImportConfigReader};
use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::owner::Owner;
use crate::domain::schedule::ScheduleRecord;
use crate::domain::types::ScheduleStatus;
use crate::importer::{
    FilePayloadSource, FixedDemoRecords, ImportAggregator, LineParser, RowValidatorImpl,
    ScheduleImporterImpl,
};
use crate::repository::ImportReportRepositoryImpl;

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 负责人集合（合并目标，ImportApi 与 DashboardApi 共享）
    pub owners: Arc<Mutex<Vec<Owner>>>,

    /// 界面语言（来自 ui/locale 配置）
    pub ui_locale: String,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 排班导入API
    pub import_api: Arc<ImportApi>,

    /// 看板API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - owners: 初始负责人集合
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并建表
    /// 2. 从配置构造文件读取器与演示数据源
    /// 3. 创建所有API实例
    pub async fn new(db_path: String, owners: Vec<Owner>) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("数据库初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 配置
        // ==========================================
        let config_manager = Arc::new(ConfigManager::from_connection(conn.clone()));

        let payload_source = FilePayloadSource::from_config(config_manager.as_ref())
            .await
            .map_err(|e| format!("导入配置无效: {}", e))?;
        let demo_source_name = config_manager
            .get_demo_source_name()
            .await
            .map_err(|e| format!("演示数据配置无效: {}", e))?;
        let ui_locale = config_manager
            .get_ui_locale()
            .await
            .map_err(|e| format!("界面语言配置无效: {}", e))?;

        // ==========================================
        // 导入器与仓储
        // ==========================================
        let importer = ScheduleImporterImpl::new(
            payload_source,
            LineParser::default(),
            ImportAggregator::new(Box::new(RowValidatorImpl)),
            Box::new(FixedDemoRecords::new(demo_source_name)),
        );
        let report_repo = Arc::new(ImportReportRepositoryImpl::from_connection(conn));

        let owners = Arc::new(Mutex::new(owners));

        let import_api = Arc::new(ImportApi::new(importer, report_repo.clone(), owners.clone()));
        let dashboard_api = Arc::new(DashboardApi::new(owners.clone(), report_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            owners,
            ui_locale,
            config_manager,
            import_api,
            dashboard_api,
        })
    }
}

// ==========================================
// 演示负责人集合（管理台初始数据）
// ==========================================

fn seed_record(
    id: &str,
    owner_id: &str,
    date: &str,
    start_time: &str,
    end_time: &str,
    activity: &str,
    status: ScheduleStatus,
) -> ScheduleRecord {
    ScheduleRecord {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        date: date.to_string(),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
        activity: activity.to_string(),
        status,
    }
}

/// 三位负责人及其初始排班（演示数据中的 ownerId 1/2/3 均可匹配）
pub fn seed_demo_owners() -> Vec<Owner> {
    vec![
        Owner::new("1", "Juan Pérez", "juan@empresa.com", "Desarrollo").with_schedules(vec![
            seed_record("s1", "1", "2025-01-08", "09:00", "17:00", "Desarrollo Frontend", ScheduleStatus::Active),
            seed_record("s2", "1", "2025-01-09", "09:30", "17:30", "Reunión de equipo", ScheduleStatus::Pending),
        ]),
        Owner::new("2", "María García", "maria@empresa.com", "Diseño").with_schedules(vec![
            seed_record("s3", "2", "2025-01-08", "08:30", "16:30", "Diseño UI/UX", ScheduleStatus::Completed),
        ]),
        Owner::new("3", "Carlos López", "carlos@empresa.com", "Marketing").with_schedules(vec![
            seed_record("s4", "3", "2025-01-08", "10:00", "18:00", "Campaña publicitaria", ScheduleStatus::Active),
        ]),
    ]
}

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 SCHEDULE_SYNC_DB_PATH（非空时）
/// - 否则: 用户数据目录/schedule-sync/schedule_sync.db
/// - 取不到数据目录时: ./schedule_sync.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("SCHEDULE_SYNC_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./schedule_sync.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("schedule-sync");
        // 目录创建失败时保留当前目录回退值
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("schedule_sync.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_seed_demo_owners() {
        let owners = seed_demo_owners();
        assert_eq!(owners.len(), 3);
        assert_eq!(owners.iter().map(|o| o.schedules.len()).sum::<usize>(), 4);
        assert!(owners
            .iter()
            .all(|o| o.schedules.iter().all(|s| s.owner_id == o.id)));
    }

    #[tokio::test]
    async fn test_app_state_with_fresh_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("state.db").to_string_lossy().to_string();

        let state = AppState::new(db_path, seed_demo_owners()).await.unwrap();
        assert_eq!(state.ui_locale, "es");

        let response = state.import_api.import_demo().await.unwrap();
        assert_eq!(response.merge.appended, 3);

        let stats = state.dashboard_api.get_directory_stats().unwrap();
        assert_eq!(stats.total_schedules, 7);
    }
}
