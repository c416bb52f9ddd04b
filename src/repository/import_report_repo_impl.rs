// ==========================================
// 排班导入系统 - 导入历史 Repository 实现
// ==========================================
// 职责: 实现导入报告历史数据访问（使用 rusqlite）
// 存储: import_report 表，report_json 保存完整报告
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::import::ImportReport;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::import_report_repo::ImportReportRepository;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ImportReportRepositoryImpl
// ==========================================
pub struct ImportReportRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ImportReportRepositoryImpl {
    /// 创建新的 Repository 实例（自动建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（调用方负责建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn decode(report_id: &str, json: &str) -> RepositoryResult<ImportReport> {
        serde_json::from_str(json).map_err(|e| RepositoryError::CorruptRecord {
            id: report_id.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ImportReportRepository for ImportReportRepositoryImpl {
    async fn append(&self, report: &ImportReport) -> RepositoryResult<()> {
        let report_json = serde_json::to_string(report)?;
        let conn = self.lock()?;

        conn.execute(
            r#"
            INSERT INTO import_report (
                report_id, source_name, imported_at,
                total_rows, success_count, error_count, report_json
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                report.id(),
                report.source_name(),
                report.imported_at().to_rfc3339(),
                report.total_rows() as i64,
                report.success_count() as i64,
                report.failure_count() as i64,
                report_json,
            ],
        )?;

        tracing::debug!(report_id = %report.id(), "导入报告已写入历史");
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ImportReport>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT report_id, report_json FROM import_report ORDER BY seq DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut reports = Vec::new();
        for row in rows {
            let (report_id, json) = row?;
            reports.push(Self::decode(&report_id, &json)?);
        }
        Ok(reports)
    }

    async fn find_by_id(&self, report_id: &str) -> RepositoryResult<Option<ImportReport>> {
        let conn = self.lock()?;
        let json: Option<String> = conn
            .query_row(
                "SELECT report_json FROM import_report WHERE report_id = ?1",
                params![report_id],
                |row| row.get(0),
            )
            .optional()?;

        json.map(|j| Self::decode(report_id, &j)).transpose()
    }

    async fn count(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM import_report", [], |row| row.get(0))?;
        Ok(n as usize)
    }
}
