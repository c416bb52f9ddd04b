// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、CSV 文件、负责人集合等
// ==========================================

#![allow(dead_code)]

use rusqlite::{params, Connection};
use schedule_sync::db::init_schema;
use schedule_sync::domain::{Owner, ScheduleRecord, ScheduleStatus};
use schedule_sync::importer::{
    FilePayloadSource, FixedDemoRecords, ImportAggregator, LineParser, RowValidatorImpl,
    ScheduleImporterImpl,
};
use std::error::Error;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

/// 标准 6 列表头
pub const HEADER: &str = "ownerId,date,startTime,endTime,activity,status";

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是 UTF-8")?
        .to_string();

    let conn = Connection::open(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 写入全局配置
pub fn insert_test_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

/// 在临时目录中写入 CSV 文件
pub fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("写入测试 CSV 失败");
    path
}

/// 拼接表头与数据行
pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

/// 默认配置的导入器
pub fn create_test_importer() -> ScheduleImporterImpl<FilePayloadSource> {
    ScheduleImporterImpl::new(
        FilePayloadSource::default(),
        LineParser::default(),
        ImportAggregator::new(Box::new(RowValidatorImpl)),
        Box::new(FixedDemoRecords::default()),
    )
}

pub fn schedule(id: &str, owner_id: &str, status: ScheduleStatus) -> ScheduleRecord {
    ScheduleRecord {
        id: id.to_string(),
        owner_id: owner_id.to_string(),
        date: "2025-01-08".to_string(),
        start_time: "09:00".to_string(),
        end_time: "17:00".to_string(),
        activity: format!("Actividad {}", id),
        status,
    }
}

/// 负责人 A（含两条已有排班）
pub fn owner_a() -> Owner {
    Owner::new("A", "Ana Torres", "ana@empresa.com", "Desarrollo").with_schedules(vec![
        schedule("a1", "A", ScheduleStatus::Active),
        schedule("a2", "A", ScheduleStatus::Pending),
    ])
}
