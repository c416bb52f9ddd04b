// ==========================================
// 排班导入流程集成测试
// ==========================================
// 测试目标: 文件获取 → 行解析 → 校验 → 汇总
// ==========================================

mod test_helpers;

use schedule_sync::domain::ScheduleStatus;
use schedule_sync::importer::{
    record_passes_validation, FilePayloadSource, FixedDemoRecords, ImportAggregator, ImportError,
    LineParser, RowValidatorImpl, ScheduleImporter, ScheduleImporterImpl,
};
use schedule_sync::logging;
use tempfile::TempDir;
use test_helpers::{create_test_importer, csv_with_rows, write_csv};

#[tokio::test]
async fn test_import_concrete_scenario_from_file() {
    logging::init_test();

    let dir = TempDir::new().unwrap();
    let content = "userId,date,startTime,endTime,activity,status\n\
                   1,2025-01-10,08:00,16:00,Backend,active\n\
                   2,2025-01-10,09:00,17:00,Design,pending\n\
                   ,2025-01-10,10:00,18:00,Marketing,active\n\
                   3,2025-01-10,11:00,19:00,Sales,unknown\n";
    let path = write_csv(&dir, "horarios.csv", content);

    let report = create_test_importer().import_from_source(&path).await.unwrap();

    assert_eq!(report.source_name(), "horarios.csv");
    assert_eq!(report.total_rows(), 4);
    assert_eq!(report.success_count(), 2);
    assert_eq!(
        report.diagnostics(),
        &[
            "Line 4: missing required field(s)".to_string(),
            "Line 5: invalid status \"unknown\"".to_string(),
        ]
    );

    let records = report.records();
    assert_eq!(records[0].owner_id, "1");
    assert_eq!(records[0].activity, "Backend");
    assert_eq!(records[0].status, ScheduleStatus::Active);
    assert_eq!(records[1].owner_id, "2");
    assert_eq!(records[1].status, ScheduleStatus::Pending);
    assert_ne!(records[0].id, records[1].id);
}

#[tokio::test]
async fn test_header_only_payload() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, "vacio.csv", &csv_with_rows(&[]));

    let report = create_test_importer().import_from_source(&path).await.unwrap();

    assert_eq!(report.total_rows(), 0);
    assert!(report.records().is_empty());
    assert!(report.diagnostics().is_empty());
}

#[test]
fn test_five_token_row_is_one_arity_diagnostic() {
    let text = csv_with_rows(&["1,2025-01-10,08:00,16:00,Backend"]);
    let report = create_test_importer().import_from_text(&text, "a.csv");

    assert_eq!(report.total_rows(), 1);
    assert_eq!(report.success_count(), 0);
    assert_eq!(
        report.diagnostics(),
        &["Line 2: wrong column count, expected 6".to_string()]
    );
}

#[test]
fn test_status_not_in_enum_is_rejected() {
    let text = csv_with_rows(&[
        "1,2025-01-10,08:00,16:00,Backend,done",
        "1,2025-01-10,08:00,16:00,Backend,Active",
        "1,2025-01-10,08:00,16:00,Backend,completed",
    ]);
    let report = create_test_importer().import_from_text(&text, "a.csv");

    assert_eq!(report.total_rows(), 3);
    assert_eq!(report.success_count(), 1);
    assert_eq!(report.diagnostics()[0], "Line 2: invalid status \"done\"");
    assert_eq!(report.diagnostics()[1], "Line 3: invalid status \"Active\"");
    assert_eq!(report.records()[0].status, ScheduleStatus::Completed);
}

#[test]
fn test_first_failure_wins() {
    // 列数错误优先于缺字段与非法状态
    let text = csv_with_rows(&[",,,,,,", ",2025-01-10,08:00,16:00,Backend,nope"]);
    let report = create_test_importer().import_from_text(&text, "a.csv");

    assert_eq!(
        report.diagnostics(),
        &[
            "Line 2: wrong column count, expected 6".to_string(),
            "Line 3: missing required field(s)".to_string(),
        ]
    );
}

#[test]
fn test_quotes_are_literal_and_commas_always_split() {
    let text = csv_with_rows(&[
        "1,2025-01-10,08:00,16:00,\"Backend, API\",active",
        "1,2025-01-10,08:00,16:00,\"Backend\",active",
    ]);
    let report = create_test_importer().import_from_text(&text, "a.csv");

    assert_eq!(report.diagnostics(), &["Line 2: wrong column count, expected 6".to_string()]);
    assert_eq!(report.records()[0].activity, "\"Backend\"");
}

#[test]
fn test_blank_lines_and_whitespace_tokens() {
    let text = "\n  \nownerId,date,startTime,endTime,activity,status\n\n 1 , 2025-01-10 ,08:00, 16:00 , Backend ,active \n\r\n2,2025-01-10,08:00,16:00,Design,bad\n";
    let report = create_test_importer().import_from_text(text, "a.csv");

    assert_eq!(report.total_rows(), 2);
    assert_eq!(report.records()[0].owner_id, "1");
    assert_eq!(report.records()[0].activity, "Backend");
    // 空行不参与行号
    assert_eq!(report.diagnostics(), &["Line 3: invalid status \"bad\"".to_string()]);
}

#[test]
fn test_report_invariants_hold_for_mixed_payload() {
    let text = csv_with_rows(&[
        "1,2025-01-10,08:00,16:00,Backend,active",
        "garbage",
        "2,,08:00,16:00,Design,pending",
        "3,2025-01-10,08:00,16:00,Sales,completed",
        "4,2025-01-10,08:00,16:00,,active",
        "5,2025-01-10,08:00,16:00,Ops,ACTIVE",
        "6,2025-01-10,08:00,16:00,Ops,pending,extra",
    ]);
    let report = create_test_importer().import_from_text(&text, "mixto.csv");

    assert_eq!(
        report.total_rows(),
        report.success_count() + report.diagnostics().len()
    );
    assert_eq!(report.total_rows(), 7);
    assert_eq!(report.success_count(), 2);
    assert!(report.records().iter().all(record_passes_validation));
}

#[tokio::test]
async fn test_acquisition_failures_produce_no_report() {
    let dir = TempDir::new().unwrap();
    let importer = create_test_importer();

    let missing = dir.path().join("no_existe.csv");
    assert!(matches!(
        importer.import_from_source(&missing).await,
        Err(ImportError::FileNotFound(_))
    ));

    let xlsx = write_csv(&dir, "horarios.xlsx", &csv_with_rows(&[]));
    assert!(matches!(
        importer.import_from_source(&xlsx).await,
        Err(ImportError::UnsupportedFormat(_, _))
    ));
}

#[tokio::test]
async fn test_payload_size_limit() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "grande.csv",
        &csv_with_rows(&["1,2025-01-10,08:00,16:00,Backend,active"]),
    );

    let importer = ScheduleImporterImpl::new(
        FilePayloadSource::new(vec!["csv".to_string()], 16),
        LineParser::default(),
        ImportAggregator::new(Box::new(RowValidatorImpl)),
        Box::new(FixedDemoRecords::default()),
    );

    assert!(matches!(
        importer.import_from_source(&path).await,
        Err(ImportError::PayloadTooLarge { limit: 16, .. })
    ));
}

#[tokio::test]
async fn test_batch_import_keeps_failures_independent() {
    let dir = TempDir::new().unwrap();
    let a = write_csv(&dir, "a.csv", &csv_with_rows(&["1,2025-01-10,08:00,16:00,Backend,active"]));
    let b = write_csv(&dir, "b.csv", &csv_with_rows(&["2,2025-01-10,08:00,16:00,Design,oops"]));
    let missing = dir.path().join("c.csv");

    let results = create_test_importer().batch_import(vec![a, missing, b]).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().success_count(), 1);
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().failure_count(), 1);
}

#[test]
fn test_demo_path_satisfies_report_invariants() {
    let report = create_test_importer().import_demo().unwrap();

    assert_eq!(report.total_rows(), report.success_count() + report.diagnostics().len());
    assert_eq!(report.success_count(), 3);
    assert!(report.records().iter().all(record_passes_validation));
    assert!(report.records().iter().all(|r| r.id.starts_with("demo_")));
}
