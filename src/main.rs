// ==========================================
// 排班导入系统 - 命令行入口
// ==========================================
// 用法: schedule-sync <csv_path> [db_path]
// 流程: 加载演示负责人 → 导入 → 入历史 → 合并 → 输出审计文档
// 输出: stdout 为审计 JSON，摘要与日志写到 stderr
// ==========================================

use anyhow::{anyhow, Context};
use schedule_sync::app::{get_default_db_path, seed_demo_owners, AppState};
use schedule_sync::i18n::{self, t, t_with_args};
use schedule_sync::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(csv_path) = args.next() else {
        eprintln!("{}", t("cli.usage"));
        std::process::exit(2);
    };
    let db_path = args
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(get_default_db_path);

    tracing::info!("==================================================");
    tracing::info!("{} {}", schedule_sync::APP_NAME, schedule_sync::VERSION);
    tracing::info!("使用数据库: {}", db_path);
    tracing::info!("==================================================");

    let state = AppState::new(db_path, seed_demo_owners())
        .await
        .map_err(|e| anyhow!(e))?;
    i18n::set_locale(&state.ui_locale);

    let response = match state.import_api.import_file(&csv_path).await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", t_with_args("cli.import_failed", &[("error", e.to_string().as_str())]));
            std::process::exit(1);
        }
    };

    let export = state
        .import_api
        .export_report(response.report.id())
        .await
        .context("导出审计文档失败")?;
    println!("{}", serde_json::to_string_pretty(&export.document)?);

    let report = &response.report;
    eprintln!();
    eprintln!("{}", t("cli.summary_title"));
    eprintln!("  {}", t_with_args("cli.source", &[("name", report.source_name())]));
    for (key, count) in [
        ("cli.total_rows", report.total_rows()),
        ("cli.successful", report.success_count()),
        ("cli.errors", report.failure_count()),
        ("cli.appended", response.merge.appended),
        ("cli.unmatched", response.merge.unmatched_records),
    ] {
        eprintln!("  {}", t_with_args(key, &[("count", count.to_string().as_str())]));
    }
    for diagnostic in report.diagnostics() {
        eprintln!("    - {}", diagnostic);
    }
    eprintln!("  {}", t_with_args("cli.export_file", &[("name", export.file_name.as_str())]));

    Ok(())
}
