// ==========================================
// 排班导入系统 - 应用层
// ==========================================
// 职责: 组装各层，持有负责人集合
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, seed_demo_owners, AppState};
