// ==========================================
// ConnectCRM 数据导入服务 - 应用层
// ==========================================
// 职责: 组装仓储/API/会话，供宿主程序使用
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
