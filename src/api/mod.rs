// ==========================================
// ConnectCRM 数据导入服务 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供宿主应用与导入会话调用
// ==========================================

pub mod error;
pub mod import_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use import_api::{ImportApi, LocalImportGateway};

// TODO: 添加单条创建接口（POST /api/contacts 的等价物）
