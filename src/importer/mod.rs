// ==========================================
// ConnectCRM 数据导入服务 - 导入层
// ==========================================
// 职责: CSV 解析、字段映射、行变换、批量写入与会话编排
// 流程: 上传 -> 映射 -> 预览 -> 提交
// ==========================================

// 模块声明
pub mod batch_ingestor;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod ports;
pub mod row_transformer;
pub mod session;

// 重导出核心类型
pub use batch_ingestor::BatchIngestor;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::CsvParser;
pub use row_transformer::RowTransformer;
pub use session::ImportSession;

// 重导出外设接口
pub use ports::{CacheInvalidator, CommitPort, LogNotifier, NoticeKind, Notifier, NoopCacheInvalidator};

// TODO: 支持 Excel 工作簿解析（UI 侧 accept 列表已含 .xlsx）
