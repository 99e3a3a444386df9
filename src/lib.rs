// ==========================================
// ConnectCRM 数据导入服务 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 联系人/商机 CSV 批量导入管道
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - CSV 解析/映射/提交
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{EntityKind, FieldSpec, RawRecord};

// 领域实体
pub use domain::{
    Activity, Contact, Deal, FieldMapping, ImportCommitRequest, ImportCommitResponse,
    ImportOutcome, ImportStep, NewActivity, NewContact, NewDeal, ParsedCsv, TransformedRecord,
};

// 导入管道
pub use importer::{
    BatchIngestor, CsvParser, FieldMapper, ImportError, ImportResult, ImportSession,
    RowTransformer,
};

// API
pub use api::{ApiError, ApiResult, ImportApi, LocalImportGateway};

// 仓储
pub use repository::{
    ActivityRepository, ContactRepository, DealRepository, EntityWriter, RepositoryError,
    RepositoryResult,
};

// 应用状态
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "ConnectCRM 数据导入服务";

// ==========================================
// 预编译检查
// ==========================================
