// ==========================================
// ConnectCRM 数据导入服务 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod activity_repo;
pub mod contact_repo;
pub mod deal_repo;
pub mod entity_writer;
pub mod error;

// 重导出核心仓储
pub use activity_repo::ActivityRepository;
pub use contact_repo::ContactRepository;
pub use deal_repo::DealRepository;
pub use entity_writer::EntityWriter;
pub use error::{RepositoryError, RepositoryResult};

// TODO: 联系人按邮箱去重查询（待导入去重策略确定后加入）
