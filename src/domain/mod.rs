// ==========================================
// ConnectCRM 数据导入服务 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、导入值对象
// 红线: 不含数据访问逻辑,不含解析逻辑
// ==========================================

pub mod activity;
pub mod contact;
pub mod deal;
pub mod import;
pub mod types;

// 重导出核心类型
pub use activity::{Activity, NewActivity, SYSTEM_USER_ID};
pub use contact::{Contact, NewContact, DEFAULT_CONTACT_STATUS};
pub use deal::{Deal, NewDeal};
pub use import::{
    FieldMapping, ImportCommitRequest, ImportCommitResponse, ImportOutcome, ImportStep,
    ParsedCsv, TransformedRecord,
};
pub use types::{EntityKind, FieldSpec, RawRecord};

// TODO: 状态/阶段字段仍为自由文本，待产品确认字典范围后改为枚举
