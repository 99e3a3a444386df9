// ==========================================
// ConnectCRM 数据导入服务 - 实体写入 Trait
// ==========================================
// 职责: 定义"映射记录 -> 落库实体"的统一写入接口
// 红线: Repository 不含业务规则，只做校验与数据写入
// ==========================================

use crate::domain::TransformedRecord;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// EntityWriter Trait
// ==========================================
// 用途: 批量导入按记录逐条写入的目标端
// 实现者: ContactRepository / DealRepository（使用 rusqlite）
#[async_trait]
pub trait EntityWriter: Send + Sync {
    /// 写入成功后返回的实体类型
    type Entity: Send;

    /// 校验单条映射记录并写入
    ///
    /// # 参数
    /// - record: 映射后的导入记录（目标字段键 -> 单元格文本）
    ///
    /// # 返回
    /// - Ok(entity): 落库后的完整实体（含 id 与时间戳）
    /// - Err: 校验失败或数据库错误（只影响当前记录）
    async fn create_from_record(&self, record: TransformedRecord) -> RepositoryResult<Self::Entity>;
}
