// ==========================================
// ConnectCRM 数据导入服务 - 会话外设接口
// ==========================================
// 职责: 导入会话对外界的三个出口（提交/通知/缓存失效）
// 通过 trait 实现依赖倒置，解除会话层对 API 层的直接依赖
// ==========================================

use crate::domain::{EntityKind, ImportCommitRequest, ImportCommitResponse};
use crate::importer::error::ImportResult;
use async_trait::async_trait;

// ==========================================
// 提交出口 (Commit Port)
// ==========================================

/// 导入提交出口 Trait
///
/// 会话层定义，API 层实现
///
/// # 实现说明
/// - `LocalImportGateway` 直连本地 ImportApi
#[async_trait]
pub trait CommitPort: Send + Sync {
    /// 提交整批映射记录
    ///
    /// # 参数
    /// - `entity_kind`: 目标实体种类
    /// - `request`: 提交请求（记录数组在对应实体键下）
    ///
    /// # 返回
    /// - `Ok(response)`: 汇总文案与已导入实体
    /// - `Err`: 请求被拒绝或传输失败（部分失败不算错误）
    async fn commit(
        &self,
        entity_kind: EntityKind,
        request: ImportCommitRequest,
    ) -> ImportResult<ImportCommitResponse>;
}

// ==========================================
// 用户通知 (Notifier)
// ==========================================

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success, // 操作成功
    Error,   // 操作失败
}

/// 用户通知 Trait（toast 等价物）
pub trait Notifier: Send + Sync {
    /// 发出一条通知
    ///
    /// # 参数
    /// - `kind`: 通知级别
    /// - `title`: 标题
    /// - `message`: 正文
    fn notify(&self, kind: NoticeKind, title: &str, message: &str);
}

/// 日志通知者
///
/// 把通知写入 tracing 日志，用于无界面场景与测试
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NoticeKind, title: &str, message: &str) {
        match kind {
            NoticeKind::Success => {
                tracing::info!(title = %title, "{}", message);
            }
            NoticeKind::Error => {
                tracing::warn!(title = %title, "{}", message);
            }
        }
    }
}

// ==========================================
// 缓存失效 (Cache Invalidator)
// ==========================================

/// 列表缓存失效 Trait
///
/// 导入成功后通知宿主应用刷新对应实体的列表缓存
pub trait CacheInvalidator: Send + Sync {
    /// 失效指定资源键的缓存
    ///
    /// # 参数
    /// - `resource_key`: 资源键（如 "/api/contacts"）
    fn invalidate(&self, resource_key: &str);
}

/// 空操作缓存失效者
///
/// 用于没有缓存层的场景（如单元测试）
#[derive(Debug, Clone, Default)]
pub struct NoopCacheInvalidator;

impl CacheInvalidator for NoopCacheInvalidator {
    fn invalidate(&self, resource_key: &str) {
        tracing::debug!("NoopCacheInvalidator: 跳过缓存失效 - resource_key={}", resource_key);
    }
}
