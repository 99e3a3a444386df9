// ==========================================
// 批量导入API
// ==========================================
// 职责: 接收整批映射记录，逐条落库并汇总结果
// 等价于 POST /api/import/contacts 与 POST /api/import/deals
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{
    EntityKind, ImportCommitRequest, ImportCommitResponse, ImportOutcome, TransformedRecord,
};
use crate::i18n::{t, t_with_args};
use crate::importer::batch_ingestor::BatchIngestor;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::ports::CommitPort;
use crate::repository::{ContactRepository, DealRepository, EntityWriter};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// 导入API
pub struct ImportApi {
    contact_repo: Arc<ContactRepository>,
    deal_repo: Arc<DealRepository>,
    ingestor: BatchIngestor,
    commit_concurrency: usize, // 1 = 顺序写入
}

impl ImportApi {
    /// 创建新的ImportApi实例（顺序写入）
    pub fn new(contact_repo: Arc<ContactRepository>, deal_repo: Arc<DealRepository>) -> Self {
        Self {
            contact_repo,
            deal_repo,
            ingestor: BatchIngestor::new(),
            commit_concurrency: 1,
        }
    }

    /// 设置提交并发度（import_commit_concurrency 配置的落地点）
    pub fn with_commit_concurrency(mut self, max_in_flight: usize) -> Self {
        self.commit_concurrency = max_in_flight.max(1);
        self
    }

    /// 处理一次导入提交
    ///
    /// # 参数
    /// - entity_kind: 目标实体种类
    /// - request: 提交请求，记录数组必须在 entity_kind 对应的键下
    ///
    /// # 返回
    /// - Ok(ImportCommitResponse): 汇总文案 + 成功落库的实体列表
    /// - Err(ApiError::InvalidInput): 对应键缺失或为空数组
    ///
    /// # 说明
    /// - 默认逐条顺序写入，可通过 with_commit_concurrency 开启有界并发
    /// - 单条失败不中断整批（部分成功不算错误）
    /// - 汇总文案报告 成功数/尝试数
    #[instrument(skip(self, request), fields(entity = %entity_kind))]
    pub async fn handle_commit(
        &self,
        entity_kind: EntityKind,
        request: ImportCommitRequest,
    ) -> ApiResult<ImportCommitResponse> {
        // 参数验证: 键缺失和空数组同样拒绝
        let records = match request.records_for(entity_kind) {
            Some(records) if !records.is_empty() => records,
            _ => {
                return Err(ApiError::InvalidInput(invalid_payload_message(entity_kind)));
            }
        };

        let batch_id = Uuid::new_v4().to_string();
        tracing::info!(batch_id = %batch_id, records = records.len(), "开始批量导入");

        let response = match entity_kind {
            EntityKind::Contacts => {
                let outcome = self
                    .run_ingest(records.to_vec(), self.contact_repo.as_ref())
                    .await;
                tracing::info!(
                    batch_id = %batch_id,
                    imported = outcome.imported_count(),
                    failed = outcome.failed_count,
                    "联系人批量导入完成"
                );
                ImportCommitResponse {
                    message: commit_message(entity_kind, outcome.imported_count(), outcome.attempted),
                    imported_contacts: Some(outcome.succeeded),
                    imported_deals: None,
                }
            }
            EntityKind::Deals => {
                let outcome = self
                    .run_ingest(records.to_vec(), self.deal_repo.as_ref())
                    .await;
                tracing::info!(
                    batch_id = %batch_id,
                    imported = outcome.imported_count(),
                    failed = outcome.failed_count,
                    "商机批量导入完成"
                );
                ImportCommitResponse {
                    message: commit_message(entity_kind, outcome.imported_count(), outcome.attempted),
                    imported_contacts: None,
                    imported_deals: Some(outcome.succeeded),
                }
            }
        };

        Ok(response)
    }

    /// 按配置的并发度选择写入方式
    async fn run_ingest<W: EntityWriter>(
        &self,
        records: Vec<TransformedRecord>,
        writer: &W,
    ) -> ImportOutcome<W::Entity> {
        if self.commit_concurrency > 1 {
            self.ingestor
                .ingest_concurrent(records, writer, self.commit_concurrency)
                .await
        } else {
            self.ingestor.ingest(records, writer).await
        }
    }
}

/// 无效请求体文案（"Invalid contacts data. Expected an array of contacts."）
fn invalid_payload_message(entity_kind: EntityKind) -> String {
    t_with_args(
        "import.invalid_payload",
        &[("entity", t(entity_kind.noun_key()).as_str())],
    )
}

/// 提交成功文案（"Successfully imported X out of Y contacts"）
fn commit_message(entity_kind: EntityKind, imported: usize, attempted: usize) -> String {
    t_with_args(
        "import.commit_success",
        &[
            ("imported", imported.to_string().as_str()),
            ("attempted", attempted.to_string().as_str()),
            ("entity", t(entity_kind.noun_key()).as_str()),
        ],
    )
}

// ==========================================
// 本地导入网关
// ==========================================

/// 进程内直连 ImportApi 的提交出口实现
///
/// 会话层通过 CommitPort 提交，不感知 API 层类型
pub struct LocalImportGateway {
    api: Arc<ImportApi>,
}

impl LocalImportGateway {
    pub fn new(api: Arc<ImportApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CommitPort for LocalImportGateway {
    async fn commit(
        &self,
        entity_kind: EntityKind,
        request: ImportCommitRequest,
    ) -> ImportResult<ImportCommitResponse> {
        // 请求体不合法对应 400 拒绝，其余处理失败按传输失败上报
        self.api
            .handle_commit(entity_kind, request)
            .await
            .map_err(|e| match e {
                ApiError::InvalidInput(_) => ImportError::CommitRejected(e.to_string()),
                _ => ImportError::CommitTransportError(e.to_string()),
            })
    }
}
