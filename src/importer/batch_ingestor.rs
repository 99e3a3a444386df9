// ==========================================
// ConnectCRM 数据导入服务 - 批量写入器
// ==========================================
// 职责: 逐条写入映射记录，容忍单条失败，汇总结果
// 红线: 不中断,不回滚,单条失败只记日志和计数
// ==========================================

use crate::domain::{ImportOutcome, TransformedRecord};
use crate::repository::EntityWriter;
use futures::stream::{self, StreamExt};

// ==========================================
// BatchIngestor - 批量写入
// ==========================================
// 结果不变式: attempted == succeeded.len() + failed_count
// succeeded 保持输入顺序的成功子序列
#[derive(Debug, Default)]
pub struct BatchIngestor;

impl BatchIngestor {
    pub fn new() -> Self {
        BatchIngestor
    }

    /// 顺序逐条写入
    ///
    /// # 参数
    /// - records: 映射后的记录（保持源文件顺序）
    /// - writer: 目标实体写入端
    ///
    /// # 返回
    /// - 汇总结果（永不整体失败，单条失败只计数）
    pub async fn ingest<W: EntityWriter>(
        &self,
        records: Vec<TransformedRecord>,
        writer: &W,
    ) -> ImportOutcome<W::Entity> {
        let attempted = records.len();
        let mut succeeded = Vec::new();
        let mut failed_count = 0;

        for (idx, record) in records.into_iter().enumerate() {
            match writer.create_from_record(record).await {
                Ok(entity) => succeeded.push(entity),
                Err(e) => {
                    failed_count += 1;
                    tracing::warn!(row_number = idx + 1, error = %e, "记录写入失败，继续下一条");
                }
            }
        }

        ImportOutcome {
            attempted,
            succeeded,
            failed_count,
        }
    }

    /// 有界并发写入
    ///
    /// 吞吐增强选项，结果不变式与顺序保证与 ingest 相同
    /// （buffered 按提交顺序产出结果）
    ///
    /// # 参数
    /// - max_in_flight: 同时在途的写入数上限（最小 1）
    pub async fn ingest_concurrent<W: EntityWriter>(
        &self,
        records: Vec<TransformedRecord>,
        writer: &W,
        max_in_flight: usize,
    ) -> ImportOutcome<W::Entity> {
        let attempted = records.len();

        let results: Vec<Result<W::Entity, ()>> = stream::iter(records.into_iter().enumerate())
            .map(|(idx, record)| async move {
                writer.create_from_record(record).await.map_err(|e| {
                    tracing::warn!(row_number = idx + 1, error = %e, "记录写入失败，继续下一条");
                })
            })
            .buffered(max_in_flight.max(1))
            .collect()
            .await;

        let mut succeeded = Vec::new();
        let mut failed_count = 0;
        for result in results {
            match result {
                Ok(entity) => succeeded.push(entity),
                Err(()) => failed_count += 1,
            }
        }

        ImportOutcome {
            attempted,
            succeeded,
            failed_count,
        }
    }
}
