// ==========================================
// ConnectCRM 数据导入服务 - 商机仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做校验与数据映射
// ==========================================

use crate::domain::{Deal, NewActivity, NewDeal, TransformedRecord};
use crate::repository::activity_repo::ActivityRepository;
use crate::repository::entity_writer::EntityWriter;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// DealRepository - 商机仓储
// ==========================================
pub struct DealRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DealRepository {
    /// 创建新的商机仓储
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    pub(super) fn get_conn(&self) -> RepositoryResult<MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 创建商机并写入建档活动（单事务）
    ///
    /// contact_id 只做整数校验，不校验联系人是否存在
    ///
    /// # 返回
    /// - Ok(deal): 含自增 id 与时间戳的完整实体
    pub fn create(&self, new_deal: &NewDeal) -> RepositoryResult<Deal> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let now = Utc::now();
        tx.execute(
            r#"
            INSERT INTO deals (
                title, contact_id, amount, stage, description, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                new_deal.title,
                new_deal.contact_id,
                new_deal.amount,
                new_deal.stage,
                new_deal.description,
                now,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();

        let deal = Deal {
            id,
            title: new_deal.title.clone(),
            contact_id: new_deal.contact_id,
            amount: new_deal.amount,
            stage: new_deal.stage.clone(),
            description: new_deal.description.clone(),
            created_at: now,
            updated_at: now,
        };

        let activity = NewActivity::deal_created(&deal);
        ActivityRepository::insert_in_tx(&tx, &activity)?;

        tx.commit()?;
        Ok(deal)
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 查询单个商机
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Deal>> {
        let conn = self.get_conn()?;
        let deal = conn
            .query_row(
                "SELECT id, title, contact_id, amount, stage, description, created_at, updated_at
                 FROM deals WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(deal)
    }

    /// 查询全部商机（按 id 升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Deal>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, contact_id, amount, stage, description, created_at, updated_at
             FROM deals ORDER BY id",
        )?;
        let deals = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(deals)
    }

    /// 统计商机总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM deals", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ==========================================
    // 行映射
    // ==========================================

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Deal> {
        Ok(Deal {
            id: row.get(0)?,
            title: row.get(1)?,
            contact_id: row.get(2)?,
            amount: row.get(3)?,
            stage: row.get(4)?,
            description: row.get(5)?,
            created_at: row.get::<_, DateTime<Utc>>(6)?,
            updated_at: row.get::<_, DateTime<Utc>>(7)?,
        })
    }
}

#[async_trait]
impl EntityWriter for DealRepository {
    type Entity = Deal;

    async fn create_from_record(&self, record: TransformedRecord) -> RepositoryResult<Deal> {
        let new_deal = NewDeal::from_record(&record).map_err(RepositoryError::ValidationError)?;
        self.create(&new_deal)
    }
}
