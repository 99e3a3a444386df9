// ==========================================
// ConnectCRM 数据导入服务 - 活动仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
// ==========================================

use crate::domain::{Activity, NewActivity};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ActivityRepository - 活动仓储
// ==========================================
pub struct ActivityRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ActivityRepository {
    /// 创建新的活动仓储
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

    /// 在既有事务中插入活动
    ///
    /// 联系人/商机建档的伴生活动与主记录同事务提交，
    /// 任一失败则两者都不落库。
    ///
    /// # 返回
    /// - Ok(activity): 含自增 id 的完整活动
    pub fn insert_in_tx(tx: &Transaction<'_>, new_activity: &NewActivity) -> RepositoryResult<Activity> {
        let now = Utc::now();
        tx.execute(
            r#"
            INSERT INTO activities (
                type, title, description, contact_id, deal_id, created_by, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                new_activity.activity_type,
                new_activity.title,
                new_activity.description,
                new_activity.contact_id,
                new_activity.deal_id,
                new_activity.created_by,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();

        Ok(Activity {
            id,
            activity_type: new_activity.activity_type.clone(),
            title: new_activity.title.clone(),
            description: new_activity.description.clone(),
            contact_id: new_activity.contact_id,
            deal_id: new_activity.deal_id,
            created_by: new_activity.created_by,
            created_at: now,
        })
    }

    /// 插入单条活动（独立事务）
    pub fn insert(&self, new_activity: &NewActivity) -> RepositoryResult<Activity> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;
        let activity = Self::insert_in_tx(&tx, new_activity)?;
        tx.commit()?;
        Ok(activity)
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 查询单条活动
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Activity>> {
        let conn = self.get_conn()?;
        let activity = conn
            .query_row(
                "SELECT id, type, title, description, contact_id, deal_id, created_by, created_at
                 FROM activities WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(activity)
    }

    /// 查询某联系人的全部活动（按时间倒序）
    pub fn list_for_contact(&self, contact_id: i64) -> RepositoryResult<Vec<Activity>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, type, title, description, contact_id, deal_id, created_by, created_at
             FROM activities WHERE contact_id = ?1 ORDER BY created_at DESC, id DESC",
        )?;
        let activities = stmt
            .query_map(params![contact_id], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(activities)
    }

    /// 查询最近的活动
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<Activity>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, type, title, description, contact_id, deal_id, created_by, created_at
             FROM activities ORDER BY created_at DESC, id DESC LIMIT ?1",
        )?;
        let activities = stmt
            .query_map(params![limit as i64], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(activities)
    }

    /// 统计活动总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM activities", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ==========================================
    // 行映射
    // ==========================================

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
        Ok(Activity {
            id: row.get(0)?,
            activity_type: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            contact_id: row.get(4)?,
            deal_id: row.get(5)?,
            created_by: row.get(6)?,
            created_at: row.get::<_, DateTime<Utc>>(7)?,
        })
    }
}
