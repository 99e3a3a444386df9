// ==========================================
// ConnectCRM 数据导入服务 - 联系人仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做校验与数据映射
// ==========================================

use crate::domain::{Contact, NewActivity, NewContact, TransformedRecord, DEFAULT_CONTACT_STATUS};
use crate::repository::activity_repo::ActivityRepository;
use crate::repository::entity_writer::EntityWriter;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ContactRepository - 联系人仓储
// ==========================================
pub struct ContactRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ContactRepository {
    /// 创建新的联系人仓储
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

    /// 创建联系人并写入建档活动（单事务）
    ///
    /// # 参数
    /// - new_contact: 联系人入参，status 为 None 时落库为 'lead'
    ///
    /// # 返回
    /// - Ok(contact): 含自增 id 与时间戳的完整实体
    pub fn create(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        let mut conn = self.get_conn()?;
        let tx = conn.transaction()?;

        let now = Utc::now();
        let status = new_contact
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_CONTACT_STATUS.to_string());

        tx.execute(
            r#"
            INSERT INTO contacts (
                first_name, last_name, email, phone, company,
                status, source, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                new_contact.first_name,
                new_contact.last_name,
                new_contact.email,
                new_contact.phone,
                new_contact.company,
                status,
                new_contact.source,
                new_contact.notes,
                now,
                now,
            ],
        )?;
        let id = tx.last_insert_rowid();

        let contact = Contact {
            id,
            first_name: new_contact.first_name.clone(),
            last_name: new_contact.last_name.clone(),
            email: new_contact.email.clone(),
            phone: new_contact.phone.clone(),
            company: new_contact.company.clone(),
            status,
            source: new_contact.source.clone(),
            notes: new_contact.notes.clone(),
            created_at: now,
            updated_at: now,
        };

        let activity = NewActivity::contact_created(&contact);
        ActivityRepository::insert_in_tx(&tx, &activity)?;

        tx.commit()?;
        Ok(contact)
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 查询单个联系人
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Contact>> {
        let conn = self.get_conn()?;
        let contact = conn
            .query_row(
                "SELECT id, first_name, last_name, email, phone, company,
                        status, source, notes, created_at, updated_at
                 FROM contacts WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(contact)
    }

    /// 查询全部联系人（按 id 升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Contact>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, first_name, last_name, email, phone, company,
                    status, source, notes, created_at, updated_at
             FROM contacts ORDER BY id",
        )?;
        let contacts = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    /// 统计联系人总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ==========================================
    // 行映射
    // ==========================================

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
        Ok(Contact {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            email: row.get(3)?,
            phone: row.get(4)?,
            company: row.get(5)?,
            status: row.get(6)?,
            source: row.get(7)?,
            notes: row.get(8)?,
            created_at: row.get::<_, DateTime<Utc>>(9)?,
            updated_at: row.get::<_, DateTime<Utc>>(10)?,
        })
    }
}

#[async_trait]
impl EntityWriter for ContactRepository {
    type Entity = Contact;

    async fn create_from_record(&self, record: TransformedRecord) -> RepositoryResult<Contact> {
        let new_contact =
            NewContact::from_record(&record).map_err(RepositoryError::ValidationError)?;
        self.create(&new_contact)
    }
}
