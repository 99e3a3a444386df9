// ==========================================
// ConnectCRM 数据导入服务 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

use crate::api::{ImportApi, LocalImportGateway};
use crate::config::config_manager::ConfigManager;
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::EntityKind;
use crate::importer::{ImportSession, LogNotifier, NoopCacheInvalidator};
use crate::repository::{ActivityRepository, ContactRepository, DealRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 联系人仓储
    pub contact_repo: Arc<ContactRepository>,

    /// 商机仓储
    pub deal_repo: Arc<DealRepository>,

    /// 活动仓储（导入落库的伴生记录查询）
    pub activity_repo: Arc<ActivityRepository>,

    /// 批量导入API
    pub import_api: Arc<ImportApi>,

    /// 共享数据库连接（会话的配置读取端从这里派生）
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并确保表结构存在
    /// 2. 初始化所有Repository
    /// 3. 创建API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("无法初始化数据库表结构: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let contact_repo = Arc::new(ContactRepository::new(conn.clone()));
        let deal_repo = Arc::new(DealRepository::new(conn.clone()));
        let activity_repo = Arc::new(ActivityRepository::new(conn.clone()));

        // ==========================================
        // 初始化API层
        // ==========================================
        // 提交并发度在启动时从配置快照一次，运行期不热更
        let config = ConfigManager::from_connection(conn.clone())
            .map_err(|e| format!("无法创建ConfigManager: {}", e))?;
        let commit_concurrency = config
            .get_global_config_value(crate::config::config_keys::IMPORT_COMMIT_CONCURRENCY)
            .map_err(|e| format!("无法读取提交并发度配置: {}", e))?
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(1);

        let import_api = Arc::new(
            ImportApi::new(contact_repo.clone(), deal_repo.clone())
                .with_commit_concurrency(commit_concurrency),
        );

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            contact_repo,
            deal_repo,
            activity_repo,
            import_api,
            conn,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }

    /// 创建一个新的导入会话
    ///
    /// # 参数
    /// - entity_kind: 本次导入的目标实体种类
    ///
    /// # 说明
    /// 每个会话独立持有状态机与配置读取端，互不影响；
    /// 提交经 LocalImportGateway 进入共享的 ImportApi
    pub fn new_import_session(
        &self,
        entity_kind: EntityKind,
    ) -> Result<ImportSession<ConfigManager>, String> {
        let config = ConfigManager::from_connection(self.conn.clone())
            .map_err(|e| format!("无法创建ConfigManager: {}", e))?;

        Ok(ImportSession::new(
            entity_kind,
            config,
            Box::new(LocalImportGateway::new(self.import_api.clone())),
            Box::new(LogNotifier),
            Box::new(NoopCacheInvalidator),
        ))
    }
}

// ==========================================
// 默认数据库路径辅助函数
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 开发环境: 用户数据目录/connect-crm-import-dev/connect_crm.db
/// - 生产环境: 用户数据目录/connect-crm-import/connect_crm.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("CONNECT_CRM_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 先给一个默认回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./connect_crm.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("connect-crm-import-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("connect-crm-import");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("connect_crm.db");
    }

    path.to_string_lossy().to_string()
}
