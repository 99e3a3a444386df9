// ==========================================
// ConnectCRM 数据导入服务 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入会话所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入会话所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取预览行数
    ///
    /// # 返回
    /// - usize: 预览阶段展示的转换记录条数
    ///
    /// # 默认值
    /// - 5
    async fn get_preview_rows(&self) -> Result<usize, Box<dyn Error>>;

    /// 获取严格映射开关
    ///
    /// 开启后，必填字段未全部映射时禁止进入预览
    ///
    /// # 返回
    /// - true: 映射阶段强制校验必填字段覆盖
    /// - false: 不校验，交由落库侧拒绝
    ///
    /// # 默认值
    /// - false
    async fn get_strict_mapping(&self) -> Result<bool, Box<dyn Error>>;

    /// 获取提交并发度
    ///
    /// # 返回
    /// - usize: 批量写入的并发上限（1 = 顺序提交）
    ///
    /// # 默认值
    /// - 1
    async fn get_commit_concurrency(&self) -> Result<usize, Box<dyn Error>>;
}
