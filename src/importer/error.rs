// ==========================================
// ConnectCRM 数据导入服务 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 映射相关错误 =====
    #[error("未知目标字段: {0}")]
    UnknownField(String),

    #[error("必填字段未映射: {field}")]
    RequiredFieldUnmapped { field: String },

    // ===== 会话状态错误 =====
    #[error("无效的步骤切换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("提交正在进行中，请勿重复提交")]
    CommitInFlight,

    #[error("导入提交被拒绝: {0}")]
    CommitRejected(String),

    #[error("导入请求发送失败: {0}")]
    CommitTransportError(String),

    // ===== 配置错误 =====
    #[error("配置读取失败 (key: {key}): {message}")]
    ConfigReadError { key: String, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
