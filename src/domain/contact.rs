// ==========================================
// ConnectCRM 数据导入服务 - 联系人实体
// ==========================================
// 职责: 联系人主数据结构与导入记录校验
// 红线: 不含数据访问逻辑
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::import::TransformedRecord;

/// 联系人状态默认值（建档即线索）
pub const DEFAULT_CONTACT_STATUS: &str = "lead";

// ==========================================
// 联系人 (Contact)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    // ===== 身份标识 =====
    pub id: i64, // 自增主键

    // ===== 基本信息 =====
    pub first_name: String,      // 名（必填）
    pub last_name: String,       // 姓（必填）
    pub email: Option<String>,   // 邮箱
    pub phone: Option<String>,   // 电话
    pub company: Option<String>, // 公司

    // ===== 业务属性 =====
    pub status: String,         // 状态（lead/qualified/customer 等，自由文本）
    pub source: Option<String>, // 来源渠道
    pub notes: Option<String>,  // 备注

    // ===== 审计时间 =====
    pub created_at: DateTime<Utc>, // 创建时间
    pub updated_at: DateTime<Utc>, // 更新时间
}

// ==========================================
// 新建联系人 (New Contact)
// ==========================================
// 导入/建档入参，id 与时间戳由存储层生成
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>, // None 时落库为 DEFAULT_CONTACT_STATUS
    pub source: Option<String>,
    pub notes: Option<String>,
}

impl NewContact {
    /// 从映射后的导入记录构造
    ///
    /// 校验规则与落库约束一致:
    /// - firstName/lastName 键必须存在（空字符串允许，视作有值）
    /// - 其余字段缺键即为 None
    pub fn from_record(record: &TransformedRecord) -> Result<Self, String> {
        let first_name = record
            .get("firstName")
            .ok_or_else(|| "缺少必填字段: firstName".to_string())?
            .to_string();
        let last_name = record
            .get("lastName")
            .ok_or_else(|| "缺少必填字段: lastName".to_string())?
            .to_string();

        Ok(NewContact {
            first_name,
            last_name,
            email: record.get("email").map(|v| v.to_string()),
            phone: record.get("phone").map(|v| v.to_string()),
            company: record.get("company").map(|v| v.to_string()),
            status: record.get("status").map(|v| v.to_string()),
            source: record.get("source").map(|v| v.to_string()),
            notes: record.get("notes").map(|v| v.to_string()),
        })
    }
}
