// ==========================================
// ConnectCRM 数据导入服务 - 商机实体
// ==========================================
// 职责: 商机主数据结构与导入记录校验
// 红线: 不含数据访问逻辑
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::import::TransformedRecord;

// ==========================================
// 商机 (Deal)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    // ===== 身份标识 =====
    pub id: i64, // 自增主键

    // ===== 基本信息 =====
    pub title: String,   // 商机标题（必填）
    pub contact_id: i64, // 关联联系人 ID（必填，不做存在性校验）

    // ===== 业务属性 =====
    pub amount: Option<i64>,         // 金额（整数，可空）
    pub stage: String,               // 阶段（必填，自由文本）
    pub description: Option<String>, // 描述

    // ===== 审计时间 =====
    pub created_at: DateTime<Utc>, // 创建时间
    pub updated_at: DateTime<Utc>, // 更新时间
}

// ==========================================
// 新建商机 (New Deal)
// ==========================================
// 导入入参，id 与时间戳由存储层生成
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeal {
    pub title: String,
    pub contact_id: i64,
    pub amount: Option<i64>,
    pub stage: String,
    pub description: Option<String>,
}

impl NewDeal {
    /// 从映射后的导入记录构造
    ///
    /// 校验规则与落库约束一致:
    /// - title/contactId/stage 键必须存在
    /// - contactId 必须可解析为整数（仅做类型校验，不校验联系人是否存在）
    /// - amount 缺键即为 NULL；有键则必须可解析为整数（空字符串视为无效）
    pub fn from_record(record: &TransformedRecord) -> Result<Self, String> {
        let title = record
            .get("title")
            .ok_or_else(|| "缺少必填字段: title".to_string())?
            .to_string();

        let contact_id_raw = record
            .get("contactId")
            .ok_or_else(|| "缺少必填字段: contactId".to_string())?;
        let contact_id: i64 = contact_id_raw
            .trim()
            .parse()
            .map_err(|_| format!("字段格式无效: contactId 应为整数，实际为 '{}'", contact_id_raw))?;

        let stage = record
            .get("stage")
            .ok_or_else(|| "缺少必填字段: stage".to_string())?
            .to_string();

        let amount = match record.get("amount") {
            None => None,
            Some(raw) => Some(
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| format!("字段格式无效: amount 应为整数，实际为 '{}'", raw))?,
            ),
        };

        Ok(NewDeal {
            title,
            contact_id,
            amount,
            stage,
            description: record.get("description").map(|v| v.to_string()),
        })
    }
}
