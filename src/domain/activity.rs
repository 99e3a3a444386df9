// ==========================================
// ConnectCRM 数据导入服务 - 活动记录实体
// ==========================================
// 职责: 联系人/商机建档时的伴生活动（审计轨迹）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::contact::Contact;
use super::deal::Deal;

/// 系统用户 ID（批量导入等非交互操作的 created_by）
pub const SYSTEM_USER_ID: i64 = 1;

// ==========================================
// 活动 (Activity)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,                     // 自增主键
    #[serde(rename = "type")]
    pub activity_type: String,       // 活动类型（note/call/email 等）
    pub title: String,               // 标题
    pub description: Option<String>, // 描述
    pub contact_id: Option<i64>,     // 关联联系人
    pub deal_id: Option<i64>,        // 关联商机
    pub created_by: i64,             // 操作人
    pub created_at: DateTime<Utc>,   // 创建时间
}

// ==========================================
// 新建活动 (New Activity)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub title: String,
    pub description: Option<String>,
    pub contact_id: Option<i64>,
    pub deal_id: Option<i64>,
    pub created_by: i64,
}

impl NewActivity {
    /// 联系人建档伴生活动
    ///
    /// 描述格式: "{名} {姓} from {公司}"，公司缺失或为空时显示 N/A
    pub fn contact_created(contact: &Contact) -> Self {
        let company = contact
            .company
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("N/A");
        NewActivity {
            activity_type: "note".to_string(),
            title: "New contact created".to_string(),
            description: Some(format!(
                "{} {} from {}",
                contact.first_name, contact.last_name, company
            )),
            contact_id: Some(contact.id),
            deal_id: None,
            created_by: SYSTEM_USER_ID,
        }
    }

    /// 商机建档伴生活动
    ///
    /// 描述格式: "{标题} (${金额})"，金额缺失时显示 N/A
    pub fn deal_created(deal: &Deal) -> Self {
        let amount = deal
            .amount
            .map(|a| a.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        NewActivity {
            activity_type: "note".to_string(),
            title: "New deal created".to_string(),
            description: Some(format!("{} (${})", deal.title, amount)),
            contact_id: Some(deal.contact_id),
            deal_id: Some(deal.id),
            created_by: SYSTEM_USER_ID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_contact(company: Option<&str>) -> Contact {
        Contact {
            id: 10,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: None,
            phone: None,
            company: company.map(|c| c.to_string()),
            status: "lead".to_string(),
            source: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_contact_created_description() {
        let activity = NewActivity::contact_created(&sample_contact(Some("Acme")));
        assert_eq!(activity.activity_type, "note");
        assert_eq!(activity.title, "New contact created");
        assert_eq!(activity.description.as_deref(), Some("Jane Doe from Acme"));
        assert_eq!(activity.contact_id, Some(10));
        assert_eq!(activity.deal_id, None);
        assert_eq!(activity.created_by, SYSTEM_USER_ID);
    }

    #[test]
    fn test_contact_created_company_fallback() {
        // 公司为 None 或空字符串都显示 N/A
        let activity = NewActivity::contact_created(&sample_contact(None));
        assert_eq!(activity.description.as_deref(), Some("Jane Doe from N/A"));

        let activity = NewActivity::contact_created(&sample_contact(Some("")));
        assert_eq!(activity.description.as_deref(), Some("Jane Doe from N/A"));
    }

    #[test]
    fn test_deal_created_description() {
        let deal = Deal {
            id: 3,
            title: "企业版年费".to_string(),
            contact_id: 42,
            amount: Some(12000),
            stage: "won".to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let activity = NewActivity::deal_created(&deal);
        assert_eq!(activity.title, "New deal created");
        assert_eq!(activity.description.as_deref(), Some("企业版年费 ($12000)"));
        assert_eq!(activity.contact_id, Some(42));
        assert_eq!(activity.deal_id, Some(3));

        let deal_no_amount = Deal { amount: None, ..deal };
        let activity = NewActivity::deal_created(&deal_no_amount);
        assert_eq!(activity.description.as_deref(), Some("企业版年费 ($N/A)"));
    }

    #[test]
    fn test_activity_serde_type_field() {
        let activity = NewActivity {
            activity_type: "note".to_string(),
            title: "t".to_string(),
            description: None,
            contact_id: None,
            deal_id: None,
            created_by: 1,
        };
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "note");
        assert_eq!(json["createdBy"], 1);
    }
}
