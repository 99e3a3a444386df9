// ==========================================
// ConnectCRM 数据导入服务 - 领域类型定义
// ==========================================
// 职责: 实体种类、导入字段目录等跨模块基础类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// CSV 原始行: 表头 -> 单元格文本
///
/// 短行缺失的列不会出现在 map 中（与"该列无值"区分开）
pub type RawRecord = HashMap<String, String>;

// ==========================================
// 实体种类 (Entity Kind)
// ==========================================
// 导入管道支持的两类目标实体
// 序列化格式: 小写复数 (与接口路径一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Contacts, // 联系人
    Deals,    // 商机
}

impl EntityKind {
    /// 提交请求体中承载记录数组的键名
    pub fn payload_key(&self) -> &'static str {
        match self {
            EntityKind::Contacts => "contacts",
            EntityKind::Deals => "deals",
        }
    }

    /// 提交响应中承载已导入实体数组的键名
    pub fn response_key(&self) -> &'static str {
        match self {
            EntityKind::Contacts => "importedContacts",
            EntityKind::Deals => "importedDeals",
        }
    }

    /// 导入成功后需要失效的列表缓存键
    pub fn cache_key(&self) -> &'static str {
        match self {
            EntityKind::Contacts => "/api/contacts",
            EntityKind::Deals => "/api/deals",
        }
    }

    /// 实体名词的 i18n 键（用于文案拼接）
    pub fn noun_key(&self) -> &'static str {
        match self {
            EntityKind::Contacts => "entity.contacts",
            EntityKind::Deals => "entity.deals",
        }
    }

    /// 该实体的导入字段目录（顺序即界面展示顺序）
    pub fn import_fields(&self) -> Vec<FieldSpec> {
        match self {
            EntityKind::Contacts => vec![
                FieldSpec::new("firstName", "First Name", true),
                FieldSpec::new("lastName", "Last Name", true),
                FieldSpec::new("email", "Email", false),
                FieldSpec::new("phone", "Phone Number", false),
                FieldSpec::new("company", "Company", false),
                FieldSpec::new("status", "Status", false),
                FieldSpec::new("source", "Source", false),
                FieldSpec::new("notes", "Notes", false),
            ],
            EntityKind::Deals => vec![
                FieldSpec::new("title", "Deal Title", true),
                FieldSpec::new("contactId", "Contact ID", true),
                FieldSpec::new("stage", "Stage", true),
                FieldSpec::new("amount", "Amount", false),
                FieldSpec::new("description", "Description", false),
            ],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Contacts => write!(f, "contacts"),
            EntityKind::Deals => write!(f, "deals"),
        }
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contacts" => Ok(EntityKind::Contacts),
            "deals" => Ok(EntityKind::Deals),
            other => Err(format!("未知实体类型: {}", other)),
        }
    }
}

// ==========================================
// 导入字段规格 (Field Spec)
// ==========================================
// 目标实体的单个可映射字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub key: String,    // 目标字段键（实体属性名，camelCase）
    pub label: String,  // 界面展示名
    pub required: bool, // 是否必填
}

impl FieldSpec {
    pub fn new(key: &str, label: &str, required: bool) -> Self {
        FieldSpec {
            key: key.to_string(),
            label: label.to_string(),
            required,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_roundtrip() {
        assert_eq!("contacts".parse::<EntityKind>().unwrap(), EntityKind::Contacts);
        assert_eq!("deals".parse::<EntityKind>().unwrap(), EntityKind::Deals);
        assert!("companies".parse::<EntityKind>().is_err());
        assert_eq!(EntityKind::Contacts.to_string(), "contacts");
        assert_eq!(EntityKind::Deals.to_string(), "deals");
    }

    #[test]
    fn test_entity_kind_serde_lowercase() {
        assert_eq!(serde_json::to_string(&EntityKind::Contacts).unwrap(), "\"contacts\"");
        let kind: EntityKind = serde_json::from_str("\"deals\"").unwrap();
        assert_eq!(kind, EntityKind::Deals);
    }

    #[test]
    fn test_import_fields_catalog() {
        let contact_fields = EntityKind::Contacts.import_fields();
        assert_eq!(contact_fields.len(), 8);
        assert!(contact_fields.iter().filter(|f| f.required).count() == 2);
        assert_eq!(contact_fields[0].key, "firstName");
        assert_eq!(contact_fields[0].label, "First Name");

        let deal_fields = EntityKind::Deals.import_fields();
        assert_eq!(deal_fields.len(), 5);
        let required: Vec<&str> = deal_fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key.as_str())
            .collect();
        assert_eq!(required, vec!["title", "contactId", "stage"]);
    }

    #[test]
    fn test_response_and_cache_keys() {
        assert_eq!(EntityKind::Contacts.response_key(), "importedContacts");
        assert_eq!(EntityKind::Deals.response_key(), "importedDeals");
        assert_eq!(EntityKind::Contacts.cache_key(), "/api/contacts");
        assert_eq!(EntityKind::Deals.cache_key(), "/api/deals");
    }
}
