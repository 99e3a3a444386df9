// ==========================================
// ConnectCRM 数据导入服务 - 导入值对象
// ==========================================
// 职责: 导入会话各阶段的数据载体与提交 DTO
// 红线: 不含解析/落库逻辑
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::contact::Contact;
use super::deal::Deal;
use super::types::{EntityKind, RawRecord};

// ==========================================
// 导入步骤 (Import Step)
// ==========================================
// 四步向导: 上传 -> 映射 -> 预览 -> 完成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStep {
    Upload,   // 等待文件
    Map,      // 字段映射
    Preview,  // 预览确认
    Complete, // 导入完成
}

impl fmt::Display for ImportStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportStep::Upload => write!(f, "upload"),
            ImportStep::Map => write!(f, "map"),
            ImportStep::Preview => write!(f, "preview"),
            ImportStep::Complete => write!(f, "complete"),
        }
    }
}

// ==========================================
// 解析结果 (Parsed CSV)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCsv {
    pub headers: Vec<String>,  // 首行表头（保持文件顺序）
    pub rows: Vec<RawRecord>,  // 数据行（表头 -> 单元格文本）
}

impl ParsedCsv {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ==========================================
// 字段映射 (Field Mapping)
// ==========================================
// 目标字段键 -> CSV 表头；空字符串表示"跳过该字段"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping(BTreeMap<String, String>);

impl FieldMapping {
    pub fn new() -> Self {
        FieldMapping(BTreeMap::new())
    }

    /// 设置映射（header 传空字符串即跳过该字段）
    pub fn set(&mut self, field_key: &str, header: &str) {
        self.0.insert(field_key.to_string(), header.to_string());
    }

    /// 该字段映射到的表头（未设置或设置为空都返回 None）
    pub fn header_for(&self, field_key: &str) -> Option<&str> {
        self.0
            .get(field_key)
            .map(|h| h.as_str())
            .filter(|h| !h.is_empty())
    }

    pub fn is_mapped(&self, field_key: &str) -> bool {
        self.header_for(field_key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ==========================================
// 映射后的记录 (Transformed Record)
// ==========================================
// 目标字段键 -> 单元格文本；源行缺列时键不出现
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformedRecord(BTreeMap<String, String>);

impl TransformedRecord {
    pub fn new() -> Self {
        TransformedRecord(BTreeMap::new())
    }

    pub fn insert(&mut self, field_key: &str, value: &str) {
        self.0.insert(field_key.to_string(), value.to_string());
    }

    pub fn get(&self, field_key: &str) -> Option<&str> {
        self.0.get(field_key).map(|v| v.as_str())
    }

    pub fn contains_key(&self, field_key: &str) -> bool {
        self.0.contains_key(field_key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for TransformedRecord {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        TransformedRecord(iter.into_iter().collect())
    }
}

// ==========================================
// 批量写入结果 (Import Outcome)
// ==========================================
#[derive(Debug)]
pub struct ImportOutcome<E> {
    pub attempted: usize,    // 尝试写入的记录数
    pub succeeded: Vec<E>,   // 成功写入的实体（保持输入顺序）
    pub failed_count: usize, // 失败记录数
}

impl<E> ImportOutcome<E> {
    pub fn imported_count(&self) -> usize {
        self.succeeded.len()
    }
}

// ==========================================
// 提交请求 (Import Commit Request)
// ==========================================
// 记录数组按实体种类放在对应键下，另一键不出现
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportCommitRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<TransformedRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deals: Option<Vec<TransformedRecord>>,
}

impl ImportCommitRequest {
    pub fn new(entity_kind: EntityKind, records: Vec<TransformedRecord>) -> Self {
        match entity_kind {
            EntityKind::Contacts => ImportCommitRequest {
                contacts: Some(records),
                deals: None,
            },
            EntityKind::Deals => ImportCommitRequest {
                contacts: None,
                deals: Some(records),
            },
        }
    }

    /// 取指定实体种类下的记录数组（键缺失返回 None）
    pub fn records_for(&self, entity_kind: EntityKind) -> Option<&[TransformedRecord]> {
        match entity_kind {
            EntityKind::Contacts => self.contacts.as_deref(),
            EntityKind::Deals => self.deals.as_deref(),
        }
    }
}

// ==========================================
// 提交响应 (Import Commit Response)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCommitResponse {
    pub message: String, // 汇总文案（"Successfully imported X out of Y ..."）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_contacts: Option<Vec<Contact>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported_deals: Option<Vec<Deal>>,
}

impl ImportCommitResponse {
    /// 成功导入条数（联系人或商机，两者不会同时出现）
    pub fn imported_count(&self) -> usize {
        self.imported_contacts
            .as_ref()
            .map(|c| c.len())
            .or_else(|| self.imported_deals.as_ref().map(|d| d.len()))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_step_serde() {
        assert_eq!(serde_json::to_string(&ImportStep::Preview).unwrap(), "\"preview\"");
        assert_eq!(ImportStep::Map.to_string(), "map");
    }

    #[test]
    fn test_field_mapping_skip_semantics() {
        let mut mapping = FieldMapping::new();
        mapping.set("firstName", "firstName");
        mapping.set("email", "");

        assert_eq!(mapping.header_for("firstName"), Some("firstName"));
        // 空字符串 = 跳过
        assert_eq!(mapping.header_for("email"), None);
        assert!(!mapping.is_mapped("email"));
        // 未设置
        assert_eq!(mapping.header_for("phone"), None);
        // 空串条目仍占一个键
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_commit_request_single_key() {
        let records = vec![TransformedRecord::new()];
        let request = ImportCommitRequest::new(EntityKind::Contacts, records);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("contacts").is_some());
        // 另一实体的键不应出现在请求体中
        assert!(json.get("deals").is_none());
        assert!(request.records_for(EntityKind::Contacts).is_some());
        assert!(request.records_for(EntityKind::Deals).is_none());
    }

    #[test]
    fn test_transformed_record_roundtrip() {
        let mut record = TransformedRecord::new();
        record.insert("firstName", "Jane");
        record.insert("email", "");

        let json = serde_json::to_string(&record).unwrap();
        let back: TransformedRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get("firstName"), Some("Jane"));
        assert_eq!(back.get("email"), Some(""));
        assert!(!back.contains_key("phone"));
    }

    #[test]
    fn test_commit_response_count() {
        let response = ImportCommitResponse {
            message: "Successfully imported 0 out of 2 contacts".to_string(),
            imported_contacts: Some(vec![]),
            imported_deals: None,
        };
        assert_eq!(response.imported_count(), 0);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("importedContacts").is_some());
        assert!(json.get("importedDeals").is_none());
    }
}
