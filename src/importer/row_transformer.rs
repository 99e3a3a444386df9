// ==========================================
// ConnectCRM 数据导入服务 - 行转换器
// ==========================================
// 职责: 按映射把原始行换键为目标字段记录
// 红线: 不做类型转换,不做校验,值原样透传
// ==========================================

use crate::domain::{FieldMapping, RawRecord, TransformedRecord};

// ==========================================
// RowTransformer - 换键转换
// ==========================================
// 转换约定:
// - 只处理映射到非空表头的字段
// - 源行缺该表头时目标键不出现（与"空字符串值"区分开）
// - 空字符串值照常拷贝
#[derive(Debug, Default)]
pub struct RowTransformer;

impl RowTransformer {
    pub fn new() -> Self {
        RowTransformer
    }

    /// 转换单行
    pub fn transform(&self, mapping: &FieldMapping, row: &RawRecord) -> TransformedRecord {
        let mut record = TransformedRecord::new();
        for (field_key, header) in mapping.iter() {
            if header.is_empty() {
                continue; // 空表头 = 跳过该字段
            }
            if let Some(value) = row.get(header) {
                record.insert(field_key, value);
            }
        }
        record
    }

    /// 转换整个行集（保持输入顺序）
    pub fn transform_all(&self, mapping: &FieldMapping, rows: &[RawRecord]) -> Vec<TransformedRecord> {
        rows.iter().map(|row| self.transform(mapping, row)).collect()
    }
}
