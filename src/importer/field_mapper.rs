// ==========================================
// ConnectCRM 数据导入服务 - 字段映射建议器
// ==========================================
// 职责: 根据表头自动建议"目标字段 -> 表头"映射
// 红线: 只做建议,最终映射由会话层用户动作决定
// ==========================================

use crate::domain::types::FieldSpec;
use crate::domain::FieldMapping;

// ==========================================
// FieldMapper - 自动映射建议
// ==========================================
// 匹配规则（对每个目标字段，按表头文件顺序取第一个命中者）:
// - 表头小写 == 字段键小写，或
// - 表头小写包含字段键小写
// 两个条件合在同一趟扫描里判断，因此"包含"命中的靠前表头
// 会先于靠后的精确命中（保持既有行为）
#[derive(Debug, Default)]
pub struct FieldMapper;

impl FieldMapper {
    pub fn new() -> Self {
        FieldMapper
    }

    /// 生成初始映射建议
    ///
    /// # 参数
    /// - headers: CSV 表头（保持文件顺序）
    /// - fields: 目标实体的字段目录
    ///
    /// # 返回
    /// - 命中的字段写入映射，未命中的字段不出现（等待人工指定）
    pub fn suggest_mapping(&self, headers: &[String], fields: &[FieldSpec]) -> FieldMapping {
        let mut mapping = FieldMapping::new();
        for field in fields {
            let key_lower = field.key.to_lowercase();
            let matched = headers.iter().find(|header| {
                let header_lower = header.to_lowercase();
                header_lower == key_lower || header_lower.contains(&key_lower)
            });
            if let Some(header) = matched {
                mapping.set(&field.key, header);
            }
        }
        mapping
    }
}
