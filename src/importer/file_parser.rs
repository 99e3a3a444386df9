// ==========================================
// ConnectCRM 数据导入服务 - CSV 文件解析器
// ==========================================
// 职责: CSV -> ParsedCsv（表头 + 原始行）
// 红线: 不做字段映射,不做类型转换,单元格原样保留
// ==========================================

use crate::domain::{ParsedCsv, RawRecord};
use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ==========================================
// CsvParser - CSV 解析器
// ==========================================
// 解析约定:
// - 首行即表头，保持文件内顺序，不做 trim
// - 短行缺失的尾部列不写入 map（与"空字符串单元格"区分开）
// - 超出表头数量的多余列丢弃
// - 空白行跳过，全空值行（如 ","）保留
#[derive(Debug, Default)]
pub struct CsvParser;

impl CsvParser {
    pub fn new() -> Self {
        CsvParser
    }

    /// 解析磁盘上的 CSV 文件
    ///
    /// # 参数
    /// - file_path: 文件路径（仅支持 .csv 扩展名）
    ///
    /// # 返回
    /// - Ok(ParsedCsv): 表头与原始行
    /// - Err: 文件不存在/格式不支持/解析失败
    pub fn parse_path(&self, file_path: &str) -> ImportResult<ParsedCsv> {
        let path = Path::new(file_path);
        if !path.exists() {
            return Err(ImportError::FileNotFound(file_path.to_string()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        if extension.as_deref() != Some("csv") {
            return Err(ImportError::UnsupportedFormat(file_path.to_string()));
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }

    /// 解析任意 Read 源（上传流、内存缓冲等）
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<ParsedCsv> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

        // 读取所有行
        let mut rows: Vec<RawRecord> = Vec::new();
        for result in rdr.records() {
            let record = result?;
            let mut row = RawRecord::new();
            for (col_idx, header) in headers.iter().enumerate() {
                if let Some(value) = record.get(col_idx) {
                    row.insert(header.clone(), value.to_string());
                }
            }
            rows.push(row);
        }

        Ok(ParsedCsv { headers, rows })
    }
}
