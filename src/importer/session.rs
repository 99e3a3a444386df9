// ==========================================
// ConnectCRM 数据导入服务 - 导入会话控制器
// ==========================================
// 职责: 驱动四步导入状态机，持有会话内全部状态
// 状态机: upload -> map -> preview -> complete（reset 回 upload）
// 红线: 会话状态只在内存中，不跨会话持久化
// ==========================================

use crate::config::{config_keys, ImportConfigReader};
use crate::domain::types::{EntityKind, FieldSpec};
use crate::domain::{
    FieldMapping, ImportCommitRequest, ImportCommitResponse, ImportStep, ParsedCsv,
    TransformedRecord,
};
use crate::i18n::{t, t_with_args};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::CsvParser;
use crate::importer::ports::{CacheInvalidator, CommitPort, NoticeKind, Notifier};
use crate::importer::row_transformer::RowTransformer;
use std::error::Error;
use std::io::Read;
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

// ==========================================
// ImportSession - 导入会话
// ==========================================
// 一个会话对应一次完整的导入流程，实体种类在创建时固定
pub struct ImportSession<C: ImportConfigReader> {
    // ===== 会话标识 =====
    session_id: String,
    entity_kind: EntityKind,
    fields: Vec<FieldSpec>,

    // ===== 会话状态 =====
    step: ImportStep,
    file_name: Option<String>,
    parsed: Option<ParsedCsv>,
    mapping: FieldMapping,
    preview: Vec<TransformedRecord>,
    commit_in_flight: bool,
    last_response: Option<ImportCommitResponse>,

    // ===== 协作组件 =====
    parser: CsvParser,
    mapper: FieldMapper,
    transformer: RowTransformer,
    config: C,
    commit_port: Box<dyn CommitPort>,
    notifier: Box<dyn Notifier>,
    cache: Box<dyn CacheInvalidator>,
}

impl<C: ImportConfigReader> ImportSession<C> {
    /// 创建导入会话
    ///
    /// # 参数
    /// - entity_kind: 目标实体种类（决定字段目录与提交通道）
    /// - config: 配置读取端
    /// - commit_port: 提交出口
    /// - notifier: 用户通知出口
    /// - cache: 缓存失效出口
    pub fn new(
        entity_kind: EntityKind,
        config: C,
        commit_port: Box<dyn CommitPort>,
        notifier: Box<dyn Notifier>,
        cache: Box<dyn CacheInvalidator>,
    ) -> Self {
        let session_id = Uuid::new_v4().to_string();
        tracing::debug!(session_id = %session_id, entity = %entity_kind, "创建导入会话");

        Self {
            session_id,
            fields: entity_kind.import_fields(),
            entity_kind,
            step: ImportStep::Upload,
            file_name: None,
            parsed: None,
            mapping: FieldMapping::new(),
            preview: Vec::new(),
            commit_in_flight: false,
            last_response: None,
            parser: CsvParser::new(),
            mapper: FieldMapper::new(),
            transformer: RowTransformer::new(),
            config,
            commit_port,
            notifier,
            cache,
        }
    }

    // ==========================================
    // 状态访问
    // ==========================================

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn entity_kind(&self) -> EntityKind {
        self.entity_kind
    }

    pub fn step(&self) -> ImportStep {
        self.step
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// 已解析文件的表头（未上传时为空）
    pub fn headers(&self) -> &[String] {
        self.parsed.as_ref().map(|p| p.headers.as_slice()).unwrap_or(&[])
    }

    /// 已解析文件的数据行数（未上传时为 0）
    pub fn row_count(&self) -> usize {
        self.parsed.as_ref().map(|p| p.row_count()).unwrap_or(0)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    pub fn preview(&self) -> &[TransformedRecord] {
        &self.preview
    }

    pub fn last_response(&self) -> Option<&ImportCommitResponse> {
        self.last_response.as_ref()
    }

    pub fn is_committing(&self) -> bool {
        self.commit_in_flight
    }

    // ==========================================
    // upload -> map
    // ==========================================

    /// 加载 CSV 数据（任意 Read 源）
    ///
    /// 解析成功自动生成映射建议并进入 map 步骤；
    /// 解析失败发出错误通知，停留在 upload，不保留半成品状态
    #[instrument(skip(self, reader), fields(session_id = %self.session_id))]
    pub fn load_csv<R: Read>(&mut self, file_name: &str, reader: R) -> ImportResult<()> {
        self.ensure_step(ImportStep::Upload, ImportStep::Map)?;
        let result = self.parser.parse_reader(reader);
        self.install_parse_result(file_name, result)
    }

    /// 加载磁盘上的 CSV 文件
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub fn load_csv_path(&mut self, file_path: &str) -> ImportResult<()> {
        self.ensure_step(ImportStep::Upload, ImportStep::Map)?;
        let file_name = Path::new(file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file_path)
            .to_string();
        let result = self.parser.parse_path(file_path);
        self.install_parse_result(&file_name, result)
    }

    fn install_parse_result(
        &mut self,
        file_name: &str,
        result: ImportResult<ParsedCsv>,
    ) -> ImportResult<()> {
        match result {
            Ok(parsed) => {
                self.mapping = self.mapper.suggest_mapping(&parsed.headers, &self.fields);
                tracing::info!(
                    file_name = %file_name,
                    headers = parsed.headers.len(),
                    rows = parsed.row_count(),
                    "CSV 解析完成，进入字段映射"
                );
                self.file_name = Some(file_name.to_string());
                self.parsed = Some(parsed);
                self.preview.clear();
                self.last_response = None;
                self.step = ImportStep::Map;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .notify(NoticeKind::Error, &t("toast.parse_failed_title"), &e.to_string());
                Err(e)
            }
        }
    }

    // ==========================================
    // map 步骤编辑
    // ==========================================

    /// 更新单个字段的映射（header 传空字符串即跳过该字段）
    pub fn update_mapping(&mut self, field_key: &str, header: &str) -> ImportResult<()> {
        self.ensure_step(ImportStep::Map, ImportStep::Map)?;
        if !self.fields.iter().any(|f| f.key == field_key) {
            return Err(ImportError::UnknownField(field_key.to_string()));
        }
        self.mapping.set(field_key, header);
        Ok(())
    }

    /// 把某字段标记为跳过
    pub fn clear_mapping(&mut self, field_key: &str) -> ImportResult<()> {
        self.update_mapping(field_key, "")
    }

    // ==========================================
    // map -> preview
    // ==========================================

    /// 生成预览并进入 preview 步骤
    ///
    /// 默认不校验必填字段覆盖（由落库侧拒绝）；
    /// 开启严格映射配置后，必填字段未映射会被拦在 map 步骤
    #[instrument(skip(self), fields(session_id = %self.session_id, entity = %self.entity_kind))]
    pub async fn continue_to_preview(&mut self) -> ImportResult<()> {
        self.ensure_step(ImportStep::Map, ImportStep::Preview)?;

        let strict = self
            .config
            .get_strict_mapping()
            .await
            .map_err(|e| config_read_error(config_keys::IMPORT_STRICT_MAPPING, e))?;
        if strict {
            if let Some(field) = self
                .fields
                .iter()
                .find(|f| f.required && !self.mapping.is_mapped(&f.key))
            {
                return Err(ImportError::RequiredFieldUnmapped {
                    field: field.key.clone(),
                });
            }
        }

        let preview_rows = self
            .config
            .get_preview_rows()
            .await
            .map_err(|e| config_read_error(config_keys::IMPORT_PREVIEW_ROWS, e))?;

        let parsed = self
            .parsed
            .as_ref()
            .ok_or_else(|| ImportError::InternalError("没有已解析的文件".to_string()))?;
        let total_rows = parsed.row_count();
        let preview: Vec<TransformedRecord> = parsed
            .rows
            .iter()
            .take(preview_rows)
            .map(|row| self.transformer.transform(&self.mapping, row))
            .collect();

        tracing::info!(preview_rows = preview.len(), total_rows, "生成预览，进入确认");
        self.preview = preview;
        self.step = ImportStep::Preview;
        Ok(())
    }

    /// 从 preview 退回 map（清空预览，映射保留）
    pub fn back_to_map(&mut self) -> ImportResult<()> {
        self.ensure_step(ImportStep::Preview, ImportStep::Map)?;
        self.preview.clear();
        self.step = ImportStep::Map;
        Ok(())
    }

    // ==========================================
    // preview -> complete
    // ==========================================

    /// 提交整批记录（全部数据行，不只是预览子集）
    ///
    /// 提交被拒绝时停留在 preview，允许用户重试；
    /// 成功后发成功通知、失效列表缓存并进入 complete
    #[instrument(skip(self), fields(session_id = %self.session_id, entity = %self.entity_kind))]
    pub async fn commit(&mut self) -> ImportResult<ImportCommitResponse> {
        self.ensure_step(ImportStep::Preview, ImportStep::Complete)?;
        if self.commit_in_flight {
            return Err(ImportError::CommitInFlight);
        }

        self.commit_in_flight = true;
        let result = self.do_commit().await;
        self.commit_in_flight = false;

        match result {
            Ok(response) => {
                let count = response.imported_count();
                self.notifier.notify(
                    NoticeKind::Success,
                    &t("toast.import_success_title"),
                    &t_with_args(
                        "toast.import_success",
                        &[
                            ("count", count.to_string().as_str()),
                            ("entity", t(self.entity_kind.noun_key()).as_str()),
                        ],
                    ),
                );
                self.cache.invalidate(self.entity_kind.cache_key());
                self.last_response = Some(response.clone());
                self.step = ImportStep::Complete;
                tracing::info!(imported = count, "导入完成");
                Ok(response)
            }
            Err(e) => {
                self.notifier
                    .notify(NoticeKind::Error, &t("toast.import_failed_title"), &e.to_string());
                tracing::warn!(error = %e, "导入提交失败，停留在预览");
                Err(e)
            }
        }
    }

    async fn do_commit(&self) -> ImportResult<ImportCommitResponse> {
        let parsed = self
            .parsed
            .as_ref()
            .ok_or_else(|| ImportError::InternalError("没有已解析的文件".to_string()))?;
        let records = self.transformer.transform_all(&self.mapping, &parsed.rows);
        tracing::info!(records = records.len(), "提交整批导入");

        let request = ImportCommitRequest::new(self.entity_kind, records);
        self.commit_port.commit(self.entity_kind, request).await
    }

    // ==========================================
    // 重置
    // ==========================================

    /// 清空全部会话状态，回到 upload（任意步骤可用）
    pub fn reset(&mut self) {
        self.step = ImportStep::Upload;
        self.file_name = None;
        self.parsed = None;
        self.mapping = FieldMapping::new();
        self.preview.clear();
        self.commit_in_flight = false;
        self.last_response = None;
        tracing::debug!(session_id = %self.session_id, "会话重置");
    }

    fn ensure_step(&self, expected: ImportStep, to: ImportStep) -> ImportResult<()> {
        if self.step != expected {
            return Err(ImportError::InvalidStateTransition {
                from: self.step.to_string(),
                to: to.to_string(),
            });
        }
        Ok(())
    }
}

fn config_read_error(key: &str, e: Box<dyn Error>) -> ImportError {
    ImportError::ConfigReadError {
        key: key.to_string(),
        message: e.to_string(),
    }
}
