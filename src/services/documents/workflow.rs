//! 提交表单工作流
//!
//! 持有注入的对象存储与记录存储，保存/查询操作都作用在调用方传入的
//! `FormState` 上，HTTP 层只负责组装状态和渲染结果。

use std::sync::Arc;

use super::in_flight::InFlightSaves;
use crate::config::AppConfig;
use crate::models::documents::entities::SearchResult;
use crate::models::documents::requests::{SelectedFile, SubmissionForm};
use crate::storage::{ObjectStore, RecordStore};

/// 读取 multipart 请求时的大小上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    /// 单个文件最大字节数
    pub max_file_size: usize,
    /// 整个请求体最大字节数
    pub max_payload_size: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: 20 * 1024 * 1024,
            max_payload_size: 64 * 1024 * 1024,
        }
    }
}

/// 工作流设置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    /// 附件 bucket
    pub bucket: String,
    /// 下载链接前缀
    pub public_base_url: String,
    pub limits: UploadLimits,
}

impl From<&AppConfig> for WorkflowSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            bucket: config.storage.bucket.clone(),
            public_base_url: config.storage.public_base_url.clone(),
            limits: UploadLimits {
                max_file_size: config.storage.max_file_size,
                max_payload_size: config.server.limits.max_payload_size,
            },
        }
    }
}

/// 表单当前状态
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub form: SubmissionForm,
    /// 当前选中的文件，未选择时为 None
    pub files: Option<Vec<SelectedFile>>,
    /// 最近一次查询结果
    pub search_result: SearchResult,
}

impl FormState {
    pub fn new(form: SubmissionForm, files: Vec<SelectedFile>) -> Self {
        Self {
            form,
            files: (!files.is_empty()).then_some(files),
            search_result: SearchResult::Absent,
        }
    }

    /// 清空表单字段和文件选择，保留查询结果
    pub(crate) fn reset_input(&mut self) {
        self.form = SubmissionForm::default();
        self.files = None;
    }
}

pub struct FormWorkflow {
    pub(crate) objects: Arc<dyn ObjectStore>,
    pub(crate) records: Arc<dyn RecordStore>,
    pub(crate) settings: WorkflowSettings,
    pub(crate) in_flight: InFlightSaves,
}

impl FormWorkflow {
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        records: Arc<dyn RecordStore>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            objects,
            records,
            settings,
            in_flight: InFlightSaves::default(),
        }
    }

    pub fn settings(&self) -> &WorkflowSettings {
        &self.settings
    }

    pub fn objects(&self) -> &Arc<dyn ObjectStore> {
        &self.objects
    }
}
