use serde::Serialize;
use ts_rs::TS;

use super::entities::{FileRef, SubmissionRecord};
use super::requests::SubmissionForm;
use crate::models::notifications::entities::Notification;

/// 一次保存操作的结果
#[derive(Debug, Clone, Default, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct SaveOutcome {
    /// 上传成功的文件
    pub saved_files: Vec<FileRef>,
    /// 上传失败的文件名
    pub failed_files: Vec<String>,
    /// 元数据记录是否写入成功
    pub record_saved: bool,
    pub notifications: Vec<Notification>,
}

/// 保存接口响应，附带保存后的表单状态
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct SaveResponse {
    #[serde(flatten)]
    pub outcome: SaveOutcome,
    pub form: SubmissionForm,
}

/// 带下载链接的附件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct DownloadableFile {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    pub path: String,
    pub url: String,
}

/// 查询接口响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct SearchResponse {
    pub record: SubmissionRecord,
    pub files: Vec<DownloadableFile>,
}
