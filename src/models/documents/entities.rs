use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 已上传附件的元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct FileRef {
    /// 原始文件名
    pub name: String,
    /// 客户端上报的 MIME 类型
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// 对象存储中的 key：`{idNumber}/{uuid}_{name}`
    pub path: String,
}

/// 一次提交的完整记录，以身份证号为自然键
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct SubmissionRecord {
    pub id_number: String,
    pub prefix: String,
    pub first_name: String,
    pub last_name: String,
    pub unit: String,
    pub officer_type: String,
    #[serde(default, alias = "uploaded_files")]
    pub uploaded_files: Vec<FileRef>,
}

/// 查询结果，未命中时为 Absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchResult {
    Found(SubmissionRecord),
    #[default]
    Absent,
}

impl SearchResult {
    pub fn record(&self) -> Option<&SubmissionRecord> {
        match self {
            SearchResult::Found(record) => Some(record),
            SearchResult::Absent => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

impl From<Option<SubmissionRecord>> for SearchResult {
    fn from(value: Option<SubmissionRecord>) -> Self {
        value.map_or(SearchResult::Absent, SearchResult::Found)
    }
}
