use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{FileRef, SubmissionRecord};

/// 表单字段，全部为字符串，默认为空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct SubmissionForm {
    pub id_number: String,
    pub prefix: String,
    pub first_name: String,
    pub last_name: String,
    pub unit: String,
    pub officer_type: String,
}

impl SubmissionForm {
    /// 按 multipart 字段名写入，未知字段返回 false
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "idNumber" => &mut self.id_number,
            "prefix" => &mut self.prefix,
            "firstName" => &mut self.first_name,
            "lastName" => &mut self.last_name,
            "unit" => &mut self.unit,
            "officerType" => &mut self.officer_type,
            _ => return false,
        };
        *slot = value;
        true
    }

    pub fn to_record(&self, uploaded_files: Vec<FileRef>) -> SubmissionRecord {
        SubmissionRecord {
            id_number: self.id_number.clone(),
            prefix: self.prefix.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            unit: self.unit.clone(),
            officer_type: self.officer_type.clone(),
            uploaded_files,
        }
    }
}

/// 当前选中的一个待上传文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            // 浏览器无法识别类型时会上报空字符串
            content_type: content_type
                .map(str::trim)
                .filter(|ct| !ct.is_empty())
                .map(str::to_string),
            bytes,
        }
    }
}

/// 查询参数
#[derive(Debug, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct SearchQuery {
    pub id_number: String,
}
