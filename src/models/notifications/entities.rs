use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationKind {
    MissingInput,
    SaveInProgress,
    FileUploadFailed,
    FilesSaved,
    RecordSaveFailed,
    AllUploadsFailed,
    NotFound,
}

/// 提示给用户的一条通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub level: NotificationLevel,
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn missing_input() -> Self {
        Self {
            level: NotificationLevel::Warning,
            kind: NotificationKind::MissingInput,
            message: "Please enter an identity number and select at least one file".to_string(),
        }
    }

    pub fn save_in_progress(id_number: &str) -> Self {
        Self {
            level: NotificationLevel::Warning,
            kind: NotificationKind::SaveInProgress,
            message: format!("A save for {id_number} is already in progress"),
        }
    }

    pub fn file_upload_failed(file_name: &str) -> Self {
        Self {
            level: NotificationLevel::Error,
            kind: NotificationKind::FileUploadFailed,
            message: format!("Failed to upload file {file_name}"),
        }
    }

    pub fn files_saved(count: usize) -> Self {
        Self {
            level: NotificationLevel::Success,
            kind: NotificationKind::FilesSaved,
            message: format!("Uploaded {count} file(s) successfully"),
        }
    }

    pub fn record_save_failed() -> Self {
        Self {
            level: NotificationLevel::Error,
            kind: NotificationKind::RecordSaveFailed,
            message: "Failed to save submission data".to_string(),
        }
    }

    pub fn all_uploads_failed() -> Self {
        Self {
            level: NotificationLevel::Error,
            kind: NotificationKind::AllUploadsFailed,
            message: "All file uploads failed".to_string(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            level: NotificationLevel::Warning,
            kind: NotificationKind::NotFound,
            message: "No submission found".to_string(),
        }
    }
}
