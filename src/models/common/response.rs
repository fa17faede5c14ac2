use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::DocSystemError;
use crate::models::ErrorCode;

/// 所有文档接口共用的响应外壳
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    fn build(code: ErrorCode, data: Option<T>, message: String) -> Self {
        Self {
            code: code as i32,
            message,
            data,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self::build(ErrorCode::Success, Some(data), message.into())
    }

    /// 失败响应，仍携带数据（例如回显的表单和通知）
    pub fn error(code: ErrorCode, data: T, message: impl Into<String>) -> Self {
        Self::build(code, Some(data), message.into())
    }
}

impl ApiResponse<()> {
    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(code, None, message.into())
    }

    /// 用内部错误的详情作为 message
    pub fn rejected(code: ErrorCode, err: &DocSystemError) -> Self {
        Self::build(code, None, err.message().to_string())
    }
}
