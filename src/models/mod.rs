//! 数据模型定义

pub mod common;
pub mod documents;
pub mod notifications;

pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    InternalServerError = 1500,

    // 文档提交相关 2xxx
    SubmissionInvalid = 2000,
    SubmissionNotFound = 2004,
    SubmissionInProgress = 2009,
    FileUploadFailed = 2010,
    RecordSaveFailed = 2011,
    PayloadTooLarge = 2013,

    // 对象读取相关 3xxx
    ObjectNotFound = 3004,
    ObjectReadFailed = 3005,
}
