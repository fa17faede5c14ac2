use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use futures_util::TryStreamExt;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::DocumentService;
use super::workflow::{FormState, FormWorkflow, UploadLimits};
use crate::errors::{DocSystemError, Result};
use crate::models::documents::entities::FileRef;
use crate::models::documents::requests::{SelectedFile, SubmissionForm};
use crate::models::documents::responses::{SaveOutcome, SaveResponse};
use crate::models::notifications::entities::Notification;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::PutOptions;

/// 生成对象 key：`{idNumber}/{uuid}_{原始文件名}`
pub fn storage_path(id_number: &str, file_name: &str) -> String {
    format!("{id_number}/{}_{file_name}", Uuid::new_v4())
}

impl FormWorkflow {
    /// 保存表单：逐个上传文件，再以成功上传的文件整体覆盖提交记录
    ///
    /// 校验失败或同一身份证号已有保存在进行时返回 Err，且不发起任何存储调用。
    /// 单个文件失败不会中断批次；记录写入失败不会清理已上传的对象。
    pub async fn save(&self, state: &mut FormState) -> Result<SaveOutcome> {
        let id_number = state.form.id_number.clone();
        let files = match state.files.as_deref() {
            Some(files) if !files.is_empty() && !id_number.is_empty() => files,
            _ => {
                return Err(DocSystemError::validation(
                    "identity number and at least one file are required",
                ));
            }
        };

        let _guard = self.in_flight.try_acquire(&id_number).ok_or_else(|| {
            DocSystemError::conflict(format!("save for {id_number} is already in progress"))
        })?;

        let mut outcome = SaveOutcome::default();

        for file in files {
            let path = storage_path(&id_number, &file.name);
            let options = PutOptions::overwrite(file.content_type.as_deref());

            match self
                .objects
                .put(&self.settings.bucket, &path, &file.bytes, options)
                .await
            {
                Ok(()) => outcome.saved_files.push(FileRef {
                    name: file.name.clone(),
                    file_type: file.content_type.clone(),
                    path,
                }),
                Err(e) => {
                    warn!("Upload of {} for {} failed: {}", file.name, id_number, e);
                    outcome.failed_files.push(file.name.clone());
                    outcome
                        .notifications
                        .push(Notification::file_upload_failed(&file.name));
                }
            }
        }

        if !outcome.saved_files.is_empty() {
            let record = state.form.to_record(outcome.saved_files.clone());
            match self.records.upsert(&record).await {
                Ok(()) => {
                    info!(
                        "Saved submission {} with {} file(s)",
                        id_number,
                        outcome.saved_files.len()
                    );
                    outcome.record_saved = true;
                    outcome
                        .notifications
                        .push(Notification::files_saved(outcome.saved_files.len()));
                    state.reset_input();
                }
                Err(e) => {
                    // 已上传的对象保留为孤儿，不做补偿删除
                    error!("Failed to save submission record {}: {}", id_number, e);
                    outcome.notifications.push(Notification::record_save_failed());
                }
            }
        } else if !outcome.failed_files.is_empty() {
            warn!("All {} upload(s) for {} failed", outcome.failed_files.len(), id_number);
            outcome.notifications.push(Notification::all_uploads_failed());
        }

        Ok(outcome)
    }
}

/// 从 multipart 请求体读取表单字段和文件
///
/// 边读边累计大小：单个文件超过 `max_file_size` 或整个请求体超过
/// `max_payload_size` 时立即停止读取，返回 PayloadTooLarge。
async fn read_form_state(payload: &mut Multipart, limits: UploadLimits) -> Result<FormState> {
    let mut form = SubmissionForm::default();
    let mut files = Vec::new();
    let mut total_size: usize = 0;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| DocSystemError::validation(format!("malformed multipart body: {e}")))?
    {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string());
        let content_type = field.content_type().map(|ct| ct.to_string());

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| DocSystemError::validation(format!("malformed multipart body: {e}")))?;

            total_size += chunk.len();
            if total_size > limits.max_payload_size {
                return Err(DocSystemError::payload_too_large(format!(
                    "request body exceeds {} bytes",
                    limits.max_payload_size
                )));
            }
            if file_name.is_some() && data.len() + chunk.len() > limits.max_file_size {
                return Err(DocSystemError::payload_too_large(format!(
                    "file {} exceeds {} bytes",
                    file_name.as_deref().unwrap_or_default(),
                    limits.max_file_size
                )));
            }
            data.extend_from_slice(&chunk);
        }

        match (name.as_str(), file_name) {
            ("files" | "file", Some(file_name)) => {
                // 未选择文件时浏览器仍会发送一个空文件名的 part
                if !file_name.is_empty() {
                    files.push(SelectedFile::new(file_name, content_type.as_deref(), data));
                }
            }
            (field_name, _) => {
                let value = String::from_utf8(data).map_err(|_| {
                    DocSystemError::validation(format!("field {field_name} is not UTF-8"))
                })?;
                if !form.set_field(field_name, value) {
                    tracing::debug!("Ignoring unknown form field: {}", field_name);
                }
            }
        }
    }

    Ok(FormState::new(form, files))
}

pub async fn handle_save(
    service: &DocumentService,
    request: &HttpRequest,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    let workflow = service.get_workflow(request);
    let mut state = match read_form_state(&mut payload, workflow.settings().limits).await {
        Ok(state) => state,
        Err(e @ DocSystemError::PayloadTooLarge(_)) => {
            warn!("Rejected oversized submission: {}", e);
            return Ok(HttpResponse::PayloadTooLarge()
                .json(ApiResponse::rejected(ErrorCode::PayloadTooLarge, &e)));
        }
        Err(e) => {
            return Ok(
                HttpResponse::BadRequest().json(ApiResponse::rejected(ErrorCode::BadRequest, &e))
            );
        }
    };
    let submitted_form = state.form.clone();

    let outcome = match workflow.save(&mut state).await {
        Ok(outcome) => outcome,
        Err(e) => {
            let (mut response, code, notification) = match &e {
                DocSystemError::Validation(_) => (
                    HttpResponse::BadRequest(),
                    ErrorCode::SubmissionInvalid,
                    Notification::missing_input(),
                ),
                DocSystemError::Conflict(_) => (
                    HttpResponse::Conflict(),
                    ErrorCode::SubmissionInProgress,
                    Notification::save_in_progress(&submitted_form.id_number),
                ),
                _ => (
                    HttpResponse::InternalServerError(),
                    ErrorCode::InternalServerError,
                    Notification::record_save_failed(),
                ),
            };
            let body = SaveResponse {
                outcome: SaveOutcome {
                    notifications: vec![notification],
                    ..SaveOutcome::default()
                },
                form: submitted_form,
            };
            return Ok(response.json(ApiResponse::error(code, body, e.message())));
        }
    };

    let record_saved = outcome.record_saved;
    let nothing_uploaded = outcome.saved_files.is_empty();
    let body = SaveResponse {
        outcome,
        form: state.form,
    };

    if record_saved {
        Ok(HttpResponse::Ok().json(ApiResponse::success(body, "Submission saved")))
    } else if nothing_uploaded {
        Ok(HttpResponse::BadGateway().json(ApiResponse::error(
            ErrorCode::FileUploadFailed,
            body,
            "All file uploads failed",
        )))
    } else {
        Ok(HttpResponse::BadGateway().json(ApiResponse::error(
            ErrorCode::RecordSaveFailed,
            body,
            "Failed to save submission record",
        )))
    }
}
