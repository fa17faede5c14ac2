use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::DocumentService;
use crate::errors::DocSystemError;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::{content_disposition_value, guess_mime_type, original_file_name};

/// 公开读取附件对象，无鉴权
pub async fn handle_download(
    service: &DocumentService,
    request: &HttpRequest,
    bucket: String,
    key: String,
) -> ActixResult<HttpResponse> {
    let workflow = service.get_workflow(request);

    if bucket != workflow.settings().bucket {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ObjectNotFound,
            "Bucket not found",
        )));
    }

    let bytes = match workflow.objects().get(&bucket, &key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::ObjectNotFound,
                "Object not found",
            )));
        }
        Err(DocSystemError::Validation(msg)) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
        }
        Err(e) => {
            tracing::error!("Failed to read object {}/{}: {}", bucket, key, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ObjectReadFailed,
                    "Object read failed",
                )),
            );
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, guess_mime_type(&key).to_string()))
        .insert_header((
            header::CONTENT_DISPOSITION,
            content_disposition_value(original_file_name(&key)),
        ))
        .body(bytes))
}
