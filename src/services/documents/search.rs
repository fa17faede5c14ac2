use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{debug, warn};

use super::DocumentService;
use super::links::build_search_response;
use super::workflow::{FormState, FormWorkflow};
use crate::models::documents::entities::SearchResult;
use crate::models::notifications::entities::Notification;
use crate::models::{ApiResponse, ErrorCode};

impl FormWorkflow {
    /// 按当前表单中的身份证号查询
    ///
    /// 未命中和查询出错对用户表现一致：清空查询结果并返回 not found 通知。
    pub async fn search(&self, state: &mut FormState) -> Option<Notification> {
        let id_number = &state.form.id_number;

        let result = match self.records.find_by_id_number(id_number).await {
            Ok(found) => SearchResult::from(found),
            Err(e) => {
                warn!("Lookup for {} failed: {}", id_number, e);
                SearchResult::Absent
            }
        };

        if !result.is_found() {
            debug!("No submission found for {:?}", id_number);
        }
        let notification = (!result.is_found()).then(Notification::not_found);
        state.search_result = result;
        notification
    }
}

pub async fn handle_search(
    service: &DocumentService,
    request: &HttpRequest,
    id_number: String,
) -> ActixResult<HttpResponse> {
    let workflow = service.get_workflow(request);
    let mut state = FormState::default();
    state.form.id_number = id_number;

    if let Some(notification) = workflow.search(&mut state).await {
        let message = notification.message.clone();
        return Ok(HttpResponse::NotFound().json(ApiResponse::error(
            ErrorCode::SubmissionNotFound,
            notification,
            message,
        )));
    }

    match state.search_result {
        SearchResult::Found(record) => {
            let response = build_search_response(workflow.settings(), record);
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
        }
        SearchResult::Absent => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "No submission found",
        ))),
    }
}
