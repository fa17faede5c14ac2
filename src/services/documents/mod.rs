pub mod download;
pub mod in_flight;
pub mod links;
pub mod save;
pub mod search;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_support;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

pub use workflow::{FormState, FormWorkflow, UploadLimits, WorkflowSettings};

pub struct DocumentService {
    workflow: Option<Arc<FormWorkflow>>,
}

impl DocumentService {
    pub fn new_lazy() -> Self {
        Self { workflow: None }
    }

    pub(crate) fn get_workflow(&self, request: &HttpRequest) -> Arc<FormWorkflow> {
        if let Some(workflow) = &self.workflow {
            workflow.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<FormWorkflow>>()
                .expect("FormWorkflow not found in app data")
                .clone()
                .into_inner()
        }
    }

    // 保存提交
    pub async fn handle_save(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        save::handle_save(self, request, payload).await
    }

    // 按身份证号查询
    pub async fn handle_search(
        &self,
        request: &HttpRequest,
        id_number: String,
    ) -> ActixResult<HttpResponse> {
        search::handle_search(self, request, id_number).await
    }

    // 公开下载附件
    pub async fn handle_download(
        &self,
        request: &HttpRequest,
        bucket: String,
        key: String,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, bucket, key).await
    }
}
