use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::documents::requests::SearchQuery;
use crate::services::DocumentService;

// 懒加载的全局 DocumentService 实例
static DOCUMENT_SERVICE: Lazy<DocumentService> = Lazy::new(DocumentService::new_lazy);

// 保存提交（multipart 表单 + 附件）
pub async fn save_document(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.handle_save(&request, payload).await
}

// 按身份证号查询
pub async fn search_document(
    request: HttpRequest,
    query: web::Query<SearchQuery>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .handle_search(&request, query.into_inner().id_number)
        .await
}

// 公开下载附件
pub async fn download_object(
    request: HttpRequest,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (bucket, key) = path.into_inner();
    DOCUMENT_SERVICE
        .handle_download(&request, bucket, key)
        .await
}

// 配置路由
pub fn configure_document_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/documents")
            .route("", web::post().to(save_document))
            .route("", web::get().to(search_document)),
    );
}

pub fn configure_storage_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/storage/v1/object/public/{bucket}/{key:.*}",
        web::get().to(download_object),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    use super::*;
    use crate::models::ErrorCode;
    use crate::services::documents::test_support::{BrokenRecordStore, FlakyObjectStore, settings};
    use crate::services::documents::{FormWorkflow, UploadLimits, WorkflowSettings};
    use crate::storage::memory::MemoryRecordStore;
    use crate::storage::{ObjectStore, RecordStore};

    const BOUNDARY: &str = "----docsystem-test-boundary";

    fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (file_name, content_type, bytes) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn save_request(body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/v1/documents")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    fn workflow_data() -> web::Data<FormWorkflow> {
        web::Data::from(Arc::new(FormWorkflow::new(
            Arc::new(FlakyObjectStore::default()),
            Arc::new(MemoryRecordStore::new()),
            settings(),
        )))
    }

    fn limited_workflow(
        objects: Arc<dyn ObjectStore>,
        records: Arc<dyn RecordStore>,
        limits: UploadLimits,
    ) -> Arc<FormWorkflow> {
        Arc::new(FormWorkflow::new(
            objects,
            records,
            WorkflowSettings {
                limits,
                ..settings()
            },
        ))
    }

    #[actix_web::test]
    async fn test_save_search_download_round() {
        let app = test::init_service(
            App::new()
                .app_data(workflow_data())
                .configure(configure_document_routes)
                .configure(configure_storage_routes),
        )
        .await;

        let body = multipart_body(
            &[
                ("idNumber", "1234567890123"),
                ("prefix", "Mr"),
                ("firstName", "Somchai"),
                ("lastName", "Jaidee"),
                ("unit", "HQ"),
                ("officerType", "internal"),
            ],
            &[("a.pdf", "application/pdf", b"%PDF-1.7 test")],
        );
        let resp = test::call_service(&app, save_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let saved: Value = test::read_body_json(resp).await;
        assert_eq!(saved["data"]["recordSaved"], true);
        assert_eq!(saved["data"]["form"]["idNumber"], "");
        assert_eq!(saved["data"]["notifications"][0]["kind"], "files_saved");

        let req = test::TestRequest::get()
            .uri("/api/v1/documents?idNumber=1234567890123")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let found: Value = test::read_body_json(resp).await;
        assert_eq!(found["data"]["record"]["firstName"], "Somchai");
        let file = &found["data"]["files"][0];
        assert_eq!(file["name"], "a.pdf");
        assert_eq!(file["type"], "application/pdf");

        let url = file["url"].as_str().unwrap();
        let path = url.strip_prefix("http://localhost:8080").unwrap();
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "application/pdf"
        );
        let bytes = test::read_body(resp).await;
        assert_eq!(&bytes[..], b"%PDF-1.7 test");
    }

    #[actix_web::test]
    async fn test_save_without_files_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(workflow_data())
                .configure(configure_document_routes),
        )
        .await;

        let body = multipart_body(&[("idNumber", "1234567890123")], &[]);
        let resp = test::call_service(&app, save_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["notifications"][0]["kind"], "missing_input");
        assert_eq!(json["data"]["notifications"][0]["level"], "warning");
        assert_eq!(json["data"]["form"]["idNumber"], "1234567890123");
    }

    #[actix_web::test]
    async fn test_all_failed_uploads_report_bad_gateway() {
        let app = test::init_service(
            App::new()
                .app_data(workflow_data())
                .configure(configure_document_routes),
        )
        .await;

        let body = multipart_body(
            &[("idNumber", "42")],
            &[("fail.pdf", "application/pdf", b"x")],
        );
        let resp = test::call_service(&app, save_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["recordSaved"], false);
        assert_eq!(json["data"]["notifications"][1]["kind"], "all_uploads_failed");
        assert_eq!(json["data"]["form"]["idNumber"], "42");
    }

    #[actix_web::test]
    async fn test_search_miss_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(workflow_data())
                .configure(configure_document_routes)
                .configure(configure_storage_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/documents").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["kind"], "not_found");

        let req = test::TestRequest::get()
            .uri("/storage/v1/object/public/other-bucket/1/u_a.pdf")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_save_in_progress_is_conflict() {
        let objects = Arc::new(FlakyObjectStore::default());
        let records = Arc::new(MemoryRecordStore::new());
        let workflow = limited_workflow(objects.clone(), records.clone(), UploadLimits::default());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(workflow.clone()))
                .configure(configure_document_routes),
        )
        .await;

        let _guard = workflow.in_flight.try_acquire("42").unwrap();
        let body = multipart_body(
            &[("idNumber", "42")],
            &[("a.pdf", "application/pdf", b"x")],
        );
        let resp = test::call_service(&app, save_request(body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["data"]["notifications"][0]["kind"], "save_in_progress");
        assert_eq!(json["data"]["form"]["idNumber"], "42");
        assert_eq!(objects.put_calls(), 0);
        assert_eq!(records.upsert_calls(), 0);
    }

    #[actix_web::test]
    async fn test_record_save_failure_is_bad_gateway() {
        let objects = Arc::new(FlakyObjectStore::default());
        let workflow = limited_workflow(
            objects.clone(),
            Arc::new(BrokenRecordStore),
            UploadLimits::default(),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(workflow))
                .configure(configure_document_routes),
        )
        .await;

        let body = multipart_body(
            &[("idNumber", "42"), ("firstName", "Somchai")],
            &[("a.pdf", "application/pdf", b"x")],
        );
        let resp = test::call_service(&app, save_request(body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["code"], ErrorCode::RecordSaveFailed as i32);
        assert_eq!(json["data"]["recordSaved"], false);
        assert_eq!(json["data"]["notifications"][0]["kind"], "record_save_failed");
        assert_eq!(json["data"]["savedFiles"][0]["name"], "a.pdf");
        assert_eq!(json["data"]["form"]["idNumber"], "42");
        assert_eq!(json["data"]["form"]["firstName"], "Somchai");
        assert_eq!(objects.put_calls(), 1);
    }

    #[actix_web::test]
    async fn test_oversized_file_is_rejected_before_upload() {
        let objects = Arc::new(FlakyObjectStore::default());
        let records = Arc::new(MemoryRecordStore::new());
        let workflow = limited_workflow(
            objects.clone(),
            records.clone(),
            UploadLimits {
                max_file_size: 16,
                max_payload_size: 64 * 1024 * 1024,
            },
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(workflow))
                .configure(configure_document_routes),
        )
        .await;

        let big = vec![b'a'; 4 * 1024 * 1024];
        let body = multipart_body(
            &[("idNumber", "42")],
            &[("big.pdf", "application/pdf", big.as_slice())],
        );
        let resp = test::call_service(&app, save_request(body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json: Value = test::read_body_json(resp).await;
        assert_eq!(json["code"], ErrorCode::PayloadTooLarge as i32);
        assert!(json["message"].as_str().unwrap().contains("big.pdf"));
        assert_eq!(objects.put_calls(), 0);
        assert_eq!(records.upsert_calls(), 0);
    }

    #[actix_web::test]
    async fn test_oversized_body_is_rejected() {
        let objects = Arc::new(FlakyObjectStore::default());
        let workflow = limited_workflow(
            objects.clone(),
            Arc::new(MemoryRecordStore::new()),
            UploadLimits {
                max_file_size: 1024 * 1024,
                max_payload_size: 1024,
            },
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(workflow))
                .configure(configure_document_routes),
        )
        .await;

        // 每个文件都在单文件上限内，合计超出请求体上限
        let part = vec![b'a'; 600];
        let body = multipart_body(
            &[("idNumber", "42")],
            &[
                ("a.pdf", "application/pdf", part.as_slice()),
                ("b.pdf", "application/pdf", part.as_slice()),
            ],
        );
        let resp = test::call_service(&app, save_request(body).to_request()).await;

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(objects.put_calls(), 0);
    }

    #[actix_web::test]
    async fn test_download_thai_file_name() {
        let app = test::init_service(
            App::new()
                .app_data(workflow_data())
                .configure(configure_document_routes)
                .configure(configure_storage_routes),
        )
        .await;

        let body = multipart_body(
            &[("idNumber", "42")],
            &[("เอกสาร.pdf", "application/pdf", b"%PDF")],
        );
        let resp = test::call_service(&app, save_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/v1/documents?idNumber=42")
            .to_request();
        let found: Value = test::call_and_read_body_json(&app, req).await;
        let path = found["data"]["files"][0]["path"].as_str().unwrap();
        assert!(path.ends_with("_เอกสาร.pdf"));

        let uri = format!(
            "/storage/v1/object/public/attachments/{}",
            path.replace("เอกสาร", "%E0%B9%80%E0%B8%AD%E0%B8%81%E0%B8%AA%E0%B8%B2%E0%B8%A3")
        );
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let disposition = resp
            .headers()
            .get("content-disposition")
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(
            disposition,
            "inline; filename=\".pdf\"; filename*=UTF-8''%E0%B9%80%E0%B8%AD%E0%B8%81%E0%B8%AA%E0%B8%B2%E0%B8%A3.pdf"
        );
    }
}
