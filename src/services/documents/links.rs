use super::workflow::WorkflowSettings;
use crate::models::documents::entities::SubmissionRecord;
use crate::models::documents::responses::{DownloadableFile, SearchResponse};

/// 公开下载链接：`{base}/storage/v1/object/public/{bucket}/{path}`
pub fn download_url(settings: &WorkflowSettings, path: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}/{}",
        settings.public_base_url.trim_end_matches('/'),
        settings.bucket,
        path
    )
}

pub fn build_search_response(
    settings: &WorkflowSettings,
    record: SubmissionRecord,
) -> SearchResponse {
    let files = record
        .uploaded_files
        .iter()
        .map(|file| DownloadableFile {
            name: file.name.clone(),
            file_type: file.file_type.clone(),
            path: file.path.clone(),
            url: download_url(settings, &file.path),
        })
        .collect();

    SearchResponse { record, files }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::documents::entities::FileRef;
    use crate::services::documents::UploadLimits;

    fn settings(base: &str) -> WorkflowSettings {
        WorkflowSettings {
            bucket: "attachments".to_string(),
            public_base_url: base.to_string(),
            limits: UploadLimits::default(),
        }
    }

    #[test]
    fn test_download_url() {
        assert_eq!(
            download_url(&settings("https://files.example.org"), "1/u_a.pdf"),
            "https://files.example.org/storage/v1/object/public/attachments/1/u_a.pdf"
        );
        assert_eq!(
            download_url(&settings("https://files.example.org/"), "1/u_a.pdf"),
            "https://files.example.org/storage/v1/object/public/attachments/1/u_a.pdf"
        );
    }

    #[test]
    fn test_search_response_keeps_file_order() {
        let record = SubmissionRecord {
            id_number: "1".to_string(),
            prefix: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            unit: String::new(),
            officer_type: String::new(),
            uploaded_files: vec![
                FileRef {
                    name: "b.png".to_string(),
                    file_type: Some("image/png".to_string()),
                    path: "1/u2_b.png".to_string(),
                },
                FileRef {
                    name: "a".to_string(),
                    file_type: None,
                    path: "1/u1_a".to_string(),
                },
            ],
        };

        let response = build_search_response(&settings("http://localhost:8080"), record);
        assert_eq!(response.files.len(), 2);
        assert_eq!(response.files[0].name, "b.png");
        assert_eq!(
            response.files[1].url,
            "http://localhost:8080/storage/v1/object/public/attachments/1/u1_a"
        );
        assert_eq!(response.files[1].file_type, None);
    }
}
