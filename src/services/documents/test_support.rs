//! 工作流测试用的存储替身

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{DocSystemError, Result};
use crate::models::documents::entities::SubmissionRecord;
use crate::models::documents::requests::{SelectedFile, SubmissionForm};
use crate::storage::memory::{MemoryObjectStore, MemoryRecordStore};
use crate::storage::{ObjectStore, PutOptions, RecordStore};

use super::workflow::{FormState, FormWorkflow, UploadLimits, WorkflowSettings};

/// key 中包含 `fail` 的对象写入失败，其余委托给内存存储
#[derive(Default)]
pub struct FlakyObjectStore {
    pub inner: MemoryObjectStore,
    attempts: AtomicUsize,
}

impl FlakyObjectStore {
    /// 包括失败在内的写入次数
    pub fn put_calls(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ObjectStore for FlakyObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        options: PutOptions,
    ) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if key.contains("fail") {
            return Err(DocSystemError::object_store("simulated upload failure"));
        }
        self.inner.put(bucket, key, bytes, options).await
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.inner.get(bucket, key).await
    }
}

/// 所有操作都失败的记录存储
#[derive(Default)]
pub struct BrokenRecordStore;

#[async_trait::async_trait]
impl RecordStore for BrokenRecordStore {
    async fn upsert(&self, _record: &SubmissionRecord) -> Result<()> {
        Err(DocSystemError::record_store("simulated upsert failure"))
    }

    async fn find_by_id_number(&self, _id_number: &str) -> Result<Option<SubmissionRecord>> {
        Err(DocSystemError::record_store("simulated lookup failure"))
    }
}

pub fn settings() -> WorkflowSettings {
    WorkflowSettings {
        bucket: "attachments".to_string(),
        public_base_url: "http://localhost:8080".to_string(),
        limits: UploadLimits::default(),
    }
}

pub fn workflow(
    objects: Arc<dyn ObjectStore>,
    records: Arc<dyn RecordStore>,
) -> Arc<FormWorkflow> {
    Arc::new(FormWorkflow::new(objects, records, settings()))
}

pub fn memory_workflow() -> (Arc<FormWorkflow>, Arc<FlakyObjectStore>, Arc<MemoryRecordStore>) {
    let objects = Arc::new(FlakyObjectStore::default());
    let records = Arc::new(MemoryRecordStore::new());
    (workflow(objects.clone(), records.clone()), objects, records)
}

pub fn form(id_number: &str) -> SubmissionForm {
    SubmissionForm {
        id_number: id_number.to_string(),
        prefix: "Mr".to_string(),
        first_name: "Somchai".to_string(),
        last_name: "Jaidee".to_string(),
        unit: "Signal Battalion".to_string(),
        officer_type: "internal".to_string(),
    }
}

pub fn file(name: &str, content_type: &str) -> SelectedFile {
    SelectedFile::new(name, Some(content_type), name.as_bytes().to_vec())
}

pub fn state(id_number: &str, files: Vec<SelectedFile>) -> FormState {
    FormState::new(form(id_number), files)
}
