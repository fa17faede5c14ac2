//! 内存存储实现
//!
//! 进程内 `DashMap`，用于本地运行和测试。带调用计数，便于断言远程调用次数。

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

use super::{ObjectStore, PutOptions, RecordStore};
use crate::errors::{DocSystemError, Result};
use crate::models::documents::entities::SubmissionRecord;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

pub struct MemoryObjectStore {
    objects: DashMap<String, StoredObject>,
    max_size: usize,
    put_calls: AtomicUsize,
}

impl MemoryObjectStore {
    pub fn new(max_size: usize) -> Self {
        Self {
            objects: DashMap::new(),
            max_size,
            put_calls: AtomicUsize::new(0),
        }
    }

    fn object_id(bucket: &str, key: &str) -> String {
        format!("{bucket}/{key}")
    }

    pub fn put_calls(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .get(&Self::object_id(bucket, key))
            .map(|entry| entry.value().clone())
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        options: PutOptions,
    ) -> Result<()> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);

        if bytes.len() > self.max_size {
            return Err(DocSystemError::object_store(format!(
                "对象超过大小限制 ({} > {} bytes)",
                bytes.len(),
                self.max_size
            )));
        }

        let id = Self::object_id(bucket, key);
        if !options.overwrite && self.objects.contains_key(&id) {
            return Err(DocSystemError::object_store(format!("对象已存在: {id}")));
        }

        self.objects.insert(
            id,
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: options.content_type,
            },
        );
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.object(bucket, key).map(|o| o.bytes))
    }
}

#[derive(Default)]
pub struct MemoryRecordStore {
    records: DashMap<String, SubmissionRecord>,
    upsert_calls: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryRecordStore {
    async fn upsert(&self, record: &SubmissionRecord) -> Result<()> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        self.records
            .insert(record.id_number.clone(), record.clone());
        Ok(())
    }

    async fn find_by_id_number(&self, id_number: &str) -> Result<Option<SubmissionRecord>> {
        Ok(self
            .records
            .get(id_number)
            .map(|entry| entry.value().clone()))
    }
}
