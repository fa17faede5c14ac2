//! 存储层
//!
//! 工作流只依赖这里的两个 trait：对象存储保存附件内容，记录存储保存提交元数据。
//! 具体后端在启动时按配置创建，以 `Arc<dyn _>` 注入。

use std::sync::Arc;

use crate::config::{AppConfig, StorageConfig};
use crate::errors::{DocSystemError, Result};
use crate::models::documents::entities::SubmissionRecord;

pub mod filesystem;
pub mod memory;
pub mod sea_orm_storage;

/// 对象写入选项
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutOptions {
    /// 允许覆盖已存在的 key
    pub overwrite: bool,
    pub content_type: Option<String>,
}

impl PutOptions {
    pub fn overwrite(content_type: Option<&str>) -> Self {
        Self {
            overwrite: true,
            content_type: content_type.map(str::to_string),
        }
    }
}

/// 附件对象存储
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    // 写入对象
    async fn put(&self, bucket: &str, key: &str, bytes: &[u8], options: PutOptions)
    -> Result<()>;
    // 读取对象，不存在时返回 None
    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>>;
}

/// 提交记录存储
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    // 按身份证号插入或整体覆盖
    async fn upsert(&self, record: &SubmissionRecord) -> Result<()>;
    // 按身份证号精确查询，至多一条
    async fn find_by_id_number(&self, id_number: &str) -> Result<Option<SubmissionRecord>>;
}

pub async fn create_object_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    match config.backend.as_str() {
        "filesystem" => {
            let store =
                filesystem::FilesystemObjectStore::new(&config.dir, config.max_file_size).await?;
            Ok(Arc::new(store))
        }
        "memory" => Ok(Arc::new(memory::MemoryObjectStore::new(
            config.max_file_size,
        ))),
        other => Err(DocSystemError::configuration(format!(
            "未知的对象存储后端: {other}. 支持: filesystem, memory"
        ))),
    }
}

pub async fn create_record_store(config: &AppConfig) -> Result<Arc<dyn RecordStore>> {
    match config.records.backend.as_str() {
        "sea_orm" => {
            let storage = sea_orm_storage::SeaOrmStorage::connect(&config.database).await?;
            Ok(Arc::new(storage))
        }
        "memory" => Ok(Arc::new(memory::MemoryRecordStore::new())),
        other => Err(DocSystemError::configuration(format!(
            "未知的记录存储后端: {other}. 支持: sea_orm, memory"
        ))),
    }
}
