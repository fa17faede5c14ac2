//! 文件系统对象存储
//!
//! 对象保存在 `{base_path}/{bucket}/{key}`，写入先落到临时文件再 rename。

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;

use super::{ObjectStore, PutOptions};
use crate::errors::{DocSystemError, Result};
use crate::utils::validate::{validate_bucket_name, validate_object_key};

pub struct FilesystemObjectStore {
    base_path: PathBuf,
    max_size: usize,
}

impl FilesystemObjectStore {
    pub async fn new(base_path: impl AsRef<Path>, max_size: usize) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            max_size,
        })
    }

    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        validate_bucket_name(bucket)
            .map_err(|e| DocSystemError::validation(format!("{}: {bucket}", e.message())))?;
        validate_object_key(key)
            .map_err(|e| DocSystemError::validation(format!("{}: {key}", e.message())))?;
        Ok(self.base_path.join(bucket).join(key))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait::async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        options: PutOptions,
    ) -> Result<()> {
        if bytes.len() > self.max_size {
            return Err(DocSystemError::object_store(format!(
                "对象超过大小限制 ({} > {} bytes)",
                bytes.len(),
                self.max_size
            )));
        }

        let object_path = self.object_path(bucket, key)?;
        if !options.overwrite && fs::try_exists(&object_path).await? {
            return Err(DocSystemError::object_store(format!(
                "对象已存在: {bucket}/{key}"
            )));
        }

        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        if let Err(e) = fs::rename(&temp_path, &object_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!("Stored object {}/{} ({} bytes)", bucket, key, bytes.len());
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        let object_path = self.object_path(bucket, key)?;
        match fs::read(&object_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
