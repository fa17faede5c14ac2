use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::documents::{FormWorkflow, WorkflowSettings};
use crate::storage::{ObjectStore, RecordStore, create_object_store, create_record_store};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StartupContext {
    pub workflow: Arc<FormWorkflow>,
}

/// 创建对象存储与记录存储
async fn create_stores(
    config: &AppConfig,
) -> Result<(Arc<dyn ObjectStore>, Arc<dyn RecordStore>)> {
    warn!(
        "Attempting to create {} object store and {} record store",
        config.storage.backend, config.records.backend
    );

    let objects = create_object_store(&config.storage).await?;
    let records = create_record_store(config).await?;

    if config.storage.backend == "memory" || config.records.backend == "memory" {
        warn!("In-memory storage is enabled, submissions will not survive a restart");
    }

    Ok((objects, records))
}

/// 准备服务器启动的上下文
/// 包括存储后端和表单工作流
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let config = AppConfig::get();

    let (objects, records) = create_stores(config)
        .await
        .expect("Failed to create storage backends");
    warn!("Storage backends initialized and migrations completed");

    let settings = WorkflowSettings::from(config);
    debug!(
        "Download links use base URL {} and bucket {}, file limit {} bytes",
        settings.public_base_url, settings.bucket, settings.limits.max_file_size
    );

    StartupContext {
        workflow: Arc::new(FormWorkflow::new(objects, records, settings)),
    }
}
