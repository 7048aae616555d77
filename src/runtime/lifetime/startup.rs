use crate::access::AccessPolicy;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::qr::QrSettings;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub access: AccessPolicy,
    pub qr: QrSettings,
}

/// 报告当前记录数量
async fn report_records(storage: &Arc<dyn Storage>) {
    match storage.count_trabalhos().await {
        Ok(count) => info!("Database holds {} trabalho(s)", count),
        Err(e) => warn!("Failed to count trabalhos: {}", e),
    }
}

/// 准备服务器启动的上下文
/// 包括存储、访问策略和二维码设置
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    // 重复安装时返回 Err，忽略即可
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    report_records(&storage).await;

    let access = AccessPolicy::from_config(config);
    if access.is_protected() {
        warn!("Admin password configured, write operations require the X-Admin-Password header");
    } else {
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - ALL OPERATIONS ARE OPEN");
        warn!("  Set ADMIN_PASS to restrict create/import/edit/delete/export");
        warn!("==========================================================");
    }

    let qr = QrSettings::from_config(config);
    match &qr.base_url {
        Some(base) => info!("QR detail links use configured base URL {}", base),
        None => debug!("QR detail links derive the base URL from each request"),
    }

    Ok(StartupContext {
        storage,
        access,
        qr,
    })
}
