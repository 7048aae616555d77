pub mod pages;
pub mod trabalhos;

pub use pages::PageService;
pub use trabalhos::TrabalhoService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::access::AccessContext;
use crate::models::{ApiResponse, ErrorCode};
use crate::qr::QrSettings;
use crate::storage::Storage;

/// 从 app data 中取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 从 app data 中取二维码设置，未注册时使用默认值
pub(crate) fn qr_settings_from_request(request: &HttpRequest) -> QrSettings {
    request
        .app_data::<web::Data<QrSettings>>()
        .map(|settings| settings.get_ref().clone())
        .unwrap_or_default()
}

/// 计算详情链接使用的基础地址
pub(crate) fn resolve_base_url(request: &HttpRequest, provided: Option<&str>) -> String {
    let info = request.connection_info();
    let fallback = format!("{}://{}", info.scheme(), info.host());
    qr_settings_from_request(request).pick_base_url(provided, &fallback)
}

/// 管理操作的权限校验
pub(crate) fn ensure_admin(access: &AccessContext) -> Result<(), HttpResponse> {
    if access.is_admin() {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Forbidden: admin password required",
        )))
    }
}
