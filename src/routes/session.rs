use actix_web::{HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::AccessContext;
use crate::config::AppConfig;
use crate::middlewares::RateLimit;
use crate::services::TrabalhoService;

static TRABALHO_SERVICE: Lazy<TrabalhoService> = Lazy::new(TrabalhoService::new_lazy);

pub async fn get_session(access: AccessContext) -> ActixResult<HttpResponse> {
    TRABALHO_SERVICE.session(access).await
}

// 配置路由
pub fn configure_session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/session")
            .wrap(RateLimit::api(&AppConfig::get().rate_limit))
            .route("", web::get().to(get_session)),
    );
}
