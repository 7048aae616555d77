use actix_web::{HttpResponse, Result as ActixResult};

use crate::access::AccessContext;
use crate::models::{ApiResponse, trabalhos::responses::SessionResponse};

/// 报告当前请求的访问级别与可用操作，客户端据此只展示允许的入口
pub async fn session(access: AccessContext) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        SessionResponse {
            visibility: access.visibility,
            actions: access.actions(),
        },
        "Session resolved",
    )))
}
