use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TrabalhoService;
use crate::models::{
    ApiResponse, ErrorCode,
    trabalhos::{requests::TrabalhoListParams, responses::TrabalhoListResponse},
};

pub async fn list_trabalhos(
    service: &TrabalhoService,
    request: &HttpRequest,
    query: TrabalhoListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let trabalhos = match storage.list_trabalhos().await {
        Ok(list) => list,
        Err(e) => {
            error!("Failed to list trabalhos: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list trabalhos: {e}"),
                )),
            );
        }
    };

    // 搜索过滤（学生、标题、导师、领域）
    let items: Vec<_> = match query.q.as_deref() {
        Some(q) if !q.trim().is_empty() => trabalhos.into_iter().filter(|t| t.matches(q)).collect(),
        _ => trabalhos,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TrabalhoListResponse {
            total: items.len(),
            items,
        },
        "Trabalhos retrieved successfully",
    )))
}
