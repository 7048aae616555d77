use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TrabalhoService;
use crate::models::{
    ApiResponse, ErrorCode,
    trabalhos::{requests::TrabalhoLinkParams, responses::TrabalhoResponse},
};
use crate::qr::build_detail_url;
use crate::services::resolve_base_url;

pub async fn get_trabalho(
    service: &TrabalhoService,
    request: &HttpRequest,
    id: String,
    query: TrabalhoLinkParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_trabalho_by_id(&id).await {
        Ok(Some(trabalho)) => {
            let base = resolve_base_url(request, query.base_url.as_deref());
            let detail_url = build_detail_url(&base, &trabalho.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TrabalhoResponse {
                    trabalho,
                    detail_url,
                },
                "Trabalho retrieved successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TrabalhoNotFound,
            "Trabalho não encontrado.",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to get trabalho: {e}"),
            )),
        ),
    }
}
