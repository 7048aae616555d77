use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TrabalhoService;
use crate::access::AccessContext;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::ensure_admin;

pub async fn delete_trabalho(
    service: &TrabalhoService,
    request: &HttpRequest,
    access: AccessContext,
    id: String,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = ensure_admin(&access) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.delete_trabalho(&id).await {
        Ok(true) => {
            info!("Trabalho {} deleted", id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Excluído.")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TrabalhoNotFound,
            "Trabalho não encontrado.",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::TrabalhoDeleteFailed,
                format!("Trabalho deletion failed: {e}"),
            )),
        ),
    }
}
