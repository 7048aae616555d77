use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TrabalhoService;
use crate::access::AccessContext;
use crate::models::{ApiResponse, ErrorCode, trabalhos::requests::TrabalhoForm};
use crate::services::ensure_admin;

pub async fn update_trabalho(
    service: &TrabalhoService,
    request: &HttpRequest,
    access: AccessContext,
    id: String,
    form: TrabalhoForm,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = ensure_admin(&access) {
        return Ok(resp);
    }

    if let Err(msg) = form.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::TrabalhoInvalid, msg)));
    }

    let storage = service.get_storage(request);

    // 查询作品
    let mut trabalho = match storage.get_trabalho_by_id(&id).await {
        Ok(Some(trabalho)) => trabalho,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TrabalhoNotFound,
                "Trabalho não encontrado.",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to get trabalho: {e}"),
                )),
            );
        }
    };

    trabalho.apply(form);

    match storage.update_trabalho(trabalho.clone()).await {
        Ok(true) => {
            info!("Trabalho {} updated", trabalho.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(trabalho, "Atualizado.")))
        }
        // 查询与更新之间被删除
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TrabalhoNotFound,
            "Trabalho não encontrado.",
        ))),
        Err(e) => {
            error!("Trabalho update failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::TrabalhoUpdateFailed,
                    format!("Trabalho update failed: {e}"),
                )),
            )
        }
    }
}
