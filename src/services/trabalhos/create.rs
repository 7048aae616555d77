use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TrabalhoService;
use crate::access::AccessContext;
use crate::errors::TrabalhosError;
use crate::models::{
    ApiResponse, ErrorCode,
    trabalhos::{
        entities::Trabalho,
        requests::{TrabalhoForm, TrabalhoLinkParams},
        responses::TrabalhoResponse,
    },
};
use crate::qr::build_detail_url;
use crate::services::{ensure_admin, resolve_base_url};

pub async fn create_trabalho(
    service: &TrabalhoService,
    request: &HttpRequest,
    access: AccessContext,
    form: TrabalhoForm,
    query: TrabalhoLinkParams,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = ensure_admin(&access) {
        return Ok(resp);
    }

    if let Err(msg) = form.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::TrabalhoInvalid, msg)));
    }

    let storage = service.get_storage(request);

    match storage.insert_trabalho(Trabalho::new(form)).await {
        Ok(trabalho) => {
            info!("Trabalho {} created (painel {})", trabalho.id, trabalho.painel);
            let base = resolve_base_url(request, query.base_url.as_deref());
            let detail_url = build_detail_url(&base, &trabalho.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                TrabalhoResponse {
                    trabalho,
                    detail_url,
                },
                "Registro salvo!",
            )))
        }
        Err(e) => {
            error!("Trabalho creation failed: {}", e);
            Ok(creation_error_response(&e))
        }
    }
}

/// 存储错误到响应的映射，唯一约束冲突返回 409
pub(crate) fn creation_error_response(err: &TrabalhosError) -> HttpResponse {
    match err {
        TrabalhosError::Conflict(_) => HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::TrabalhoAlreadyExists,
            "Trabalho id already exists",
        )),
        _ => HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::TrabalhoCreationFailed,
            format!("Trabalho creation failed: {err}"),
        )),
    }
}
