use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use tracing::error;

use super::TrabalhoService;
use crate::errors::Result;
use crate::models::{ApiResponse, ErrorCode, trabalhos::requests::TrabalhoLinkParams};
use crate::qr::{QrSettings, build_detail_url, make_qr_image, qr_file_name, to_png_bytes};
use crate::services::{qr_settings_from_request, resolve_base_url};

/// 生成详情链接的 PNG 二维码
pub(crate) fn render_png(url: &str, settings: &QrSettings) -> Result<Vec<u8>> {
    let img = make_qr_image(url, settings)?;
    to_png_bytes(&img)
}

pub async fn download_qr(
    service: &TrabalhoService,
    request: &HttpRequest,
    id: String,
    query: TrabalhoLinkParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_trabalho_by_id(&id).await {
        Ok(Some(_)) => {}
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
    }

    let base = resolve_base_url(request, query.base_url.as_deref());
    let url = build_detail_url(&base, &id);
    let settings = qr_settings_from_request(request);

    match render_png(&url, &settings) {
        Ok(png) => Ok(HttpResponse::Ok()
            .insert_header((header::CONTENT_TYPE, "image/png"))
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", qr_file_name(&id)),
            ))
            .body(png)),
        Err(e) => {
            error!("QR generation failed for {}: {}", id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::QrGenerationFailed,
                    format!("QR generation failed: {e}"),
                )),
            )
        }
    }
}
