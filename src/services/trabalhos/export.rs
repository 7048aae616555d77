//! 作品导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use rust_xlsxwriter::{Format, Workbook};
use tracing::error;

use super::TrabalhoService;
use crate::access::AccessContext;
use crate::models::trabalhos::entities::Trabalho;
use crate::models::trabalhos::requests::TrabalhoExportParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::ensure_admin;

/// 导出列，顺序固定
pub const EXPORT_COLUMNS: [&str; 9] = [
    "id",
    "aluno",
    "orientador",
    "areas",
    "titulo",
    "avaliador1",
    "avaliador2",
    "painel",
    "created_at",
];

/// 导出作品列表
pub async fn export_trabalhos(
    service: &TrabalhoService,
    request: &HttpRequest,
    access: AccessContext,
    params: TrabalhoExportParams,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = ensure_admin(&access) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    let trabalhos = match storage.list_trabalhos().await {
        Ok(list) => list,
        Err(e) => {
            error!("Failed to export trabalhos: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ExportFailed,
                    format!("Failed to export trabalhos: {e}"),
                )),
            );
        }
    };

    match params.format.as_str() {
        "xlsx" => export_xlsx(&trabalhos),
        _ => export_csv(&trabalhos),
    }
}

fn row_of(t: &Trabalho) -> [String; 9] {
    [
        t.id.clone(),
        t.aluno.clone(),
        t.orientador.clone(),
        t.areas.clone(),
        t.titulo.clone(),
        t.avaliador1.clone(),
        t.avaliador2.clone(),
        t.painel.to_string(),
        t.created_at.clone(),
    ]
}

/// 生成 CSV 内容
pub fn write_csv(trabalhos: &[Trabalho]) -> crate::errors::Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(EXPORT_COLUMNS)?;
    for t in trabalhos {
        wtr.write_record(row_of(t))?;
    }
    wtr.into_inner()
        .map_err(|e| crate::errors::TrabalhosError::file_operation(e.to_string()))
}

fn export_csv(trabalhos: &[Trabalho]) -> ActixResult<HttpResponse> {
    let data = write_csv(trabalhos).map_err(|e| {
        error!("CSV generation failed: {}", e);
        actix_web::error::ErrorInternalServerError(format!("CSV generation failed: {e}"))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"trabalhos_export.csv\"",
        ))
        .body(data))
}

fn export_xlsx(trabalhos: &[Trabalho]) -> ActixResult<HttpResponse> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // 表头格式
    let header_format = Format::new().set_bold();

    for (col, header) in EXPORT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| {
                error!("XLSX write failed: {}", e);
                actix_web::error::ErrorInternalServerError(format!("XLSX write failed: {e}"))
            })?;
    }

    for (row, t) in trabalhos.iter().enumerate() {
        let row = (row + 1) as u32;
        for (col, value) in row_of(t).iter().enumerate() {
            // 面板号写为数字
            let written = if col == 7 {
                worksheet.write_number(row, col as u16, t.painel as f64)
            } else {
                worksheet.write_string(row, col as u16, value)
            };
            written.map_err(|e| {
                error!("XLSX write failed: {}", e);
                actix_web::error::ErrorInternalServerError(format!("XLSX write failed: {e}"))
            })?;
        }
    }

    let buffer = workbook.save_to_buffer().map_err(|e| {
        error!("XLSX generation failed: {}", e);
        actix_web::error::ErrorInternalServerError(format!("XLSX generation failed: {e}"))
    })?;

    Ok(HttpResponse::Ok()
        .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"trabalhos_export.xlsx\"",
        ))
        .body(buffer))
}
