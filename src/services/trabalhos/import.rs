//! 作品导入服务

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use tracing::{error, info};

use super::TrabalhoService;
use crate::access::AccessContext;
use crate::config::AppConfig;
use crate::import::{CANONICAL_COLUMNS, import_rows, parse_table, project_canonical};
use crate::models::trabalhos::requests::TrabalhoImportParams;
use crate::models::trabalhos::responses::{TrabalhoImportPreviewResponse, TrabalhoImportResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::ensure_admin;
use crate::utils::file_magic::extension_of;
use crate::utils::validate_magic_bytes;

/// 预览返回的行数
const PREVIEW_ROWS: usize = 20;

/// 读取文件失败的原因
enum UploadError {
    TooLarge(usize),
    Read(String),
    Missing,
}

impl UploadError {
    fn into_response(self) -> HttpResponse {
        match self {
            Self::TooLarge(limit) => HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                ErrorCode::FileSizeExceeded,
                format!("File exceeds the {limit} byte limit"),
            )),
            Self::Read(msg) => HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("Failed to read upload: {msg}"),
            )),
            Self::Missing => HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "Missing file field",
            )),
        }
    }
}

/// 导入作品（CSV / XLSX）
pub async fn import_trabalhos(
    service: &TrabalhoService,
    request: &HttpRequest,
    access: AccessContext,
    mut payload: Multipart,
    params: TrabalhoImportParams,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = ensure_admin(&access) {
        return Ok(resp);
    }

    let limits = &AppConfig::get().upload;

    let (file_bytes, file_name) =
        match read_file_from_multipart(&mut payload, limits.max_size).await {
            Ok(result) => result,
            Err(e) => return Ok(e.into_response()),
        };

    // 校验文件内容与扩展名是否一致，非 .xlsx 一律按 CSV 处理
    let kind = match extension_of(&file_name).as_str() {
        ".xlsx" => ".xlsx",
        _ => ".csv",
    };
    if !validate_magic_bytes(&file_bytes, kind) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            "File content does not match its extension",
        )));
    }

    let table = match parse_table(&file_bytes, &file_name) {
        Ok(table) => table,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ImportFileParseFailed,
                e.message().to_string(),
            )));
        }
    };

    let rows = project_canonical(&table);

    if rows.len() > limits.max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!("At most {} rows per import", limits.max_rows),
        )));
    }

    if params.preview {
        let total = rows.len();
        let rows = rows.into_iter().take(PREVIEW_ROWS).collect();
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            TrabalhoImportPreviewResponse {
                total,
                columns: CANONICAL_COLUMNS.to_vec(),
                rows,
            },
            "Pré-visualização",
        )));
    }

    let storage = service.get_storage(request);

    match import_rows(storage.as_ref(), &rows).await {
        Ok(report) => {
            info!(
                "Imported {}/{} trabalhos from {}",
                report.imported, report.total, file_name
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TrabalhoImportResponse {
                    total: report.total,
                    imported: report.imported,
                },
                format!("Importados {} registros.", report.imported),
            )))
        }
        Err(e) => {
            error!("Import of {} failed: {}", file_name, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Import failed: {e}"),
                )),
            )
        }
    }
}

async fn read_file_from_multipart(
    payload: &mut Multipart,
    max_size: usize,
) -> Result<(Vec<u8>, String), UploadError> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();
    let mut found = false;

    // 只读取第一个 file 字段，其余字段忽略
    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| UploadError::Read(e.to_string()))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            found = true;
            // 获取文件名
            file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .unwrap_or("upload.csv")
                .to_string();

            // 读取内容
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| UploadError::Read(e.to_string()))?;
                if file_bytes.len() + data.len() > max_size {
                    return Err(UploadError::TooLarge(max_size));
                }
                file_bytes.extend_from_slice(&data);
            }
            break;
        }
    }

    if !found || file_bytes.is_empty() {
        return Err(UploadError::Missing);
    }

    Ok((file_bytes, file_name))
}
