use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use base64::{Engine as _, engine::general_purpose};
use tracing::{error, warn};

use super::PageService;
use super::layout::{render_message, render_page};
use crate::models::trabalhos::entities::Trabalho;
use crate::models::trabalhos::requests::CardsPageParams;
use crate::qr::{QrSettings, build_detail_url, qr_file_name};
use crate::services::trabalhos::qr::render_png;
use crate::services::{qr_settings_from_request, resolve_base_url};
use crate::utils::escape_html;
use crate::utils::html::truncate_chars;

/// 未指定 ID 时默认展示的卡片数
const DEFAULT_CARD_COUNT: usize = 8;
/// 标题截断长度
const TITLE_MAX_CHARS: usize = 80;

/// 卡片说明文字
pub fn card_caption(trabalho: &Trabalho) -> String {
    format!("{} — Painel {}", trabalho.aluno, trabalho.painel)
}

/// 按选择顺序挑出记录，未选择时取前 8 条
pub fn select_cards(all: Vec<Trabalho>, ids: &[String]) -> Vec<Trabalho> {
    if ids.is_empty() {
        return all.into_iter().take(DEFAULT_CARD_COUNT).collect();
    }
    ids.iter()
        .filter_map(|id| all.iter().find(|t| &t.id == id).cloned())
        .collect()
}

fn render_card(trabalho: &Trabalho, base: &str, settings: &QrSettings) -> String {
    let url = build_detail_url(base, &trabalho.id);
    let image = match render_png(&url, settings) {
        Ok(png) => format!(
            "<img src=\"data:image/png;base64,{}\" alt=\"{}\">",
            general_purpose::STANDARD.encode(png),
            escape_html(&qr_file_name(&trabalho.id))
        ),
        Err(e) => {
            warn!("QR generation failed for {}: {}", trabalho.id, e);
            String::new()
        }
    };
    format!(
        "<div class=\"card\">{image}<p>{}</p><p class=\"caption\">{}</p></div>",
        escape_html(&card_caption(trabalho)),
        escape_html(&truncate_chars(&trabalho.titulo, TITLE_MAX_CHARS)),
    )
}

/// 卡片网格主体
pub fn render_cards(trabalhos: &[Trabalho], columns: usize, base: &str, settings: &QrSettings) -> String {
    let mut body = String::from("<h2>Cartões com QR para impressão</h2>\n");
    body.push_str(&format!(
        "<div class=\"grid\" style=\"grid-template-columns:repeat({columns},1fr)\">\n"
    ));
    for t in trabalhos {
        body.push_str(&render_card(t, base, settings));
        body.push('\n');
    }
    body.push_str("</div>\n");
    body.push_str(
        "<p class=\"caption\">Dica: imprima esta página do navegador em PDF para montar folhas com vários QR Codes.</p>",
    );
    body
}

pub async fn cards_page(
    service: &PageService,
    request: &HttpRequest,
    query: CardsPageParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let all = match storage.list_trabalhos().await {
        Ok(list) => list,
        Err(e) => {
            error!("Failed to list trabalhos: {}", e);
            return Ok(render_message(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Erro ao listar trabalhos: {e}"),
            ));
        }
    };

    let selected = select_cards(all, &query.id_list());
    let base = resolve_base_url(request, query.base_url.as_deref());
    let settings = qr_settings_from_request(request);

    Ok(render_page(
        StatusCode::OK,
        &render_cards(&selected, query.columns(), &base, &settings),
    ))
}
