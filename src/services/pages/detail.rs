use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::PageService;
use super::layout::{render_message, render_page};
use crate::access::AccessContext;
use crate::models::trabalhos::entities::Trabalho;
use crate::utils::escape_html;

pub const NOT_FOUND_MESSAGE: &str = "Trabalho não encontrado.";

/// 详情页主体
pub fn render_detail(trabalho: &Trabalho) -> String {
    let fields = [
        ("Título", trabalho.titulo.clone()),
        ("Aluno(a)", trabalho.aluno.clone()),
        ("Orientador", trabalho.orientador.clone()),
        ("Áreas", trabalho.areas.clone()),
        ("Avaliador 1", trabalho.avaliador1.clone()),
        ("Avaliador 2", trabalho.avaliador2.clone()),
        ("Nº do Painel", trabalho.painel.to_string()),
    ];

    let mut body = String::from("<h2>Detalhes do Trabalho</h2>\n");
    for (label, value) in fields {
        body.push_str(&format!(
            "<p><strong>{label}:</strong> {}</p>\n",
            escape_html(&value)
        ));
    }
    body.push_str(&format!(
        "<p class=\"caption\">Cadastrado em: {}</p>",
        escape_html(&trabalho.created_at)
    ));
    body
}

pub async fn detail_page(
    service: &PageService,
    request: &HttpRequest,
    id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_trabalho_by_id(id).await {
        Ok(Some(trabalho)) => Ok(render_page(StatusCode::OK, &render_detail(&trabalho))),
        Ok(None) => Ok(render_message(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)),
        Err(e) => {
            error!("Failed to load trabalho {}: {}", id, e);
            Ok(render_message(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Erro ao carregar o trabalho: {e}"),
            ))
        }
    }
}

/// 首页列表
pub fn render_index(trabalhos: &[Trabalho], access: &AccessContext) -> String {
    let mut body = String::from("<h2>Lista &amp; QR</h2>\n");
    if trabalhos.is_empty() {
        body.push_str("<p>Nenhum trabalho cadastrado.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Nº do Painel</th><th>Aluno(a)</th><th>Título</th><th>QR</th></tr>\n",
        );
        for t in trabalhos {
            let id = escape_html(&t.id);
            body.push_str(&format!(
                "<tr><td>{}</td><td><a href=\"/?id={id}\">{}</a></td><td>{}</td>\
                 <td><a href=\"/api/v1/trabalhos/{id}/qr\">QR (PNG)</a></td></tr>\n",
                t.painel,
                escape_html(&t.aluno),
                escape_html(&t.titulo),
            ));
        }
        body.push_str("</table>\n");
    }
    body.push_str("<p><a href=\"/cards\">Etiquetas p/ impressão</a></p>\n");
    if access.is_admin() {
        body.push_str("<p><a href=\"/api/v1/trabalhos/export\">Exportar CSV</a></p>\n");
    }
    body
}

pub async fn index_page(
    service: &PageService,
    request: &HttpRequest,
    access: AccessContext,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_trabalhos().await {
        Ok(trabalhos) => Ok(render_page(StatusCode::OK, &render_index(&trabalhos, &access))),
        Err(e) => {
            error!("Failed to list trabalhos: {}", e);
            Ok(render_message(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Erro ao listar trabalhos: {e}"),
            ))
        }
    }
}
