use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::config::AppConfig;
use crate::utils::escape_html;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem;color:#222}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:.3rem .6rem}\
.caption{color:#666;font-size:.9rem}\
.grid{display:grid;gap:1rem}\
.card{border:1px dashed #999;padding:.5rem;text-align:center;break-inside:avoid}\
.card img{width:100%;max-width:240px}";

/// 包装为完整 HTML 文档
pub fn render_page(status: StatusCode, body: &str) -> HttpResponse {
    let title = escape_html(&AppConfig::get().app.system_name);
    let html = format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n"
    );
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// 错误提示页
pub fn render_message(status: StatusCode, message: &str) -> HttpResponse {
    render_page(
        status,
        &format!("<p class=\"error\">{}</p>", escape_html(message)),
    )
}
