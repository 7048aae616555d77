use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::AccessContext;
use crate::config::AppConfig;
use crate::middlewares;
use crate::models::trabalhos::requests::{
    TrabalhoExportParams, TrabalhoForm, TrabalhoImportParams, TrabalhoLinkParams,
    TrabalhoListParams,
};
use crate::services::TrabalhoService;

// 懒加载的全局 TrabalhoService 实例
static TRABALHO_SERVICE: Lazy<TrabalhoService> = Lazy::new(TrabalhoService::new_lazy);

// HTTP处理程序
pub async fn list_trabalhos(
    req: HttpRequest,
    query: web::Query<TrabalhoListParams>,
) -> ActixResult<HttpResponse> {
    TRABALHO_SERVICE
        .list_trabalhos(&req, query.into_inner())
        .await
}

pub async fn get_trabalho(
    req: HttpRequest,
    id: web::Path<String>,
    query: web::Query<TrabalhoLinkParams>,
) -> ActixResult<HttpResponse> {
    TRABALHO_SERVICE
        .get_trabalho(&req, id.into_inner(), query.into_inner())
        .await
}

pub async fn create_trabalho(
    req: HttpRequest,
    access: AccessContext,
    form: web::Json<TrabalhoForm>,
    query: web::Query<TrabalhoLinkParams>,
) -> ActixResult<HttpResponse> {
    TRABALHO_SERVICE
        .create_trabalho(&req, access, form.into_inner(), query.into_inner())
        .await
}

pub async fn update_trabalho(
    req: HttpRequest,
    access: AccessContext,
    id: web::Path<String>,
    form: web::Json<TrabalhoForm>,
) -> ActixResult<HttpResponse> {
    TRABALHO_SERVICE
        .update_trabalho(&req, access, id.into_inner(), form.into_inner())
        .await
}

pub async fn delete_trabalho(
    req: HttpRequest,
    access: AccessContext,
    id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    TRABALHO_SERVICE
        .delete_trabalho(&req, access, id.into_inner())
        .await
}

pub async fn import_trabalhos(
    req: HttpRequest,
    access: AccessContext,
    payload: Multipart,
    params: web::Query<TrabalhoImportParams>,
) -> ActixResult<HttpResponse> {
    TRABALHO_SERVICE
        .import_trabalhos(&req, access, payload, params.into_inner())
        .await
}

pub async fn export_trabalhos(
    req: HttpRequest,
    access: AccessContext,
    params: web::Query<TrabalhoExportParams>,
) -> ActixResult<HttpResponse> {
    TRABALHO_SERVICE
        .export_trabalhos(&req, access, params.into_inner())
        .await
}

pub async fn download_qr(
    req: HttpRequest,
    id: web::Path<String>,
    query: web::Query<TrabalhoLinkParams>,
) -> ActixResult<HttpResponse> {
    TRABALHO_SERVICE
        .download_qr(&req, id.into_inner(), query.into_inner())
        .await
}

// 配置路由
// 读取操作公开；写入操作由处理程序按 AccessContext 校验，导入导出整体要求管理员
pub fn configure_trabalhos_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/trabalhos")
            .wrap(middlewares::RateLimit::api(&AppConfig::get().rate_limit))
            // 固定路径需在 /{id} 之前注册
            .service(
                web::resource("/import")
                    .wrap(middlewares::RequireAdmin)
                    .wrap(middlewares::RateLimit::import())
                    .route(web::post().to(import_trabalhos)),
            )
            .service(
                web::resource("/export")
                    .wrap(middlewares::RequireAdmin)
                    .route(web::get().to(export_trabalhos)),
            )
            .route("", web::get().to(list_trabalhos))
            .route("", web::post().to(create_trabalho))
            .route("/{id}/qr", web::get().to(download_qr))
            .route("/{id}", web::get().to(get_trabalho))
            .route("/{id}", web::put().to(update_trabalho))
            .route("/{id}", web::delete().to(delete_trabalho)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{ADMIN_PASSWORD_HEADER, AccessPolicy};
    use crate::config::DatabaseConfig;
    use crate::qr::QrSettings;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use serde_json::{Value, json};
    use std::sync::Arc;

    async fn memory_storage() -> Arc<dyn Storage> {
        let storage = SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
        .expect("in-memory sqlite should open");
        Arc::new(storage)
    }

    macro_rules! init_app {
        ($storage:expr, $secret:expr) => {
            test::init_service(
                App::new()
                    .wrap(middlewares::ResolveAccess::new(1000))
                    .app_data(web::Data::new($storage.clone()))
                    .app_data(web::Data::new(AccessPolicy::new($secret)))
                    .app_data(web::Data::new(QrSettings::default()))
                    .configure(configure_trabalhos_routes)
                    .configure(crate::routes::configure_session_routes),
            )
            .await
        };
    }

    fn secret() -> Option<String> {
        Some("x".to_string())
    }

    fn multipart_body(file_name: &str, content: &[u8]) -> (String, Vec<u8>) {
        let boundary = "----trabalhosboundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        (format!("multipart/form-data; boundary={boundary}"), body)
    }

    #[actix_web::test]
    async fn test_wrong_password_hides_admin_actions() {
        let storage = memory_storage().await;
        let app = init_app!(storage, secret());

        let req = test::TestRequest::get()
            .uri("/api/v1/session")
            .insert_header((ADMIN_PASSWORD_HEADER, ""))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["visibility"], "public");
        let actions = body["data"]["actions"].as_array().unwrap();
        assert!(!actions.iter().any(|a| a == "create"));

        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos")
            .insert_header((ADMIN_PASSWORD_HEADER, ""))
            .set_json(json!({"aluno": "Ana"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/v1/trabalhos/export")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let (content_type, body) = multipart_body("dados.csv", b"aluno\nAna\n");
        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos/import")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        assert_eq!(storage.count_trabalhos().await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_repeated_wrong_passwords_are_throttled() {
        let storage = memory_storage().await;
        let app = test::init_service(
            App::new()
                .wrap(middlewares::ResolveAccess::new(3))
                .app_data(web::Data::new(storage.clone()))
                .app_data(web::Data::new(AccessPolicy::new(secret())))
                .app_data(web::Data::new(QrSettings::default()))
                .configure(crate::routes::configure_session_routes),
        )
        .await;
        let peer = "10.9.9.9:1234".parse().unwrap();

        for guess in ["a", "b", "c"] {
            let req = test::TestRequest::get()
                .uri("/api/v1/session")
                .peer_addr(peer)
                .insert_header((ADMIN_PASSWORD_HEADER, guess))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        // 达到上限后连正确口令也不再校验
        for guess in ["d", "x"] {
            let req = test::TestRequest::get()
                .uri("/api/v1/session")
                .peer_addr(peer)
                .insert_header((ADMIN_PASSWORD_HEADER, guess))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
            assert!(resp.headers().contains_key(header::RETRY_AFTER));
        }

        // 不带口令的公开访问不受影响
        let req = test::TestRequest::get()
            .uri("/api/v1/session")
            .peer_addr(peer)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["visibility"], "public");

        // 其他客户端照常校验
        let req = test::TestRequest::get()
            .uri("/api/v1/session")
            .peer_addr("10.9.9.10:1234".parse().unwrap())
            .insert_header((ADMIN_PASSWORD_HEADER, "x"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["visibility"], "admin");
    }

    #[actix_web::test]
    async fn test_admin_session_lists_all_actions() {
        let storage = memory_storage().await;
        let app = init_app!(storage, secret());

        let req = test::TestRequest::get()
            .uri("/api/v1/session")
            .insert_header((ADMIN_PASSWORD_HEADER, "x"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["visibility"], "admin");
        let actions = body["data"]["actions"].as_array().unwrap();
        assert!(actions.iter().any(|a| a == "export"));
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let storage = memory_storage().await;
        let app = init_app!(storage, secret());

        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos?base_url=https://evento.example/")
            .insert_header((ADMIN_PASSWORD_HEADER, "x"))
            .set_json(json!({"aluno": "  Ana ", "titulo": "Óptica", "painel": 5}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["data"]["aluno"], "Ana");
        assert_eq!(
            body["data"]["detail_url"],
            format!("https://evento.example/?id={id}")
        );

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/trabalhos/{id}"))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["titulo"], "Óptica");
        assert_eq!(body["data"]["painel"], 5);
        assert!(
            body["data"]["detail_url"]
                .as_str()
                .unwrap()
                .ends_with(&format!("/?id={id}"))
        );
    }

    #[actix_web::test]
    async fn test_negative_painel_rejected() {
        let storage = memory_storage().await;
        let app = init_app!(storage, None);

        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos")
            .set_json(json!({"aluno": "Ana", "painel": -1}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_list_order_and_search() {
        let storage = memory_storage().await;
        let app = init_app!(storage, None);

        for (aluno, titulo, painel) in [("Ana", "Robótica", 5), ("Bea", "Química verde", 2)] {
            let req = test::TestRequest::post()
                .uri("/api/v1/trabalhos")
                .set_json(json!({"aluno": aluno, "titulo": titulo, "painel": painel}))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/api/v1/trabalhos").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["items"][0]["aluno"], "Bea");
        assert_eq!(body["data"]["items"][1]["aluno"], "Ana");

        let req = test::TestRequest::get()
            .uri("/api/v1/trabalhos?q=ROB")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["aluno"], "Ana");
    }

    #[actix_web::test]
    async fn test_update_and_delete() {
        let storage = memory_storage().await;
        let app = init_app!(storage, None);

        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos")
            .set_json(json!({"aluno": "Ana", "painel": 1}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();
        let created_at = body["data"]["created_at"].clone();

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/trabalhos/{id}"))
            .set_json(json!({"aluno": "Ana Lima", "painel": 9}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["id"], id.as_str());
        assert_eq!(body["data"]["aluno"], "Ana Lima");
        assert_eq!(body["data"]["painel"], 9);
        assert_eq!(body["data"]["created_at"], created_at);

        let req = test::TestRequest::put()
            .uri("/api/v1/trabalhos/nope")
            .set_json(json!({"aluno": "X"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/trabalhos/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/trabalhos/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Trabalho não encontrado.");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/trabalhos/{id}"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_qr_download() {
        let storage = memory_storage().await;
        let app = init_app!(storage, secret());

        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos")
            .insert_header((ADMIN_PASSWORD_HEADER, "x"))
            .set_json(json!({"aluno": "Ana"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        // 二维码对公开访问可用
        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/trabalhos/{id}/qr"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains(&format!("qr_{id}.png")));
        let png = test::read_body(resp).await;
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));

        let req = test::TestRequest::get()
            .uri("/api/v1/trabalhos/nope/qr")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_import_preview_then_import() {
        let storage = memory_storage().await;
        let app = init_app!(storage, None);

        let csv = "Aluno(a),Título,Nº do Painel,Coluna extra\n\
                   Ana,Robótica,5,ignorada\n\
                   Bea,Química,abc,ignorada\n";

        let (content_type, body) = multipart_body("planilha.csv", csv.as_bytes());
        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos/import?preview=true")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["total"], 2);
        assert_eq!(body["data"]["columns"][0], "aluno");
        assert_eq!(body["data"]["rows"][1]["painel"], "abc");
        assert_eq!(storage.count_trabalhos().await.unwrap(), 0);

        let (content_type, body) = multipart_body("planilha.csv", csv.as_bytes());
        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos/import")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["imported"], 2);

        let list = storage.list_trabalhos().await.unwrap();
        assert_eq!(list[0].aluno, "Bea");
        assert_eq!(list[0].painel, 0);
        assert_eq!(list[1].titulo, "Robótica");
        assert_eq!(list[1].orientador, "");
    }

    #[actix_web::test]
    async fn test_import_reads_only_first_file_field() {
        let storage = memory_storage().await;
        let app = init_app!(storage, None);

        let boundary = "----trabalhosboundary";
        let mut body = Vec::new();
        for (name, content) in [("a.csv", "aluno\nAna\n"), ("b.csv", "aluno\nBea\n")] {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\n\
                     Content-Type: text/csv\r\n\r\n{content}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos/import")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .set_payload(body)
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["imported"], 1);

        let list = storage.list_trabalhos().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].aluno, "Ana");
    }

    #[actix_web::test]
    async fn test_import_rejects_fake_xlsx() {
        let storage = memory_storage().await;
        let app = init_app!(storage, None);

        let (content_type, body) = multipart_body("planilha.xlsx", b"aluno\nAna\n");
        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos/import")
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_export_csv() {
        let storage = memory_storage().await;
        let app = init_app!(storage, secret());

        let req = test::TestRequest::post()
            .uri("/api/v1/trabalhos")
            .insert_header((ADMIN_PASSWORD_HEADER, "x"))
            .set_json(json!({"aluno": "Ana", "painel": 3}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/v1/trabalhos/export")
            .insert_header((ADMIN_PASSWORD_HEADER, "x"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let disposition = resp
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("trabalhos_export.csv"));
        let body = test::read_body(resp).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.starts_with(
            "id,aluno,orientador,areas,titulo,avaliador1,avaliador2,painel,created_at"
        ));
        assert!(text.contains(",Ana,"));
    }
}
