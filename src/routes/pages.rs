//! 公开 HTML 页面路由
//!
//! - `/`：无 `id` 时为列表页，带 `?id=` 时为详情页（二维码指向这里）
//! - `/cards`：打印用二维码卡片

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::access::AccessContext;
use crate::models::trabalhos::requests::{CardsPageParams, DetailPageParams};
use crate::services::PageService;

static PAGE_SERVICE: Lazy<PageService> = Lazy::new(PageService::new_lazy);

pub async fn index(
    req: HttpRequest,
    access: AccessContext,
    query: web::Query<DetailPageParams>,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.index(&req, access, query.into_inner()).await
}

pub async fn cards(
    req: HttpRequest,
    query: web::Query<CardsPageParams>,
) -> ActixResult<HttpResponse> {
    PAGE_SERVICE.cards(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_page_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/cards", web::get().to(cards));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessPolicy;
    use crate::config::DatabaseConfig;
    use crate::middlewares;
    use crate::models::trabalhos::entities::Trabalho;
    use crate::models::trabalhos::requests::TrabalhoForm;
    use crate::qr::QrSettings;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use std::sync::Arc;

    async fn seeded_storage() -> (Arc<dyn Storage>, String) {
        let storage = SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
        .expect("in-memory sqlite should open");
        let saved = storage
            .insert_trabalho(Trabalho::new(TrabalhoForm {
                aluno: "Ana".to_string(),
                titulo: "Robótica educacional".to_string(),
                painel: 5,
                ..Default::default()
            }))
            .await
            .unwrap();
        (Arc::new(storage), saved.id)
    }

    macro_rules! init_app {
        ($storage:expr) => {
            test::init_service(
                App::new()
                    .wrap(middlewares::ResolveAccess::new(1000))
                    .app_data(web::Data::new($storage.clone()))
                    .app_data(web::Data::new(AccessPolicy::new(Some("x".to_string()))))
                    .app_data(web::Data::new(QrSettings::default()))
                    .configure(configure_page_routes),
            )
            .await
        };
    }

    async fn body_text<B: actix_web::body::MessageBody>(
        resp: actix_web::dev::ServiceResponse<B>,
    ) -> String {
        String::from_utf8(test::read_body(resp).await.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn test_detail_page() {
        let (storage, id) = seeded_storage().await;
        let app = init_app!(storage);

        let req = test::TestRequest::get()
            .uri(&format!("/?id={id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("Detalhes do Trabalho"));
        assert!(html.contains("Robótica educacional"));
    }

    #[actix_web::test]
    async fn test_detail_page_missing() {
        let (storage, _) = seeded_storage().await;
        let app = init_app!(storage);

        let req = test::TestRequest::get().uri("/?id=nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(body_text(resp).await.contains("Trabalho não encontrado."));
    }

    #[actix_web::test]
    async fn test_index_lists_records() {
        let (storage, id) = seeded_storage().await;
        let app = init_app!(storage);

        let req = test::TestRequest::get().uri("/").to_request();
        let html = body_text(test::call_service(&app, req).await).await;
        assert!(html.contains(&format!("/?id={id}")));
        // 未提供口令时不显示导出入口
        assert!(!html.contains("/export"));
    }

    #[actix_web::test]
    async fn test_cards_page() {
        let (storage, _) = seeded_storage().await;
        let app = init_app!(storage);

        let req = test::TestRequest::get().uri("/cards?cols=9").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_text(resp).await;
        assert!(html.contains("Ana — Painel 5"));
        assert!(html.contains("repeat(5,1fr)"));
        assert!(html.contains("data:image/png;base64,"));
    }
}
