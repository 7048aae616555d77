//! 公开 HTML 页面：首页、详情页、打印卡片

pub mod cards;
pub mod detail;
pub mod layout;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::access::AccessContext;
use crate::models::trabalhos::requests::{CardsPageParams, DetailPageParams};
use crate::storage::Storage;

pub struct PageService;

impl PageService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 存储由 app data 注入
    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(request)
    }

    // 首页或详情页（?id=）
    pub async fn index(
        &self,
        request: &HttpRequest,
        access: AccessContext,
        query: DetailPageParams,
    ) -> ActixResult<HttpResponse> {
        match query.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => detail::detail_page(self, request, id).await,
            None => detail::index_page(self, request, access).await,
        }
    }

    // 打印卡片
    pub async fn cards(
        &self,
        request: &HttpRequest,
        query: CardsPageParams,
    ) -> ActixResult<HttpResponse> {
        cards::cards_page(self, request, query).await
    }
}
