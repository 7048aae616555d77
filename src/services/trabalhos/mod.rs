pub mod create;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod qr;
pub mod session;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::access::AccessContext;
use crate::models::trabalhos::requests::{
    TrabalhoExportParams, TrabalhoForm, TrabalhoImportParams, TrabalhoLinkParams,
    TrabalhoListParams,
};
use crate::storage::Storage;

pub struct TrabalhoService;

impl TrabalhoService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 存储由 app data 注入
    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(request)
    }

    // 获取作品列表
    pub async fn list_trabalhos(
        &self,
        request: &HttpRequest,
        query: TrabalhoListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_trabalhos(self, request, query).await
    }

    // 根据ID获取作品
    pub async fn get_trabalho(
        &self,
        request: &HttpRequest,
        id: String,
        query: TrabalhoLinkParams,
    ) -> ActixResult<HttpResponse> {
        get::get_trabalho(self, request, id, query).await
    }

    // 新增作品
    pub async fn create_trabalho(
        &self,
        request: &HttpRequest,
        access: AccessContext,
        form: TrabalhoForm,
        query: TrabalhoLinkParams,
    ) -> ActixResult<HttpResponse> {
        create::create_trabalho(self, request, access, form, query).await
    }

    // 编辑作品
    pub async fn update_trabalho(
        &self,
        request: &HttpRequest,
        access: AccessContext,
        id: String,
        form: TrabalhoForm,
    ) -> ActixResult<HttpResponse> {
        update::update_trabalho(self, request, access, id, form).await
    }

    // 删除作品
    pub async fn delete_trabalho(
        &self,
        request: &HttpRequest,
        access: AccessContext,
        id: String,
    ) -> ActixResult<HttpResponse> {
        delete::delete_trabalho(self, request, access, id).await
    }

    // 导入表格
    pub async fn import_trabalhos(
        &self,
        request: &HttpRequest,
        access: AccessContext,
        payload: Multipart,
        params: TrabalhoImportParams,
    ) -> ActixResult<HttpResponse> {
        import::import_trabalhos(self, request, access, payload, params).await
    }

    // 导出表格
    pub async fn export_trabalhos(
        &self,
        request: &HttpRequest,
        access: AccessContext,
        params: TrabalhoExportParams,
    ) -> ActixResult<HttpResponse> {
        export::export_trabalhos(self, request, access, params).await
    }

    // 下载二维码
    pub async fn download_qr(
        &self,
        request: &HttpRequest,
        id: String,
        query: TrabalhoLinkParams,
    ) -> ActixResult<HttpResponse> {
        qr::download_qr(self, request, id, query).await
    }

    // 当前请求的访问级别
    pub async fn session(&self, access: AccessContext) -> ActixResult<HttpResponse> {
        session::session(access).await
    }
}
