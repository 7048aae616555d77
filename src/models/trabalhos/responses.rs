use super::entities::Trabalho;
use crate::import::ImportRow;
use serde::Serialize;

// 单条作品响应（附带详情页链接）
#[derive(Debug, Serialize)]
pub struct TrabalhoResponse {
    #[serde(flatten)]
    pub trabalho: Trabalho,
    pub detail_url: String,
}

// 作品列表响应
#[derive(Debug, Serialize)]
pub struct TrabalhoListResponse {
    pub total: usize,
    pub items: Vec<Trabalho>,
}

// 导入结果
#[derive(Debug, Serialize)]
pub struct TrabalhoImportResponse {
    pub total: usize,
    pub imported: usize,
}

// 导入预览
#[derive(Debug, Serialize)]
pub struct TrabalhoImportPreviewResponse {
    pub total: usize,
    pub columns: Vec<&'static str>,
    pub rows: Vec<ImportRow>,
}

// 当前请求的访问级别
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub visibility: crate::access::Visibility,
    pub actions: Vec<&'static str>,
}
