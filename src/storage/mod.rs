use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::trabalhos::entities::Trabalho;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 作品管理方法
    // 新增作品，ID 重复时返回存储错误
    async fn insert_trabalho(&self, trabalho: Trabalho) -> Result<Trabalho>;
    // 覆盖可变字段，ID 不存在时返回 false
    async fn update_trabalho(&self, trabalho: Trabalho) -> Result<bool>;
    // 通过ID获取作品
    async fn get_trabalho_by_id(&self, id: &str) -> Result<Option<Trabalho>>;
    // 按展板编号、学生排序列出全部作品
    async fn list_trabalhos(&self) -> Result<Vec<Trabalho>>;
    // 删除作品，ID 不存在时返回 false
    async fn delete_trabalho(&self, id: &str) -> Result<bool>;
    // 作品总数
    async fn count_trabalhos(&self) -> Result<u64>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let config = AppConfig::get();
    let storage = sea_orm_storage::SeaOrmStorage::connect(&config.database).await?;
    Ok(Arc::new(storage))
}
