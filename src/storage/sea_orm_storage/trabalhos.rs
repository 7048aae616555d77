//! 作品存储操作

use super::SeaOrmStorage;
use crate::entity::trabalhos::{ActiveModel, Column, Entity as Trabalhos};
use crate::errors::{Result, TrabalhosError};
use crate::models::trabalhos::entities::Trabalho;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 新增作品
    pub async fn insert_trabalho_impl(&self, trabalho: Trabalho) -> Result<Trabalho> {
        let model = ActiveModel {
            id: Set(trabalho.id),
            aluno: Set(trabalho.aluno),
            orientador: Set(trabalho.orientador),
            areas: Set(trabalho.areas),
            titulo: Set(trabalho.titulo),
            avaliador1: Set(trabalho.avaliador1),
            avaliador2: Set(trabalho.avaliador2),
            painel: Set(trabalho.painel),
            created_at: Set(trabalho.created_at),
        };

        // 重复 ID 经 From<DbErr> 归类为 Conflict
        let result = model.insert(&self.db).await?;

        Ok(result.into_trabalho())
    }

    /// 覆盖可变字段（id 与 created_at 不参与更新）
    pub async fn update_trabalho_impl(&self, trabalho: Trabalho) -> Result<bool> {
        let changes = ActiveModel {
            aluno: Set(trabalho.aluno),
            orientador: Set(trabalho.orientador),
            areas: Set(trabalho.areas),
            titulo: Set(trabalho.titulo),
            avaliador1: Set(trabalho.avaliador1),
            avaliador2: Set(trabalho.avaliador2),
            painel: Set(trabalho.painel),
            ..Default::default()
        };

        let result = Trabalhos::update_many()
            .set(changes)
            .filter(Column::Id.eq(trabalho.id.as_str()))
            .exec(&self.db)
            .await
            .map_err(|e| TrabalhosError::database_operation(format!("更新作品失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 通过 ID 获取作品
    pub async fn get_trabalho_by_id_impl(&self, id: &str) -> Result<Option<Trabalho>> {
        let result = Trabalhos::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| TrabalhosError::database_operation(format!("查询作品失败: {e}")))?;

        Ok(result.map(|m| m.into_trabalho()))
    }

    /// 列出全部作品，按展板编号、学生升序
    pub async fn list_trabalhos_impl(&self) -> Result<Vec<Trabalho>> {
        let models = Trabalhos::find()
            .order_by_asc(Column::Painel)
            .order_by_asc(Column::Aluno)
            .all(&self.db)
            .await
            .map_err(|e| TrabalhosError::database_operation(format!("查询作品列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_trabalho()).collect())
    }

    /// 删除作品
    pub async fn delete_trabalho_impl(&self, id: &str) -> Result<bool> {
        let result = Trabalhos::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| TrabalhosError::database_operation(format!("删除作品失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 作品总数
    pub async fn count_trabalhos_impl(&self) -> Result<u64> {
        Trabalhos::find()
            .count(&self.db)
            .await
            .map_err(|e| TrabalhosError::database_operation(format!("查询作品总数失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::models::trabalhos::requests::TrabalhoForm;

    async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
        .expect("in-memory sqlite should open")
    }

    fn record(aluno: &str, painel: i64) -> Trabalho {
        Trabalho::new(TrabalhoForm {
            aluno: aluno.to_string(),
            orientador: "Prof. Lima".to_string(),
            areas: "Engenharia".to_string(),
            titulo: format!("Trabalho de {aluno}"),
            avaliador1: "Carla".to_string(),
            avaliador2: "Davi".to_string(),
            painel,
        })
    }

    #[tokio::test]
    async fn test_insert_then_get_returns_equal_record() {
        let storage = memory_storage().await;
        let original = record("Ana", 5);

        let inserted = storage.insert_trabalho_impl(original.clone()).await.unwrap();
        assert_eq!(inserted, original);

        let fetched = storage.get_trabalho_by_id_impl(&original.id).await.unwrap();
        assert_eq!(fetched, Some(original));
    }

    #[tokio::test]
    async fn test_duplicate_id_is_conflict() {
        let storage = memory_storage().await;
        let original = record("Ana", 5);
        storage.insert_trabalho_impl(original.clone()).await.unwrap();

        let err = storage.insert_trabalho_impl(original).await.unwrap_err();
        assert!(matches!(err, TrabalhosError::Conflict(_)));
        assert_eq!(err.code(), "E006");
    }

    #[tokio::test]
    async fn test_update_changes_only_mutable_fields() {
        let storage = memory_storage().await;
        let original = record("Ana", 5);
        storage.insert_trabalho_impl(original.clone()).await.unwrap();

        let mut edited = original.clone();
        edited.aluno = "Ana Maria".to_string();
        edited.painel = 9;
        edited.created_at = "1999-01-01T00:00:00".to_string();
        assert!(storage.update_trabalho_impl(edited).await.unwrap());

        let fetched = storage
            .get_trabalho_by_id_impl(&original.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, original.id);
        assert_eq!(fetched.created_at, original.created_at);
        assert_eq!(fetched.aluno, "Ana Maria");
        assert_eq!(fetched.painel, 9);
        assert_eq!(fetched.titulo, original.titulo);
    }

    #[tokio::test]
    async fn test_update_missing_is_noop() {
        let storage = memory_storage().await;
        assert!(!storage.update_trabalho_impl(record("Ana", 1)).await.unwrap());
        assert_eq!(storage.count_trabalhos_impl().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_absent() {
        let storage = memory_storage().await;
        let original = record("Ana", 5);
        storage.insert_trabalho_impl(original.clone()).await.unwrap();

        assert!(storage.delete_trabalho_impl(&original.id).await.unwrap());
        assert_eq!(storage.get_trabalho_by_id_impl(&original.id).await.unwrap(), None);
        assert!(!storage.delete_trabalho_impl(&original.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_orders_by_painel_then_aluno() {
        let storage = memory_storage().await;
        for (aluno, painel) in [("Ana", 5), ("Bea", 2), ("Caio", 5), ("Abel", 5), ("Duda", 0)] {
            storage.insert_trabalho_impl(record(aluno, painel)).await.unwrap();
        }

        let names: Vec<String> = storage
            .list_trabalhos_impl()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.aluno)
            .collect();
        assert_eq!(names, vec!["Duda", "Bea", "Abel", "Ana", "Caio"]);
    }

    #[tokio::test]
    async fn test_bea_listed_before_ana() {
        let storage = memory_storage().await;
        storage.insert_trabalho_impl(record("Ana", 5)).await.unwrap();
        storage.insert_trabalho_impl(record("Bea", 2)).await.unwrap();

        let list = storage.list_trabalhos_impl().await.unwrap();
        assert_eq!(list[0].aluno, "Bea");
        assert_eq!(list[1].aluno, "Ana");
    }
}
