//! 作品实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "trabalhos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub aluno: String,
    pub orientador: String,
    pub areas: String,
    pub titulo: String,
    pub avaliador1: String,
    pub avaliador2: String,
    pub painel: i64,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_trabalho(self) -> crate::models::trabalhos::entities::Trabalho {
        use crate::models::trabalhos::entities::Trabalho;

        Trabalho {
            id: self.id,
            aluno: self.aluno,
            orientador: self.orientador,
            areas: self.areas,
            titulo: self.titulo,
            avaliador1: self.avaliador1,
            avaliador2: self.avaliador2,
            painel: self.painel,
            created_at: self.created_at,
        }
    }
}
