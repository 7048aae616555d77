use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 作品表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Trabalhos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Trabalhos::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Trabalhos::Aluno).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Trabalhos::Orientador)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Trabalhos::Areas).text().not_null().default(""))
                    .col(ColumnDef::new(Trabalhos::Titulo).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Trabalhos::Avaliador1)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Trabalhos::Avaliador2)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Trabalhos::Painel)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Trabalhos::CreatedAt).text().not_null())
                    .to_owned(),
            )
            .await?;

        // 默认排序索引：painel, aluno
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_trabalhos_painel_aluno")
                    .table(Trabalhos::Table)
                    .col(Trabalhos::Painel)
                    .col(Trabalhos::Aluno)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trabalhos::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Trabalhos {
    #[sea_orm(iden = "trabalhos")]
    Table,
    Id,
    Aluno,
    Orientador,
    Areas,
    Titulo,
    Avaliador1,
    Avaliador2,
    Painel,
    CreatedAt,
}
