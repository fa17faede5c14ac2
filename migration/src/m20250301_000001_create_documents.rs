use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 提交文档表 ====================
        // 以身份证号为主键，重复保存时整行覆盖
        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::IdNumber)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::Prefix).string().not_null())
                    .col(ColumnDef::new(Documents::FirstName).string().not_null())
                    .col(ColumnDef::new(Documents::LastName).string().not_null())
                    .col(ColumnDef::new(Documents::Unit).string().not_null())
                    .col(ColumnDef::new(Documents::OfficerType).string().not_null())
                    .col(ColumnDef::new(Documents::UploadedFiles).text().not_null())
                    .col(
                        ColumnDef::new(Documents::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Documents {
    Table,
    IdNumber,
    Prefix,
    FirstName,
    LastName,
    Unit,
    OfficerType,
    UploadedFiles,
    UpdatedAt,
}
