use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::ParentDepartmentId).integer())
                    .to_owned(),
            )
            .await?;

        // 子部門が残っている部門は削除できない（RESTRICT）
        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name("fk_departments_parent_department_id")
                    .from(Departments::Table, Departments::ParentDepartmentId)
                    .to(Departments::Table, Departments::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .on_update(ForeignKeyAction::NoAction)
                    .to_owned(),
            )
            .await?;

        // 部門名は全体で一意
        manager
            .create_index(
                Index::create()
                    .name("uq_departments_name")
                    .table(Departments::Table)
                    .col(Departments::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 再帰クエリで子部門を辿るためのインデックス
        manager
            .create_index(
                Index::create()
                    .name("idx_departments_parent_department_id")
                    .table(Departments::Table)
                    .col(Departments::ParentDepartmentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    ParentDepartmentId,
}
