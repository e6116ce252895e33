// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 部門・従業員マイグレーション
mod m20250801_000001_create_departments_table;
mod m20250801_000002_create_employees_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 部門テーブル（自己参照の外部キーを含む）
            Box::new(m20250801_000001_create_departments_table::Migration),
            // 2. 従業員テーブル（departmentsテーブルに依存）
            Box::new(m20250801_000002_create_employees_table::Migration),
        ]
    }
}
