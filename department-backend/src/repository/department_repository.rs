// src/repository/department_repository.rs

//! 部門テーブルへのフラットなアクセス
//!
//! 木構造の知識は持ちません。すべての関数は `ConnectionTrait` に対してジェネリックで、
//! 接続プールでもトランザクション内でも同じように呼び出せます。

use crate::domain::department_model::{
    self, ActiveModel as DepartmentActiveModel, Entity as DepartmentEntity,
};
use crate::domain::employee_model::{self, Entity as EmployeeEntity};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseBackend, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Statement,
};
use std::collections::HashSet;

// 起点自身は結果から除外する。UNION で重複を落とすため、万一閉路があっても停止する
const DESCENDANT_IDS_SQL: &str = r#"
WITH RECURSIVE child_tree AS (
    SELECT id FROM departments WHERE id = $1
    UNION
    SELECT d.id FROM departments d
    JOIN child_tree ct ON d.parent_department_id = ct.id
)
SELECT id FROM child_tree WHERE id <> $1
"#;

pub struct DepartmentRepository;

impl DepartmentRepository {
    pub async fn find_all<C>(conn: &C) -> Result<Vec<department_model::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        DepartmentEntity::find()
            .order_by_asc(department_model::Column::Id)
            .all(conn)
            .await
    }

    pub async fn find_by_id<C>(
        conn: &C,
        id: i32,
    ) -> Result<Option<department_model::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        DepartmentEntity::find_by_id(id).one(conn).await
    }

    /// 部門を追加して採番されたIDを返す
    ///
    /// 名前の重複は一意制約違反、存在しない親は外部キー違反としてストアから返る。
    pub async fn insert<C>(
        conn: &C,
        name: &str,
        parent_department_id: Option<i32>,
    ) -> Result<i32, DbErr>
    where
        C: ConnectionTrait,
    {
        let department = DepartmentActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            parent_department_id: Set(parent_department_id),
        };

        let result = DepartmentEntity::insert(department).exec(conn).await?;
        Ok(result.last_insert_id)
    }

    /// 名前と親を更新し、影響を受けた行数を返す（0 は該当IDなし）
    pub async fn rename_and_reparent<C>(
        conn: &C,
        id: i32,
        name: &str,
        parent_department_id: Option<i32>,
    ) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = DepartmentEntity::update_many()
            .col_expr(department_model::Column::Name, Expr::value(name))
            .col_expr(
                department_model::Column::ParentDepartmentId,
                Expr::value(parent_department_id),
            )
            .filter(department_model::Column::Id.eq(id))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_id<C>(conn: &C, id: i32) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = DepartmentEntity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected)
    }

    pub async fn count_employees_in<C>(conn: &C, department_id: i32) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        EmployeeEntity::find()
            .filter(employee_model::Column::DepartmentId.eq(department_id))
            .count(conn)
            .await
    }

    /// 指定部門の全子孫ID（推移閉包、自身は含まない）
    pub async fn find_descendant_ids<C>(conn: &C, department_id: i32) -> Result<HashSet<i32>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = conn
            .query_all(Statement::from_sql_and_values(
                DatabaseBackend::Postgres,
                DESCENDANT_IDS_SQL,
                [department_id.into()],
            ))
            .await?;

        rows.iter().map(|row| row.try_get::<i32>("", "id")).collect()
    }
}
