// src/repository/employee_repository.rs
use crate::domain::employee_model::{self, ActiveModel as EmployeeActiveModel, Entity as EmployeeEntity};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

/// 従業員の書き込み用パラメータ
#[derive(Debug, Clone)]
pub struct EmployeeFields {
    pub name: String,
    pub phone: String,
    pub position: String,
    pub department_id: i32,
}

pub struct EmployeeRepository;

impl EmployeeRepository {
    pub async fn find_all<C>(conn: &C) -> Result<Vec<employee_model::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        EmployeeEntity::find()
            .order_by_asc(employee_model::Column::Id)
            .all(conn)
            .await
    }

    pub async fn find_by_id<C>(conn: &C, id: i32) -> Result<Option<employee_model::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        EmployeeEntity::find_by_id(id).one(conn).await
    }

    /// 名前・役職は大文字小文字を区別せず、電話番号はそのまま部分一致で検索
    pub async fn search<C>(conn: &C, query: &str) -> Result<Vec<employee_model::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let pattern = format!("%{}%", escape_like(query));
        let lowered = pattern.to_lowercase();

        let condition = Condition::any()
            .add(
                Expr::expr(Func::lower(Expr::col(employee_model::Column::Name)))
                    .like(lowered.as_str()),
            )
            .add(employee_model::Column::Phone.like(pattern.as_str()))
            .add(
                Expr::expr(Func::lower(Expr::col(employee_model::Column::Position)))
                    .like(lowered.as_str()),
            );

        EmployeeEntity::find()
            .filter(condition)
            .order_by_asc(employee_model::Column::Id)
            .all(conn)
            .await
    }

    pub async fn insert<C>(conn: &C, fields: EmployeeFields) -> Result<i32, DbErr>
    where
        C: ConnectionTrait,
    {
        let employee = EmployeeActiveModel {
            id: NotSet,
            name: Set(fields.name),
            phone: Set(fields.phone),
            position: Set(fields.position),
            department_id: Set(fields.department_id),
        };

        let result = EmployeeEntity::insert(employee).exec(conn).await?;
        Ok(result.last_insert_id)
    }

    pub async fn update<C>(conn: &C, id: i32, fields: EmployeeFields) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = EmployeeEntity::update_many()
            .col_expr(employee_model::Column::Name, Expr::value(fields.name))
            .col_expr(employee_model::Column::Phone, Expr::value(fields.phone))
            .col_expr(employee_model::Column::Position, Expr::value(fields.position))
            .col_expr(
                employee_model::Column::DepartmentId,
                Expr::value(fields.department_id),
            )
            .filter(employee_model::Column::Id.eq(id))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_by_id<C>(conn: &C, id: i32) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = EmployeeEntity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected)
    }
}

/// LIKE のワイルドカードを文字として扱う（PostgreSQL の既定エスケープ文字は `\`）
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
