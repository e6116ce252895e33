// src/service/employee_service.rs

use crate::db::DbPool;
use crate::domain::employee_model;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::employee_repository::{EmployeeFields, EmployeeRepository};
use crate::repository::store_fault::StoreFault;
use crate::with_transaction;

pub struct EmployeeService {
    db: DbPool,
}

impl EmployeeService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> AppResult<Vec<employee_model::Model>> {
        let employees = EmployeeRepository::find_all(&self.db).await?;
        Ok(employees)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<employee_model::Model>> {
        let employee = EmployeeRepository::find_by_id(&self.db, id).await?;
        Ok(employee)
    }

    /// 名前・電話番号・役職の部分一致検索
    pub async fn search(&self, query: &str) -> AppResult<Vec<employee_model::Model>> {
        let employees = EmployeeRepository::search(&self.db, query).await?;

        log_with_context!(
            tracing::Level::DEBUG,
            "Employee search finished",
            "query" => query,
            "hits" => employees.len()
        );

        Ok(employees)
    }

    pub async fn create(&self, fields: EmployeeFields) -> AppResult<i32> {
        let department_id = fields.department_id;

        let id = with_transaction!(self.db, |txn| async move {
            EmployeeRepository::insert(txn, fields)
                .await
                .map_err(|e| department_fault(e, department_id))
        })?;

        log_with_context!(
            tracing::Level::INFO,
            "Employee created successfully",
            "employee_id" => id,
            "department_id" => department_id
        );

        Ok(id)
    }

    /// 該当IDが無ければ `false`
    pub async fn update(&self, id: i32, fields: EmployeeFields) -> AppResult<bool> {
        let department_id = fields.department_id;

        let affected = with_transaction!(self.db, |txn| async move {
            EmployeeRepository::update(txn, id, fields)
                .await
                .map_err(|e| department_fault(e, department_id))
        })?;

        log_with_context!(
            tracing::Level::INFO,
            "Employee update finished",
            "employee_id" => id,
            "updated" => affected > 0
        );

        Ok(affected > 0)
    }

    /// 該当IDが無ければ `false`
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let affected = with_transaction!(self.db, |txn| async move {
            EmployeeRepository::delete_by_id(txn, id)
                .await
                .map_err(AppError::from)
        })?;

        log_with_context!(
            tracing::Level::INFO,
            "Employee delete finished",
            "employee_id" => id,
            "deleted" => affected > 0
        );

        Ok(affected > 0)
    }
}

// 所属部門の外部キー違反は存在しない部門の指定
fn department_fault(err: sea_orm::DbErr, department_id: i32) -> AppError {
    match StoreFault::classify(&err) {
        StoreFault::ForeignKeyViolation { .. } => AppError::DepartmentNotFound(department_id),
        _ => AppError::from(err),
    }
}
