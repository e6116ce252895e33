// src/service/department_service.rs

//! 部門サービス
//!
//! 変更系の操作はそれぞれ1つのトランザクションで実行し、
//! ストアの制約違反を型付きの `AppError` に変換します。
//! 部門の状態はキャッシュせず、毎回ストアを参照します。

use crate::db::DbPool;
use crate::domain::department_hierarchy::{build_hierarchy, would_create_cycle, DepartmentNode};
use crate::domain::department_model;
use crate::domain::employee_model::DEPARTMENT_FOREIGN_KEY;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::department_repository::DepartmentRepository;
use crate::repository::store_fault::StoreFault;
use crate::utils::error_helper::internal_server_error;
use crate::utils::transaction::{record_phase, TransactionManager, TransactionPhase};
use sea_orm::IsolationLevel;

pub struct DepartmentService {
    db: DbPool,
}

impl DepartmentService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// 全部門を1回のクエリで読み込み、メモリ上で森を組み立てる
    pub async fn get_hierarchy(&self) -> AppResult<Vec<DepartmentNode>> {
        let departments = DepartmentRepository::find_all(&self.db)
            .await
            .map_err(|e| {
                log_with_context!(
                    tracing::Level::ERROR,
                    "Failed to load departments for hierarchy",
                    "error" => e.to_string()
                );
                AppError::HierarchyBuildFailure(e.to_string())
            })?;

        let total = departments.len();
        let forest = build_hierarchy(departments);

        log_with_context!(
            tracing::Level::DEBUG,
            "Department hierarchy built",
            "departments" => total,
            "roots" => forest.len()
        );

        Ok(forest)
    }

    pub async fn get_all(&self) -> AppResult<Vec<department_model::Model>> {
        let departments = DepartmentRepository::find_all(&self.db).await?;
        Ok(departments)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<department_model::Model>> {
        let department = DepartmentRepository::find_by_id(&self.db, id).await?;
        Ok(department)
    }

    pub async fn create(&self, name: String, parent_department_id: Option<i32>) -> AppResult<i32> {
        log_with_context!(
            tracing::Level::DEBUG,
            "Creating department",
            "name" => &name,
            "parent_department_id" => parent_department_id
        );

        let id = self
            .db
            .execute_in_transaction(move |txn| {
                Box::pin(async move {
                    // 親の存在は事前確認せず外部キー制約に任せる
                    record_phase("department.create", TransactionPhase::Validated);

                    let id = DepartmentRepository::insert(txn, &name, parent_department_id)
                        .await
                        .map_err(|e| match StoreFault::classify(&e) {
                            StoreFault::UniqueViolation { .. } => AppError::DuplicateName(name.clone()),
                            StoreFault::ForeignKeyViolation { .. } => match parent_department_id {
                                Some(parent_id) => AppError::ParentNotFound(parent_id),
                                None => internal_server_error(
                                    e,
                                    "department_service::create",
                                    "Failed to create department",
                                ),
                            },
                            _ => AppError::from(e),
                        })?;

                    record_phase("department.create", TransactionPhase::Written);
                    Ok(id)
                })
            })
            .await?;

        log_with_context!(
            tracing::Level::INFO,
            "Department created successfully",
            "department_id" => id
        );

        Ok(id)
    }

    /// 名前と親部門を更新する。該当IDが無ければ `false`
    ///
    /// 閉路チェックと書き込みは同じ SERIALIZABLE トランザクション内で行う。
    /// 並行する付け替えが検査と書き込みの間に割り込んだ場合は
    /// `SerializationConflict` となり、再試行は呼び出し側に委ねる。
    pub async fn update(
        &self,
        id: i32,
        name: String,
        parent_department_id: Option<i32>,
    ) -> AppResult<bool> {
        log_with_context!(
            tracing::Level::DEBUG,
            "Updating department",
            "department_id" => id,
            "parent_department_id" => parent_department_id
        );

        let affected = self
            .db
            .execute_in_transaction_with(Some(IsolationLevel::Serializable), move |txn| {
                Box::pin(async move {
                    if let Some(parent_id) = parent_department_id {
                        let descendants = if parent_id == id {
                            Default::default()
                        } else {
                            DepartmentRepository::find_descendant_ids(txn, id).await?
                        };

                        if would_create_cycle(&descendants, id, parent_id) {
                            log_with_context!(
                                tracing::Level::WARN,
                                "Cyclic dependency detected",
                                "department_id" => id,
                                "parent_department_id" => parent_id
                            );
                            return Err(AppError::CyclicDependency {
                                department_id: id,
                                parent_id,
                            });
                        }
                    }
                    record_phase("department.update", TransactionPhase::Validated);

                    let affected = DepartmentRepository::rename_and_reparent(
                        txn,
                        id,
                        &name,
                        parent_department_id,
                    )
                    .await
                    .map_err(|e| match StoreFault::classify(&e) {
                        StoreFault::UniqueViolation { .. } => AppError::DuplicateName(name.clone()),
                        StoreFault::ForeignKeyViolation { .. } => match parent_department_id {
                            Some(parent_id) => AppError::ParentNotFound(parent_id),
                            None => internal_server_error(
                                e,
                                "department_service::update",
                                "Failed to update department",
                            ),
                        },
                        _ => AppError::from(e),
                    })?;

                    record_phase("department.update", TransactionPhase::Written);
                    Ok(affected > 0)
                })
            })
            .await?;

        log_with_context!(
            tracing::Level::INFO,
            "Department update finished",
            "department_id" => id,
            "updated" => affected
        );

        Ok(affected)
    }

    /// 部門を削除する。該当IDが無ければ `false`
    ///
    /// 従業員または子部門が残っている場合は削除せずに失敗する（カスケードしない）。
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        log_with_context!(
            tracing::Level::DEBUG,
            "Deleting department",
            "department_id" => id
        );

        let deleted = self
            .db
            .execute_in_transaction(move |txn| {
                Box::pin(async move {
                    let employee_count = DepartmentRepository::count_employees_in(txn, id).await?;
                    if employee_count > 0 {
                        log_with_context!(
                            tracing::Level::WARN,
                            "Department still has employees",
                            "department_id" => id,
                            "employee_count" => employee_count
                        );
                        return Err(AppError::HasEmployees(id));
                    }
                    record_phase("department.delete", TransactionPhase::Validated);

                    let affected = DepartmentRepository::delete_by_id(txn, id)
                        .await
                        .map_err(|e| match StoreFault::classify(&e) {
                            // 件数確認の後に従業員が追加された
                            fault if fault.is_foreign_key(DEPARTMENT_FOREIGN_KEY) => {
                                AppError::HasEmployees(id)
                            }
                            // 子部門の外部キー（fk_departments_parent_department_id）
                            StoreFault::ForeignKeyViolation { .. } => AppError::HasChildren(id),
                            _ => AppError::from(e),
                        })?;

                    record_phase("department.delete", TransactionPhase::Written);
                    Ok(affected > 0)
                })
            })
            .await?;

        log_with_context!(
            tracing::Level::INFO,
            "Department delete finished",
            "department_id" => id,
            "deleted" => deleted
        );

        Ok(deleted)
    }
}
