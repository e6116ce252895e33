// tests/common/test_data.rs

use department_backend::repository::department_repository::DepartmentRepository;
use department_backend::repository::employee_repository::{EmployeeFields, EmployeeRepository};
use sea_orm::DatabaseConnection;

/// テスト用の従業員データを生成
pub fn employee_fields(name: &str, department_id: i32) -> EmployeeFields {
    EmployeeFields {
        name: name.to_string(),
        phone: "+7 (900) 123-45-67".to_string(),
        position: "Engineer".to_string(),
        department_id,
    }
}

/// 部門を直接追加してIDを返す
pub async fn insert_department(db: &DatabaseConnection, name: &str, parent: Option<i32>) -> i32 {
    DepartmentRepository::insert(db, name, parent).await.unwrap()
}

/// A(root) ← B ← C の3階層を作成する
pub async fn seed_chain(db: &DatabaseConnection) -> (i32, i32, i32) {
    let a = insert_department(db, "A", None).await;
    let b = insert_department(db, "B", Some(a)).await;
    let c = insert_department(db, "C", Some(b)).await;
    (a, b, c)
}

/// 従業員を直接追加してIDを返す
pub async fn insert_employee(db: &DatabaseConnection, name: &str, department_id: i32) -> i32 {
    EmployeeRepository::insert(db, employee_fields(name, department_id))
        .await
        .unwrap()
}
