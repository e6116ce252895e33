// tests/service_tests.rs
use department_backend::domain::department_hierarchy::{descendants_of, DepartmentNode};
use department_backend::error::AppError;
use department_backend::repository::department_repository::DepartmentRepository;
use department_backend::service::department_service::DepartmentService;
use department_backend::service::employee_service::EmployeeService;

mod common;

use common::test_data::{employee_fields, insert_department, insert_employee, seed_chain};

fn department_service(db: &common::db::TestDatabase) -> DepartmentService {
    DepartmentService::new(db.connection.clone())
}

async fn parent_edges(db: &common::db::TestDatabase) -> Vec<(i32, Option<i32>)> {
    DepartmentRepository::find_all(&db.connection)
        .await
        .unwrap()
        .into_iter()
        .map(|d| (d.id, d.parent_department_id))
        .collect()
}

#[tokio::test]
async fn test_chain_scenario() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);

    let a = service.create("A".to_string(), None).await.unwrap();
    let b = service.create("B".to_string(), Some(a)).await.unwrap();
    let c = service.create("C".to_string(), Some(b)).await.unwrap();

    // 階層: A → B → C
    let forest = service.get_hierarchy().await.unwrap();
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].id, a);
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[0].children[0].id, b);
    assert_eq!(forest[0].children[0].children.len(), 1);
    assert_eq!(forest[0].children[0].children[0].id, c);

    // C は A の子孫なので A を C の下には置けない
    let err = service
        .update(a, "A".to_string(), Some(c))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::CyclicDependency { department_id, parent_id } if department_id == a && parent_id == c
    ));

    // 従業員はいないが C が B を参照している
    let err = service.delete(b).await.unwrap_err();
    assert!(matches!(err, AppError::HasChildren(id) if id == b));
    assert!(service.get_by_id(b).await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_with_missing_parent_inserts_nothing() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);

    let err = service
        .create("Sales".to_string(), Some(999))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::ParentNotFound(999)));
    assert!(service.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_name_leaves_count_unchanged() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    let root = service.create("Head Office".to_string(), None).await.unwrap();
    service
        .create("Sales".to_string(), Some(root))
        .await
        .unwrap();
    let before = service.get_all().await.unwrap().len();

    let err = service
        .create("Sales".to_string(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateName(ref name) if name == "Sales"));
    assert_eq!(service.get_all().await.unwrap().len(), before);
}

#[tokio::test]
async fn test_rename_to_existing_name_is_duplicate() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    service.create("Sales".to_string(), None).await.unwrap();
    let marketing = service.create("Marketing".to_string(), None).await.unwrap();

    let err = service
        .update(marketing, "Sales".to_string(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateName(_)));
    let unchanged = service.get_by_id(marketing).await.unwrap().unwrap();
    assert_eq!(unchanged.name, "Marketing");
}

#[tokio::test]
async fn test_reparent_to_self_or_descendant_leaves_graph_unchanged() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    let (a, b, c) = seed_chain(&db.connection).await;
    let d = insert_department(&db.connection, "D", Some(b)).await;
    insert_department(&db.connection, "E", None).await;

    let before = parent_edges(&db).await;
    let all = DepartmentRepository::find_all(&db.connection).await.unwrap();

    for dept in [a, b, c, d] {
        let mut targets = descendants_of(&all, dept);
        targets.insert(dept);

        for parent in targets {
            let err = service
                .update(dept, format!("renamed-{}", dept), Some(parent))
                .await
                .unwrap_err();
            assert!(
                matches!(err, AppError::CyclicDependency { .. }),
                "{} under {} should be rejected",
                dept,
                parent
            );
        }
    }

    // 名前も親も変わっていない
    assert_eq!(parent_edges(&db).await, before);
    let b_row = service.get_by_id(b).await.unwrap().unwrap();
    assert_eq!(b_row.name, "B");
}

#[tokio::test]
async fn test_valid_reparent_and_detach() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    let (a, b, c) = seed_chain(&db.connection).await;

    // C を A の直下へ
    assert!(service.update(c, "C".to_string(), Some(a)).await.unwrap());
    // B をルートへ
    assert!(service.update(b, "B".to_string(), None).await.unwrap());

    let forest = service.get_hierarchy().await.unwrap();
    let roots: Vec<i32> = forest.iter().map(|n| n.id).collect();
    assert_eq!(roots, vec![a, b]);
    assert_eq!(forest[0].children[0].id, c);
    assert!(forest[1].children.is_empty());
}

#[tokio::test]
async fn test_update_missing_department_returns_false() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    let root = service.create("Root".to_string(), None).await.unwrap();

    assert!(!service
        .update(root + 100, "Ghost".to_string(), None)
        .await
        .unwrap());
    assert!(!service.delete(root + 100).await.unwrap());
}

#[tokio::test]
async fn test_update_with_missing_parent() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    let root = service.create("Root".to_string(), None).await.unwrap();

    let err = service
        .update(root, "Root".to_string(), Some(999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ParentNotFound(999)));
}

#[tokio::test]
async fn test_delete_with_employees_keeps_department() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    let dept = service.create("Support".to_string(), None).await.unwrap();
    insert_employee(&db.connection, "Ivan", dept).await;

    let err = service.delete(dept).await.unwrap_err();

    assert!(matches!(err, AppError::HasEmployees(id) if id == dept));
    assert!(service.get_by_id(dept).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_leaf_department() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    let (_a, b, c) = seed_chain(&db.connection).await;

    assert!(service.delete(c).await.unwrap());
    assert!(service.get_by_id(c).await.unwrap().is_none());
    // C が消えたので B も削除できる
    assert!(service.delete(b).await.unwrap());
}

#[tokio::test]
async fn test_hierarchy_matches_flat_rows() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    let (a, b, _c) = seed_chain(&db.connection).await;
    insert_department(&db.connection, "D", Some(a)).await;
    insert_department(&db.connection, "E", Some(b)).await;
    insert_department(&db.connection, "F", None).await;

    let flat = service.get_all().await.unwrap();
    let forest = service.get_hierarchy().await.unwrap();

    let total: usize = forest.iter().map(DepartmentNode::count).sum();
    assert_eq!(total, flat.len());

    fn edges(nodes: &[DepartmentNode], parent: Option<i32>, out: &mut Vec<(i32, Option<i32>)>) {
        for node in nodes {
            out.push((node.id, parent));
            edges(&node.children, Some(node.id), out);
        }
    }
    let mut from_tree = Vec::new();
    edges(&forest, None, &mut from_tree);
    from_tree.sort();

    let mut from_rows: Vec<(i32, Option<i32>)> = flat
        .iter()
        .map(|d| (d.id, d.parent_department_id))
        .collect();
    from_rows.sort();
    assert_eq!(from_tree, from_rows);
}

#[tokio::test]
async fn test_empty_store_gives_empty_hierarchy() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);

    assert!(service.get_hierarchy().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_schema() {
    let db = common::db::TestDatabase::without_migrations().await;
    let service = department_service(&db);

    assert!(matches!(
        service.get_all().await.unwrap_err(),
        AppError::SchemaMissing
    ));
    assert!(matches!(
        service.get_hierarchy().await.unwrap_err(),
        AppError::HierarchyBuildFailure(_)
    ));
}

#[tokio::test]
async fn test_store_unavailable_after_close() {
    let db = common::db::TestDatabase::new().await;
    let connection = db.connection.clone();
    let service = DepartmentService::new(connection.clone());
    connection.close().await.unwrap();

    let err = service.get_all().await.unwrap_err();
    assert!(matches!(err, AppError::StoreUnavailable(_)), "{:?}", err);
}

#[tokio::test]
async fn test_concurrent_opposite_reparents_never_form_cycle() {
    let db = common::db::TestDatabase::new().await;
    let service = department_service(&db);
    let x = service.create("X".to_string(), None).await.unwrap();
    let y = service.create("Y".to_string(), None).await.unwrap();

    // X を Y の下へ、Y を X の下へ同時に移動する
    let (first, second) = tokio::join!(
        service.update(x, "X".to_string(), Some(y)),
        service.update(y, "Y".to_string(), Some(x)),
    );

    let succeeded = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert!(succeeded <= 1, "{:?} / {:?}", first, second);

    for result in [first, second] {
        if let Err(err) = result {
            assert!(
                matches!(
                    err,
                    AppError::CyclicDependency { .. } | AppError::SerializationConflict
                ),
                "{:?}",
                err
            );
        }
    }

    // 保存された親子関係に閉路が無い
    let all = DepartmentRepository::find_all(&db.connection).await.unwrap();
    for dept in &all {
        assert!(!descendants_of(&all, dept.id).contains(&dept.id));
    }
}

#[tokio::test]
async fn test_employee_service_crud() {
    let db = common::db::TestDatabase::new().await;
    let service = EmployeeService::new(db.connection.clone());
    let dept = insert_department(&db.connection, "Engineering", None).await;

    let id = service.create(employee_fields("Ivan", dept)).await.unwrap();
    let employee = service.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(employee.department_id, dept);

    let err = service
        .create(employee_fields("Olga", 999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DepartmentNotFound(999)));

    let err = service
        .update(id, employee_fields("Ivan", 999))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DepartmentNotFound(999)));

    assert!(service.update(id, employee_fields("Ivan P.", dept)).await.unwrap());
    assert_eq!(service.search("p.").await.unwrap().len(), 1);
    assert_eq!(service.get_all().await.unwrap().len(), 1);

    assert!(service.delete(id).await.unwrap());
    assert!(!service.delete(id).await.unwrap());
    assert!(service.get_by_id(id).await.unwrap().is_none());
}
