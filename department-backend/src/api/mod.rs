// department-backend/src/api/mod.rs
use crate::api::handlers::{
    department_handler::department_router, employee_handler::employee_router,
    system_handler::system_router,
};
use crate::db::DbPool;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::{department_service::DepartmentService, employee_service::EmployeeService};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub department_service: Arc<DepartmentService>,
    pub employee_service: Arc<EmployeeService>,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self {
            department_service: Arc::new(DepartmentService::new(db.clone())),
            employee_service: Arc::new(EmployeeService::new(db)),
        }
    }
}

/// 全ルートとミドルウェアを組み立てる
pub fn app_router(app_state: AppState) -> Router {
    Router::new()
        .merge(system_router())
        .merge(department_router(app_state.clone()))
        .merge(employee_router(app_state))
        // 外側から順に Trace → コンテキスト注入 → リクエストログ
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TraceLayer::new_for_http())
}
