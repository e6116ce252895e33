// src/api/handlers/department_handler.rs

use crate::api::dto::department_dto::{
    CreateDepartmentDto, CreatedDto, DepartmentDto, UpdateDepartmentDto,
};
use crate::api::handlers::IdPath;
use crate::api::AppState;
use crate::domain::department_hierarchy::DepartmentNode;
use crate::error::{AppError, AppResult};
use crate::utils::error_helper::{convert_validation_errors, not_found_error};
use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tracing::info;
use validator::Validate;

pub async fn get_hierarchy_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<DepartmentNode>>> {
    let forest = app_state.department_service.get_hierarchy().await?;
    Ok(Json(forest))
}

pub async fn list_departments_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<DepartmentDto>>> {
    let departments = app_state.department_service.get_all().await?;
    Ok(Json(departments.into_iter().map(DepartmentDto::from).collect()))
}

pub async fn get_department_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<DepartmentDto>> {
    let department = app_state
        .department_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Department", &id.to_string(), "get_department"))?;

    Ok(Json(DepartmentDto::from(department)))
}

pub async fn create_department_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDepartmentDto>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "create_department"))?;

    let id = app_state
        .department_service
        .create(payload.name, payload.parent_department_id)
        .await?;

    info!(department_id = id, "Department created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/departments/{}", id))],
        Json(CreatedDto { id }),
    ))
}

pub async fn update_department_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<UpdateDepartmentDto>,
) -> AppResult<StatusCode> {
    if payload.id != id {
        return Err(AppError::BadRequest(
            "ID in URL and body must match".to_string(),
        ));
    }
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "update_department"))?;

    let updated = app_state
        .department_service
        .update(id, payload.name, payload.parent_department_id)
        .await?;

    if !updated {
        return Err(not_found_error("Department", &id.to_string(), "update_department"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_department_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    let deleted = app_state.department_service.delete(id).await?;

    if !deleted {
        return Err(not_found_error("Department", &id.to_string(), "delete_department"));
    }
    Ok(StatusCode::NO_CONTENT)
}

// --- Router Setup ---

pub fn department_router(app_state: AppState) -> Router {
    Router::new()
        // 静的パスを先に登録
        .route("/departments/hierarchy", get(get_hierarchy_handler))
        .route(
            "/departments",
            get(list_departments_handler).post(create_department_handler),
        )
        .route(
            "/departments/{id}",
            get(get_department_handler)
                .put(update_department_handler)
                .delete(delete_department_handler),
        )
        .with_state(app_state)
}
