// src/api/handlers/employee_handler.rs

use crate::api::dto::department_dto::CreatedDto;
use crate::api::dto::employee_dto::{
    CreateEmployeeDto, EmployeeDto, EmployeeSearchQuery, UpdateEmployeeDto,
};
use crate::api::handlers::IdPath;
use crate::api::AppState;
use crate::error::{AppError, AppResult};
use crate::utils::error_helper::{convert_validation_errors, not_found_error};
use axum::{
    extract::{Json, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use validator::Validate;

pub async fn list_employees_handler(
    State(app_state): State<AppState>,
) -> AppResult<Json<Vec<EmployeeDto>>> {
    let employees = app_state.employee_service.get_all().await?;
    Ok(Json(employees.into_iter().map(EmployeeDto::from).collect()))
}

pub async fn search_employees_handler(
    State(app_state): State<AppState>,
    Query(params): Query<EmployeeSearchQuery>,
) -> AppResult<Json<Vec<EmployeeDto>>> {
    let employees = app_state.employee_service.search(&params.query).await?;
    Ok(Json(employees.into_iter().map(EmployeeDto::from).collect()))
}

pub async fn get_employee_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<EmployeeDto>> {
    let employee = app_state
        .employee_service
        .get_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Employee", &id.to_string(), "get_employee"))?;

    Ok(Json(EmployeeDto::from(employee)))
}

pub async fn create_employee_handler(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateEmployeeDto>,
) -> AppResult<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "create_employee"))?;

    let id = app_state.employee_service.create(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/employees/{}", id))],
        Json(CreatedDto { id }),
    ))
}

pub async fn update_employee_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
    Json(payload): Json<UpdateEmployeeDto>,
) -> AppResult<StatusCode> {
    if payload.id != id {
        return Err(AppError::BadRequest(
            "ID in URL and body must match".to_string(),
        ));
    }
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "update_employee"))?;

    if !app_state.employee_service.update(id, payload.into()).await? {
        return Err(not_found_error("Employee", &id.to_string(), "update_employee"));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_employee_handler(
    State(app_state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    if !app_state.employee_service.delete(id).await? {
        return Err(not_found_error("Employee", &id.to_string(), "delete_employee"));
    }
    Ok(StatusCode::NO_CONTENT)
}

// --- Router Setup ---

pub fn employee_router(app_state: AppState) -> Router {
    Router::new()
        .route("/employees/search", get(search_employees_handler))
        .route(
            "/employees",
            get(list_employees_handler).post(create_employee_handler),
        )
        .route(
            "/employees/{id}",
            get(get_employee_handler)
                .put(update_employee_handler)
                .delete(delete_employee_handler),
        )
        .with_state(app_state)
}
