//! REST handlers for `/api/employees`.
//!
//! Update and delete look the record up first so a missing id becomes a 404;
//! the store itself treats those mutations as silent no-ops. Nothing holds
//! the record between the lookup and the write, so a concurrent delete in
//! that window still yields a success response.

use crate::models::Employee;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use service_core::error::AppError;

pub const EMPLOYEES_PATH: &str = "/api/employees";

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn employee_not_found(id: &str) -> AppError {
    AppError::NotFound(anyhow::anyhow!("Employee with Id = {} not found", id))
}

/// GET /api/employees
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = state.store.list_all().await?;
    Ok(Json(employees))
}

/// GET /api/employees/:id
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, AppError> {
    state
        .store
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| employee_not_found(&id))
}

/// POST /api/employees
pub async fn create_employee(
    State(state): State<AppState>,
    Json(employee): Json<Employee>,
) -> Result<impl IntoResponse, AppError> {
    let employee = state.store.create(employee).await?;
    let location = format!("{}/{}", EMPLOYEES_PATH, employee.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(employee),
    ))
}

/// PUT /api/employees/:id
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(employee): Json<Employee>,
) -> Result<StatusCode, AppError> {
    if state.store.find_by_id(&id).await?.is_none() {
        return Err(employee_not_found(&id));
    }

    state.store.replace(&id, employee).await?;
    tracing::info!(employee_id = %id, "Employee replaced");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/employees/:id
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let employee = state
        .store
        .find_by_id(&id)
        .await?
        .ok_or_else(|| employee_not_found(&id))?;

    state.store.delete_by_id(&employee.id).await?;
    tracing::info!(employee_id = %id, "Employee deleted");

    Ok(Json(MessageResponse {
        message: format!("Employee with Id = {} deleted", id),
    }))
}
