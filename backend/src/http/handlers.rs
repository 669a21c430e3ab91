//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! command/query layer through the mediator.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::dto::{
    AddAstronautDetailQuery, ApiResponse, AstronautDetailBody, HealthResponse, UpdatePersonRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::{AstronautDetail, AstronautDutyId, PersonAstronaut, PersonId};
use crate::services::{
    CreateAstronautDetail, CreateAstronautDuty, CreatePerson, Created, GetAstronautDetails,
    GetAstronautDutiesByName, GetPeople, GetPersonByName, PersonDuties, UpdatePerson,
};

/// Result type for enveloped handlers.
pub type HandlerResult<T> = Result<ApiResponse<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_status = match state.mediator.repository().health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    })
}

// =============================================================================
// Person
// =============================================================================

/// GET /api/Person/people
pub async fn get_people(State(state): State<AppState>) -> HandlerResult<Vec<PersonAstronaut>> {
    let people = state.mediator.send(GetPeople).await?;
    Ok(ApiResponse::ok("People retrieved successfully", people))
}

/// GET /api/Person/{name}
pub async fn get_person_by_name(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> HandlerResult<PersonAstronaut> {
    let Path(name) = path?;
    let person = state.mediator.send(GetPersonByName { name }).await?;
    Ok(ApiResponse::ok("Person retrieved successfully", person))
}

/// POST /api/Person
///
/// The body is a bare JSON string holding the name.
pub async fn create_person(
    State(state): State<AppState>,
    body: Result<Json<String>, JsonRejection>,
) -> HandlerResult<Created<PersonId>> {
    let Json(name) = body?;
    let created = state.mediator.send(CreatePerson { name }).await?;
    Ok(ApiResponse::ok("Person created successfully", created))
}

/// PUT /api/Person/{name}
pub async fn update_person(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdatePersonRequest>, JsonRejection>,
) -> HandlerResult<()> {
    let Path(name) = path?;
    let Json(request) = body?;
    state
        .mediator
        .send(UpdatePerson {
            name,
            new_name: request.new_name,
        })
        .await?;
    Ok(ApiResponse::ok_empty("Person updated successfully"))
}

/// POST /api/Person/add-astronaut-detail?personId=N
pub async fn add_astronaut_detail(
    State(state): State<AppState>,
    query: Result<Query<AddAstronautDetailQuery>, QueryRejection>,
    body: Result<Json<AstronautDetailBody>, JsonRejection>,
) -> HandlerResult<AstronautDetail> {
    let Query(query) = query?;
    let Json(body) = body?;
    create_detail(&state, body.into_command(query.person_id)).await
}

// =============================================================================
// AstronautDetail
// =============================================================================

/// GET /api/AstronautDetail
pub async fn get_astronaut_details(
    State(state): State<AppState>,
) -> HandlerResult<Vec<AstronautDetail>> {
    let details = state.mediator.send(GetAstronautDetails).await?;
    Ok(ApiResponse::ok(
        "Astronaut details retrieved successfully",
        details,
    ))
}

/// POST /api/AstronautDetail
pub async fn create_astronaut_detail(
    State(state): State<AppState>,
    body: Result<Json<CreateAstronautDetail>, JsonRejection>,
) -> HandlerResult<AstronautDetail> {
    let Json(command) = body?;
    create_detail(&state, command).await
}

async fn create_detail(
    state: &AppState,
    command: CreateAstronautDetail,
) -> HandlerResult<AstronautDetail> {
    let detail = state.mediator.send(command).await?;
    Ok(ApiResponse::ok("AstronautDetail created successfully", detail))
}

// =============================================================================
// AstronautDuty
// =============================================================================

/// POST /api/AstronautDuty
pub async fn create_astronaut_duty(
    State(state): State<AppState>,
    body: Result<Json<CreateAstronautDuty>, JsonRejection>,
) -> HandlerResult<Created<AstronautDutyId>> {
    let Json(command) = body?;
    let duty = state.mediator.send(command).await?;
    Ok(ApiResponse::ok(
        "AstronautDuty created successfully",
        Created { id: duty.id },
    ))
}

/// GET /api/AstronautDuty/{name}
pub async fn get_astronaut_duties_by_name(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> HandlerResult<PersonDuties> {
    let Path(name) = path?;
    let duties = state
        .mediator
        .send(GetAstronautDutiesByName { name })
        .await?;
    Ok(ApiResponse::ok("Astronaut duties retrieved successfully", duties))
}
