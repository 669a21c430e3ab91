//! Data Transfer Objects for the HTTP API.
//!
//! Every endpoint except `/health` answers with an [`ApiResponse`] envelope.
//! JSON field names are camelCase.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::PersonId;
use crate::services::CreateAstronautDetail;

/// Uniform response envelope. The HTTP status always equals `response_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub response_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 200 with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            response_code: StatusCode::OK.as_u16(),
            data: Some(data),
        }
    }

    /// Failure envelope without a payload.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            response_code: status.as_u16(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// 200 without a payload.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            response_code: StatusCode::OK.as_u16(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.response_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// Body of `PUT /api/Person/{name}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    #[serde(default)]
    pub new_name: Option<String>,
}

/// Query of `POST /api/Person/add-astronaut-detail`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAstronautDetailQuery {
    pub person_id: PersonId,
}

/// Detail fields posted alongside a `personId` query parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstronautDetailBody {
    pub current_rank: String,
    pub current_duty_title: String,
    pub career_start_date: DateTime<Utc>,
    #[serde(default)]
    pub career_end_date: Option<DateTime<Utc>>,
}

impl AstronautDetailBody {
    pub fn into_command(self, person_id: PersonId) -> CreateAstronautDetail {
        CreateAstronautDetail {
            person_id,
            current_rank: self.current_rank,
            current_duty_title: self.current_duty_title,
            career_start_date: self.career_start_date,
            career_end_date: self.career_end_date,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
