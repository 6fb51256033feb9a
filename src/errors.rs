// ABOUTME: Unified HTTP error handling with standard error codes and envelope formatting
// ABOUTME: Maps engine errors onto status codes and the JSON error envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Unified Error Handling
//!
//! Every handler failure flows through [`AppError`], which renders the
//! service's standard envelope:
//!
//! ```json
//! {"error": "<message>", "details": {"<field>": "<reason>"}}
//! ```
//!
//! Engine errors map onto HTTP statuses here, in one place: validation
//! failures are 400, a user with no data is 404, everything unexpected
//! is 500.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mealtrics_core::EngineError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes used throughout the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Malformed or out-of-contract input
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// A numeric input landed outside its allowed range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange,
    /// Requested user or resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,
    /// Service configuration problem
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Unexpected internal fault
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this code
    #[must_use]
    pub const fn http_status(self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::ValueOutOfRange => StatusCode::BAD_REQUEST,
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
            Self::ConfigError | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Unified error type for the service
#[derive(Debug, Clone, Error)]
pub struct AppError {
    /// Error code determining the HTTP status
    pub code: ErrorCode,
    /// Human-readable message (the envelope's `error` field)
    pub message: String,
    /// Per-field reasons (the envelope's `details` object)
    pub details: BTreeMap<String, String>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl AppError {
    /// Create an error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    /// Attach a per-field reason to the envelope's `details`
    #[must_use]
    pub fn with_detail(mut self, field: impl Into<String>, reason: impl Into<String>) -> Self {
        self.details.insert(field.into(), reason.into());
        self
    }

    /// Invalid input (400)
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found (404)
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Configuration error (500)
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error (500)
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<EngineError> for AppError {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidProfile { field, reason } => {
                Self::invalid_input("profile validation failed").with_detail(field, reason)
            }
            EngineError::InfeasibleGoal { calorie_goal, floor } => Self::new(
                ErrorCode::ValueOutOfRange,
                "requested rate produces an unsafe calorie goal",
            )
            .with_detail(
                "weekly_rate",
                format!(
                    "goal of {calorie_goal:.0} kcal/day is below the safety floor of {floor:.0}"
                ),
            ),
            EngineError::InsufficientData { required, actual } => {
                Self::invalid_input("not enough data points for trend analysis").with_detail(
                    "period",
                    format!("need at least {required} daily points, got {actual}"),
                )
            }
            EngineError::EmptyInput => Self::not_found("meal entries for the requested period"),
        }
    }
}

/// Result type alias for handlers and services
pub type AppResult<T> = Result<T, AppError>;

/// Wire format of the error envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Per-field reasons; empty object when there is nothing field-specific
    pub details: BTreeMap<String, String>,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: error.message,
            details: error.details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();
        if status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "request failed");
        }
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// `Json` extractor whose rejection renders the service envelope instead of
/// axum's plain-text body
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::invalid_input(rejection.body_text())),
        }
    }
}
