use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::models::selection::Phase;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    #[error("invalid point: lat {lat} must be in [-90, 90] and lng {lng} in [-180, 180]")]
    InvalidPoint { lat: f64, lng: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum LocationError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("geolocation is not supported")]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    #[error("distance exceeds {max_km} kilometers ({distance_km:.2} km)")]
    OutOfRange { distance_km: f64, max_km: f64 },

    #[error("device location is unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),

    #[error(transparent)]
    InvalidPoint(#[from] GeoError),

    #[error("cannot {action} while {phase}")]
    InvalidTransition { action: &'static str, phase: Phase },

    #[error("cannot {action} while editing")]
    EditInProgress { action: &'static str },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<SelectionError> for AppError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::InvalidPoint(_) => AppError::BadRequest(err.to_string()),
            SelectionError::InvalidTransition { .. } | SelectionError::EditInProgress { .. } => {
                AppError::Conflict(err.to_string())
            }
            SelectionError::OutOfRange { .. } | SelectionError::LocationUnavailable(_) => {
                AppError::Unprocessable(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
