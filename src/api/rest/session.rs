use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;

use crate::engine::location::ReportedPosition;
use crate::engine::queue::{dispatch, inspect};
use crate::engine::session::{Action, SessionReport};
use crate::error::{AppError, LocationError, SelectionError};
use crate::models::point::GeoPoint;
use crate::models::selection::SelectionSnapshot;
use crate::models::view::{DisplaySummary, MapView};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/session", get(get_session))
        .route("/session/view", get(get_view))
        .route("/session/summary", get(get_summary))
        .route("/session/origin", post(select_origin).patch(drag_origin))
        .route(
            "/session/destination",
            post(select_destination).patch(drag_destination),
        )
        .route("/session/location", post(report_location))
        .route("/session/reset", post(reset))
        .route("/session/edit", post(begin_edit).delete(finish_edit))
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointPayload {
    pub lat: f64,
    pub lng: f64,
}

impl TryFrom<PointPayload> for GeoPoint {
    type Error = SelectionError;

    fn try_from(payload: PointPayload) -> Result<Self, Self::Error> {
        Ok(GeoPoint::new(payload.lat, payload.lng)?)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub point: Option<PointPayload>,
}

#[derive(Debug, Deserialize)]
pub struct DragRequest {
    pub point: PointPayload,
}

#[derive(Debug, Deserialize)]
pub struct LocationReport {
    #[serde(default)]
    pub position: Option<PointPayload>,
    #[serde(default)]
    pub error: Option<LocationError>,
}

fn optional_point(point: Option<PointPayload>) -> Result<Option<GeoPoint>, AppError> {
    point
        .map(GeoPoint::try_from)
        .transpose()
        .map_err(AppError::from)
}

async fn get_session(State(state): State<Arc<AppState>>) -> Result<Json<SessionReport>, AppError> {
    Ok(Json(inspect(&state).await?))
}

async fn get_view(State(state): State<Arc<AppState>>) -> Result<Json<MapView>, AppError> {
    Ok(Json(inspect(&state).await?.view))
}

async fn get_summary(State(state): State<Arc<AppState>>) -> Result<Json<DisplaySummary>, AppError> {
    Ok(Json(inspect(&state).await?.summary))
}

async fn select_origin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<SelectionSnapshot>, AppError> {
    let point = optional_point(payload.point)?;
    Ok(Json(dispatch(&state, Action::SelectOrigin(point)).await?))
}

async fn select_destination(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<SelectionSnapshot>, AppError> {
    let point = optional_point(payload.point)?;
    Ok(Json(dispatch(&state, Action::SelectDestination(point)).await?))
}

async fn drag_origin(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DragRequest>,
) -> Result<Json<SelectionSnapshot>, AppError> {
    let point = GeoPoint::try_from(payload.point)?;
    Ok(Json(dispatch(&state, Action::DragOrigin(point)).await?))
}

async fn drag_destination(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DragRequest>,
) -> Result<Json<SelectionSnapshot>, AppError> {
    let point = GeoPoint::try_from(payload.point)?;
    Ok(Json(dispatch(&state, Action::DragDestination(point)).await?))
}

async fn report_location(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LocationReport>,
) -> Result<Json<SelectionSnapshot>, AppError> {
    let outcome = match (payload.position, payload.error) {
        (Some(position), None) => Ok(GeoPoint::try_from(position)?),
        (None, Some(error)) => Err(error),
        _ => {
            return Err(AppError::BadRequest(
                "exactly one of position or error is required".to_string(),
            ));
        }
    };

    let provider = ReportedPosition::new(outcome);
    Ok(Json(dispatch(&state, Action::RequestLocation(provider)).await?))
}

async fn reset(State(state): State<Arc<AppState>>) -> Result<Json<SelectionSnapshot>, AppError> {
    Ok(Json(dispatch(&state, Action::Reset).await?))
}

async fn begin_edit(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SelectionSnapshot>, AppError> {
    Ok(Json(dispatch(&state, Action::BeginEdit).await?))
}

async fn finish_edit(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SelectionSnapshot>, AppError> {
    Ok(Json(dispatch(&state, Action::FinishEdit).await?))
}
