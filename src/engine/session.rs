use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use crate::engine::location::ReportedPosition;
use crate::engine::selection::SelectionState;
use crate::error::SelectionError;
use crate::models::notice::Notice;
use crate::models::point::GeoPoint;
use crate::models::selection::SelectionSnapshot;
use crate::models::view::{DisplaySummary, MapView};
use crate::state::AppState;

#[derive(Debug, Clone)]
pub enum Action {
    SelectOrigin(Option<GeoPoint>),
    SelectDestination(Option<GeoPoint>),
    DragOrigin(GeoPoint),
    DragDestination(GeoPoint),
    RequestLocation(ReportedPosition),
    Reset,
    BeginEdit,
    FinishEdit,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SelectOrigin(_) => "select_origin",
            Action::SelectDestination(_) => "select_destination",
            Action::DragOrigin(_) => "drag_origin",
            Action::DragDestination(_) => "drag_destination",
            Action::RequestLocation(_) => "request_location",
            Action::Reset => "reset",
            Action::BeginEdit => "begin_edit",
            Action::FinishEdit => "finish_edit",
        }
    }
}

pub enum SessionCommand {
    Apply {
        action: Action,
        reply: oneshot::Sender<Result<SelectionSnapshot, SelectionError>>,
    },
    Inspect {
        reply: oneshot::Sender<SessionReport>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub snapshot: SelectionSnapshot,
    pub view: MapView,
    pub summary: DisplaySummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub command: String,
    pub snapshot: SelectionSnapshot,
    pub view: MapView,
    pub notice: Option<Notice>,
    pub at: DateTime<Utc>,
}

pub async fn run_session_engine(
    state: Arc<AppState>,
    mut selection: SelectionState,
    mut command_rx: mpsc::Receiver<SessionCommand>,
) {
    info!("session engine started");

    while let Some(command) = command_rx.recv().await {
        match command {
            SessionCommand::Apply { action, reply } => {
                let result = process_action(&state, &mut selection, action).await;
                let _ = reply.send(result.map(|()| selection.snapshot()));
            }
            SessionCommand::Inspect { reply } => {
                let _ = reply.send(report(&state, &selection));
            }
        }
    }

    warn!("session engine stopped: command channel closed");
}

async fn process_action(
    state: &AppState,
    selection: &mut SelectionState,
    action: Action,
) -> Result<(), SelectionError> {
    let command = action.name();
    let is_location = matches!(action, Action::RequestLocation(_));
    let start = Instant::now();

    let result = apply(selection, action).await;

    state
        .metrics
        .command_latency_seconds
        .with_label_values(&[command])
        .observe(start.elapsed().as_secs_f64());
    state
        .metrics
        .session_commands_total
        .with_label_values(&[command, outcome_label(&result)])
        .inc();
    state
        .metrics
        .current_distance_km
        .set(selection.distance_km().unwrap_or(0.0));
    if is_location {
        state
            .metrics
            .location_requests_total
            .with_label_values(&[outcome_label(&result)])
            .inc();
    }

    let notice = match &result {
        Ok(()) => {
            info!(
                command,
                phase = ?selection.phase(),
                distance_km = ?selection.distance_km(),
                price = ?selection.price(),
                "session updated"
            );
            None
        }
        Err(err) => match err {
            SelectionError::OutOfRange { distance_km, .. } => {
                state.metrics.range_rejections_total.inc();
                warn!(command, distance_km = *distance_km, "pair out of range; session reset");
                Notice::from_error(err)
            }
            SelectionError::LocationUnavailable(_) => {
                warn!(command, error = %err, "device location unavailable");
                Notice::from_error(err)
            }
            _ => {
                warn!(command, error = %err, "command rejected");
                None
            }
        },
    };

    if result.is_ok() || notice.is_some() {
        let snapshot = selection.snapshot();
        let event = SessionEvent {
            command: command.to_string(),
            view: MapView::build(&snapshot, selection.focus(), &state.session.map),
            snapshot,
            notice,
            at: Utc::now(),
        };
        let _ = state.session_events_tx.send(event);
    }

    result
}

async fn apply(selection: &mut SelectionState, action: Action) -> Result<(), SelectionError> {
    match action {
        Action::SelectOrigin(point) => selection.select_origin(point),
        Action::SelectDestination(point) => selection.select_destination(point),
        Action::DragOrigin(point) => selection.drag_origin(point),
        Action::DragDestination(point) => selection.drag_destination(point),
        Action::RequestLocation(provider) => selection.request_device_location(&provider).await,
        Action::Reset => {
            selection.reset();
            Ok(())
        }
        Action::BeginEdit => {
            selection.begin_edit();
            Ok(())
        }
        Action::FinishEdit => {
            selection.finish_edit();
            Ok(())
        }
    }
}

fn report(state: &AppState, selection: &SelectionState) -> SessionReport {
    let snapshot = selection.snapshot();
    SessionReport {
        view: MapView::build(&snapshot, selection.focus(), &state.session.map),
        summary: DisplaySummary::build(&snapshot, &state.session.currency),
        snapshot,
    }
}

fn outcome_label(result: &Result<(), SelectionError>) -> &'static str {
    match result {
        Ok(()) => "ok",
        Err(SelectionError::OutOfRange { .. }) => "out_of_range",
        Err(SelectionError::LocationUnavailable(_)) => "location_unavailable",
        Err(SelectionError::InvalidPoint(_)) => "invalid_point",
        Err(SelectionError::InvalidTransition { .. }) => "invalid_transition",
        Err(SelectionError::EditInProgress { .. }) => "edit_in_progress",
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::oneshot;

    use super::{run_session_engine, Action, SessionCommand};
    use crate::config::SessionConfig;
    use crate::engine::location::ReportedPosition;
    use crate::engine::selection::SelectionState;
    use crate::error::{LocationError, SelectionError};
    use crate::geo::destination_point;
    use crate::models::notice::NoticeKind;
    use crate::models::selection::Phase;
    use crate::state::AppState;

    fn spawn_engine() -> Arc<AppState> {
        let config = SessionConfig::default();
        let (state, rx) = AppState::new(config.clone(), 16, 16);
        let state = Arc::new(state);
        tokio::spawn(run_session_engine(
            state.clone(),
            SelectionState::new(&config),
            rx,
        ));
        state
    }

    async fn send(
        state: &AppState,
        action: Action,
    ) -> Result<crate::models::selection::SelectionSnapshot, SelectionError> {
        let (reply, rx) = oneshot::channel();
        state
            .command_tx
            .send(SessionCommand::Apply { action, reply })
            .await
            .unwrap();
        rx.await.unwrap()
    }

    #[tokio::test]
    async fn commands_are_applied_in_order() {
        let state = spawn_engine();

        send(&state, Action::SelectOrigin(None)).await.unwrap();
        let snapshot = send(&state, Action::SelectDestination(None)).await.unwrap();

        assert_eq!(snapshot.phase, Phase::BothSet);
        assert_eq!(snapshot.distance_km, Some(1.0));
        assert_eq!(snapshot.price, Some(4500.0));
    }

    #[tokio::test]
    async fn out_of_range_broadcasts_notice_and_empty_snapshot() {
        let state = spawn_engine();
        let mut events = state.session_events_tx.subscribe();

        let origin = SessionConfig::default().default_origin;
        send(&state, Action::SelectOrigin(None)).await.unwrap();
        send(&state, Action::SelectDestination(None)).await.unwrap();
        let far = destination_point(&origin, 70.0, 90.0).unwrap();
        let err = send(&state, Action::DragDestination(far)).await.unwrap_err();
        assert!(matches!(err, SelectionError::OutOfRange { .. }));

        let _ = events.recv().await.unwrap();
        let _ = events.recv().await.unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(event.command, "drag_destination");
        assert_eq!(event.snapshot.phase, Phase::Empty);
        assert_eq!(event.notice.unwrap().kind, NoticeKind::OutOfRange);
        assert_eq!(state.metrics.range_rejections_total.get(), 1);
    }

    #[tokio::test]
    async fn rejected_transition_is_not_broadcast() {
        let state = spawn_engine();
        let mut events = state.session_events_tx.subscribe();

        let err = send(&state, Action::SelectDestination(None)).await.unwrap_err();
        assert!(matches!(err, SelectionError::InvalidTransition { .. }));

        send(&state, Action::Reset).await.unwrap();
        let event = events.recv().await.unwrap();
        assert_eq!(event.command, "reset");
    }

    #[tokio::test]
    async fn inspect_reports_formatted_summary() {
        let state = spawn_engine();
        send(&state, Action::SelectOrigin(None)).await.unwrap();
        send(&state, Action::SelectDestination(None)).await.unwrap();

        let (reply, rx) = oneshot::channel();
        state
            .command_tx
            .send(SessionCommand::Inspect { reply })
            .await
            .unwrap();
        let report = rx.await.unwrap();

        assert_eq!(report.summary.distance, "1.00 km");
        assert_eq!(report.summary.price, "4,500 toman");
        assert_eq!(report.view.zoom, 16);
        assert_eq!(report.view.route_line.len(), 2);
    }

    #[tokio::test]
    async fn location_request_resolves_through_provider() {
        let state = spawn_engine();
        let mut events = state.session_events_tx.subscribe();
        let here = destination_point(&SessionConfig::default().default_origin, 2.0, 0.0).unwrap();

        let snapshot = send(&state, Action::RequestLocation(ReportedPosition::new(Ok(here))))
            .await
            .unwrap();
        assert_eq!(snapshot.origin, Some(here));
        assert_eq!(snapshot.user_location, Some(here));

        let denied = ReportedPosition::new(Err(LocationError::PermissionDenied));
        let err = send(&state, Action::RequestLocation(denied)).await.unwrap_err();
        assert!(matches!(err, SelectionError::LocationUnavailable(_)));

        assert_eq!(events.recv().await.unwrap().command, "request_location");
        let event = events.recv().await.unwrap();
        assert_eq!(event.notice.unwrap().kind, NoticeKind::LocationUnavailable);
        assert_eq!(event.snapshot.origin, Some(here));
        assert_eq!(
            state
                .metrics
                .location_requests_total
                .with_label_values(&["location_unavailable"])
                .get(),
            1
        );
    }
}
