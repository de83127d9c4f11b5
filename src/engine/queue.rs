use tokio::sync::oneshot;

use crate::engine::session::{Action, SessionCommand, SessionReport};
use crate::error::AppError;
use crate::models::selection::SelectionSnapshot;
use crate::state::AppState;

pub async fn dispatch(state: &AppState, action: Action) -> Result<SelectionSnapshot, AppError> {
    let (reply, reply_rx) = oneshot::channel();

    state
        .command_tx
        .send(SessionCommand::Apply { action, reply })
        .await
        .map_err(|err| AppError::Internal(format!("session queue send failed: {err}")))?;

    let outcome = reply_rx
        .await
        .map_err(|err| AppError::Internal(format!("session engine dropped reply: {err}")))?;

    Ok(outcome?)
}

pub async fn inspect(state: &AppState) -> Result<SessionReport, AppError> {
    let (reply, reply_rx) = oneshot::channel();

    state
        .command_tx
        .send(SessionCommand::Inspect { reply })
        .await
        .map_err(|err| AppError::Internal(format!("session queue send failed: {err}")))?;

    reply_rx
        .await
        .map_err(|err| AppError::Internal(format!("session engine dropped reply: {err}")))
}
