use tokio::sync::{broadcast, mpsc};

use crate::config::SessionConfig;
use crate::engine::session::{SessionCommand, SessionEvent};
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub command_tx: mpsc::Sender<SessionCommand>,
    pub session_events_tx: broadcast::Sender<SessionEvent>,
    pub session: SessionConfig,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        session: SessionConfig,
        command_queue_size: usize,
        event_buffer_size: usize,
    ) -> (Self, mpsc::Receiver<SessionCommand>) {
        let (command_tx, command_rx) = mpsc::channel(command_queue_size);
        let (session_events_tx, _unused_rx) = broadcast::channel(event_buffer_size);

        (
            Self {
                command_tx,
                session_events_tx,
                session,
                metrics: Metrics::new(),
            },
            command_rx,
        )
    }
}
