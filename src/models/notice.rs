use serde::{Deserialize, Serialize};

use crate::error::SelectionError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NoticeKind {
    OutOfRange,
    LocationUnavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn from_error(err: &SelectionError) -> Option<Self> {
        match err {
            SelectionError::OutOfRange { max_km, .. } => Some(Self {
                kind: NoticeKind::OutOfRange,
                message: format!("distance exceeds {max_km} kilometers"),
            }),
            SelectionError::LocationUnavailable(reason) => Some(Self {
                kind: NoticeKind::LocationUnavailable,
                message: format!("device location is unavailable: {reason}"),
            }),
            SelectionError::InvalidPoint(_)
            | SelectionError::InvalidTransition { .. }
            | SelectionError::EditInProgress { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Notice, NoticeKind};
    use crate::error::{LocationError, SelectionError};

    #[test]
    fn out_of_range_notice_text() {
        let notice = Notice::from_error(&SelectionError::OutOfRange {
            distance_km: 72.4,
            max_km: 60.0,
        })
        .unwrap();
        assert_eq!(notice.kind, NoticeKind::OutOfRange);
        assert_eq!(notice.message, "distance exceeds 60 kilometers");
    }

    #[test]
    fn location_notice_carries_reason() {
        let notice = Notice::from_error(&SelectionError::LocationUnavailable(
            LocationError::PermissionDenied,
        ))
        .unwrap();
        assert_eq!(notice.kind, NoticeKind::LocationUnavailable);
        assert!(notice.message.ends_with("permission denied"));
    }

    #[test]
    fn transition_errors_have_no_notice() {
        let err = SelectionError::EditInProgress {
            action: "select origin",
        };
        assert!(Notice::from_error(&err).is_none());
    }
}
