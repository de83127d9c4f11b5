use std::future::Future;

use crate::error::LocationError;
use crate::models::point::GeoPoint;

/// Single-shot "where is the device now" capability.
pub trait LocationProvider {
    fn current_position(&self) -> impl Future<Output = Result<GeoPoint, LocationError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportedPosition {
    outcome: Result<GeoPoint, LocationError>,
}

impl ReportedPosition {
    pub fn new(outcome: Result<GeoPoint, LocationError>) -> Self {
        Self { outcome }
    }
}

impl LocationProvider for ReportedPosition {
    fn current_position(&self) -> impl Future<Output = Result<GeoPoint, LocationError>> + Send {
        std::future::ready(self.outcome)
    }
}
