use crate::config::{PlaceholderOffset, SessionConfig};
use crate::engine::fare::FareModel;
use crate::engine::location::LocationProvider;
use crate::engine::range::{RangeCheck, RangeGuard};
use crate::error::{LocationError, SelectionError};
use crate::geo::{destination_point, haversine_km, round_km};
use crate::models::point::GeoPoint;
use crate::models::selection::{Controls, Phase, SelectionSnapshot};

#[derive(Debug, Clone)]
pub struct SelectionState {
    origin: Option<GeoPoint>,
    destination: Option<GeoPoint>,
    distance_km: Option<f64>,
    price: Option<f64>,
    edit_mode: bool,
    user_location: Option<GeoPoint>,
    focus: Option<GeoPoint>,
    fare: FareModel,
    guard: RangeGuard,
    placeholder: PlaceholderOffset,
    default_origin: GeoPoint,
}

impl SelectionState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            origin: None,
            destination: None,
            distance_km: None,
            price: None,
            edit_mode: false,
            user_location: None,
            focus: None,
            fare: FareModel::new(config.price_per_km),
            guard: RangeGuard::new(config.max_distance_km),
            placeholder: config.placeholder,
            default_origin: config.default_origin,
        }
    }

    pub fn phase(&self) -> Phase {
        match (self.origin, self.destination) {
            (Some(_), Some(_)) => Phase::BothSet,
            (Some(_), None) => Phase::OriginSet,
            (None, _) => Phase::Empty,
        }
    }

    pub fn origin(&self) -> Option<GeoPoint> {
        self.origin
    }

    pub fn destination(&self) -> Option<GeoPoint> {
        self.destination
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.distance_km
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn user_location(&self) -> Option<GeoPoint> {
        self.user_location
    }

    pub fn focus(&self) -> Option<GeoPoint> {
        self.focus
    }

    pub fn select_origin(&mut self, point: Option<GeoPoint>) -> Result<(), SelectionError> {
        self.ensure_not_editing("select origin")?;
        if self.phase() == Phase::BothSet {
            return Err(self.invalid("select origin"));
        }

        let point = point.unwrap_or(self.default_origin);
        self.origin = Some(point);
        self.recompute(point)
    }

    pub fn select_destination(&mut self, point: Option<GeoPoint>) -> Result<(), SelectionError> {
        self.ensure_not_editing("select destination")?;
        let origin = match (self.origin, self.destination) {
            (Some(origin), None) => origin,
            _ => return Err(self.invalid("select destination")),
        };

        let point = match point {
            Some(point) => point,
            None => destination_point(
                &origin,
                self.placeholder.distance_km,
                self.placeholder.bearing_deg,
            )?,
        };

        self.destination = Some(point);
        self.recompute(point)
    }

    pub fn drag_origin(&mut self, point: GeoPoint) -> Result<(), SelectionError> {
        if self.phase() == Phase::Empty {
            return Err(self.invalid("drag origin"));
        }

        self.origin = Some(point);
        self.recompute(point)
    }

    pub fn drag_destination(&mut self, point: GeoPoint) -> Result<(), SelectionError> {
        if self.phase() != Phase::BothSet {
            return Err(self.invalid("drag destination"));
        }

        self.destination = Some(point);
        self.recompute(point)
    }

    pub fn reset(&mut self) {
        let was_editing = self.edit_mode;
        self.edit_mode = true;

        self.origin = None;
        self.destination = None;
        self.distance_km = None;
        self.price = None;

        self.edit_mode = was_editing;
    }

    pub fn begin_edit(&mut self) {
        self.edit_mode = true;
    }

    pub fn finish_edit(&mut self) {
        self.edit_mode = false;
    }

    pub async fn request_device_location<P>(&mut self, provider: &P) -> Result<(), SelectionError>
    where
        P: LocationProvider,
    {
        self.ensure_not_editing("request device location")?;
        let position = provider.current_position().await;
        self.apply_location(position)
    }

    pub fn apply_location(
        &mut self,
        position: Result<GeoPoint, LocationError>,
    ) -> Result<(), SelectionError> {
        self.ensure_not_editing("request device location")?;
        let point = position?;

        self.user_location = Some(point);
        self.origin = Some(point);
        self.recompute(point)
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            phase: self.phase(),
            origin: self.origin,
            destination: self.destination,
            distance_km: self.distance_km,
            price: self.price,
            edit_mode: self.edit_mode,
            user_location: self.user_location,
            controls: Controls {
                can_select_origin: !self.edit_mode && self.destination.is_none(),
                can_select_destination: !self.edit_mode
                    && self.origin.is_some()
                    && self.destination.is_none(),
                can_request_location: !self.edit_mode,
                can_edit: self.origin.is_some() || self.destination.is_some(),
            },
        }
    }

    // `focus` only follows points that were committed.
    fn recompute(&mut self, moved: GeoPoint) -> Result<(), SelectionError> {
        let (Some(origin), Some(destination)) = (self.origin, self.destination) else {
            self.distance_km = None;
            self.price = None;
            self.focus = Some(moved);
            return Ok(());
        };

        let raw_km = haversine_km(&origin, &destination);
        match self.guard.check(raw_km) {
            RangeCheck::Valid => {
                let distance_km = round_km(raw_km);
                self.distance_km = Some(distance_km);
                self.price = Some(self.fare.price(distance_km));
                self.focus = Some(moved);
                Ok(())
            }
            RangeCheck::Rejected => {
                self.reset();
                Err(SelectionError::OutOfRange {
                    distance_km: raw_km,
                    max_km: self.guard.max_distance_km(),
                })
            }
        }
    }

    fn ensure_not_editing(&self, action: &'static str) -> Result<(), SelectionError> {
        if self.edit_mode {
            Err(SelectionError::EditInProgress { action })
        } else {
            Ok(())
        }
    }

    fn invalid(&self, action: &'static str) -> SelectionError {
        SelectionError::InvalidTransition {
            action,
            phase: self.phase(),
        }
    }
}
