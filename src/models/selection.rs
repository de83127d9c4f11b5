use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::point::GeoPoint;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Empty,
    OriginSet,
    BothSet,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::Empty => "no point is selected",
            Phase::OriginSet => "only the origin is selected",
            Phase::BothSet => "origin and destination are selected",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Controls {
    pub can_select_origin: bool,
    pub can_select_destination: bool,
    pub can_request_location: bool,
    pub can_edit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionSnapshot {
    pub phase: Phase,
    pub origin: Option<GeoPoint>,
    pub destination: Option<GeoPoint>,
    pub distance_km: Option<f64>,
    pub price: Option<f64>,
    pub edit_mode: bool,
    pub user_location: Option<GeoPoint>,
    pub controls: Controls,
}
