use serde::{Deserialize, Serialize};

use crate::config::MapSettings;
use crate::models::point::GeoPoint;
use crate::models::selection::SelectionSnapshot;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MarkerKind {
    Origin,
    Destination,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub position: GeoPoint,
    pub draggable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MapView {
    pub center: GeoPoint,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub route_line: Vec<GeoPoint>,
}

impl MapView {
    pub fn build(snapshot: &SelectionSnapshot, focus: Option<GeoPoint>, map: &MapSettings) -> Self {
        let (center, zoom) = match focus {
            Some(point) => (point, map.focus_zoom),
            None => (map.center, map.initial_zoom),
        };

        let mut markers = Vec::with_capacity(3);
        if let Some(position) = snapshot.origin {
            markers.push(Marker {
                kind: MarkerKind::Origin,
                position,
                draggable: true,
            });
        }
        if let Some(position) = snapshot.destination {
            markers.push(Marker {
                kind: MarkerKind::Destination,
                position,
                draggable: true,
            });
        }
        if let Some(position) = snapshot.user_location {
            markers.push(Marker {
                kind: MarkerKind::User,
                position,
                draggable: false,
            });
        }

        let route_line = match (snapshot.origin, snapshot.destination) {
            (Some(origin), Some(destination)) => vec![origin, destination],
            _ => Vec::new(),
        };

        Self {
            center,
            zoom,
            markers,
            route_line,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplaySummary {
    pub distance: String,
    pub price: String,
}

impl DisplaySummary {
    pub fn build(snapshot: &SelectionSnapshot, currency: &str) -> Self {
        Self {
            distance: format_distance(snapshot.distance_km),
            price: format_price(snapshot.price, currency),
        }
    }
}

pub fn format_distance(distance_km: Option<f64>) -> String {
    match distance_km {
        Some(km) if km.is_finite() => format!("{km:.2} km"),
        _ => "0 km".to_string(),
    }
}

pub fn format_price(price: Option<f64>, currency: &str) -> String {
    match price {
        Some(amount) if amount.is_finite() && amount != 0.0 => {
            format!("{} {currency}", group_thousands(amount))
        }
        _ => format!("0 {currency}"),
    }
}

fn group_thousands(amount: f64) -> String {
    let fixed = format!("{:.3}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if amount < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}
