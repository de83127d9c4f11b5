use std::env;

use crate::error::AppError;
use crate::models::point::GeoPoint;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub command_queue_size: usize,
    pub event_buffer_size: usize,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub price_per_km: f64,
    pub currency: String,
    pub max_distance_km: f64,
    pub placeholder: PlaceholderOffset,
    pub default_origin: GeoPoint,
    pub map: MapSettings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderOffset {
    pub distance_km: f64,
    pub bearing_deg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
    pub center: GeoPoint,
    pub initial_zoom: u8,
    pub focus_zoom: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            price_per_km: 4500.0,
            currency: "toman".to_string(),
            max_distance_km: 60.0,
            placeholder: PlaceholderOffset {
                distance_km: 1.0,
                bearing_deg: 90.0,
            },
            default_origin: GeoPoint::from_trusted(35.68839378384561, 51.39163970947266),
            map: MapSettings {
                center: GeoPoint::from_trusted(35.6892, 51.3890),
                initial_zoom: 13,
                focus_zoom: 16,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            command_queue_size: parse_or_default("COMMAND_QUEUE_SIZE", 64)?,
            event_buffer_size: parse_or_default("EVENT_BUFFER_SIZE", 256)?,
            session: SessionConfig::from_env()?,
        })
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();

        let price_per_km = parse_or_default("PRICE_PER_KM", defaults.price_per_km)?;
        if !price_per_km.is_finite() || price_per_km < 0.0 {
            return Err(AppError::Internal(format!(
                "invalid PRICE_PER_KM: {price_per_km} must be a non-negative number"
            )));
        }

        let max_distance_km = parse_or_default("MAX_DISTANCE_KM", defaults.max_distance_km)?;
        if !max_distance_km.is_finite() || max_distance_km <= 0.0 {
            return Err(AppError::Internal(format!(
                "invalid MAX_DISTANCE_KM: {max_distance_km} must be positive"
            )));
        }

        let placeholder = PlaceholderOffset {
            distance_km: parse_or_default(
                "PLACEHOLDER_OFFSET_KM",
                defaults.placeholder.distance_km,
            )?,
            bearing_deg: parse_or_default(
                "PLACEHOLDER_BEARING_DEG",
                defaults.placeholder.bearing_deg,
            )?,
        };

        Ok(Self {
            price_per_km,
            currency: env::var("CURRENCY").unwrap_or(defaults.currency),
            max_distance_km,
            placeholder,
            default_origin: point_or_default(
                "DEFAULT_ORIGIN_LAT",
                "DEFAULT_ORIGIN_LNG",
                defaults.default_origin,
            )?,
            map: MapSettings {
                center: point_or_default("MAP_CENTER_LAT", "MAP_CENTER_LNG", defaults.map.center)?,
                initial_zoom: parse_or_default("INITIAL_ZOOM", defaults.map.initial_zoom)?,
                focus_zoom: parse_or_default("FOCUS_ZOOM", defaults.map.focus_zoom)?,
            },
        })
    }
}

fn point_or_default(lat_key: &str, lng_key: &str, default: GeoPoint) -> Result<GeoPoint, AppError> {
    let lat = parse_or_default(lat_key, default.lat())?;
    let lng = parse_or_default(lng_key, default.lng())?;
    GeoPoint::new(lat, lng)
        .map_err(|err| AppError::Internal(format!("invalid {lat_key}/{lng_key}: {err}")))
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_deployment() {
        let config = SessionConfig::default();
        assert_eq!(config.price_per_km, 4500.0);
        assert_eq!(config.max_distance_km, 60.0);
        assert_eq!(config.placeholder.distance_km, 1.0);
        assert_eq!(config.placeholder.bearing_deg, 90.0);
        assert_eq!(config.map.focus_zoom, 16);
        assert!(GeoPoint::new(config.default_origin.lat(), config.default_origin.lng()).is_ok());
    }

    #[test]
    fn unset_key_falls_back_to_default() {
        let value: u16 = parse_or_default("ROUTE_FARE_TEST_UNSET_KEY", 42).unwrap();
        assert_eq!(value, 42);
    }
}
