#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FareModel {
    price_per_km: f64,
}

impl FareModel {
    pub fn new(price_per_km: f64) -> Self {
        Self { price_per_km }
    }

    pub fn price_per_km(&self) -> f64 {
        self.price_per_km
    }

    pub fn price(&self, distance_km: f64) -> f64 {
        distance_km * self.price_per_km
    }
}
