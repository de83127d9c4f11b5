#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeCheck {
    Valid,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeGuard {
    max_distance_km: f64,
}

impl RangeGuard {
    pub fn new(max_distance_km: f64) -> Self {
        Self { max_distance_km }
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// The bound itself is allowed. NaN never passes.
    pub fn check(&self, distance_km: f64) -> RangeCheck {
        if distance_km <= self.max_distance_km {
            RangeCheck::Valid
        } else {
            RangeCheck::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeCheck, RangeGuard};

    #[test]
    fn bound_is_inclusive() {
        let guard = RangeGuard::new(60.0);
        assert_eq!(guard.check(0.0), RangeCheck::Valid);
        assert_eq!(guard.check(60.0), RangeCheck::Valid);
        assert_eq!(guard.check(60.000_1), RangeCheck::Rejected);
    }

    #[test]
    fn nan_is_rejected() {
        let guard = RangeGuard::new(60.0);
        assert_eq!(guard.check(f64::NAN), RangeCheck::Rejected);
    }
}
