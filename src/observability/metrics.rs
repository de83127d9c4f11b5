use prometheus::{
    Encoder, Gauge, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub session_commands_total: IntCounterVec,
    pub range_rejections_total: IntCounter,
    pub location_requests_total: IntCounterVec,
    pub current_distance_km: Gauge,
    pub command_latency_seconds: HistogramVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let session_commands_total = IntCounterVec::new(
            Opts::new(
                "session_commands_total",
                "Session commands by command and outcome",
            ),
            &["command", "outcome"],
        )
        .expect("valid session_commands_total metric");

        let range_rejections_total = IntCounter::new(
            "range_rejections_total",
            "Point pairs rejected for exceeding the distance bound",
        )
        .expect("valid range_rejections_total metric");

        let location_requests_total = IntCounterVec::new(
            Opts::new(
                "location_requests_total",
                "Device location results by outcome",
            ),
            &["outcome"],
        )
        .expect("valid location_requests_total metric");

        let current_distance_km = Gauge::new(
            "current_distance_km",
            "Committed route distance in kilometers, 0 when absent",
        )
        .expect("valid current_distance_km metric");

        let command_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "command_latency_seconds",
                "Time spent applying a session command in seconds",
            ),
            &["command"],
        )
        .expect("valid command_latency_seconds metric");

        registry
            .register(Box::new(session_commands_total.clone()))
            .expect("register session_commands_total");
        registry
            .register(Box::new(range_rejections_total.clone()))
            .expect("register range_rejections_total");
        registry
            .register(Box::new(location_requests_total.clone()))
            .expect("register location_requests_total");
        registry
            .register(Box::new(current_distance_km.clone()))
            .expect("register current_distance_km");
        registry
            .register(Box::new(command_latency_seconds.clone()))
            .expect("register command_latency_seconds");

        Self {
            registry,
            session_commands_total,
            range_rejections_total,
            location_requests_total,
            current_distance_km,
            command_latency_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Metrics;

    #[test]
    fn encodes_registered_families() {
        let metrics = Metrics::new();
        metrics.range_rejections_total.inc();
        metrics.current_distance_km.set(1.0);

        let body = metrics.encode().unwrap();
        assert!(body.contains("range_rejections_total 1"));
        assert!(body.contains("current_distance_km 1"));
    }
}
