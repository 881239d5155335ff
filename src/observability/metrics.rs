use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub jobs_created_total: IntCounter,
    pub job_transitions_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let jobs_created_total = IntCounter::new("jobs_created_total", "Total jobs posted")
            .expect("valid jobs_created_total metric");

        let job_transitions_total = IntCounterVec::new(
            Opts::new(
                "job_transitions_total",
                "Job status transitions by operation and outcome",
            ),
            &["operation", "outcome"],
        )
        .expect("valid job_transitions_total metric");

        registry
            .register(Box::new(jobs_created_total.clone()))
            .expect("register jobs_created_total");
        registry
            .register(Box::new(job_transitions_total.clone()))
            .expect("register job_transitions_total");

        Self {
            registry,
            jobs_created_total,
            job_transitions_total,
        }
    }

    pub fn record_transition(&self, operation: &str, outcome: &str) {
        self.job_transitions_total
            .with_label_values(&[operation, outcome])
            .inc();
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

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
