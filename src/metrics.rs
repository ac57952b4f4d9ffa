//! Prometheus metrics for the HTTP service and screening runs.

use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntGauge, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub screening_runs_total: IntCounter,
    pub tickers_screened_total: IntCounter,
    pub tickers_excluded_total: IntCounter,
    pub simulations_total: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight =
            IntGauge::new("http_requests_in_flight", "HTTP requests currently being served")?;
        let screening_runs_total =
            IntCounter::new("screening_runs_total", "Completed screening runs")?;
        let tickers_screened_total =
            IntCounter::new("tickers_screened_total", "Tickers evaluated by the screener")?;
        let tickers_excluded_total = IntCounter::new(
            "tickers_excluded_total",
            "Tickers excluded because price data was unavailable",
        )?;
        let simulations_total =
            IntCounter::new("simulations_total", "Completed portfolio simulations")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(screening_runs_total.clone()))?;
        registry.register(Box::new(tickers_screened_total.clone()))?;
        registry.register(Box::new(tickers_excluded_total.clone()))?;
        registry.register(Box::new(simulations_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            screening_runs_total,
            tickers_screened_total,
            tickers_excluded_total,
            simulations_total,
        })
    }

    /// Render all metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
