//! Synthetic latency and cost instrumentation.
//!
//! Stands in for timing a real generation call and pricing its token usage.
//! Samples come from a seeded `StdRng`, so a fixed seed reproduces a run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::TelemetryConfig;
use crate::text::tokenize;

/// Latency and cost of a single generation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Telemetry {
    pub latency_ms: f64,
    pub cost_usd: f64,
}

/// Produces deterministic latency/cost samples from answer length.
#[derive(Debug, Clone)]
pub struct TelemetrySimulator {
    config: TelemetryConfig,
    rng: StdRng,
}

impl TelemetrySimulator {
    pub fn new(config: TelemetryConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sample telemetry for an answer. Every call advances the RNG.
    pub fn measure(&mut self, answer: &str) -> Telemetry {
        let tokens = tokenize(answer).len().max(1) as f64;
        let jitter = self.rng.gen_range(0..=self.config.jitter_ms);
        let latency_ms =
            self.config.base_latency_ms + self.config.per_token_latency_ms * tokens + jitter as f64;
        let cost_usd = round_to(self.config.cost_per_token_usd * tokens, 6);
        Telemetry {
            latency_ms,
            cost_usd,
        }
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
