use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting observer for pipeline events.
///
/// Decouples the frame stages from any output mechanism so callers can
/// watch throughput and stage cost without changing orchestration code.
pub trait PipelineLogger: Send {
    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Count an occurrence of a named event (frame drop, stale discard).
    fn count(&mut self, event: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger for tests and hosts with their own instrumentation.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn count(&mut self, _event: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// Aggregating logger that reports through the `log` crate and can render
/// a per-stage summary at shutdown.
pub struct StdoutPipelineLogger {
    timings: HashMap<String, Vec<f64>>,
    counts: HashMap<String, u64>,
    start_time: Instant,
}

impl StdoutPipelineLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            counts: HashMap::new(),
            start_time: Instant::now(),
        }
    }

    /// Formatted summary, or `None` when nothing was recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.counts.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!("Pipeline summary ({elapsed_s:.1}s):")];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:10}: {} frames, avg {avg_ms:6.1}ms, total {total_ms:7.0}ms",
                durations.len()
            ));
        }

        let mut events: Vec<_> = self.counts.keys().collect();
        events.sort();
        for event in events {
            lines.push(format!("  {event}: {}", self.counts[event]));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn count_for(&self, event: &str) -> u64 {
        self.counts.get(event).copied().unwrap_or(0)
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn count(&mut self, event: &str) {
        *self.counts.entry(event.to_string()).or_default() += 1;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n{text}");
        }
    }
}
