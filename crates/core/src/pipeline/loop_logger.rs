use std::collections::HashMap;
use std::time::Instant;

/// Observer for perception loop events.
///
/// Keeps the loop free of output decisions: the CLI prints a run summary,
/// the desktop gate discards everything.
pub trait LoopLogger: Send {
    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time value (e.g. detections per frame).
    fn metric(&mut self, name: &str, value: f64);

    /// Count one frame through the loop.
    fn frame(&mut self);

    /// Count one cycle skipped because the camera returned no frame.
    fn read_failure(&mut self);

    /// Count one frame dropped because detection or annotation failed.
    fn step_failure(&mut self);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullLoopLogger;

impl LoopLogger for NullLoopLogger {
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn frame(&mut self) {}
    fn read_failure(&mut self) {}
    fn step_failure(&mut self) {}
}

/// Collects per-stage timings and reports them through `log` when the run
/// ends.
pub struct StdoutLoopLogger {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    frames: usize,
    read_failures: usize,
    step_failures: usize,
}

impl StdoutLoopLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            frames: 0,
            read_failures: 0,
            step_failures: 0,
        }
    }

    /// Returns the formatted summary, or `None` if no frame was processed.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 && self.read_failures == 0 && self.step_failures == 0 {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Loop summary ({} frames, {:.1}s total):",
            self.frames,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = average(durations);
            lines.push(format!(
                "  {stage:10}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms"
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: avg {:.1}", average(&self.metrics[name])));
        }

        if self.read_failures > 0 {
            lines.push(format!("  Skipped reads: {}", self.read_failures));
        }
        if self.step_failures > 0 {
            lines.push(format!("  Failed frames: {}", self.step_failures));
        }

        if self.frames > 0 && elapsed_ms > 0.0 {
            let fps = self.frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }
}

impl Default for StdoutLoopLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopLogger for StdoutLoopLogger {
    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn frame(&mut self) {
        self.frames += 1;
    }

    fn read_failure(&mut self) {
        self.read_failures += 1;
        log::debug!("Frame read failed ({} so far)", self.read_failures);
    }

    fn step_failure(&mut self) {
        self.step_failures += 1;
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullLoopLogger;
        logger.timing("detect", 5.0);
        logger.metric("detections", 1.0);
        logger.frame();
        logger.read_failure();
        logger.step_failure();
        logger.summary();
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = StdoutLoopLogger::new();
        logger.timing("detect", 20.0);
        logger.timing("detect", 30.0);
        logger.timing("annotate", 5.0);

        assert_eq!(logger.timings_for("detect"), Some(&[20.0, 30.0][..]));
        assert_eq!(logger.timings_for("annotate"), Some(&[5.0][..]));
        assert!(logger.timings_for("present").is_none());
    }

    #[test]
    fn test_metric_average() {
        let mut logger = StdoutLoopLogger::new();
        logger.metric("detections", 1.0);
        logger.metric("detections", 2.0);

        let values = logger.metrics_for("detections").unwrap();
        assert_relative_eq!(average(values), 1.5);
    }

    #[test]
    fn test_summary_lists_stages_and_failures() {
        let mut logger = StdoutLoopLogger::new();
        logger.frame();
        logger.frame();
        logger.read_failure();
        logger.step_failure();
        logger.timing("detect", 10.0);
        logger.metric("detections", 3.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Loop summary (2 frames"));
        assert!(summary.contains("detect"));
        assert!(summary.contains("detections: avg 3.0"));
        assert!(summary.contains("Skipped reads: 1"));
        assert!(summary.contains("Failed frames: 1"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(StdoutLoopLogger::new().summary_string().is_none());
    }
}
