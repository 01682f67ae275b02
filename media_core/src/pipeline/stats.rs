use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::pipeline::types::Step;

/// Timing record for one program run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub started_at: DateTime<Local>,
    pub steps: Vec<(Step, Duration)>,
    pub total_time: Duration,
    start_time: Instant,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started_at: Local::now(),
            steps: Vec::new(),
            total_time: Duration::new(0, 0),
            start_time: Instant::now(),
        }
    }

    pub fn add_step(&mut self, step: Step, elapsed: Duration) {
        self.steps.push((step, elapsed));
    }

    pub fn finalize(&mut self) {
        self.total_time = self.start_time.elapsed();
    }

    pub fn completed(&self) -> Vec<Step> {
        self.steps.iter().map(|(step, _)| *step).collect()
    }

    pub fn summary(&self) -> String {
        let steps = self
            .steps
            .iter()
            .map(|(step, elapsed)| format!("{} {:.2?}", step.name(), elapsed))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "started {}, total {:.2?} ({})",
            self.started_at.format("%Y-%m-%d %H:%M:%S"),
            self.total_time,
            steps
        )
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
