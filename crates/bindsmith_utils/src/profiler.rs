use std::time::{Duration, Instant};

use tracing::info;

/// Wall-clock time spent in each generation phase.
#[derive(Default)]
pub struct Profiler {
    phases: Vec<PhaseTiming>,
}

impl Profiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_phase<F, T>(&mut self, name: impl Into<String>, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let name = name.into();
        let start = Instant::now();
        let output = f();
        let duration = start.elapsed();
        self.phases.push(PhaseTiming { name, duration });
        output
    }

    pub fn phases(&self) -> &[PhaseTiming] {
        &self.phases
    }

    pub fn total(&self) -> Duration {
        self.phases.iter().map(|phase| phase.duration).sum()
    }

    /// Logs one line per phase at `info`.
    pub fn report(&self) {
        for phase in &self.phases {
            info!(
                phase = %phase.name,
                millis = phase.duration.as_secs_f64() * 1000.0,
                "phase finished"
            );
        }
    }
}

#[derive(Clone, Debug)]
pub struct PhaseTiming {
    pub name: String,
    pub duration: Duration,
}
