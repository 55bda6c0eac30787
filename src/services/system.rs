//! System CPU load sampling

use std::{path::PathBuf, sync::Mutex};
use tracing::{debug, info};

/// Returned by a [`CpuLoadSource`] when no load figure can be produced
pub const CPU_LOAD_UNAVAILABLE: f64 = -1.0;

/// Source of the instantaneous system-wide CPU load.
pub trait CpuLoadSource: Send + Sync {
    /// Load as a fraction in `[0, 1]`, or a negative value when unavailable
    fn system_cpu_load(&self) -> f64;
}

/// Cumulative CPU time from the aggregate `cpu` line of `/proc/stat`, in clock ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CpuTimes {
    busy: u64,
    total: u64,
}

impl CpuTimes {
    fn parse(stat: &str) -> Option<Self> {
        let line = stat.lines().find(|line| line.starts_with("cpu "))?;
        let ticks: Vec<u64> = line
            .split_whitespace()
            .skip(1)
            .map(|field| field.parse().ok())
            .collect::<Option<_>>()?;
        if ticks.len() < 4 {
            return None;
        }

        // user nice system idle iowait irq softirq steal; guest time is already in user/nice
        let total: u64 = ticks.iter().take(8).sum();
        let idle = ticks[3] + ticks.get(4).copied().unwrap_or(0);
        Some(Self {
            busy: total.saturating_sub(idle),
            total,
        })
    }

    fn load_since(&self, previous: &CpuTimes) -> Option<f64> {
        let total = self.total.checked_sub(previous.total)?;
        if total == 0 {
            return None;
        }
        let busy = self.busy.saturating_sub(previous.busy);
        Some((busy as f64 / total as f64).clamp(0.0, 1.0))
    }
}

/// Last snapshot that produced a load figure, with that figure
#[derive(Debug, Default)]
struct CpuSnapshot {
    times: CpuTimes,
    load: Option<f64>,
}

/// Samples CPU load from `/proc/stat`, reporting utilisation since the previous sample.
///
/// The first sample is measured against boot. Samples taken within the same
/// clock tick repeat the last computed load.
#[derive(Debug)]
pub struct ProcStatCpuLoad {
    path: PathBuf,
    previous: Mutex<CpuSnapshot>,
}

impl ProcStatCpuLoad {
    pub fn new() -> Self {
        Self::with_path("/proc/stat")
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            previous: Mutex::new(CpuSnapshot::default()),
        }
    }

    fn sample(&self) -> Result<f64, String> {
        let stat = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
        let current = CpuTimes::parse(&stat)
            .ok_or_else(|| format!("No aggregate cpu line in {}", self.path.display()))?;

        let mut snapshot = self.previous.lock()
            .map_err(|e| format!("Failed to lock cpu snapshot: {}", e))?;
        match current.load_since(&snapshot.times) {
            Some(load) => {
                snapshot.times = current;
                snapshot.load = Some(load);
                Ok(load)
            }
            None => {
                // Counters went backwards, start measuring from here
                if current.total < snapshot.times.total {
                    snapshot.times = current;
                }
                snapshot.load
                    .ok_or_else(|| "No CPU time recorded since boot".to_string())
            }
        }
    }
}

impl Default for ProcStatCpuLoad {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuLoadSource for ProcStatCpuLoad {
    fn system_cpu_load(&self) -> f64 {
        match self.sample() {
            Ok(load) => load,
            Err(e) => {
                debug!("CPU load unavailable: {}", e);
                CPU_LOAD_UNAVAILABLE
            }
        }
    }
}

/// Take an initial sample so the CPU source is primed before the first probe
pub fn check_cpu_load_available(source: &dyn CpuLoadSource) -> Result<f64, String> {
    let load = source.system_cpu_load();
    if load.is_nan() || load < 0.0 {
        return Err("System CPU load is not available on this host".to_string());
    }

    info!("System CPU load available (currently {:.2})", load);
    Ok(load)
}
