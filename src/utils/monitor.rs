use std::sync::Mutex;
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};

/// Resource snapshot taken when a dashboard phase completes.
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub phase_time: Duration,
    pub elapsed_time: Duration,
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
}

/// Tracks wall time per phase (load, aggregate, export) and, with the `cli`
/// feature, the process CPU and resident memory at each phase boundary.
pub struct SystemMonitor {
    enabled: bool,
    start_time: Instant,
    last_mark: Mutex<Instant>,
    phases: Mutex<Vec<PhaseStats>>,
    #[cfg(feature = "cli")]
    system: Mutex<System>,
    #[cfg(feature = "cli")]
    pid: Option<Pid>,
}

impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            enabled,
            start_time: now,
            last_mark: Mutex::new(now),
            phases: Mutex::new(Vec::new()),
            #[cfg(feature = "cli")]
            system: Mutex::new(System::new_with_specifics(RefreshKind::nothing())),
            #[cfg(feature = "cli")]
            pid: Self::current_pid(enabled),
        }
    }

    #[cfg(feature = "cli")]
    fn current_pid(enabled: bool) -> Option<Pid> {
        let pid = sysinfo::get_current_pid().ok();
        if pid.is_none() && enabled {
            tracing::warn!("Could not determine current PID, process stats disabled");
        }
        pid
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// (cpu %, resident MB) of this process, zeros when unavailable.
    #[cfg(feature = "cli")]
    fn process_usage(&self) -> (f32, u64) {
        let (Some(pid), Ok(mut system)) = (self.pid, self.system.lock()) else {
            return (0.0, 0);
        };
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_cpu().with_memory(),
        );
        system
            .process(pid)
            .map(|p| (p.cpu_usage(), p.memory() / 1024 / 1024))
            .unwrap_or((0.0, 0))
    }

    #[cfg(not(feature = "cli"))]
    fn process_usage(&self) -> (f32, u64) {
        (0.0, 0)
    }

    /// Close the current phase and return its snapshot.
    pub fn mark_phase(&self, phase: &str) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }

        let now = Instant::now();
        let phase_time = {
            let mut last = self.last_mark.lock().ok()?;
            let elapsed = now.duration_since(*last);
            *last = now;
            elapsed
        };
        let (cpu_usage, memory_usage_mb) = self.process_usage();

        let stats = PhaseStats {
            phase: phase.to_string(),
            phase_time,
            elapsed_time: now.duration_since(self.start_time),
            cpu_usage,
            memory_usage_mb,
        };
        self.phases.lock().ok()?.push(stats.clone());
        Some(stats)
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.mark_phase(phase) {
            tracing::info!(
                phase,
                cpu = stats.cpu_usage,
                memory_mb = stats.memory_usage_mb,
                "📊 {} took {:?} - CPU: {:.1}%, Memory: {}MB",
                phase,
                stats.phase_time,
                stats.cpu_usage,
                stats.memory_usage_mb
            );
        }
    }

    pub fn phases(&self) -> Vec<PhaseStats> {
        self.phases
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn peak_memory_mb(&self) -> u64 {
        self.phases()
            .iter()
            .map(|p| p.memory_usage_mb)
            .max()
            .unwrap_or(0)
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        let breakdown = self
            .phases()
            .iter()
            .map(|p| format!("{}={:?}", p.phase, p.phase_time))
            .collect::<Vec<_>>()
            .join(", ");
        tracing::info!(
            "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB [{}]",
            self.start_time.elapsed(),
            self.peak_memory_mb(),
            breakdown
        );
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
