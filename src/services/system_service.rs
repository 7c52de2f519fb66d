use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System};
use std::time::{Duration, Instant};

const UNKNOWN_HOST: &str = "unknown";

/// Point-in-time memory counters for the current process, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
}

/// Reads host and process metadata on demand.
///
/// The only state held is the instant the service was created, which anchors uptime.
#[derive(Clone, Debug)]
pub struct SystemService {
    started_at: Instant,
}

impl SystemService {
    #[must_use]
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    #[must_use]
    pub const fn started_at(started_at: Instant) -> Self {
        Self { started_at }
    }

    /// Host name as reported by the OS, or `"unknown"` when it cannot be read.
    #[must_use]
    pub fn hostname(&self) -> String {
        System::host_name().unwrap_or_else(|| {
            tracing::warn!("Host name unavailable");
            UNKNOWN_HOST.to_string()
        })
    }

    #[must_use]
    pub const fn platform(&self) -> &'static str {
        std::env::consts::OS
    }

    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Samples the resident and virtual memory of this process.
    ///
    /// Falls back to zeroed counters if the process table cannot be read.
    #[must_use]
    pub fn memory_snapshot(&self) -> MemorySnapshot {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::warn!(error = %e, "Unable to resolve current pid");
                return MemorySnapshot::default();
            }
        };

        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        system.process(pid).map_or_else(
            || {
                tracing::warn!(pid = %pid, "Process not found while sampling memory");
                MemorySnapshot::default()
            },
            |process| MemorySnapshot { resident_bytes: process.memory(), virtual_bytes: process.virtual_memory() },
        )
    }
}

impl Default for SystemService {
    fn default() -> Self {
        Self::new()
    }
}
