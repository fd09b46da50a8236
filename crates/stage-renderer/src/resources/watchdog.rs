//! Memory and frame-rate watchdog

use super::PoolStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryStatus {
    Ok,
    /// Above the warning threshold
    Warning,
    /// Above the critical threshold; a forced cleanup is due
    Critical,
}

/// Snapshot shown by the resource monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceReport {
    pub fps: f32,
    pub stats: PoolStats,
    pub budget_bytes: usize,
    pub memory: MemoryStatus,
    pub low_fps: bool,
}

impl ResourceReport {
    pub fn usage_ratio(&self) -> f32 {
        if self.budget_bytes == 0 {
            return 0.0;
        }
        self.stats.bytes as f32 / self.budget_bytes as f32
    }
}

/// Classifies estimated GPU memory use against a budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryWatchdog {
    pub budget_bytes: usize,
    pub warning_threshold: f32,
    pub critical_threshold: f32,
    pub fps_warning: f32,
}

impl Default for MemoryWatchdog {
    fn default() -> Self {
        Self {
            budget_bytes: 512 * 1024 * 1024,
            warning_threshold: 0.8,
            critical_threshold: 0.9,
            fps_warning: 30.0,
        }
    }
}

impl MemoryWatchdog {
    pub fn classify_ratio(&self, ratio: f32) -> MemoryStatus {
        if ratio > self.critical_threshold {
            MemoryStatus::Critical
        } else if ratio > self.warning_threshold {
            MemoryStatus::Warning
        } else {
            MemoryStatus::Ok
        }
    }

    pub fn report(&self, stats: PoolStats, fps: f32) -> ResourceReport {
        let ratio = if self.budget_bytes == 0 {
            0.0
        } else {
            stats.bytes as f32 / self.budget_bytes as f32
        };
        let memory = self.classify_ratio(ratio);
        if memory != MemoryStatus::Ok {
            tracing::warn!(ratio, ?memory, "high GPU memory usage");
        }
        ResourceReport {
            fps,
            stats,
            budget_bytes: self.budget_bytes,
            memory,
            low_fps: fps > 0.0 && fps < self.fps_warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        let w = MemoryWatchdog::default();
        assert_eq!(w.classify_ratio(0.5), MemoryStatus::Ok);
        assert_eq!(w.classify_ratio(0.85), MemoryStatus::Warning);
        assert_eq!(w.classify_ratio(0.95), MemoryStatus::Critical);
    }

    #[test]
    fn test_report_flags_low_fps() {
        let w = MemoryWatchdog {
            budget_bytes: 100,
            ..MemoryWatchdog::default()
        };
        let stats = PoolStats {
            bytes: 91,
            ..PoolStats::default()
        };
        let report = w.report(stats, 24.0);
        assert_eq!(report.memory, MemoryStatus::Critical);
        assert!(report.low_fps);
        assert!((report.usage_ratio() - 0.91).abs() < 1e-6);
    }
}
