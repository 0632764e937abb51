//! Utilization metrics reduced from the monitoring API.

use serde::{Deserialize, Serialize};

/// CPU utilization of one VM over the lookback window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VmUtilization {
    pub vm_name: String,
    /// Mean of the hourly Average datapoints
    pub avg_cpu_percent: f64,
    /// Largest hourly Maximum datapoint
    pub max_cpu_percent: f64,
    /// Number of hourly datapoints that carried a value
    pub sample_count: usize,
}

impl VmUtilization {
    /// A window with no datapoints (deallocated VM, metrics not yet emitted).
    pub fn empty(vm_name: impl Into<String>) -> Self {
        Self {
            vm_name: vm_name.into(),
            avg_cpu_percent: 0.0,
            max_cpu_percent: 0.0,
            sample_count: 0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.sample_count > 0
    }
}
