//! Right-sizing recommendations from CPU utilization.
//!
//! One ladder of general-purpose sizes, ordered threshold rules, first
//! match wins. The heuristic never recommends across VM families: a size
//! that is not on the ladder stays where it is.

use serde::{Deserialize, Serialize};

use crate::domain::VmUtilization;

/// Size ladder, smallest to largest
pub const SIZE_LADDER: [&str; 6] = [
    "Standard_B1s",
    "Standard_B2s",
    "Standard_B2ms",
    "Standard_D2s_v5",
    "Standard_D4s_v5",
    "Standard_D8s_v5",
];

/// Average CPU at or above this asks for a bigger size
const UPSIZE_AVG_CPU: f64 = 75.0;
/// Peak CPU at or above this asks for a bigger size
const UPSIZE_MAX_CPU: f64 = 90.0;
/// Average CPU below this (with a quiet peak) allows a smaller size
const DOWNSIZE_AVG_CPU: f64 = 20.0;
/// Peak CPU below this allows a smaller size
const DOWNSIZE_MAX_CPU: f64 = 40.0;

/// The outcome for one VM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    /// Move up one rung
    Upsize { to: String },
    /// Move down one rung
    Downsize { to: String },
    /// Utilization fits the current size (or no better rung exists)
    KeepCurrent,
    /// No datapoints in the window; nothing to conclude
    NoData,
}

impl Recommendation {
    pub fn label(&self) -> String {
        match self {
            Recommendation::Upsize { to } => format!("upsize to {to}"),
            Recommendation::Downsize { to } => format!("downsize to {to}"),
            Recommendation::KeepCurrent => "keep current".to_string(),
            Recommendation::NoData => "no data".to_string(),
        }
    }
}

/// One report row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RightsizeRow {
    pub vm_name: String,
    pub current_size: String,
    pub avg_cpu_percent: f64,
    pub max_cpu_percent: f64,
    pub sample_count: usize,
    pub recommendation: Recommendation,
    pub note: Option<String>,
}

/// Apply the threshold rules to one VM.
pub fn recommend(current_size: &str, utilization: &VmUtilization) -> (Recommendation, Option<String>) {
    if !utilization.has_data() {
        return (
            Recommendation::NoData,
            Some("no CPU datapoints in the window".to_string()),
        );
    }

    let Some(rung) = SIZE_LADDER.iter().position(|s| *s == current_size) else {
        return (
            Recommendation::KeepCurrent,
            Some(format!("size {current_size} is not on the ladder")),
        );
    };

    let avg = utilization.avg_cpu_percent;
    let max = utilization.max_cpu_percent;

    if avg >= UPSIZE_AVG_CPU || max >= UPSIZE_MAX_CPU {
        return match SIZE_LADDER.get(rung + 1) {
            Some(next) => (Recommendation::Upsize { to: next.to_string() }, None),
            None => (
                Recommendation::KeepCurrent,
                Some("already at the largest ladder size".to_string()),
            ),
        };
    }

    if avg < DOWNSIZE_AVG_CPU && max < DOWNSIZE_MAX_CPU {
        if rung == 0 {
            return (
                Recommendation::KeepCurrent,
                Some("already at the smallest ladder size".to_string()),
            );
        }
        return (
            Recommendation::Downsize {
                to: SIZE_LADDER[rung - 1].to_string(),
            },
            None,
        );
    }

    (Recommendation::KeepCurrent, None)
}

/// Build report rows for a set of VMs with their utilization.
pub fn build_rows(measurements: &[(String, String, VmUtilization)]) -> Vec<RightsizeRow> {
    let mut rows: Vec<RightsizeRow> = measurements
        .iter()
        .map(|(vm_name, current_size, utilization)| {
            let (recommendation, note) = recommend(current_size, utilization);
            RightsizeRow {
                vm_name: vm_name.clone(),
                current_size: current_size.clone(),
                avg_cpu_percent: utilization.avg_cpu_percent,
                max_cpu_percent: utilization.max_cpu_percent,
                sample_count: utilization.sample_count,
                recommendation,
                note,
            }
        })
        .collect();
    rows.sort_by(|a, b| a.vm_name.cmp(&b.vm_name));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn util(avg: f64, max: f64) -> VmUtilization {
        VmUtilization {
            vm_name: "vm".to_string(),
            avg_cpu_percent: avg,
            max_cpu_percent: max,
            sample_count: 168,
        }
    }

    #[test]
    fn empty_window_yields_no_data() {
        let (rec, note) = recommend("Standard_B2s", &VmUtilization::empty("vm"));
        assert_eq!(rec, Recommendation::NoData);
        assert!(note.is_some());
    }

    #[test]
    fn hot_average_upsizes_one_rung() {
        let (rec, _) = recommend("Standard_B2s", &util(80.0, 85.0));
        assert_eq!(rec, Recommendation::Upsize { to: "Standard_B2ms".to_string() });
    }

    #[test]
    fn hot_peak_alone_upsizes() {
        let (rec, _) = recommend("Standard_B2s", &util(30.0, 95.0));
        assert_eq!(rec, Recommendation::Upsize { to: "Standard_B2ms".to_string() });
    }

    #[test]
    fn quiet_vm_downsizes_one_rung() {
        let (rec, _) = recommend("Standard_B2s", &util(4.0, 12.0));
        assert_eq!(rec, Recommendation::Downsize { to: "Standard_B1s".to_string() });
    }

    #[test]
    fn quiet_average_with_busy_peak_stays() {
        let (rec, _) = recommend("Standard_B2s", &util(10.0, 60.0));
        assert_eq!(rec, Recommendation::KeepCurrent);
    }

    #[test]
    fn thresholds_are_inclusive_on_upsize_exclusive_on_downsize() {
        // avg exactly at the upsize bound moves up
        let (rec, _) = recommend("Standard_B2s", &util(75.0, 50.0));
        assert_eq!(rec, Recommendation::Upsize { to: "Standard_B2ms".to_string() });

        // avg exactly at the downsize bound stays
        let (rec, _) = recommend("Standard_B2s", &util(20.0, 30.0));
        assert_eq!(rec, Recommendation::KeepCurrent);
    }

    #[test]
    fn ladder_endpoints_keep_current_with_note() {
        let (rec, note) = recommend("Standard_D8s_v5", &util(90.0, 99.0));
        assert_eq!(rec, Recommendation::KeepCurrent);
        assert!(note.unwrap().contains("largest"));

        let (rec, note) = recommend("Standard_B1s", &util(2.0, 5.0));
        assert_eq!(rec, Recommendation::KeepCurrent);
        assert!(note.unwrap().contains("smallest"));
    }

    #[test]
    fn off_ladder_size_keeps_current_with_note() {
        let (rec, note) = recommend("Standard_NC6", &util(90.0, 99.0));
        assert_eq!(rec, Recommendation::KeepCurrent);
        assert!(note.unwrap().contains("not on the ladder"));
    }

    #[test]
    fn rows_are_sorted_by_vm_name() {
        let rows = build_rows(&[
            ("vm-b".to_string(), "Standard_B2s".to_string(), util(50.0, 60.0)),
            ("vm-a".to_string(), "Standard_B2s".to_string(), util(50.0, 60.0)),
        ]);
        assert_eq!(rows[0].vm_name, "vm-a");
        assert_eq!(rows[1].vm_name, "vm-b");
    }
}
