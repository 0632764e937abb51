//! Monitoring API reads (`Microsoft.Insights/metrics`).

use chrono::{Duration, SecondsFormat, Utc};
use serde::Deserialize;

use super::{ApiError, ArmClient, send};
use crate::domain::{VirtualMachine, VmUtilization};

const API_VERSION: &str = "2018-01-01";

impl ArmClient {
    /// Read `Percentage CPU` for one VM over the last `days` days at 1-hour
    /// grain and reduce to an average/maximum pair.
    pub fn fetch_cpu_utilization(
        &self,
        vm: &VirtualMachine,
        days: u32,
    ) -> Result<VmUtilization, ApiError> {
        #[derive(Deserialize)]
        struct MetricsResponse {
            #[serde(default)]
            value: Vec<Metric>,
        }

        #[derive(Deserialize)]
        struct Metric {
            #[serde(default)]
            timeseries: Vec<TimeSeries>,
        }

        #[derive(Deserialize)]
        struct TimeSeries {
            #[serde(default)]
            data: Vec<DataPoint>,
        }

        #[derive(Deserialize)]
        struct DataPoint {
            average: Option<f64>,
            maximum: Option<f64>,
        }

        let end = Utc::now();
        let start = end - Duration::days(i64::from(days));
        let timespan = format!(
            "{}/{}",
            start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end.to_rfc3339_opts(SecondsFormat::Secs, true)
        );

        let request = self
            .request("GET", &format!("{}/providers/Microsoft.Insights/metrics", vm.id))
            .query("api-version", API_VERSION)
            .query("metricnames", "Percentage CPU")
            .query("timespan", &timespan)
            .query("interval", "PT1H")
            .query("aggregation", "Average,Maximum");

        let response: MetricsResponse = send(request)?.into_json()?;

        let mut sum = 0.0;
        let mut max = 0.0f64;
        let mut samples = 0usize;
        for metric in response.value {
            for series in metric.timeseries {
                for point in series.data {
                    if let Some(avg) = point.average {
                        sum += avg;
                        samples += 1;
                    }
                    if let Some(m) = point.maximum {
                        max = max.max(m);
                    }
                }
            }
        }

        if samples == 0 {
            return Ok(VmUtilization::empty(&vm.name));
        }

        Ok(VmUtilization {
            vm_name: vm.name.clone(),
            avg_cpu_percent: sum / samples as f64,
            max_cpu_percent: max,
            sample_count: samples,
        })
    }
}
