//! Samples emitted by a collection pass and the sinks that receive them.

use std::fmt;
use std::io::Write;

use serde::Serialize;

/// The closed set of metrics this crate reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Metric {
    #[serde(rename = "cgroup.memory.usage")]
    MemoryUsage,
    #[serde(rename = "cgroup.memory.limit")]
    MemoryLimit,
    #[serde(rename = "cgroup.memory.sw-usage")]
    MemorySwUsage,
    #[serde(rename = "cgroup.memory.sw-limit")]
    MemorySwLimit,
    #[serde(rename = "cgroup.cpu.usage")]
    CpuUsage,
    #[serde(rename = "cgroup.cpu.shares")]
    CpuShares,
}

impl Metric {
    /// Wire name of the metric.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::MemoryUsage => "cgroup.memory.usage",
            Metric::MemoryLimit => "cgroup.memory.limit",
            Metric::MemorySwUsage => "cgroup.memory.sw-usage",
            Metric::MemorySwLimit => "cgroup.memory.sw-limit",
            Metric::CpuUsage => "cgroup.cpu.usage",
            Metric::CpuShares => "cgroup.cpu.shares",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported value for one cgroup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Sample {
    pub metric: Metric,
    /// Cgroup path relative to its hierarchy root, e.g. `system.slice/sshd.service`.
    pub instance: String,
    pub value: i64,
}

/// Receiver of samples produced by a collection pass.
///
/// Implementations are expected to be cheap; a pass calls `sample` once per
/// emitted value while it still holds a directory handle.
pub trait SampleSink {
    fn sample(&mut self, metric: Metric, instance: &str, value: i64);
}

impl SampleSink for Vec<Sample> {
    fn sample(&mut self, metric: Metric, instance: &str, value: i64) {
        self.push(Sample {
            metric,
            instance: instance.to_owned(),
            value,
        });
    }
}

/// Writes `samples` as newline-delimited JSON objects.
///
/// # Errors
///
/// Returns an I/O error if writing to `writer` fails.
pub fn write_json_lines<W: Write>(mut writer: W, samples: &[Sample]) -> std::io::Result<()> {
    for sample in samples {
        serde_json::to_writer(&mut writer, sample)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_samples() {
        let mut sink = Vec::new();
        sink.sample(Metric::CpuShares, "user.slice", 1024);
        assert_eq!(
            sink,
            vec![Sample {
                metric: Metric::CpuShares,
                instance: "user.slice".to_string(),
                value: 1024,
            }]
        );
    }

    #[test]
    fn test_metric_display_matches_wire_name() {
        assert_eq!(Metric::MemorySwUsage.to_string(), "cgroup.memory.sw-usage");
        assert_eq!(
            serde_json::to_string(&Metric::MemorySwLimit).unwrap(),
            "\"cgroup.memory.sw-limit\""
        );
    }

    #[test]
    fn test_write_json_lines() {
        let samples = vec![
            Sample {
                metric: Metric::MemoryUsage,
                instance: "".to_string(),
                value: 8192,
            },
            Sample {
                metric: Metric::CpuUsage,
                instance: "system.slice".to_string(),
                value: 5,
            },
        ];
        let mut out = Vec::new();
        write_json_lines(&mut out, &samples).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "{\"metric\":\"cgroup.memory.usage\",\"instance\":\"\",\"value\":8192}\n\
             {\"metric\":\"cgroup.cpu.usage\",\"instance\":\"system.slice\",\"value\":5}\n"
        );
    }
}
