//! Attributes of the cgroup v1 `cpu,cpuacct` controller.

use super::{Attribute, Inclusion};
use crate::sink::Metric;

const NANOS_PER_MILLI: i64 = 1_000_000;

pub(super) const ATTRIBUTES: [Attribute; 2] = [
    // Accumulated CPU time in nanoseconds, reported in milliseconds.
    Attribute::new("cpuacct.usage", Metric::CpuUsage, Inclusion::NonNegative)
        .scaled_down(NANOS_PER_MILLI),
    Attribute::new("cpu.shares", Metric::CpuShares, Inclusion::Positive),
];

#[cfg(test)]
mod tests {
    use super::super::testutil::write_attributes;
    use super::super::{Controller, Extractor};
    use crate::fsutil::CgroupDir;
    use crate::sink::{Metric, Sample};

    fn extract(attributes: &[(&str, &str)]) -> Vec<Sample> {
        let tmp = tempfile::tempdir().unwrap();
        write_attributes(tmp.path(), attributes);
        let dir = CgroupDir::open(tmp.path()).unwrap();
        let mut samples: Vec<Sample> = Vec::new();
        Controller::Cpu.extract(&dir, "system.slice/sshd.service", &mut samples);
        samples
    }

    fn sample(metric: Metric, value: i64) -> Sample {
        Sample {
            metric,
            instance: "system.slice/sshd.service".to_string(),
            value,
        }
    }

    #[test]
    fn test_usage_is_converted_to_milliseconds() {
        let samples = extract(&[("cpuacct.usage", "5000000\n"), ("cpu.shares", "1024\n")]);
        assert_eq!(
            samples,
            vec![
                sample(Metric::CpuUsage, 5),
                sample(Metric::CpuShares, 1024)
            ]
        );
    }

    #[test]
    fn test_usage_truncates_partial_milliseconds() {
        let samples = extract(&[("cpuacct.usage", "1999999\n")]);
        assert_eq!(samples, vec![sample(Metric::CpuUsage, 1)]);
    }

    #[test]
    fn test_zero_usage_reported_zero_shares_not() {
        let samples = extract(&[("cpuacct.usage", "0\n"), ("cpu.shares", "0\n")]);
        assert_eq!(samples, vec![sample(Metric::CpuUsage, 0)]);
    }

    #[test]
    fn test_max_usage_is_suppressed() {
        let samples = extract(&[("cpuacct.usage", "9223372036854775807\n")]);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_missing_files() {
        assert!(extract(&[]).is_empty());
    }
}
