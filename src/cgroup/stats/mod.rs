//! Per-cgroup metric extraction for the cgroup v1 memory and cpuacct controllers.
//!
//! Each controller reads a fixed set of single-value attribute files from one
//! cgroup directory and turns them into samples. Whether a value is reported
//! depends on the attribute:
//!
//! | file                          | metric                   | reported when      |
//! |-------------------------------|--------------------------|--------------------|
//! | `memory.usage_in_bytes`       | `cgroup.memory.usage`    | `0 < v < i64::MAX` |
//! | `memory.limit_in_bytes`       | `cgroup.memory.limit`    | `0 < v < i64::MAX` |
//! | `memory.memsw.usage_in_bytes` | `cgroup.memory.sw-usage` | `0 ≤ v < i64::MAX` |
//! | `memory.memsw.limit_in_bytes` | `cgroup.memory.sw-limit` | `0 < v < i64::MAX` |
//! | `cpuacct.usage` (ns → ms)     | `cgroup.cpu.usage`       | `0 ≤ v < i64::MAX` |
//! | `cpu.shares`                  | `cgroup.cpu.shares`      | `0 < v < i64::MAX` |
//!
//! A limit of `i64::MAX` means "unlimited" and is suppressed rather than
//! reported. Missing, unreadable and non-numeric attributes produce no sample.

mod cpu;
mod memory;
mod parser;

pub use parser::parse_scalar;

use crate::error::ResultOkLogExt;
use crate::fsutil::{self, ATTRIBUTE_BUF_LEN, CgroupDir};
use crate::sink::{Metric, SampleSink};

/// Turns one cgroup directory into samples.
pub trait Extractor {
    /// Reads the attributes of `dir` and reports them under `label`.
    fn extract(&self, dir: &CgroupDir, label: &str, sink: &mut dyn SampleSink);
}

/// The controllers this crate knows how to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    /// `memory` controller: usage and limits, with and without swap.
    Memory,
    /// `cpu,cpuacct` controller: accumulated usage and configured shares.
    Cpu,
}

impl Extractor for Controller {
    fn extract(&self, dir: &CgroupDir, label: &str, sink: &mut dyn SampleSink) {
        let attributes: &[Attribute] = match self {
            Controller::Memory => &memory::ATTRIBUTES,
            Controller::Cpu => &cpu::ATTRIBUTES,
        };
        for attribute in attributes {
            attribute.collect(dir, label, sink);
        }
    }
}

/// Range of values that are meaningful for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    /// `0 < v < i64::MAX`
    Positive,
    /// `0 <= v < i64::MAX`
    NonNegative,
}

impl Inclusion {
    pub fn admits(self, value: i64) -> bool {
        match self {
            Inclusion::Positive => value > 0 && value < i64::MAX,
            Inclusion::NonNegative => value >= 0 && value < i64::MAX,
        }
    }
}

/// A single-value attribute file and how it maps to a metric.
#[derive(Debug, Clone, Copy)]
struct Attribute {
    file: &'static str,
    metric: Metric,
    inclusion: Inclusion,
    /// Applied after the inclusion check.
    divisor: i64,
}

impl Attribute {
    const fn new(file: &'static str, metric: Metric, inclusion: Inclusion) -> Self {
        Self {
            file,
            metric,
            inclusion,
            divisor: 1,
        }
    }

    const fn scaled_down(self, divisor: i64) -> Self {
        Self { divisor, ..self }
    }

    fn collect(&self, dir: &CgroupDir, label: &str, sink: &mut dyn SampleSink) {
        let Some(value) = read_value(dir, self.file) else {
            return;
        };
        if self.inclusion.admits(value) {
            sink.sample(self.metric, label, value / self.divisor);
        }
    }
}

/// Reads and parses one attribute; `None` if it is missing, unreadable or not a number.
fn read_value(dir: &CgroupDir, file: &str) -> Option<i64> {
    let mut buf = [0u8; ATTRIBUTE_BUF_LEN];
    let contents = fsutil::read_attribute(dir, file, &mut buf).ok_log()?;
    parse_scalar(contents)
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::path::Path;

    /// Creates `dir` (and parents) and writes each `(file, contents)` pair into it.
    pub fn write_attributes(dir: &Path, attributes: &[(&str, &str)]) {
        std::fs::create_dir_all(dir).unwrap();
        for (file, contents) in attributes {
            std::fs::write(dir.join(file), contents).unwrap();
        }
    }
}
