//! Attributes of the cgroup v1 `memory` controller.
//!
//! The kernel reports an unlimited limit as the largest value representable on
//! the architecture; such limits are suppressed instead of being reported as a
//! number. Swap accounting (`memory.memsw.*`) is only present when the kernel
//! was booted with swap accounting enabled.

use super::{Attribute, Inclusion};
use crate::sink::Metric;

pub(super) const ATTRIBUTES: [Attribute; 4] = [
    Attribute::new(
        "memory.usage_in_bytes",
        Metric::MemoryUsage,
        Inclusion::Positive,
    ),
    Attribute::new(
        "memory.limit_in_bytes",
        Metric::MemoryLimit,
        Inclusion::Positive,
    ),
    Attribute::new(
        "memory.memsw.usage_in_bytes",
        Metric::MemorySwUsage,
        Inclusion::NonNegative,
    ),
    Attribute::new(
        "memory.memsw.limit_in_bytes",
        Metric::MemorySwLimit,
        Inclusion::Positive,
    ),
];
