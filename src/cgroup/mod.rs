//! Resource usage sampling from cgroup v1 controller hierarchies.
//!
//! A collection pass walks the `memory` and `cpuacct` hierarchies once, from
//! their mount points down to every nested cgroup, and reports memory and CPU
//! accounting values per cgroup to a [`SampleSink`](crate::sink::SampleSink).
//! Each sample is labeled with the cgroup's path relative to its hierarchy root.
//!
//! # Key Components
//!
//! - [`Collector`] — Entry point running one pass over both hierarchies.
//! - [`walk_hierarchy`] — Depth-first traversal of a single hierarchy.
//! - [`stats::Controller`] — Per-controller extraction of samples from one cgroup directory.
//!
//! # Supported Stats
//!
//! The following cgroup v1 attribute files are read, if available:
//!
//! - `memory.usage_in_bytes`, `memory.limit_in_bytes`
//! - `memory.memsw.usage_in_bytes`, `memory.memsw.limit_in_bytes`
//! - `cpuacct.usage` and `cpu.shares`
//!
//! # Platform Requirements
//!
//! - Linux with the split (v1) `memory` and `cpuacct` controllers mounted.
//! - Read access to the hierarchy roots, usually below `/sys/fs/cgroup`.
mod collector;
pub mod stats;
mod walker;

pub use collector::{
    CollectionStats, Collector, CollectorBuilder, DEFAULT_CPUACCT_ROOT, DEFAULT_MEMORY_ROOT,
    HierarchyRoots,
};
pub use walker::{WalkStats, node_label, walk_hierarchy};
