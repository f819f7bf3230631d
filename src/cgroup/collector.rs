use std::path::{Path, PathBuf};

use super::stats::Controller;
use super::walker::{WalkStats, walk_hierarchy};
use crate::sink::SampleSink;

/// Default mount point of the cgroup v1 `memory` hierarchy.
pub const DEFAULT_MEMORY_ROOT: &str = "/sys/fs/cgroup/memory";
/// Default mount point of the cgroup v1 `cpuacct` hierarchy.
pub const DEFAULT_CPUACCT_ROOT: &str = "/sys/fs/cgroup/cpuacct";

/// Mount points of the two controller hierarchies that are sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyRoots {
    pub memory: PathBuf,
    pub cpuacct: PathBuf,
}

impl Default for HierarchyRoots {
    fn default() -> Self {
        Self {
            memory: PathBuf::from(DEFAULT_MEMORY_ROOT),
            cpuacct: PathBuf::from(DEFAULT_CPUACCT_ROOT),
        }
    }
}

/// Per-hierarchy counters of one collection pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStats {
    pub memory: WalkStats,
    pub cpu: WalkStats,
}

impl CollectionStats {
    pub fn total(&self) -> WalkStats {
        let mut total = self.memory;
        total += self.cpu;
        total
    }
}

/// Samples the memory and cpuacct hierarchies.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    roots: HierarchyRoots,
}

impl Collector {
    pub fn new(roots: HierarchyRoots) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &HierarchyRoots {
        &self.roots
    }

    /// Runs one complete, synchronous collection pass into `sink`.
    ///
    /// Never fails: missing hierarchies, vanished cgroups and unreadable
    /// attributes only reduce the number of samples. Overlapping passes must be
    /// serialized by the caller.
    pub fn collect(&self, sink: &mut dyn SampleSink) -> CollectionStats {
        let memory = walk_hierarchy(&self.roots.memory, &Controller::Memory, sink);
        let cpu = walk_hierarchy(&self.roots.cpuacct, &Controller::Cpu, sink);
        CollectionStats { memory, cpu }
    }
}

#[derive(Debug, Default)]
pub struct CollectorBuilder {
    roots: HierarchyRoots,
}

impl CollectorBuilder {
    /// Sets the mount point of the `memory` hierarchy.
    ///
    /// # Arguments
    ///
    /// * `path` - Root of the memory controller tree (usually `/sys/fs/cgroup/memory`).
    pub fn set_memory_root(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.roots.memory = path.as_ref().to_path_buf();
        self
    }

    /// Sets the mount point of the `cpuacct` hierarchy.
    ///
    /// # Arguments
    ///
    /// * `path` - Root of the cpuacct controller tree (usually `/sys/fs/cgroup/cpuacct`).
    pub fn set_cpuacct_root(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.roots.cpuacct = path.as_ref().to_path_buf();
        self
    }

    /// Builds the [`Collector`]. Roots that were not set keep their defaults.
    pub fn build(self) -> Collector {
        Collector::new(self.roots)
    }
}
