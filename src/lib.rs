//! cgroup-samples: periodic memory and CPU accounting samples from cgroup v1 hierarchies.
//!
//! This library walks the `memory` and `cpuacct` controller trees, reads each cgroup's
//! accounting attributes and reports them as `(metric, cgroup, value)` samples to a
//! [`sink::SampleSink`].
use std::sync::Arc;

pub mod cgroup;
pub mod config;
pub mod error;
pub mod fsutil;
pub mod sink;

/// Runs the sampling daemon.
///
/// Loads the [`config::Config`] from the environment and performs one collection pass
/// per interval, writing every sample of a pass as a JSON line to stdout.
///
/// # Returns
///
/// Only returns on error.
///
/// # Errors
///
/// Possible errors include:
/// - Invalid configuration values (e.g., `COLLECT_INTERVAL_SECS`).
/// - Failure to write samples to stdout.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;
    let mut builder = cgroup::CollectorBuilder::default();
    builder
        .set_memory_root(&config.roots.memory)
        .set_cpuacct_root(&config.roots.cpuacct);
    let collector = Arc::new(builder.build());
    log::debug!("Memory hierarchy: {}", collector.roots().memory.display());
    log::debug!("Cpuacct hierarchy: {}", collector.roots().cpuacct.display());

    // Passes never overlap: a pass that outlasts the interval delays the next one.
    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        interval.tick().await;

        let collector = Arc::clone(&collector);
        tokio::task::spawn_blocking(move || {
            let mut samples = Vec::new();
            let before = std::time::Instant::now();
            let stats = collector.collect(&mut samples);
            let took = before.elapsed();
            log::trace!(
                "collect() took {} nanoseconds: samples={}, cgroups={}, skipped={}",
                took.as_nanos(),
                samples.len(),
                stats.total().visited,
                stats.total().skipped
            );
            sink::write_json_lines(std::io::stdout().lock(), &samples)
        })
        .await??;
    }
}
