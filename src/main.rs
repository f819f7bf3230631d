/// Entry point for the cgroup sampling daemon.
///
/// Walks the cgroup v1 `memory` and `cpuacct` hierarchies once per interval and
/// prints every collected sample as a JSON line on stdout.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or stdout is closed.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug COLLECT_INTERVAL_SECS=5 cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    cgroup_samples::run().await
}
