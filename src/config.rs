//! Process configuration, read from the environment.
//!
//! | variable                | default                   |
//! |-------------------------|---------------------------|
//! | `CGROUP_MEMORY_ROOT`    | `/sys/fs/cgroup/memory`   |
//! | `CGROUP_CPUACCT_ROOT`   | `/sys/fs/cgroup/cpuacct`  |
//! | `ROOTFS_MOUNT_PATH`     | unset                     |
//! | `COLLECT_INTERVAL_SECS` | `1`                       |
//!
//! When `ROOTFS_MOUNT_PATH` is set, both hierarchy roots are resolved below it,
//! e.g. `/rootfs/sys/fs/cgroup/memory` for a host root mounted into a container.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cgroup::{DEFAULT_CPUACCT_ROOT, DEFAULT_MEMORY_ROOT, HierarchyRoots};

const MEMORY_ROOT_VAR: &str = "CGROUP_MEMORY_ROOT";
const CPUACCT_ROOT_VAR: &str = "CGROUP_CPUACCT_ROOT";
const ROOTFS_VAR: &str = "ROOTFS_MOUNT_PATH";
const INTERVAL_VAR: &str = "COLLECT_INTERVAL_SECS";

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Errors that may occur while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable `{name}` is not valid unicode")]
    NotUnicode { name: &'static str },
    #[error("environment variable `{name}` must be a positive number of seconds, got `{value}`")]
    InvalidInterval { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub roots: HierarchyRoots,
    /// Time between two collection passes.
    pub interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            roots: HierarchyRoots::default(),
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// - [`Error::NotUnicode`] if `COLLECT_INTERVAL_SECS` is not valid unicode.
    /// - [`Error::InvalidInterval`] if it is not a positive integer.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let memory = lookup(MEMORY_ROOT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MEMORY_ROOT));
        let cpuacct = lookup(CPUACCT_ROOT_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CPUACCT_ROOT));

        let roots = match lookup(ROOTFS_VAR).map(PathBuf::from) {
            Some(rootfs) => HierarchyRoots {
                memory: reanchor(&rootfs, &memory),
                cpuacct: reanchor(&rootfs, &cpuacct),
            },
            None => HierarchyRoots { memory, cpuacct },
        };

        let interval = match lookup(INTERVAL_VAR) {
            Some(value) => parse_interval(value)?,
            None => DEFAULT_INTERVAL,
        };

        Ok(Self { roots, interval })
    }
}

fn reanchor(rootfs: &Path, path: &Path) -> PathBuf {
    rootfs.join(path.strip_prefix("/").unwrap_or(path))
}

fn parse_interval(value: OsString) -> Result<Duration> {
    let value = value
        .into_string()
        .map_err(|_| Error::NotUnicode { name: INTERVAL_VAR })?;
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::InvalidInterval {
            name: INTERVAL_VAR,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.interval, Duration::from_secs(1));
    }

    #[test]
    fn test_custom_roots_and_interval() {
        let config = config_from(&[
            ("CGROUP_MEMORY_ROOT", "/cg/memory"),
            ("CGROUP_CPUACCT_ROOT", "/cg/cpu,cpuacct"),
            ("COLLECT_INTERVAL_SECS", "10"),
        ])
        .unwrap();
        assert_eq!(config.roots.memory, PathBuf::from("/cg/memory"));
        assert_eq!(config.roots.cpuacct, PathBuf::from("/cg/cpu,cpuacct"));
        assert_eq!(config.interval, Duration::from_secs(10));
    }

    #[test]
    fn test_rootfs_reanchors_roots() {
        let config = config_from(&[("ROOTFS_MOUNT_PATH", "/rootfs")]).unwrap();
        assert_eq!(
            config.roots.memory,
            PathBuf::from("/rootfs/sys/fs/cgroup/memory")
        );
        assert_eq!(
            config.roots.cpuacct,
            PathBuf::from("/rootfs/sys/fs/cgroup/cpuacct")
        );
    }

    #[test]
    fn test_invalid_interval() {
        for value in ["0", "-1", "soon", ""] {
            let err = config_from(&[("COLLECT_INTERVAL_SECS", value)]).unwrap_err();
            match err {
                Error::InvalidInterval { name, value: got } => {
                    assert_eq!(name, "COLLECT_INTERVAL_SECS");
                    assert_eq!(got, value);
                }
                other => panic!("Expected InvalidInterval error, got {other:?}"),
            }
        }
    }
}
