use std::path::{Path, PathBuf};

use crate::fsutil::CgroupDir;
use crate::sink::SampleSink;

use super::stats::Extractor;

/// Outcome counters of a single hierarchy walk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WalkStats {
    /// Directories handed to the extractor, including the root.
    pub visited: usize,
    /// Directories that could not be opened anymore, have a non-UTF-8 name, or
    /// whose subdirectories could not be listed. An unlistable directory is
    /// still counted in `visited`; only its subtree is lost.
    pub skipped: usize,
}

impl std::ops::AddAssign for WalkStats {
    fn add_assign(&mut self, rhs: Self) {
        self.visited += rhs.visited;
        self.skipped += rhs.skipped;
    }
}

/// Walks the cgroup hierarchy below `root` depth-first and runs `extractor` on
/// every directory, the root included.
///
/// A symlink naming `root` itself is followed; symlinks inside the tree are not.
/// Each directory is opened, listed, handed to the extractor and closed again
/// before the walk moves on. A missing or unopenable root yields an empty walk.
/// A directory that disappears between being listed and being opened, or whose
/// path below `root` is not valid UTF-8, is logged and skipped together with its
/// subtree. Siblings are visited in name order.
///
/// # Arguments
///
/// * `root` - Mount point of one controller hierarchy, e.g. `/sys/fs/cgroup/memory`.
/// * `extractor` - Produces the samples for a single directory.
/// * `sink` - Receives all samples of the walk.
pub fn walk_hierarchy<E>(root: &Path, extractor: &E, sink: &mut dyn SampleSink) -> WalkStats
where
    E: Extractor + ?Sized,
{
    let mut stats = WalkStats::default();
    let root_dir = match CgroupDir::open_root(root) {
        Ok(dir) => dir,
        Err(err) if err.is_missing() => {
            log::debug!("cgroup hierarchy not available: {err}");
            return stats;
        }
        Err(err) => {
            log::info!("{err}");
            return stats;
        }
    };

    let mut stack = Vec::new();
    stats.visited += 1;
    if !visit(root_dir, "", extractor, sink, &mut stack) {
        stats.skipped += 1;
    }

    while let Some(path) = stack.pop() {
        let Some(label) = node_label(root, &path) else {
            log::info!(
                "skipping cgroup directory with non-UTF-8 name: `{}`",
                path.display()
            );
            stats.skipped += 1;
            continue;
        };
        match CgroupDir::open(&path) {
            Ok(dir) => {
                stats.visited += 1;
                if !visit(dir, &label, extractor, sink, &mut stack) {
                    stats.skipped += 1;
                }
            }
            Err(err) => {
                log::info!("{err}");
                stats.skipped += 1;
            }
        }
    }

    stats
}

/// Derives the sample label of the cgroup at `path`: the path relative to
/// `root`, without a leading separator. The root itself is labeled `""`.
///
/// Returns `None` if the relative path is not valid UTF-8, since a lossy
/// conversion could give two different cgroups the same label.
pub fn node_label(root: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_str()
        .map(str::to_owned)
}

/// Lists `dir`, then hands it to the extractor and closes it.
///
/// Returns `false` if the subdirectories of `dir` could not be listed.
fn visit<E>(
    dir: CgroupDir,
    label: &str,
    extractor: &E,
    sink: &mut dyn SampleSink,
    stack: &mut Vec<PathBuf>,
) -> bool
where
    E: Extractor + ?Sized,
{
    let listed = push_child_dirs(dir.path(), stack);
    extractor.extract(&dir, label, sink);
    listed
}

/// Pushes the subdirectories of `path` so that they are popped in name order.
///
/// Returns `false` if `path` could not be listed.
fn push_child_dirs(path: &Path, stack: &mut Vec<PathBuf>) -> bool {
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) => {
            log::info!(
                "failed to list cgroup directory `{}`: {}",
                path.display(),
                err
            );
            return false;
        }
    };

    let mut children: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                log::info!(
                    "failed to read entry of cgroup directory `{}`: {}",
                    path.display(),
                    err
                );
                None
            }
        })
        // `DirEntry::file_type` does not follow symlinks.
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_dir()))
        .map(|entry| entry.path())
        .collect();

    children.sort_unstable();
    stack.extend(children.into_iter().rev());
    true
}
