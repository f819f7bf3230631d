//! Directory handles and bounded attribute reads for cgroupfs.
//!
//! Every read is a single `read(2)` call into a caller-provided buffer. cgroupfs
//! attributes are generated by the kernel on demand, so a short, interrupted or
//! racing read is reported as a failure and the value is simply missed for this
//! pass instead of being retried.

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::os::fd::{AsRawFd, FromRawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use crate::error::Severity;

/// Capacity of the buffer used for a single attribute read.
///
/// Attributes are a single decimal number plus newline; anything that fills the
/// whole buffer is assumed to be truncated.
pub const ATTRIBUTE_BUF_LEN: usize = 30;

/// Error that occurs when opening a cgroup directory fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to open cgroup directory `{path}`: {source}")]
pub struct DirOpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl DirOpenError {
    /// Returns `true` if the directory is simply not there (anymore).
    pub fn is_missing(&self) -> bool {
        is_absent(&self.source)
    }
}

/// Failure modes of [`read_attribute`].
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("attribute file not found: `{path}`")]
    Absent {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open attribute file `{path}`: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read attribute file `{path}`: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("attribute value `{path}` is too large: read filled all {capacity} bytes")]
    TooLarge { path: PathBuf, capacity: usize },
}

impl Severity for ReadError {
    fn level(&self) -> log::Level {
        match self {
            ReadError::Absent { .. } => log::Level::Debug,
            ReadError::Open { .. } | ReadError::Read { .. } => log::Level::Info,
            ReadError::TooLarge { .. } => log::Level::Warn,
        }
    }
}

/// A path-only handle on one cgroup directory.
///
/// The handle only anchors `openat(2)` calls; it is dropped (and closed) as
/// soon as the extractor for the node is done with it.
#[derive(Debug)]
pub struct CgroupDir {
    file: File,
    path: PathBuf,
}

impl CgroupDir {
    /// Opens `path` as a directory without following a symlink in its last
    /// component.
    ///
    /// # Errors
    ///
    /// Returns a [`DirOpenError`] if `path` is missing, is not a directory, or is
    /// a symlink.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DirOpenError> {
        Self::open_with(path.as_ref(), libc::O_NOFOLLOW)
    }

    /// Opens a hierarchy root. Unlike [`CgroupDir::open`], a symlink naming the
    /// root itself is followed.
    ///
    /// # Errors
    ///
    /// Returns a [`DirOpenError`] if `path` does not resolve to a directory.
    pub fn open_root(path: impl AsRef<Path>) -> Result<Self, DirOpenError> {
        Self::open_with(path.as_ref(), 0)
    }

    fn open_with(path: &Path, extra_flags: libc::c_int) -> Result<Self, DirOpenError> {
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_PATH | libc::O_DIRECTORY | libc::O_CLOEXEC | extra_flags)
            .open(path)
            .map_err(|source| DirOpenError {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Filesystem path this handle was opened from, used for diagnostics.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens `name` read-only relative to this directory, refusing symlinks.
    fn open_file(&self, name: &str) -> io::Result<File> {
        let name =
            CString::new(name).map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
        // SAFETY: `name` is NUL-terminated and `self.file` keeps the descriptor open.
        let fd = unsafe {
            libc::openat(
                self.file.as_raw_fd(),
                name.as_ptr(),
                libc::O_RDONLY | libc::O_NOFOLLOW | libc::O_CLOEXEC,
            )
        };
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: `fd` was just returned by openat and nothing else owns it.
        Ok(unsafe { File::from_raw_fd(fd) })
    }
}

/// Reads the attribute `name` of `dir` into `buf` with exactly one read.
///
/// On success the returned slice holds everything the kernel produced. A read
/// that fills the whole buffer is rejected, as the value was most likely cut off.
///
/// # Errors
///
/// - [`ReadError::Absent`] if the file (or the device behind it) does not exist.
/// - [`ReadError::Open`] / [`ReadError::Read`] for any other I/O failure,
///   including an interrupted read.
/// - [`ReadError::TooLarge`] if the content did not fit into `buf`.
pub fn read_attribute<'a>(
    dir: &CgroupDir,
    name: &str,
    buf: &'a mut [u8],
) -> Result<&'a [u8], ReadError> {
    let mut file = dir.open_file(name).map_err(|source| {
        let path = dir.path.join(name);
        if is_absent(&source) {
            ReadError::Absent { path, source }
        } else {
            ReadError::Open { path, source }
        }
    })?;

    let len = file.read(buf).map_err(|source| ReadError::Read {
        path: dir.path.join(name),
        source,
    })?;
    if len >= buf.len() {
        return Err(ReadError::TooLarge {
            path: dir.path.join(name),
            capacity: buf.len(),
        });
    }

    Ok(&buf[..len])
}

#[inline]
fn is_absent(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound || err.raw_os_error() == Some(libc::ENODEV)
}
