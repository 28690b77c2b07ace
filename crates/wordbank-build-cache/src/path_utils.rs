//! # Path Utilities

use std::path::{Path, PathBuf};

/// Extend a path with a context and filename.
///
/// * Does not check that the path exists.
/// * Does not initialize the containing directories.
///
/// # Arguments
/// * `context` - prefix dirs, inserted between `path` and `filename`.
/// * `filename` - the final file name.
pub fn extend_path<P, S, F>(
    path: P,
    context: &[S],
    filename: F,
) -> PathBuf
where
    P: AsRef<Path>,
    S: AsRef<Path>,
    F: AsRef<Path>,
{
    let mut path = path.as_ref().to_path_buf();
    path.extend(context.iter().map(|s| s.as_ref()));
    path.push(filename.as_ref());
    path
}

/// Append a suffix to the final component of a path.
///
/// `data/vocab20000.enc` + `.stamp.json` -> `data/vocab20000.enc.stamp.json`.
pub fn with_suffix<P: AsRef<Path>>(
    path: P,
    suffix: &str,
) -> PathBuf {
    let mut name = path.as_ref().as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
