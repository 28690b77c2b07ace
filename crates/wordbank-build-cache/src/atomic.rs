//! # Atomic Writes

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::path_utils::with_suffix;

/// The temporary sibling used while writing `path`.
///
/// `<file>.tmp-<pid>`, in the same directory, so the final rename never
/// crosses a filesystem.
pub fn temp_path<P: AsRef<Path>>(path: P) -> PathBuf {
    with_suffix(path, &format!(".tmp-{}", std::process::id()))
}

/// Write `path` through a temporary sibling file.
///
/// The writer passed to `f` targets the temporary file. When `f` succeeds the
/// buffer is flushed and the file renamed onto `path`; when it fails the
/// temporary file is removed and `path` is untouched.
///
/// Missing parent directories are created.
pub fn atomic_write<P, F, E>(
    path: P,
    f: F,
) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut BufWriter<File>) -> Result<(), E>,
    E: From<io::Error>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp = temp_path(path);
    let mut writer = BufWriter::new(File::create(&tmp)?);

    let result = f(&mut writer).and_then(|()| {
        writer.flush()?;
        writer.get_ref().sync_all()?;
        Ok(())
    });
    drop(writer);

    match result {
        Ok(()) => {
            fs::rename(&tmp, path)?;
            Ok(())
        }
        Err(err) => {
            let _ = fs::remove_file(&tmp);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write() {
        let dir = tempdir::TempDir::new("atomic_test").unwrap();
        let path = dir.path().join("nested").join("out.txt");

        atomic_write(&path, |w| -> io::Result<()> { writeln!(w, "hello") }).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_atomic_write_failure() {
        let dir = tempdir::TempDir::new("atomic_test").unwrap();
        let path = dir.path().join("out.txt");
        fs::write(&path, "original\n").unwrap();

        let result = atomic_write(&path, |w| -> io::Result<()> {
            writeln!(w, "partial")?;
            Err(io::Error::other("boom"))
        });
        assert!(result.is_err());

        assert_eq!(fs::read_to_string(&path).unwrap(), "original\n");
        assert!(!temp_path(&path).exists());
    }
}
