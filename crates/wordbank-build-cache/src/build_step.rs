//! # Fingerprinted Build Steps
//!
//! A [`BuildStep`] is fresh when its target exists and the stamp file beside
//! it (`<target>.stamp.json`) holds the same [`BuildFingerprint`] as the one
//! computed for the current run. Anything else is stale, and is removed
//! before the step is rebuilt.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::UNIX_EPOCH,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{atomic::atomic_write, path_utils::with_suffix};

/// Suffix of the stamp file written beside each target.
pub const STAMP_SUFFIX: &str = ".stamp.json";

/// Identity of an input file at fingerprint time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputStamp {
    /// The input path.
    pub path: PathBuf,

    /// Length in bytes.
    pub len: u64,

    /// Modification time, in whole seconds since the epoch.
    pub modified: u64,
}

impl InputStamp {
    /// Stamp an existing file.
    pub fn of<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let meta = fs::metadata(path)
            .with_context(|| format!("failed to stat input {}", path.display()))?;
        let modified = meta
            .modified()?
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Ok(Self {
            path: path.to_path_buf(),
            len: meta.len(),
            modified,
        })
    }
}

/// Everything that determines the content of a build target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildFingerprint {
    /// The step name.
    pub step: String,

    /// Step parameters.
    pub params: BTreeMap<String, String>,

    /// Input files, in the order they were added.
    pub inputs: Vec<InputStamp>,
}

impl BuildFingerprint {
    /// Start a fingerprint for the named step.
    pub fn new<S: Into<String>>(step: S) -> Self {
        Self {
            step: step.into(),
            ..Default::default()
        }
    }

    /// Record a parameter.
    pub fn with_param<K: Into<String>, V: ToString>(
        mut self,
        key: K,
        value: V,
    ) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Record an input file; which must exist.
    pub fn with_input<P: AsRef<Path>>(
        mut self,
        path: P,
    ) -> anyhow::Result<Self> {
        self.inputs.push(InputStamp::of(path)?);
        Ok(self)
    }

    /// Record an input file if it exists.
    ///
    /// A file that appears later changes the fingerprint.
    pub fn with_optional_input<P: AsRef<Path>>(
        self,
        path: P,
    ) -> anyhow::Result<Self> {
        if path.as_ref().exists() {
            self.with_input(path)
        } else {
            Ok(self)
        }
    }
}

/// A target file and the fingerprint it must carry to be reused.
#[derive(Debug, Clone)]
pub struct BuildStep {
    target: PathBuf,
    fingerprint: BuildFingerprint,
}

impl BuildStep {
    /// Create a build step.
    pub fn new<P: AsRef<Path>>(
        target: P,
        fingerprint: BuildFingerprint,
    ) -> Self {
        Self {
            target: target.as_ref().to_path_buf(),
            fingerprint,
        }
    }

    /// The target path.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// The expected fingerprint.
    pub fn fingerprint(&self) -> &BuildFingerprint {
        &self.fingerprint
    }

    /// The stamp path, `<target>.stamp.json`.
    pub fn stamp_path(&self) -> PathBuf {
        with_suffix(&self.target, STAMP_SUFFIX)
    }

    /// Read the committed fingerprint, if any.
    ///
    /// An unreadable stamp is treated as absent.
    pub fn read_stamp(&self) -> anyhow::Result<Option<BuildFingerprint>> {
        let stamp_path = self.stamp_path();
        if !stamp_path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&stamp_path)
            .with_context(|| format!("failed to read stamp {}", stamp_path.display()))?;
        match serde_json::from_str(&text) {
            Ok(fingerprint) => Ok(Some(fingerprint)),
            Err(err) => {
                log::debug!("ignoring malformed stamp {}: {err}", stamp_path.display());
                Ok(None)
            }
        }
    }

    /// Is the target present and stamped with this fingerprint?
    pub fn is_fresh(&self) -> anyhow::Result<bool> {
        if !self.target.exists() {
            return Ok(false);
        }
        Ok(self.read_stamp()?.as_ref() == Some(&self.fingerprint))
    }

    /// Remove the target and its stamp.
    ///
    /// ## Returns
    /// Whether a target was removed.
    pub fn invalidate(&self) -> anyhow::Result<bool> {
        let stamp_path = self.stamp_path();
        if stamp_path.exists() {
            fs::remove_file(&stamp_path)
                .with_context(|| format!("failed to remove {}", stamp_path.display()))?;
        }
        if self.target.exists() {
            fs::remove_file(&self.target)
                .with_context(|| format!("failed to remove {}", self.target.display()))?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Write the stamp for a freshly built target.
    pub fn commit(&self) -> anyhow::Result<()> {
        let stamp_path = self.stamp_path();
        atomic_write(&stamp_path, |writer| -> anyhow::Result<()> {
            serde_json::to_writer_pretty(&mut *writer, &self.fingerprint)?;
            writeln!(writer)?;
            Ok(())
        })
        .with_context(|| format!("failed to write stamp {}", stamp_path.display()))
    }

    /// Run `build` unless the target is fresh.
    ///
    /// A stale target is removed first; the stamp is committed after `build`
    /// succeeds.
    ///
    /// ## Returns
    /// Whether `build` ran.
    pub fn ensure<F, E>(
        &self,
        build: F,
    ) -> Result<bool, E>
    where
        F: FnOnce(&Path) -> Result<(), E>,
        E: From<anyhow::Error>,
    {
        if self.is_fresh()? {
            log::info!(
                "{}: {} is up to date",
                self.fingerprint.step,
                self.target.display()
            );
            return Ok(false);
        }

        if self.invalidate()? {
            log::warn!(
                "{}: rebuilding stale {}",
                self.fingerprint.step,
                self.target.display()
            );
        }

        build(&self.target)?;
        self.commit()?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(
        path: &Path,
        text: &str,
    ) {
        fs::write(path, text).unwrap();
    }

    #[test]
    fn test_fingerprint_params() {
        let a = BuildFingerprint::new("vocab")
            .with_param("max_size", 10)
            .with_param("normalize_digits", true);
        let b = BuildFingerprint::new("vocab")
            .with_param("normalize_digits", true)
            .with_param("max_size", 10);
        assert_eq!(a, b);

        let c = a.clone().with_param("max_size", 11);
        assert_ne!(a, c);
    }

    #[test]
    fn test_optional_input() {
        let dir = tempdir::TempDir::new("build_step_test").unwrap();
        let path = dir.path().join("augmented.enc");

        let without = BuildFingerprint::new("vocab")
            .with_optional_input(&path)
            .unwrap();
        assert!(without.inputs.is_empty());

        touch(&path, "x y z\n");
        let with = BuildFingerprint::new("vocab")
            .with_optional_input(&path)
            .unwrap();
        assert_eq!(with.inputs.len(), 1);
        assert_eq!(with.inputs[0].len, 6);
        assert_ne!(without, with);

        assert!(BuildFingerprint::new("vocab")
            .with_input(dir.path().join("missing"))
            .is_err());
    }

    #[test]
    fn test_ensure() {
        let dir = tempdir::TempDir::new("build_step_test").unwrap();
        let input = dir.path().join("train.enc");
        let target = dir.path().join("vocab10.enc");
        touch(&input, "the cat sat.\n");

        let fingerprint = || {
            BuildFingerprint::new("vocab")
                .with_param("max_size", 10)
                .with_input(&input)
                .unwrap()
        };

        let step = BuildStep::new(&target, fingerprint());
        assert_eq!(step.stamp_path(), dir.path().join("vocab10.enc.stamp.json"));
        assert!(!step.is_fresh().unwrap());

        let mut runs = 0;
        let built = step
            .ensure(|path| -> anyhow::Result<()> {
                runs += 1;
                fs::write(path, "first\n")?;
                Ok(())
            })
            .unwrap();
        assert!(built);
        assert!(step.is_fresh().unwrap());
        assert_eq!(step.read_stamp().unwrap(), Some(fingerprint()));

        // Same fingerprint; skipped.
        let step = BuildStep::new(&target, fingerprint());
        let built = step
            .ensure(|_| -> anyhow::Result<()> {
                runs += 1;
                Ok(())
            })
            .unwrap();
        assert!(!built);
        assert_eq!(runs, 1);

        // Changed parameter; rebuilt.
        let step = BuildStep::new(&target, fingerprint().with_param("max_size", 20));
        assert!(!step.is_fresh().unwrap());
        let built = step
            .ensure(|path| -> anyhow::Result<()> {
                runs += 1;
                assert!(!path.exists());
                fs::write(path, "second\n")?;
                Ok(())
            })
            .unwrap();
        assert!(built);
        assert_eq!(runs, 2);
        assert_eq!(fs::read_to_string(&target).unwrap(), "second\n");
    }

    #[test]
    fn test_failed_build_is_not_stamped() {
        let dir = tempdir::TempDir::new("build_step_test").unwrap();
        let step = BuildStep::new(dir.path().join("out"), BuildFingerprint::new("fail"));

        let result = step.ensure(|_| -> anyhow::Result<()> { anyhow::bail!("boom") });
        assert!(result.is_err());
        assert!(!step.stamp_path().exists());
    }

    #[test]
    fn test_unstamped_target_is_stale() {
        let dir = tempdir::TempDir::new("build_step_test").unwrap();
        let target = dir.path().join("out");
        touch(&target, "legacy\n");

        let step = BuildStep::new(&target, BuildFingerprint::new("legacy"));
        assert!(!step.is_fresh().unwrap());

        touch(&step.stamp_path(), "not json");
        assert!(!step.is_fresh().unwrap());

        assert!(step.invalidate().unwrap());
        assert!(!target.exists());
        assert!(!step.stamp_path().exists());
    }
}
