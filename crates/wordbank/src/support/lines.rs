//! # Line Streams
//!
//! Corpora are read one line at a time, never whole-file.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    errors::{WBResult, require_path},
    support::strings::{string_from_utf8_lossy, strip_line_terminator},
};

/// The default number of lines between progress log messages.
pub const PROGRESS_INTERVAL: usize = 100_000;

/// Periodic liveness logging for long scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressLog {
    /// The verb used in the log message; e.g. "processing".
    pub label: &'static str,

    /// Lines between messages; `0` disables logging.
    pub interval: usize,
}

impl ProgressLog {
    /// Create a new progress log.
    pub fn new(
        label: &'static str,
        interval: usize,
    ) -> Self {
        Self { label, interval }
    }

    /// Report that `count` lines have been seen.
    pub fn tick(
        &self,
        count: usize,
    ) {
        if self.interval > 0 && count % self.interval == 0 {
            log::info!("  {} line {}", self.label, count);
        }
    }
}

/// Iterator over the lines of a [`BufRead`], decoded lossily as UTF-8.
///
/// Line terminators are stripped.
pub struct LossyLines<R: BufRead> {
    reader: R,
    buf: Vec<u8>,
    count: usize,
    progress: Option<ProgressLog>,
}

impl<R: BufRead> LossyLines<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
            count: 0,
            progress: None,
        }
    }

    /// Enable progress logging.
    pub fn with_progress(
        self,
        progress: ProgressLog,
    ) -> Self {
        Self {
            progress: Some(progress),
            ..self
        }
    }

    /// The number of lines yielded so far.
    pub fn lines_read(&self) -> usize {
        self.count
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.count += 1;
                if let Some(progress) = &self.progress {
                    progress.tick(self.count);
                }
                let line = string_from_utf8_lossy(std::mem::take(&mut self.buf));
                Some(Ok(strip_line_terminator(&line).to_string()))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Open a file as a [`LossyLines`] stream.
///
/// ## Errors
/// [`WordbankError::NotFound`](crate::errors::WordbankError::NotFound) if the path is missing.
pub fn open_lines<P: AsRef<Path>>(path: P) -> WBResult<LossyLines<BufReader<File>>> {
    let path = path.as_ref();
    require_path(path)?;
    Ok(LossyLines::new(BufReader::new(File::open(path)?)))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_lossy_lines() {
        let data: &[u8] = b"hello world\r\nsecond\n\nbad \xff byte\nlast";
        let mut lines = LossyLines::new(Cursor::new(data));
        let collected = lines.by_ref().collect::<std::io::Result<Vec<_>>>().unwrap();
        assert_eq!(
            collected,
            vec![
                "hello world".to_string(),
                "second".to_string(),
                "".to_string(),
                "bad \u{fffd} byte".to_string(),
                "last".to_string(),
            ]
        );
        assert_eq!(lines.lines_read(), 5);
    }

    #[test]
    fn test_open_lines_missing() {
        let dir = tempdir::TempDir::new("lines_test").unwrap();
        assert!(matches!(
            open_lines(dir.path().join("nope.txt")),
            Err(crate::errors::WordbankError::NotFound { .. })
        ));
    }
}
