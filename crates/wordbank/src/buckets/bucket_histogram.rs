//! # Bucket Histogram

use std::{io::BufRead, path::Path};

use crate::{
    encoders::encoded_corpus::{EncodedCorpusReader, open_encoded_corpus},
    errors::WBResult,
    reserved::ReservedSymbol,
    support::lines::{PROGRESS_INTERVAL, ProgressLog},
    types::TokenId,
};

/// A `(source, target)` length bound; both lengths must be strictly less.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Exclusive bound on the source length.
    pub source_size: usize,

    /// Exclusive bound on the target length, including the trailing EOS.
    pub target_size: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub const fn new(
        source_size: usize,
        target_size: usize,
    ) -> Self {
        Self {
            source_size,
            target_size,
        }
    }

    /// Does a pair of these lengths fit?
    pub fn fits(
        &self,
        source_len: usize,
        target_len: usize,
    ) -> bool {
        source_len < self.source_size && target_len < self.target_size
    }
}

/// The standard buckets.
pub const DEFAULT_BUCKETS: [Bucket; 4] = [
    Bucket::new(5, 10),
    Bucket::new(10, 15),
    Bucket::new(20, 25),
    Bucket::new(40, 50),
];

/// Pair counts per [`Bucket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketHistogram {
    buckets: Vec<Bucket>,
    counts: Vec<usize>,
    overflow: usize,
}

impl Default for BucketHistogram {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKETS.to_vec())
    }
}

impl BucketHistogram {
    /// Create an empty histogram.
    pub fn new(buckets: Vec<Bucket>) -> Self {
        let counts = vec![0; buckets.len()];
        Self {
            buckets,
            counts,
            overflow: 0,
        }
    }

    /// The buckets.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// The pair count of each bucket.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Pairs which fit no bucket.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Total pairs seen.
    pub fn total(&self) -> usize {
        self.counts.iter().sum::<usize>() + self.overflow
    }

    /// The index of the first bucket a pair of these lengths fits.
    pub fn assign(
        &self,
        source_len: usize,
        target_len: usize,
    ) -> Option<usize> {
        self.buckets
            .iter()
            .position(|b| b.fits(source_len, target_len))
    }

    /// Add an encoded pair; an EOS is appended to the target.
    pub fn add_pair(
        &mut self,
        source_ids: &[TokenId],
        target_ids: &[TokenId],
    ) -> Option<usize> {
        let mut target_ids = target_ids.to_vec();
        target_ids.push(ReservedSymbol::Eos.id());

        let bucket = self.assign(source_ids.len(), target_ids.len());
        match bucket {
            Some(idx) => self.counts[idx] += 1,
            None => self.overflow += 1,
        }
        bucket
    }

    /// Add aligned pairs from two encoded corpora.
    ///
    /// Stops at the end of the shorter corpus, or after `max_pairs`.
    pub fn add_readers<S: BufRead, T: BufRead>(
        &mut self,
        source: EncodedCorpusReader<S>,
        target: EncodedCorpusReader<T>,
        max_pairs: Option<usize>,
    ) -> WBResult<usize> {
        let progress = ProgressLog::new("reading data", PROGRESS_INTERVAL);
        let mut pairs = 0;
        for (source_ids, target_ids) in source.zip(target) {
            if max_pairs.is_some_and(|max| pairs >= max) {
                break;
            }
            pairs += 1;
            progress.tick(pairs);
            self.add_pair(&source_ids?, &target_ids?);
        }
        Ok(pairs)
    }

    /// Build a histogram over [`DEFAULT_BUCKETS`] from two encoded corpus files.
    ///
    /// ## Errors
    /// * [`WordbankError::NotFound`](crate::errors::WordbankError::NotFound) if a file is missing.
    /// * [`WordbankError::CorpusFormat`](crate::errors::WordbankError::CorpusFormat) on a malformed line.
    pub fn from_paths<S: AsRef<Path>, T: AsRef<Path>>(
        source_path: S,
        target_path: T,
        max_pairs: Option<usize>,
    ) -> WBResult<Self> {
        let mut histogram = Self::default();
        histogram.add_readers(
            open_encoded_corpus(source_path)?,
            open_encoded_corpus(target_path)?,
            max_pairs,
        )?;
        Ok(histogram)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::errors::WordbankError;

    #[test]
    fn test_assign() {
        let histogram = BucketHistogram::default();
        assert_eq!(histogram.assign(4, 9), Some(0));
        assert_eq!(histogram.assign(5, 9), Some(1));
        assert_eq!(histogram.assign(4, 10), Some(1));
        assert_eq!(histogram.assign(12, 3), Some(2));
        assert_eq!(histogram.assign(39, 49), Some(3));
        assert_eq!(histogram.assign(40, 2), None);
    }

    #[test]
    fn test_add_pair_counts_eos() {
        let mut histogram = BucketHistogram::default();
        // 9 target ids + EOS = 10; too long for the first bucket.
        assert_eq!(histogram.add_pair(&[1, 2], &[4; 9]), Some(1));
        assert_eq!(histogram.add_pair(&[1, 2], &[4; 8]), Some(0));
        assert_eq!(histogram.add_pair(&[4; 45], &[4; 2]), None);

        assert_eq!(histogram.counts(), &[1, 1, 0, 0]);
        assert_eq!(histogram.overflow(), 1);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn test_add_readers() {
        let source = EncodedCorpusReader::new(Cursor::new("4 5\n4 5 6 7 8 9\n\n4\n"));
        let target = EncodedCorpusReader::new(Cursor::new("6\n7 8\n9 9 9\n"));

        let mut histogram = BucketHistogram::default();
        let pairs = histogram.add_readers(source, target, None).unwrap();
        assert_eq!(pairs, 3);
        assert_eq!(histogram.counts(), &[2, 1, 0, 0]);

        let source = EncodedCorpusReader::new(Cursor::new("4\n4\n4\n"));
        let target = EncodedCorpusReader::new(Cursor::new("4\n4\n4\n"));
        let mut histogram = BucketHistogram::default();
        assert_eq!(histogram.add_readers(source, target, Some(2)).unwrap(), 2);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn test_malformed_and_missing() {
        let source = EncodedCorpusReader::new(Cursor::new("4 five\n"));
        let target = EncodedCorpusReader::new(Cursor::new("4\n"));
        let err = BucketHistogram::default()
            .add_readers(source, target, None)
            .unwrap_err();
        assert!(matches!(err, WordbankError::CorpusFormat { line: 1, .. }));

        let dir = tempdir::TempDir::new("buckets_test").unwrap();
        let err = BucketHistogram::from_paths(dir.path().join("a"), dir.path().join("b"), None)
            .unwrap_err();
        assert!(matches!(err, WordbankError::NotFound { .. }));
    }
}
