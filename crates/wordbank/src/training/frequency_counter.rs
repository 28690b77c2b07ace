//! # Frequency Counter

use std::{io::BufRead, path::Path};

use crate::{
    errors::WBResult,
    support::{
        lines::{LossyLines, PROGRESS_INTERVAL, ProgressLog, open_lines},
        strings::normalize_digits,
    },
    tokenizer::WordTokenizer,
    training::FrequencyTable,
    types::Token,
};

/// Options for [`FrequencyCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyCounterOptions {
    /// Replace every digit with `0` before counting.
    pub normalize_digits: bool,

    /// Lines between progress log messages; `0` disables them.
    pub progress_interval: usize,
}

impl Default for FrequencyCounterOptions {
    fn default() -> Self {
        Self {
            normalize_digits: true,
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

impl FrequencyCounterOptions {
    /// Set digit normalization.
    pub fn with_normalize_digits(
        self,
        normalize_digits: bool,
    ) -> Self {
        Self {
            normalize_digits,
            ..self
        }
    }

    /// Set the progress interval.
    pub fn with_progress_interval(
        self,
        progress_interval: usize,
    ) -> Self {
        Self {
            progress_interval,
            ..self
        }
    }
}

/// Streaming token counter.
///
/// Holds exactly one [`FrequencyTable`]; lines are consumed one at a time.
pub struct FrequencyCounter<'a, W: WordTokenizer + ?Sized> {
    tokenizer: &'a W,
    options: FrequencyCounterOptions,
    table: FrequencyTable,
}

impl<'a, W: WordTokenizer + ?Sized> FrequencyCounter<'a, W> {
    /// Create a new counter.
    pub fn new(
        tokenizer: &'a W,
        options: FrequencyCounterOptions,
    ) -> Self {
        Self {
            tokenizer,
            options,
            table: FrequencyTable::with_capacity(100_000),
        }
    }

    /// Get the options.
    pub fn options(&self) -> &FrequencyCounterOptions {
        &self.options
    }

    /// The counts so far.
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Release the counts.
    pub fn release(self) -> FrequencyTable {
        self.table
    }

    /// Count the tokens of one line.
    pub fn update_from_line(
        &mut self,
        line: &str,
    ) {
        for token in self.tokenizer.tokenize(line) {
            let key: Token = if self.options.normalize_digits {
                normalize_digits(&token).into()
            } else {
                token
            };
            self.table.add(key);
        }
    }

    /// Count the tokens of each line.
    pub fn update_from_lines<I>(
        &mut self,
        lines: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for line in lines {
            self.update_from_line(line.as_ref());
        }
    }

    /// Count the tokens of a line stream.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, reader)))]
    pub fn update_from_reader<R: BufRead>(
        &mut self,
        reader: R,
    ) -> WBResult<()> {
        let lines = LossyLines::new(reader).with_progress(self.progress());
        self.consume(lines)
    }

    /// Count the tokens of a corpus file.
    ///
    /// ## Errors
    /// [`WordbankError::NotFound`](crate::errors::WordbankError::NotFound) if the corpus is missing.
    pub fn count_path<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> WBResult<()> {
        let path = path.as_ref();
        log::debug!("counting tokens in {}", path.display());
        let lines = open_lines(path)?.with_progress(self.progress());
        self.consume(lines)
    }

    fn progress(&self) -> ProgressLog {
        ProgressLog::new("processing", self.options.progress_interval)
    }

    fn consume<R: BufRead>(
        &mut self,
        lines: LossyLines<R>,
    ) -> WBResult<()> {
        for line in lines {
            self.update_from_line(&line?);
        }
        Ok(())
    }
}
