//! # Encoded Corpus Format
//!
//! One line per source line; each line is a space separated list of
//! decimal token ids:
//! ```terminaloutput
//! 4 5 6 7
//!
//! 4 8 9 7
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use crate::{
    errors::{WBResult, WordbankError, require_path},
    support::lines::LossyLines,
    types::TokenId,
};

/// Write one encoded line.
pub fn write_id_line<W: Write + ?Sized>(
    writer: &mut W,
    ids: &[TokenId],
) -> std::io::Result<()> {
    for (idx, id) in ids.iter().enumerate() {
        write!(writer, "{}{}", if idx == 0 { "" } else { " " }, id)?;
    }
    writeln!(writer)
}

/// Parse one encoded line.
///
/// ## Arguments
/// * `line` - the line text.
/// * `line_number` - the 1-based line number, for error reporting.
///
/// ## Errors
/// * [`WordbankError::CorpusFormat`] if a field is not a non-negative integer.
pub fn parse_id_line(
    line: &str,
    line_number: usize,
) -> WBResult<Vec<TokenId>> {
    line.split_whitespace()
        .map(|field| {
            field
                .parse::<TokenId>()
                .map_err(|e| WordbankError::CorpusFormat {
                    line: line_number,
                    message: format!("{field:?}: {e}"),
                })
        })
        .collect()
}

/// Iterator over the id sequences of an encoded corpus.
pub struct EncodedCorpusReader<R: BufRead> {
    lines: LossyLines<R>,
}

impl<R: BufRead> EncodedCorpusReader<R> {
    /// Wrap a line reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: LossyLines::new(reader),
        }
    }

    /// The number of lines read so far.
    pub fn lines_read(&self) -> usize {
        self.lines.lines_read()
    }
}

impl<R: BufRead> Iterator for EncodedCorpusReader<R> {
    type Item = WBResult<Vec<TokenId>>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        Some(match line {
            Ok(line) => parse_id_line(&line, self.lines.lines_read()),
            Err(err) => Err(err.into()),
        })
    }
}

/// Open an encoded corpus file.
///
/// ## Errors
/// * [`WordbankError::NotFound`] if the path is missing.
pub fn open_encoded_corpus<P: AsRef<Path>>(path: P) -> WBResult<EncodedCorpusReader<BufReader<File>>> {
    let path = path.as_ref();
    require_path(path)?;
    Ok(EncodedCorpusReader::new(BufReader::new(File::open(path)?)))
}
