//! # Vocabulary IO
//!
//! Vocabulary files are UTF-8 text, one token per line, line order is id order:
//! ```terminaloutput
//! _PAD
//! _GO
//! _EOS
//! _UNK
//! the
//! ...
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader, Write},
    path::Path,
};

use wordbank_build_cache::atomic_write;

use crate::{
    errors::{WBResult, WordbankError, require_path},
    support::lines::LossyLines,
    types::Token,
    vocab::Vocabulary,
};

/// Write a [`Vocabulary`] to a [`Write`] writer, one token per line.
pub fn write_vocab<W: Write>(
    vocab: &Vocabulary,
    writer: &mut W,
) -> WBResult<()> {
    for token in vocab.tokens() {
        writeln!(writer, "{token}")?;
    }
    Ok(())
}

/// Save a [`Vocabulary`] to `path`, unless `path` already exists.
///
/// The file is written to a temporary sibling and renamed into place,
/// so `path` never holds a partial vocabulary.
///
/// ## Returns
/// `true` if the file was written; `false` if it was already present.
pub fn save_vocab_path<P: AsRef<Path>>(
    vocab: &Vocabulary,
    path: P,
) -> WBResult<bool> {
    let path = path.as_ref();
    if path.exists() {
        log::debug!("vocabulary already present: {}", path.display());
        return Ok(false);
    }

    atomic_write(path, |writer| write_vocab(vocab, writer))?;
    Ok(true)
}

/// Read a [`Vocabulary`] from a line reader.
///
/// ## Errors
/// * [`WordbankError::VocabConflict`] on duplicate or empty tokens,
///   or a missing reserved prefix.
pub fn read_vocab<R: BufRead>(reader: R) -> WBResult<Vocabulary> {
    let mut tokens: Vec<Token> = Vec::new();
    for line in LossyLines::new(reader) {
        let line = line?;
        if line.is_empty() {
            return Err(WordbankError::VocabConflict(format!(
                "empty token at id {}",
                tokens.len()
            )));
        }
        tokens.push(line.into());
    }
    Vocabulary::from_tokens(tokens)
}

/// Load a [`Vocabulary`] from a vocabulary file.
///
/// The result carries both the ordered token list and its
/// [`ReverseLookup`](crate::vocab::ReverseLookup).
///
/// ## Errors
/// * [`WordbankError::NotFound`] if `path` does not exist.
pub fn load_vocab_path<P: AsRef<Path>>(path: P) -> WBResult<Vocabulary> {
    let path = path.as_ref();
    require_path(path)?;
    read_vocab(BufReader::new(File::open(path)?))
}
