//! # Corpus Encoder

use std::{
    io::{BufRead, Write},
    path::Path,
};

use wordbank_build_cache::atomic_write;

use crate::{
    encoders::{SentenceEncoder, SentenceEncoderOptions, encoded_corpus::write_id_line},
    errors::WBResult,
    support::lines::{LossyLines, PROGRESS_INTERVAL, ProgressLog, open_lines},
    tokenizer::WordTokenizer,
    vocab::{ReverseLookup, io::load_vocab_path},
};

/// Streams a corpus through a [`SentenceEncoder`].
///
/// Each source line yields exactly one target line; a line with no
/// tokens yields an empty line.
pub struct CorpusEncoder<'a, W: WordTokenizer + ?Sized> {
    tokenizer: &'a W,
    options: SentenceEncoderOptions,
    progress_interval: usize,
}

impl<'a, W: WordTokenizer + ?Sized> CorpusEncoder<'a, W> {
    /// Create a new corpus encoder.
    pub fn new(
        tokenizer: &'a W,
        options: SentenceEncoderOptions,
    ) -> Self {
        Self {
            tokenizer,
            options,
            progress_interval: PROGRESS_INTERVAL,
        }
    }

    /// Set the lines between progress log messages; `0` disables them.
    pub fn with_progress_interval(
        self,
        progress_interval: usize,
    ) -> Self {
        Self {
            progress_interval,
            ..self
        }
    }

    /// Encode every line of `reader` into `writer`.
    ///
    /// ## Returns
    /// The number of lines encoded.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn encode_stream<R: BufRead, O: Write + ?Sized>(
        &self,
        lookup: &ReverseLookup,
        reader: R,
        writer: &mut O,
    ) -> WBResult<usize> {
        let encoder = SentenceEncoder::new(lookup, self.tokenizer, self.options);
        let mut lines = LossyLines::new(reader).with_progress(self.progress());
        for line in lines.by_ref() {
            write_id_line(writer, &encoder.encode(&line?))?;
        }
        Ok(lines.lines_read())
    }

    /// Encode `source` into `target` with the vocabulary at `vocab_path`,
    /// unless `target` already exists.
    ///
    /// `target` is written to a temporary sibling and renamed into place.
    ///
    /// ## Returns
    /// `true` if the target was written; `false` if it was already present.
    ///
    /// ## Errors
    /// * [`WordbankError::NotFound`](crate::errors::WordbankError::NotFound) if
    ///   `source` or `vocab_path` is missing.
    pub fn encode_path<S, T, V>(
        &self,
        source: S,
        target: T,
        vocab_path: V,
    ) -> WBResult<bool>
    where
        S: AsRef<Path>,
        T: AsRef<Path>,
        V: AsRef<Path>,
    {
        let (source, target) = (source.as_ref(), target.as_ref());
        if target.exists() {
            log::debug!("encoded corpus already present: {}", target.display());
            return Ok(false);
        }

        log::info!("Tokenizing data in {}", source.display());
        let vocab = load_vocab_path(vocab_path)?;
        let encoder = SentenceEncoder::new(vocab.lookup(), self.tokenizer, self.options);
        let lines = open_lines(source)?;

        let progress = self.progress();
        atomic_write(target, |writer| -> WBResult<()> {
            for line in lines.with_progress(progress) {
                write_id_line(writer, &encoder.encode(&line?))?;
            }
            Ok(())
        })?;
        Ok(true)
    }

    fn progress(&self) -> ProgressLog {
        ProgressLog::new("tokenizing", self.progress_interval)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{
        encoders::encoded_corpus::open_encoded_corpus,
        errors::WordbankError,
        tokenizer::BasicTokenizer,
        types::{Token, TokenId},
        vocab::{Vocabulary, io::save_vocab_path},
    };

    fn vocab() -> Vocabulary {
        let mut tokens: Vec<Token> = Vocabulary::reserved_only().into_tokens();
        tokens.extend(["the", "cat", "sat", ".", "dog", "ran", "0"].map(Token::from));
        Vocabulary::from_tokens(tokens).unwrap()
    }

    #[test]
    fn test_encode_stream() {
        let tokenizer = BasicTokenizer::default();
        let vocab = vocab();

        let mut out: Vec<u8> = Vec::new();
        let count = CorpusEncoder::new(&tokenizer, SentenceEncoderOptions::default())
            .encode_stream(
                vocab.lookup(),
                Cursor::new("the cat sat.\n\nthe 3 dogs ran\n"),
                &mut out,
            )
            .unwrap();

        assert_eq!(count, 3);
        assert_eq!(String::from_utf8(out).unwrap(), "4 5 6 7\n\n4 10 3 9\n");
    }

    #[test]
    fn test_encode_path() {
        let tokenizer = BasicTokenizer::default();
        let dir = tempdir::TempDir::new("corpus_encoder_test").unwrap();
        let vocab_path = dir.path().join("vocab11.enc");
        let source = dir.path().join("train.enc");
        let target = dir.path().join("train.enc.ids11");

        save_vocab_path(&vocab(), &vocab_path).unwrap();
        std::fs::write(&source, "the dog sat.\nbirds\n\n").unwrap();

        let corpus_encoder = CorpusEncoder::new(&tokenizer, SentenceEncoderOptions::default())
            .with_progress_interval(1);
        assert!(corpus_encoder.encode_path(&source, &target, &vocab_path).unwrap());

        let ids = open_encoded_corpus(&target)
            .unwrap()
            .collect::<WBResult<Vec<Vec<TokenId>>>>()
            .unwrap();
        assert_eq!(ids, vec![vec![4, 8, 6, 7], vec![3], vec![]]);

        // Present targets are left alone.
        std::fs::write(&source, "the\n").unwrap();
        assert!(!corpus_encoder.encode_path(&source, &target, &vocab_path).unwrap());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "4 8 6 7\n3\n\n");
    }

    #[test]
    fn test_encode_path_missing_inputs() {
        let tokenizer = BasicTokenizer::default();
        let dir = tempdir::TempDir::new("corpus_encoder_test").unwrap();
        let corpus_encoder = CorpusEncoder::new(&tokenizer, SentenceEncoderOptions::default());

        let source = dir.path().join("train.enc");
        std::fs::write(&source, "the\n").unwrap();
        let err = corpus_encoder
            .encode_path(&source, dir.path().join("out"), dir.path().join("vocab"))
            .unwrap_err();
        assert!(matches!(err, WordbankError::NotFound { .. }));
        assert!(!dir.path().join("out").exists());
    }
}
