//! # Augmented Vocabulary Merger
//!
//! Forces the tokens of an augmented (domain) corpus into a vocabulary,
//! without growing it: the `k` new tokens replace the `k` lowest ranked
//! tokens at the tail.

use std::{convert::Infallible, io::BufRead, path::Path};

use crate::{
    errors::{WBResult, WordbankError},
    support::lines::{LossyLines, open_lines},
    tokenizer::WordTokenizer,
    types::{Token, WBHashSet},
    vocab::Vocabulary,
};

/// What a merge changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    /// Tokens appended, in first-encounter order.
    pub added: Vec<Token>,

    /// Tokens evicted, in their original id order.
    pub evicted: Vec<Token>,
}

/// Ordered, de-duplicated collection of tokens missing from a vocabulary.
struct NewTokens<'v> {
    vocab: &'v Vocabulary,
    seen: WBHashSet<Token>,
    tokens: Vec<Token>,
}

impl<'v> NewTokens<'v> {
    fn new(vocab: &'v Vocabulary) -> Self {
        Self {
            vocab,
            seen: Default::default(),
            tokens: Vec::new(),
        }
    }

    fn observe(
        &mut self,
        token: Token,
    ) {
        if !self.vocab.contains(&token) && !self.seen.contains(&token) {
            self.seen.insert(token.clone());
            self.tokens.push(token);
        }
    }
}

/// Merges augmented-corpus tokens into a [`Vocabulary`].
///
/// Augmented tokens are taken verbatim; digits are not normalized.
pub struct AugmentedVocabMerger<'a, W: WordTokenizer + ?Sized> {
    tokenizer: &'a W,
}

impl<'a, W: WordTokenizer + ?Sized> AugmentedVocabMerger<'a, W> {
    /// Create a new merger.
    pub fn new(tokenizer: &'a W) -> Self {
        Self { tokenizer }
    }

    /// Collect the distinct tokens of `lines` absent from `vocab`,
    /// in first-encounter order.
    pub fn collect_new_tokens<I>(
        &self,
        vocab: &Vocabulary,
        lines: I,
    ) -> Vec<Token>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let lines = lines.into_iter().map(Ok::<_, Infallible>);
        match self.try_collect_new_tokens(vocab, lines) {
            Ok(tokens) => tokens,
            Err(never) => match never {},
        }
    }

    /// [`collect_new_tokens`](Self::collect_new_tokens) over fallible lines;
    /// stops at the first error.
    fn try_collect_new_tokens<I, S, E>(
        &self,
        vocab: &Vocabulary,
        lines: I,
    ) -> Result<Vec<Token>, E>
    where
        I: IntoIterator<Item = Result<S, E>>,
        S: AsRef<str>,
    {
        let mut new_tokens = NewTokens::new(vocab);
        for line in lines {
            for token in self.tokenizer.tokenize(line?.as_ref()) {
                new_tokens.observe(token);
            }
        }
        Ok(new_tokens.tokens)
    }

    /// Replace the tail of `vocab` with `new_tokens`.
    ///
    /// `new_tokens` must be distinct and absent from `vocab`;
    /// see [`collect_new_tokens`](Self::collect_new_tokens).
    ///
    /// ## Errors
    /// * [`WordbankError::Config`] if there are more new tokens than
    ///   non-reserved entries to evict.
    pub fn merge(
        &self,
        vocab: Vocabulary,
        new_tokens: Vec<Token>,
    ) -> WBResult<(Vocabulary, MergeReport)> {
        let k = new_tokens.len();
        if k > vocab.evictable_len() {
            return Err(WordbankError::Config(format!(
                "augmented corpus adds {k} tokens, but only {} vocabulary entries can be evicted",
                vocab.evictable_len()
            )));
        }

        let mut tokens = vocab.into_tokens();
        let evicted = tokens.split_off(tokens.len() - k);
        tokens.extend(new_tokens.iter().cloned());

        log::info!("replaced {k} least frequent tokens with augmented tokens");

        Ok((
            Vocabulary::from_tokens(tokens)?,
            MergeReport {
                added: new_tokens,
                evicted,
            },
        ))
    }

    /// Merge the tokens of `lines` into `vocab`.
    pub fn merge_lines<I>(
        &self,
        vocab: Vocabulary,
        lines: I,
    ) -> WBResult<(Vocabulary, MergeReport)>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let new_tokens = self.collect_new_tokens(&vocab, lines);
        self.merge(vocab, new_tokens)
    }

    /// Merge the tokens of a line stream into `vocab`.
    pub fn merge_reader<R: BufRead>(
        &self,
        vocab: Vocabulary,
        reader: R,
    ) -> WBResult<(Vocabulary, MergeReport)> {
        self.merge_stream(vocab, LossyLines::new(reader))
    }

    /// Merge the tokens of an augmented corpus file into `vocab`.
    ///
    /// ## Errors
    /// * [`WordbankError::NotFound`] if the corpus is missing.
    pub fn merge_path<P: AsRef<Path>>(
        &self,
        vocab: Vocabulary,
        path: P,
    ) -> WBResult<(Vocabulary, MergeReport)> {
        let path = path.as_ref();
        log::debug!("merging augmented tokens from {}", path.display());
        self.merge_stream(vocab, open_lines(path)?)
    }

    fn merge_stream<R: BufRead>(
        &self,
        vocab: Vocabulary,
        lines: LossyLines<R>,
    ) -> WBResult<(Vocabulary, MergeReport)> {
        let new_tokens = self.try_collect_new_tokens(&vocab, lines)?;
        self.merge(vocab, new_tokens)
    }
}
