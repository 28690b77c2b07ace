//! # Sentence Encoder

use crate::{
    reserved::ReservedSymbol,
    support::strings::normalize_digits,
    tokenizer::WordTokenizer,
    types::TokenId,
    vocab::ReverseLookup,
};

/// Options for [`SentenceEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceEncoderOptions {
    /// Replace every digit with `0` before lookup.
    pub normalize_digits: bool,
}

impl Default for SentenceEncoderOptions {
    fn default() -> Self {
        Self {
            normalize_digits: true,
        }
    }
}

impl SentenceEncoderOptions {
    /// Set digit normalization.
    pub fn with_normalize_digits(
        self,
        normalize_digits: bool,
    ) -> Self {
        Self { normalize_digits }
    }
}

/// Encodes sentences to token ids through a [`ReverseLookup`].
pub struct SentenceEncoder<'a, W: WordTokenizer + ?Sized> {
    lookup: &'a ReverseLookup,
    tokenizer: &'a W,
    options: SentenceEncoderOptions,
}

impl<'a, W: WordTokenizer + ?Sized> SentenceEncoder<'a, W> {
    /// Create a new encoder.
    pub fn new(
        lookup: &'a ReverseLookup,
        tokenizer: &'a W,
        options: SentenceEncoderOptions,
    ) -> Self {
        Self {
            lookup,
            tokenizer,
            options,
        }
    }

    /// Get the options.
    pub fn options(&self) -> &SentenceEncoderOptions {
        &self.options
    }

    /// Encode a sentence; one id per token, in order.
    ///
    /// Tokens missing from the vocabulary encode as [`ReservedSymbol::Unk`].
    pub fn encode(
        &self,
        sentence: &str,
    ) -> Vec<TokenId> {
        let unknown = ReservedSymbol::Unk.id();
        self.tokenizer
            .tokenize(sentence)
            .iter()
            .map(|token| {
                let id = if self.options.normalize_digits {
                    self.lookup.get(&normalize_digits(token))
                } else {
                    self.lookup.get(token)
                };
                id.unwrap_or(unknown)
            })
            .collect()
    }
}
