//! # Basic Tokenizer

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

use crate::{tokenizer::WordTokenizer, types::Token};

/// Punctuation marks which always become tokens of their own.
pub const PUNCTUATION: &[char] = &['.', ',', '!', '?', '"', '\'', ':', ';', ')', '('];

static WORD_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    let class: String = PUNCTUATION
        .iter()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    Regex::new(&format!("[{class}]")).expect("regex pattern compilation failed")
});

/// Unicode normalization applied before splitting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TextNormalization {
    /// Leave text as-is.
    None,

    /// Canonical composition (NFC).
    #[default]
    Nfc,
}

/// Options for [`BasicTokenizer`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BasicTokenizerOptions {
    /// Unicode normalization applied to each line.
    pub normalization: TextNormalization,
}

impl BasicTokenizerOptions {
    /// Set the unicode normalization.
    pub fn with_normalization(
        self,
        normalization: TextNormalization,
    ) -> Self {
        Self { normalization }
    }

    /// Build a [`BasicTokenizer`] from these options.
    pub fn build(self) -> BasicTokenizer {
        BasicTokenizer { options: self }
    }
}

/// Whitespace + punctuation tokenizer.
///
/// Splits on runs of whitespace, then splits each fragment around the
/// [`PUNCTUATION`] marks; each mark becomes a token of its own.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BasicTokenizer {
    options: BasicTokenizerOptions,
}

impl BasicTokenizer {
    /// Create a new tokenizer.
    pub fn new(options: BasicTokenizerOptions) -> Self {
        options.build()
    }

    /// Get the options.
    pub fn options(&self) -> &BasicTokenizerOptions {
        &self.options
    }

    fn normalize<'a>(
        &self,
        line: &'a str,
    ) -> Cow<'a, str> {
        match self.options.normalization {
            TextNormalization::Nfc if is_nfc_quick(line.chars()) != IsNormalized::Yes => {
                Cow::Owned(line.nfc().collect())
            }
            _ => Cow::Borrowed(line),
        }
    }
}

fn split_fragment(
    fragment: &str,
    tokens: &mut Vec<Token>,
) {
    let mut last = 0;
    for mat in WORD_SPLIT.find_iter(fragment) {
        if mat.start() > last {
            tokens.push(fragment[last..mat.start()].into());
        }
        tokens.push(mat.as_str().into());
        last = mat.end();
    }
    if last < fragment.len() {
        tokens.push(fragment[last..].into());
    }
}

impl WordTokenizer for BasicTokenizer {
    fn tokenize(
        &self,
        line: &str,
    ) -> Vec<Token> {
        let line = self.normalize(line);
        let mut tokens = Vec::new();
        for fragment in line.split_whitespace() {
            split_fragment(fragment, &mut tokens);
        }
        tokens
    }

    fn fingerprint(&self) -> Option<String> {
        Some(format!("basic:{}", self.options.normalization))
    }
}
