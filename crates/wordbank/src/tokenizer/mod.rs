//! # Word Tokenizers
//!
//! A [`WordTokenizer`] splits a line of text into word-like [`Token`]s.
//!
//! The default is [`BasicTokenizer`]; any `Fn(&str) -> Vec<Token>` may be
//! used in its place:
//!
//! ```rust
//! use wordbank::{tokenizer::WordTokenizer, types::Token};
//!
//! let lower = |line: &str| -> Vec<Token> {
//!     line.split_whitespace().map(|w| Token::from(w.to_lowercase())).collect()
//! };
//! assert_eq!(lower.tokenize("Hello World"), vec!["hello", "world"]);
//! ```

mod basic_tokenizer;

#[doc(inline)]
pub use basic_tokenizer::{BasicTokenizer, BasicTokenizerOptions, PUNCTUATION, TextNormalization};

use crate::types::Token;

/// Splits a line of text into an ordered sequence of non-empty tokens.
pub trait WordTokenizer {
    /// Tokenize one line of text.
    fn tokenize(
        &self,
        line: &str,
    ) -> Vec<Token>;

    /// A stable description of the settings that change tokenization.
    ///
    /// Build steps record this so a tokenizer change forces a rebuild.
    /// Tokenizers without one are only distinguished by their inputs.
    fn fingerprint(&self) -> Option<String> {
        None
    }
}

impl<F> WordTokenizer for F
where
    F: Fn(&str) -> Vec<Token>,
{
    fn tokenize(
        &self,
        line: &str,
    ) -> Vec<Token> {
        self(line)
    }
}
