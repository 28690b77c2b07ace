//! # Vocabulary

use crate::{
    errors::{WBResult, WordbankError},
    reserved::{RESERVED_COUNT, ReservedSymbol},
    types::{Token, TokenId},
    vocab::ReverseLookup,
};

/// An ordered, duplicate-free token list; position is id.
///
/// Invariants, checked at construction:
/// * ids `0..4` hold the [`ReservedSymbol`]s, in order;
/// * no token occurs twice;
/// * no token is empty or contains a line terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    tokens: Vec<Token>,
    lookup: ReverseLookup,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::reserved_only()
    }
}

impl Vocabulary {
    /// A vocabulary holding only the reserved symbols.
    pub fn reserved_only() -> Self {
        Self::from_tokens(ReservedSymbol::ALL.iter().map(|s| s.token()).collect())
            .expect("reserved symbols are distinct")
    }

    /// Build a vocabulary from an ordered token list.
    ///
    /// ## Errors
    /// * [`WordbankError::VocabConflict`] if the list does not begin with the
    ///   reserved symbols, contains a duplicate, or contains a token which
    ///   cannot be stored one-per-line.
    pub fn from_tokens(tokens: Vec<Token>) -> WBResult<Self> {
        for symbol in ReservedSymbol::ALL {
            match tokens.get(symbol.id() as usize) {
                Some(token) if token == symbol.as_str() => {}
                found => {
                    return Err(WordbankError::VocabConflict(format!(
                        "expected reserved symbol {symbol} at id {}, found {found:?}",
                        symbol.id()
                    )));
                }
            }
        }

        if let Some((id, token)) = tokens
            .iter()
            .enumerate()
            .find(|(_, t)| t.is_empty() || t.contains(['\n', '\r']))
        {
            return Err(WordbankError::VocabConflict(format!(
                "token {token:?} at id {id} is not storable"
            )));
        }

        let lookup = ReverseLookup::try_from_tokens(&tokens)?;
        Ok(Self { tokens, lookup })
    }

    /// The ordered token list.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Release the ordered token list.
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// The derived ``{ Token -> TokenId }`` lookup.
    pub fn lookup(&self) -> &ReverseLookup {
        &self.lookup
    }

    /// The number of tokens, including reserved symbols.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false; the reserved symbols are always present.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The number of tokens which are not reserved symbols.
    pub fn evictable_len(&self) -> usize {
        self.tokens.len() - RESERVED_COUNT
    }

    /// The token with the given id.
    pub fn token(
        &self,
        id: TokenId,
    ) -> Option<&Token> {
        self.tokens.get(id as usize)
    }

    /// The id of the given token.
    pub fn id(
        &self,
        token: &str,
    ) -> Option<TokenId> {
        self.lookup.get(token)
    }

    /// Does the vocabulary contain the token?
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.lookup.contains(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_words(words: &[&str]) -> Vec<Token> {
        let mut tokens: Vec<Token> = ReservedSymbol::ALL.iter().map(|s| s.token()).collect();
        tokens.extend(words.iter().map(|w| Token::from(*w)));
        tokens
    }

    #[test]
    fn test_reserved_only() {
        let vocab = Vocabulary::reserved_only();
        assert_eq!(vocab.len(), 4);
        assert_eq!(vocab.evictable_len(), 0);
        assert_eq!(vocab.tokens(), &["_PAD", "_GO", "_EOS", "_UNK"]);
        assert_eq!(vocab, Vocabulary::default());
    }

    #[test]
    fn test_from_tokens() {
        let vocab = Vocabulary::from_tokens(with_words(&["the", "cat"])).unwrap();
        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.evictable_len(), 2);
        assert_eq!(vocab.id("the"), Some(4));
        assert_eq!(vocab.id("_UNK"), Some(3));
        assert_eq!(vocab.token(5).map(|t| t.as_str()), Some("cat"));
        assert_eq!(vocab.token(6), None);
        assert!(vocab.contains("cat"));
        assert!(!vocab.contains("dog"));
    }

    #[test]
    fn test_missing_reserved_prefix() {
        let tokens = vec![Token::from("the"), Token::from("cat")];
        assert!(matches!(
            Vocabulary::from_tokens(tokens),
            Err(WordbankError::VocabConflict(_))
        ));

        let mut tokens = with_words(&["x"]);
        tokens.swap(1, 2);
        assert!(Vocabulary::from_tokens(tokens).is_err());
    }

    #[test]
    fn test_duplicate_tokens() {
        assert!(matches!(
            Vocabulary::from_tokens(with_words(&["a", "b", "a"])),
            Err(WordbankError::VocabConflict(_))
        ));
        assert!(Vocabulary::from_tokens(with_words(&["_GO"])).is_err());
    }

    #[test]
    fn test_unstorable_tokens() {
        for bad in ["a\nb", "a\r", ""] {
            assert!(
                matches!(
                    Vocabulary::from_tokens(with_words(&["ok", bad])),
                    Err(WordbankError::VocabConflict(_))
                ),
                "accepted {bad:?}"
            );
        }
    }
}
