//! # Reverse Lookup

use crate::{
    errors::{WBResult, WordbankError},
    types::{Token, TokenId, WBHashMap, hash_map_with_capacity},
};

/// `{ Token -> TokenId }` map derived from an ordered token list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReverseLookup {
    token_ids: WBHashMap<Token, TokenId>,
}

impl ReverseLookup {
    /// Build the lookup for an ordered token list; index is id.
    ///
    /// ## Errors
    /// * [`WordbankError::VocabConflict`] if a token occurs more than once.
    /// * [`WordbankError::Config`] if the list does not fit the [`TokenId`] space.
    pub fn try_from_tokens(tokens: &[Token]) -> WBResult<Self> {
        if tokens.len() > TokenId::MAX as usize {
            return Err(WordbankError::Config(format!(
                "vocab size ({}) exceeds token id capacity",
                tokens.len()
            )));
        }

        let mut token_ids = hash_map_with_capacity(tokens.len());
        for (idx, token) in tokens.iter().enumerate() {
            if let Some(prev) = token_ids.insert(token.clone(), idx as TokenId) {
                return Err(WordbankError::VocabConflict(format!(
                    "duplicate token {token:?} at ids {prev} and {idx}"
                )));
            }
        }
        Ok(Self { token_ids })
    }

    /// Look up the id of a token.
    pub fn get(
        &self,
        token: &str,
    ) -> Option<TokenId> {
        self.token_ids.get(token).copied()
    }

    /// Does the lookup contain the token?
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.token_ids.contains_key(token)
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    /// Is the lookup empty?
    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }
}
