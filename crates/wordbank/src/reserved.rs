//! # Reserved Symbols
//!
//! Every [`Vocabulary`](crate::vocab::Vocabulary) begins with the same four
//! control symbols, at fixed ids:
//!
//! | symbol | text   | id |
//! | ------ | ------ | -- |
//! | `Pad`  | `_PAD` | 0  |
//! | `Go`   | `_GO`  | 1  |
//! | `Eos`  | `_EOS` | 2  |
//! | `Unk`  | `_UNK` | 3  |

use crate::types::{Token, TokenId};

/// A reserved control symbol.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr
)]
pub enum ReservedSymbol {
    /// Padding.
    #[strum(serialize = "_PAD")]
    Pad = 0,

    /// Start of decoding.
    #[strum(serialize = "_GO")]
    Go = 1,

    /// End of sequence.
    #[strum(serialize = "_EOS")]
    Eos = 2,

    /// Unknown token.
    #[strum(serialize = "_UNK")]
    Unk = 3,
}

/// The number of reserved symbols; the smallest legal vocabulary size.
pub const RESERVED_COUNT: usize = 4;

impl ReservedSymbol {
    /// All reserved symbols, in id order.
    pub const ALL: [ReservedSymbol; RESERVED_COUNT] = [Self::Pad, Self::Go, Self::Eos, Self::Unk];

    /// The fixed id of this symbol.
    pub fn id(self) -> TokenId {
        self as TokenId
    }

    /// The text of this symbol, as stored in vocabulary files.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// The symbol as a [`Token`].
    pub fn token(self) -> Token {
        Token::from(self.as_str())
    }

    /// Look up the reserved symbol with the given text, if any.
    pub fn from_text(text: &str) -> Option<Self> {
        text.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_ids_and_text() {
        let listing: Vec<(TokenId, &str)> = ReservedSymbol::iter()
            .map(|s| (s.id(), s.as_str()))
            .collect();
        assert_eq!(
            listing,
            vec![(0, "_PAD"), (1, "_GO"), (2, "_EOS"), (3, "_UNK")]
        );

        assert_eq!(ReservedSymbol::ALL.to_vec(), ReservedSymbol::iter().collect::<Vec<_>>());
        assert_eq!(ReservedSymbol::Eos.to_string(), "_EOS");
    }

    #[test]
    fn test_from_text() {
        assert_eq!(ReservedSymbol::from_text("_UNK"), Some(ReservedSymbol::Unk));
        assert_eq!(ReservedSymbol::from_text("_unk"), None);
        assert_eq!(ReservedSymbol::from_text("the"), None);
    }
}
