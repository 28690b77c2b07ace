//! # Vocabulary
//!
//! A [`Vocabulary`] is an ordered, duplicate-free sequence of tokens where
//! position is id. The four [`ReservedSymbol`](crate::reserved::ReservedSymbol)s
//! always occupy ids `0..4`.
//!
//! * [`ReverseLookup`] - the derived ``{ Token -> TokenId }`` map.
//! * [`io`] - the line-based vocabulary file format.

pub mod io;

mod reverse_lookup;
mod vocabulary;

#[doc(inline)]
pub use reverse_lookup::ReverseLookup;
#[doc(inline)]
pub use vocabulary::Vocabulary;
