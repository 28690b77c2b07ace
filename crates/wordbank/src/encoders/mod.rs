//! # Encoders
//!
//! * [`SentenceEncoder`] - a sentence to a sequence of [`TokenId`](crate::types::TokenId)s.
//! * [`CorpusEncoder`] - a corpus file to an encoded corpus file.
//! * [`encoded_corpus`] - the encoded corpus line format.

pub mod encoded_corpus;

mod corpus_encoder;
mod sentence_encoder;

#[doc(inline)]
pub use corpus_encoder::CorpusEncoder;
#[doc(inline)]
pub use sentence_encoder::{SentenceEncoder, SentenceEncoderOptions};
