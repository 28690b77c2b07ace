//! # Vocabulary Training
//!
//! Building a [`Vocabulary`](crate::vocab::Vocabulary) from a corpus is three steps:
//! * [`FrequencyCounter`] - tally token occurrences in one streaming pass;
//! * [`VocabBuilder`] - rank by count, prepend the reserved symbols, truncate;
//! * [`AugmentedVocabMerger`] - force the tokens of an augmented corpus into
//!   the tail, evicting the lowest ranked tokens.
//!
//! ```rust,no_run
//! use wordbank::{
//!     tokenizer::BasicTokenizer,
//!     training::{
//!         AugmentedVocabMerger,
//!         FrequencyCounter,
//!         FrequencyCounterOptions,
//!         VocabBuilderOptions,
//!     },
//!     vocab::io::save_vocab_path,
//! };
//!
//! fn example() -> wordbank::WBResult<()> {
//!     let tokenizer = BasicTokenizer::default();
//!
//!     let mut counter = FrequencyCounter::new(&tokenizer, FrequencyCounterOptions::default());
//!     counter.count_path("train.enc")?;
//!
//!     let vocab = VocabBuilderOptions::new(20_000).init().build(&counter.release())?;
//!     let (vocab, _report) = AugmentedVocabMerger::new(&tokenizer).merge_path(vocab, "augmented.enc")?;
//!
//!     save_vocab_path(&vocab, "vocab20000.enc")?;
//!     Ok(())
//! }
//! ```

mod augmented_merger;
mod frequency_counter;
mod frequency_table;
mod vocab_builder;

#[doc(inline)]
pub use augmented_merger::{AugmentedVocabMerger, MergeReport};
#[doc(inline)]
pub use frequency_counter::{FrequencyCounter, FrequencyCounterOptions};
#[doc(inline)]
pub use frequency_table::{FrequencyTable, TokenCount};
#[doc(inline)]
pub use vocab_builder::{VocabBuilder, VocabBuilderOptions, try_max_size};
