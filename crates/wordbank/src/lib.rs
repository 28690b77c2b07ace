//! # `wordbank` Vocabulary Builder
//!
//! Frequency-ranked word vocabularies, and the id encoding of corpora
//! against them, for sequence-to-sequence training data.
//!
//! See:
//! * [`tokenizer`] to split lines into word and punctuation tokens.
//! * [`training`] to count a corpus and build a [`vocab::Vocabulary`].
//! * [`vocab`] to manage vocabularies and vocab io.
//! * [`encoders`] to encode sentences and corpora into ids.
//! * [`pipeline`] to prepare a full train/test data set.
//!
//! Every vocabulary begins with the reserved symbols of [`ReservedSymbol`],
//! at ids `0..4`: `_PAD`, `_GO`, `_EOS`, `_UNK`.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::WB{HashMap,HashSet}`` type alias machinery.
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Preparing Data
//!
//! ```rust,no_run
//! use wordbank::{
//!     pipeline::{PipelineConfig, prepare_custom_data},
//!     tokenizer::BasicTokenizer,
//! };
//!
//! fn example() -> wordbank::WBResult<()> {
//!     let config = PipelineConfig::new(
//!         "working_dir",
//!         ("data/train.enc".into(), "data/train.dec".into()),
//!         ("data/test.enc".into(), "data/test.dec".into()),
//!         20_000,
//!         20_000,
//!     );
//!
//!     let prepared = prepare_custom_data(&config, &BasicTokenizer::default())?;
//!     println!("{}", prepared.train_enc_ids.display());
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod augmentation;
pub mod buckets;
pub mod encoders;
pub mod errors;
pub mod pipeline;
pub mod reserved;
pub mod support;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{WBResult, WordbankError};
#[doc(inline)]
pub use reserved::ReservedSymbol;
#[doc(inline)]
pub use wordbank_build_cache as build_cache;
