//! # Corpus Augmentation
//!
//! Producers of augmented corpora, the domain text whose tokens are forced
//! into a vocabulary by [`AugmentedVocabMerger`](crate::training::AugmentedVocabMerger).

mod climate;

#[doc(inline)]
pub use climate::{ClimateAugmentation, ClimateAugmentationPaths, METATOKEN_LENGTHS};
