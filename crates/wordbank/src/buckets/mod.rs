//! # Length Buckets
//!
//! Diagnostic grouping of encoded (source, target) sentence pairs by length,
//! as a sequence model would batch them.

mod bucket_histogram;

#[doc(inline)]
pub use bucket_histogram::{Bucket, BucketHistogram, DEFAULT_BUCKETS};
