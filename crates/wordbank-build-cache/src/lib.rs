//! # wordbank-build-cache
//!
//! Artifact bookkeeping for the wordbank pipeline:
//! * [`BuildStep`] pairs a target file with a [`BuildFingerprint`] of the
//!   inputs and parameters that produced it;
//! * [`atomic_write`] writes through a temporary sibling and renames it into
//!   place, so a target is either absent or complete;
//! * [`WORDBANK_DATA_CONFIG`] resolves the default working directory.
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod atomic;
pub mod build_step;
pub mod path_resolver;
pub mod path_utils;

pub use atomic::{atomic_write, temp_path};
pub use build_step::{BuildFingerprint, BuildStep, InputStamp};
pub use path_utils::extend_path;

/// Environment variable key to override the default working directory.
pub const WORDBANK_WORK_DIR: &str = "WORDBANK_WORK_DIR";

/// Default [`PathResolver`] for wordbank.
pub const WORDBANK_DATA_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.wordbank",
    organization: "",
    application: "wordbank",
    env_vars: &[WORDBANK_WORK_DIR],
};
