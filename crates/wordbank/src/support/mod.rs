//! # Support Utilities

pub mod lines;
pub mod strings;
