//! Shared test helpers

#![allow(dead_code, unused_imports)]

pub mod source;

pub use source::{FixedSource, ReleaseBuilder, check, day};
