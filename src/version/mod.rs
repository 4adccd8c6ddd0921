//! Version resolution engine for release polling
//!
//! Given every release of a repository and the last version a pipeline saw,
//! compute which versions are new, in a stable and resumable order.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│ Classifier  │────▶│ Comparator  │────▶│   Cursor    │
//! │  (fetch)    │     │  (filter)   │     │   (sort)    │     │  (delta)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────────────────────┐
//!                     │ Extractor (tag -> version)  │
//!                     └─────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`]: Releases, cursors and emitted version identities
//! - [`extractor`]: Tag to version extraction rules
//! - [`loose`]: Loosely semantic version parsing and ordering
//! - [`semver`]: Strict semver parsing and range constraints
//! - [`classifier`]: Release kind selection and candidate filtering
//! - [`comparator`]: Version and time orderings
//! - [`cursor`]: Delta computation against the caller's cursor
//! - [`source`]: Trait for listing releases from a host
//! - [`sources`]: Concrete sources (GitHub)
//! - [`error`]: Error types for configuration and listing

pub mod classifier;
pub mod comparator;
pub mod cursor;
pub mod error;
pub mod extractor;
pub mod loose;
pub mod semver;
pub mod source;
pub mod sources;
pub mod types;
