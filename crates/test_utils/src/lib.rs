//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! receipt system test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `adapters`: In-memory port adapters (store, recorder, mailer, renderer)
//! - `clock`: Manually driven clock for cooldown and numbering tests
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod adapters;
pub mod clock;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use adapters::*;
pub use clock::*;
pub use assertions::*;
pub use generators::*;
