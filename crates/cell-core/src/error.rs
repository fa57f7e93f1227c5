//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert them into
//! `CoreError` via `From` impls or wrap `CoreError` as one variant.  Both
//! patterns are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `cell-core` and a common base for sub-crates.
///
/// Registry and substance lookups return `Option` (see `CellStore::get` and
/// `SubstanceGrid::id_of`); only configuration problems are errors here.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `cell-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
