//! Error type for the public convenience boundary. The `daware` core itself
//! has no recoverable failure modes (see module docs on [`crate::suffix`]);
//! this enum covers only the preconditions [`crate::sort_suffixes`] can
//! cheaply check before handing off to the core.

use thiserror::Error;

/// Errors returned by [`crate::sort_suffixes`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SuffixSortError {
    /// `sort_suffixes` was called with an empty byte slice.
    #[error("cannot build a suffix array from an empty input")]
    Empty,
    /// The last byte of the input was not strictly smaller than every other
    /// byte, so it cannot serve as a unique sentinel.
    #[error("input is missing a unique sentinel byte strictly smaller than every other byte")]
    MissingSentinel,
}
