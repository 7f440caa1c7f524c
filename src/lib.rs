mod macros;

pub mod chain;
pub mod hash;
pub mod store;
pub mod table;

use thiserror::Error;

/// Errors raised by [`BoundedStore`](store::BoundedStore) slot access.
///
/// Both variants signal an index-arithmetic bug in the caller rather than a
/// normal-use condition, so nothing inside this crate catches them.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The index argument could not be read as an unsigned integer
    #[error("The supplied index needs to be an unsigned integer")]
    InvalidIndexType,

    /// The index lies at or beyond the store's limit
    #[error("The supplied index {index} lies out of the store's bounds, limit: {limit}")]
    IndexOutOfBounds { index: usize, limit: usize },
}

pub use chain::{Chain, Entry};
pub use store::BoundedStore;
pub use table::HashTable;
