//! Error types for Reed-Solomon erasure coding operations

use thiserror::Error;

/// Errors that can occur while constructing or driving a [`crate::codec::ReedSolomon`]
/// codec, or while using [`crate::matrix::Matrix`] directly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// `k + m` exceeded 256, the largest codeword width GF(2^8) can address.
    #[error("too many shards: k={k} + m={m} = {total} exceeds the GF(2^8) limit of 256")]
    TooManyShards { k: usize, m: usize, total: usize },

    /// `k == 0`: a codec needs at least one data shard.
    #[error("invalid shape: k must be greater than zero, got k={k}, m={m}")]
    InvalidShape { k: usize, m: usize },

    /// The shard count, shard lengths, or window passed to a codec call was invalid.
    #[error("invalid argument: {reason}")]
    ArgumentInvalid { reason: String },

    /// A caller-supplied scratch buffer was smaller than `offset + byte_count`.
    #[error("buffer too small: need at least {required} bytes, got {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// Fewer than `k` shards were marked present during `decode_missing`.
    #[error("insufficient shards: need at least {needed} present, got {present}")]
    InsufficientShards { needed: usize, present: usize },

    /// A matrix that was expected to be invertible turned out to be singular.
    #[error("singular matrix: no nonzero pivot found in column {column}")]
    Singular { column: usize },

    /// Two matrices were multiplied or augmented with incompatible dimensions.
    #[error("shape mismatch: {reason}")]
    ShapeMismatch { reason: String },

    /// A row or column index fell outside a matrix's bounds.
    #[error("index out of range: ({row}, {col}) not in a {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Division by the zero element of GF(2^8).
    #[error("division by zero in GF(2^8)")]
    DivisionByZero,
}

/// Result type for the Reed-Solomon core library.
pub type Result<T> = std::result::Result<T, Error>;
