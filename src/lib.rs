//! reed-solomon-gf8 - systematic Reed-Solomon erasure coding over GF(2^8)
//!
//! Splits data into `k` shards and computes `m` parity shards such that any
//! `k` of the resulting `k + m` shards are enough to recover the rest. The
//! code is systematic: the first `k` output shards are the original data,
//! unmodified.
//!
//! ## Layout
//!
//! - [`galois`] - GF(2^8) field arithmetic (log/exp/multiplication tables).
//! - [`matrix`] - dense matrix algebra over that field.
//! - [`kernel`] - the twelve coding-loop variants that multiply a matrix by
//!   a set of shards.
//! - [`shard`] - shard-set and window validation shared by every entry point.
//! - [`codec`] - [`ReedSolomon`], the public codec built from the above.
//!
//! The library never logs; it only returns [`Error`]s. Applications built on
//! top of it are free to log as they see fit.

pub mod codec;
pub mod error;
pub mod galois;
pub mod kernel;
pub mod matrix;
pub mod shard;

pub use codec::ReedSolomon;
pub use error::{Error, Result};
pub use kernel::KernelKind;
pub use matrix::Matrix;
