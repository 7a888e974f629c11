//! The systematic Reed-Solomon codec: construction, parity generation,
//! verification, and reconstruction from any `k` surviving shards.

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::kernel::KernelKind;
use crate::matrix::Matrix;
use crate::shard::validate_window;

/// A configured `(k, m)` systematic Reed-Solomon code over GF(2^8).
///
/// `k` data shards and `m` parity shards, `k + m <= 256`. The generator
/// matrix is `T x k` with an identity block on top, so the first `k` rows
/// reproduce the data shards unchanged and the remaining `m` rows compute
/// parity as a fixed linear combination of the data.
#[derive(Clone, Debug)]
pub struct ReedSolomon {
    k: usize,
    m: usize,
    total: usize,
    generator: Matrix,
    parity_rows: Vec<Vec<u8>>,
    kernel: KernelKind,
}

impl ReedSolomon {
    /// Builds a `(k, m)` code using the given kernel variant.
    pub fn new(k: usize, m: usize, kernel: KernelKind) -> Result<Self> {
        let total = k + m;
        if total > 256 {
            return Err(Error::TooManyShards { k, m, total });
        }
        if k == 0 {
            return Err(Error::InvalidShape { k, m });
        }

        let vandermonde = Matrix::vandermonde(total, k);
        let top = vandermonde.submatrix(0, 0, k, k)?;
        let top_inverse = top.invert()?;
        let generator = vandermonde.multiply(&top_inverse)?;

        let mut parity_rows = Vec::with_capacity(m);
        for p in 0..m {
            parity_rows.push(generator.row_copy(k + p)?);
        }

        Ok(Self {
            k,
            m,
            total,
            generator,
            parity_rows,
            kernel,
        })
    }

    /// Builds a `(k, m)` code using [`KernelKind::DEFAULT`].
    pub fn with_default_kernel(k: usize, m: usize) -> Result<Self> {
        Self::new(k, m, KernelKind::DEFAULT)
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn m(&self) -> usize {
        self.m
    }

    #[inline]
    pub fn total_shards(&self) -> usize {
        self.total
    }

    #[inline]
    pub fn kernel(&self) -> KernelKind {
        self.kernel
    }

    /// Computes parity shards `k..k+m` from data shards `0..k` over the
    /// byte window `[offset, offset + byte_count)`. `shards` must hold
    /// exactly `total_shards()` buffers, data shards first.
    pub fn encode_parity(
        &self,
        shards: &mut [&mut [u8]],
        offset: usize,
        byte_count: usize,
    ) -> Result<()> {
        let lengths: Vec<usize> = shards.iter().map(|s| s.len()).collect();
        validate_window(&lengths, self.total, offset, byte_count)?;
        if byte_count == 0 {
            return Ok(());
        }

        let (data, parity) = shards.split_at_mut(self.k);
        let inputs: Vec<&[u8]> = data.iter().map(|s| &**s).collect();
        let mut outputs: Vec<&mut [u8]> = parity.iter_mut().map(|s| &mut **s).collect();
        let rows: Vec<&[u8]> = self.parity_rows.iter().map(|r| r.as_slice()).collect();

        self.kernel
            .code_some_shards(&rows, &inputs, &mut outputs, offset, byte_count)
    }

    /// Checks that parity shards `k..k+m` are consistent with data shards
    /// `0..k` over `[offset, offset + byte_count)`, without modifying
    /// anything. Passing a `temp_buffer` of at least `offset + byte_count`
    /// bytes takes the faster scratch-backed verification path.
    pub fn is_parity_correct(
        &self,
        shards: &[&[u8]],
        offset: usize,
        byte_count: usize,
        temp_buffer: Option<&mut [u8]>,
    ) -> Result<bool> {
        let lengths: Vec<usize> = shards.iter().map(|s| s.len()).collect();
        validate_window(&lengths, self.total, offset, byte_count)?;
        if byte_count == 0 {
            return Ok(true);
        }

        let (data, parity) = shards.split_at(self.k);
        let rows: Vec<&[u8]> = self.parity_rows.iter().map(|r| r.as_slice()).collect();

        match temp_buffer {
            Some(scratch) => {
                self.kernel
                    .check_some_shards_with_scratch(&rows, data, parity, offset, byte_count, scratch)
            }
            None => self.kernel.check_some_shards(&rows, data, parity, offset, byte_count),
        }
    }

    /// Reconstructs every missing shard over `[offset, offset + byte_count)`
    /// from whichever `k` or more shards are marked present in `present`.
    ///
    /// `present[i]` must be `true` iff shard `i` holds valid data in that
    /// window. Data shards are recovered first by inverting the submatrix
    /// of the generator selected by the first `k` present indices; any
    /// missing parity shards are then regenerated from the now-complete
    /// data. A no-op if every shard is already present.
    pub fn decode_missing(
        &self,
        shards: &mut [&mut [u8]],
        present: &[bool],
        offset: usize,
        byte_count: usize,
    ) -> Result<()> {
        let lengths: Vec<usize> = shards.iter().map(|s| s.len()).collect();
        validate_window(&lengths, self.total, offset, byte_count)?;
        if present.len() != self.total {
            return Err(Error::ArgumentInvalid {
                reason: format!(
                    "expected {} presence flags, got {}",
                    self.total,
                    present.len()
                ),
            });
        }

        let present_count = present.iter().filter(|&&p| p).count();
        if present_count == self.total || byte_count == 0 {
            return Ok(());
        }
        if present_count < self.k {
            return Err(Error::InsufficientShards {
                needed: self.k,
                present: present_count,
            });
        }

        let present_indices: SmallVec<[usize; 8]> = present
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| p.then_some(i))
            .take(self.k)
            .collect();
        let missing_data: SmallVec<[usize; 8]> =
            (0..self.k).filter(|&i| !present[i]).collect();
        let missing_parity: SmallVec<[usize; 8]> =
            (self.k..self.total).filter(|&i| !present[i]).collect();

        if !missing_data.is_empty() {
            let mut sub_rows = Vec::with_capacity(self.k);
            for &idx in &present_indices {
                sub_rows.push(self.generator.row_copy(idx)?);
            }
            let submatrix = Matrix::from_rows(&sub_rows)?;
            let inverse = submatrix.invert()?;

            let mut recovery_rows = Vec::with_capacity(missing_data.len());
            for &d in &missing_data {
                recovery_rows.push(inverse.row_copy(d)?);
            }
            let recovery_rows: Vec<&[u8]> = recovery_rows.iter().map(|r| r.as_slice()).collect();

            let (inputs, mut outputs) =
                gather_disjoint(shards, &present_indices, &missing_data);
            self.kernel
                .code_some_shards(&recovery_rows, &inputs, &mut outputs, offset, byte_count)?;
        }

        if !missing_parity.is_empty() {
            let all_data: SmallVec<[usize; 8]> = (0..self.k).collect();
            let parity_rows: Vec<&[u8]> = missing_parity
                .iter()
                .map(|&idx| self.parity_rows[idx - self.k].as_slice())
                .collect();

            let (inputs, mut outputs) = gather_disjoint(shards, &all_data, &missing_parity);
            self.kernel
                .code_some_shards(&parity_rows, &inputs, &mut outputs, offset, byte_count)?;
        }

        Ok(())
    }
}

/// Splits `shards` into immutable borrows at `read_indices` and mutable
/// borrows at `write_indices`, which must be disjoint. Used by
/// [`ReedSolomon::decode_missing`], where the present and missing shard
/// indices are scattered rather than a contiguous split.
///
/// Safe slice indexing can't express this: borrowing `shards[i]`
/// immutably locks the whole outer slice against any other element's
/// mutable borrow, even though the elements themselves don't alias. We
/// take each element's raw pointer and length first, which doesn't hold
/// a borrow past the statement, then rebuild slices from those pointers.
/// Soundness relies on `read_indices` and `write_indices` never sharing
/// an index, which callers in this module guarantee by construction
/// (present vs. missing shard partitions).
fn gather_disjoint<'a>(
    shards: &'a mut [&mut [u8]],
    read_indices: &[usize],
    write_indices: &[usize],
) -> (Vec<&'a [u8]>, Vec<&'a mut [u8]>) {
    let ptrs: Vec<(*mut u8, usize)> = shards
        .iter_mut()
        .map(|s| (s.as_mut_ptr(), s.len()))
        .collect();

    let reads = read_indices
        .iter()
        .map(|&i| {
            let (ptr, len) = ptrs[i];
            // SAFETY: `ptr` comes from a live element of `shards`, which
            // outlives 'a; `read_indices` and `write_indices` are disjoint.
            unsafe { std::slice::from_raw_parts(ptr, len) }
        })
        .collect();

    let writes = write_indices
        .iter()
        .map(|&i| {
            let (ptr, len) = ptrs[i];
            // SAFETY: see above; `write_indices` entries are pairwise
            // distinct, so no two returned mutable slices alias.
            unsafe { std::slice::from_raw_parts_mut(ptr, len) }
        })
        .collect();

    (reads, writes)
}
