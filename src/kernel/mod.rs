//! Coding-loop kernels: the matrix-times-shards primitive
//!
//! Every kernel computes, for output index `o` and byte index `y`:
//!
//! ```text
//! out[o][y] = XOR over i in [0, k) of multiply(matrix_rows[o][i], in[i][y])
//! ```
//!
//! The three loops (byte `y`, input `i`, output `o`) can be nested in six
//! orders, and each ordering can use either of two multiplication
//! back-ends (the `mul` table, or the log/exp formula). That gives twelve
//! observationally-equivalent kernels. They are kept as a closed, plain
//! enum rather than a `dyn Trait` so dispatch happens once per call instead
//! of once per byte.

mod loops;

use crate::error::{Error, Result};
use crate::galois;

/// One of the twelve coding-loop strategies: a loop-nest order crossed with
/// a multiplication back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    ByteInputOutputTable,
    ByteInputOutputLogExp,
    ByteOutputInputTable,
    ByteOutputInputLogExp,
    InputByteOutputTable,
    InputByteOutputLogExp,
    InputOutputByteTable,
    InputOutputByteLogExp,
    OutputByteInputTable,
    OutputByteInputLogExp,
    OutputInputByteTable,
    OutputInputByteLogExp,
}

impl KernelKind {
    /// All twelve kernel variants, in a stable order. Useful for
    /// benchmarking and for the kernel-equivalence test.
    pub const ALL: [KernelKind; 12] = [
        KernelKind::ByteInputOutputTable,
        KernelKind::ByteInputOutputLogExp,
        KernelKind::ByteOutputInputTable,
        KernelKind::ByteOutputInputLogExp,
        KernelKind::InputByteOutputTable,
        KernelKind::InputByteOutputLogExp,
        KernelKind::InputOutputByteTable,
        KernelKind::InputOutputByteLogExp,
        KernelKind::OutputByteInputTable,
        KernelKind::OutputByteInputLogExp,
        KernelKind::OutputInputByteTable,
        KernelKind::OutputInputByteLogExp,
    ];

    /// The recommended default: input-outermost, output-middle,
    /// byte-innermost, table-backed.
    pub const DEFAULT: KernelKind = KernelKind::InputOutputByteTable;

    /// Computes `out[o][y] = XOR_i multiply(matrix_rows[o][i], in[i][y])`
    /// for `y` in `[offset, offset + byte_count)`, overwriting `outputs`.
    ///
    /// Each variant calls its loop nest with a concrete multiplication
    /// function item (`galois::multiply` or `galois::multiply_log_exp`)
    /// rather than a `fn` pointer resolved once up front, so every one of
    /// the twelve combinations monomorphizes and inlines its own copy of
    /// the nest instead of paying for an indirect call per byte.
    pub fn code_some_shards(
        self,
        matrix_rows: &[&[u8]],
        inputs: &[&[u8]],
        outputs: &mut [&mut [u8]],
        offset: usize,
        byte_count: usize,
    ) -> Result<()> {
        validate_shapes(matrix_rows, inputs, outputs.len(), offset, byte_count, inputs.len())?;
        let k = inputs.len();
        match self {
            KernelKind::ByteInputOutputTable => {
                loops::byte_input_output(galois::multiply, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::ByteInputOutputLogExp => {
                loops::byte_input_output(galois::multiply_log_exp, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::ByteOutputInputTable => {
                loops::byte_output_input(galois::multiply, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::ByteOutputInputLogExp => {
                loops::byte_output_input(galois::multiply_log_exp, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::InputByteOutputTable => {
                loops::input_byte_output(galois::multiply, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::InputByteOutputLogExp => {
                loops::input_byte_output(galois::multiply_log_exp, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::InputOutputByteTable => {
                loops::input_output_byte(galois::multiply, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::InputOutputByteLogExp => {
                loops::input_output_byte(galois::multiply_log_exp, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::OutputByteInputTable => {
                loops::output_byte_input(galois::multiply, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::OutputByteInputLogExp => {
                loops::output_byte_input(galois::multiply_log_exp, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::OutputInputByteTable => {
                loops::output_input_byte(galois::multiply, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
            KernelKind::OutputInputByteLogExp => {
                loops::output_input_byte(galois::multiply_log_exp, matrix_rows, inputs, outputs, offset, byte_count, k)
            }
        }
        Ok(())
    }

    /// Recomputes the expected value at every byte position and compares it
    /// against `to_check`, short-circuiting on the first mismatch. Every
    /// kernel variant supports this generic fallback.
    pub fn check_some_shards(
        self,
        matrix_rows: &[&[u8]],
        inputs: &[&[u8]],
        to_check: &[&[u8]],
        offset: usize,
        byte_count: usize,
    ) -> Result<bool> {
        validate_shapes(matrix_rows, inputs, to_check.len(), offset, byte_count, inputs.len())?;
        if self.uses_table() {
            Ok(check_with(galois::multiply, matrix_rows, inputs, to_check, offset, byte_count))
        } else {
            Ok(check_with(galois::multiply_log_exp, matrix_rows, inputs, to_check, offset, byte_count))
        }
    }

    #[inline]
    fn uses_table(self) -> bool {
        matches!(
            self,
            KernelKind::ByteInputOutputTable
                | KernelKind::ByteOutputInputTable
                | KernelKind::InputByteOutputTable
                | KernelKind::InputOutputByteTable
                | KernelKind::OutputByteInputTable
                | KernelKind::OutputInputByteTable
        )
    }

    /// Faster verification path available on [`KernelKind::InputOutputByteTable`]:
    /// writes the expected values into `scratch` and then compares the full
    /// range at once, rather than comparing byte-by-byte inline.
    ///
    /// `scratch` must be at least `offset + byte_count` bytes long.
    pub fn check_some_shards_with_scratch(
        self,
        matrix_rows: &[&[u8]],
        inputs: &[&[u8]],
        to_check: &[&[u8]],
        offset: usize,
        byte_count: usize,
        scratch: &mut [u8],
    ) -> Result<bool> {
        if scratch.len() < offset + byte_count {
            return Err(Error::BufferTooSmall {
                required: offset + byte_count,
                actual: scratch.len(),
            });
        }
        if !matches!(self, KernelKind::InputOutputByteTable) {
            return self.check_some_shards(matrix_rows, inputs, to_check, offset, byte_count);
        }
        validate_shapes(matrix_rows, inputs, to_check.len(), offset, byte_count, inputs.len())?;
        let k = inputs.len();
        for (o, row) in matrix_rows.iter().enumerate() {
            for i in 0..k {
                let coeff = row[i];
                if i == 0 {
                    for y in offset..offset + byte_count {
                        scratch[y] = galois::multiply(coeff, inputs[i][y]);
                    }
                } else {
                    for y in offset..offset + byte_count {
                        scratch[y] ^= galois::multiply(coeff, inputs[i][y]);
                    }
                }
            }
            if scratch[offset..offset + byte_count] != to_check[o][offset..offset + byte_count] {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

#[allow(clippy::too_many_arguments)]
fn check_with<M: Fn(u8, u8) -> u8>(
    mul: M,
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    to_check: &[&[u8]],
    offset: usize,
    byte_count: usize,
) -> bool {
    let k = inputs.len();
    for (o, row) in matrix_rows.iter().enumerate() {
        for y in offset..offset + byte_count {
            let mut acc = 0u8;
            for i in 0..k {
                acc ^= mul(row[i], inputs[i][y]);
            }
            if acc != to_check[o][y] {
                return false;
            }
        }
    }
    true
}

fn validate_shapes(
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    output_count: usize,
    offset: usize,
    byte_count: usize,
    expected_cols: usize,
) -> Result<()> {
    if matrix_rows.len() != output_count {
        return Err(Error::ShapeMismatch {
            reason: format!(
                "{} matrix rows but {} outputs",
                matrix_rows.len(),
                output_count
            ),
        });
    }
    if matrix_rows.iter().any(|r| r.len() != expected_cols) {
        return Err(Error::ShapeMismatch {
            reason: format!("matrix rows must have {expected_cols} columns"),
        });
    }
    for buf in inputs.iter() {
        if buf.len() < offset + byte_count {
            return Err(Error::ArgumentInvalid {
                reason: format!(
                    "input shard shorter than offset+byte_count ({})",
                    offset + byte_count
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<Vec<u8>>, Vec<Vec<u8>>) {
        // 2x3 matrix, 3 input shards of length 4.
        let matrix_rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let inputs = vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9, 10, 11, 12]];
        (matrix_rows, inputs)
    }

    #[test]
    fn all_twelve_variants_agree() {
        let (matrix_rows, inputs) = sample();
        let row_refs: Vec<&[u8]> = matrix_rows.iter().map(|r| r.as_slice()).collect();
        let input_refs: Vec<&[u8]> = inputs.iter().map(|r| r.as_slice()).collect();

        let mut reference = vec![vec![0u8; 4]; 2];
        {
            let mut out_refs: Vec<&mut [u8]> = reference.iter_mut().map(|r| r.as_mut_slice()).collect();
            KernelKind::DEFAULT
                .code_some_shards(&row_refs, &input_refs, &mut out_refs, 0, 4)
                .unwrap();
        }

        for kind in KernelKind::ALL {
            let mut out = vec![vec![0u8; 4]; 2];
            {
                let mut out_refs: Vec<&mut [u8]> = out.iter_mut().map(|r| r.as_mut_slice()).collect();
                kind.code_some_shards(&row_refs, &input_refs, &mut out_refs, 0, 4).unwrap();
            }
            assert_eq!(out, reference, "kernel {kind:?} disagreed with default");
        }
    }

    #[test]
    fn check_some_shards_detects_flipped_byte() {
        let (matrix_rows, inputs) = sample();
        let row_refs: Vec<&[u8]> = matrix_rows.iter().map(|r| r.as_slice()).collect();
        let input_refs: Vec<&[u8]> = inputs.iter().map(|r| r.as_slice()).collect();

        let mut out = vec![vec![0u8; 4]; 2];
        {
            let mut out_refs: Vec<&mut [u8]> = out.iter_mut().map(|r| r.as_mut_slice()).collect();
            KernelKind::DEFAULT
                .code_some_shards(&row_refs, &input_refs, &mut out_refs, 0, 4)
                .unwrap();
        }
        let check_refs: Vec<&[u8]> = out.iter().map(|r| r.as_slice()).collect();
        assert!(KernelKind::DEFAULT
            .check_some_shards(&row_refs, &input_refs, &check_refs, 0, 4)
            .unwrap());

        out[0][0] ^= 1;
        let check_refs: Vec<&[u8]> = out.iter().map(|r| r.as_slice()).collect();
        assert!(!KernelKind::DEFAULT
            .check_some_shards(&row_refs, &input_refs, &check_refs, 0, 4)
            .unwrap());
    }

    #[test]
    fn scratch_backed_check_matches_generic_check() {
        let (matrix_rows, inputs) = sample();
        let row_refs: Vec<&[u8]> = matrix_rows.iter().map(|r| r.as_slice()).collect();
        let input_refs: Vec<&[u8]> = inputs.iter().map(|r| r.as_slice()).collect();

        let mut out = vec![vec![0u8; 4]; 2];
        {
            let mut out_refs: Vec<&mut [u8]> = out.iter_mut().map(|r| r.as_mut_slice()).collect();
            KernelKind::DEFAULT
                .code_some_shards(&row_refs, &input_refs, &mut out_refs, 0, 4)
                .unwrap();
        }
        let check_refs: Vec<&[u8]> = out.iter().map(|r| r.as_slice()).collect();
        let mut scratch = vec![0u8; 4];
        assert!(KernelKind::DEFAULT
            .check_some_shards_with_scratch(&row_refs, &input_refs, &check_refs, 0, 4, &mut scratch)
            .unwrap());

        let mut too_small = vec![0u8; 2];
        assert!(matches!(
            KernelKind::DEFAULT.check_some_shards_with_scratch(
                &row_refs,
                &input_refs,
                &check_refs,
                0,
                4,
                &mut too_small
            ),
            Err(Error::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn zero_byte_count_writes_nothing() {
        let (matrix_rows, inputs) = sample();
        let row_refs: Vec<&[u8]> = matrix_rows.iter().map(|r| r.as_slice()).collect();
        let input_refs: Vec<&[u8]> = inputs.iter().map(|r| r.as_slice()).collect();

        let mut out = vec![vec![9u8; 4]; 2];
        {
            let mut out_refs: Vec<&mut [u8]> = out.iter_mut().map(|r| r.as_mut_slice()).collect();
            KernelKind::DEFAULT
                .code_some_shards(&row_refs, &input_refs, &mut out_refs, 1, 0)
                .unwrap();
        }
        assert_eq!(out, vec![vec![9u8; 4]; 2]);
    }
}
