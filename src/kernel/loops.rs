//! The six loop-nest orderings shared by both multiplication back-ends.
//!
//! Each function is generic over the multiplication implementation `M`
//! rather than taking a `fn(u8, u8) -> u8` pointer, so the table-backed and
//! log/exp-backed kernel variants each monomorphize and inline their own
//! copy of every loop nest instead of paying for an indirect call on every
//! byte.

#[allow(clippy::too_many_arguments)]
pub(super) fn byte_input_output<M: Fn(u8, u8) -> u8>(
    mul: M,
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
    k: usize,
) {
    for y in offset..offset + byte_count {
        for i in 0..k {
            for (o, row) in matrix_rows.iter().enumerate() {
                let contribution = mul(row[i], inputs[i][y]);
                if i == 0 {
                    outputs[o][y] = contribution;
                } else {
                    outputs[o][y] ^= contribution;
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn byte_output_input<M: Fn(u8, u8) -> u8>(
    mul: M,
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
    k: usize,
) {
    for y in offset..offset + byte_count {
        for (o, row) in matrix_rows.iter().enumerate() {
            let mut acc = 0u8;
            for i in 0..k {
                acc ^= mul(row[i], inputs[i][y]);
            }
            outputs[o][y] = acc;
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn input_byte_output<M: Fn(u8, u8) -> u8>(
    mul: M,
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
    k: usize,
) {
    for i in 0..k {
        for y in offset..offset + byte_count {
            for (o, row) in matrix_rows.iter().enumerate() {
                let contribution = mul(row[i], inputs[i][y]);
                if i == 0 {
                    outputs[o][y] = contribution;
                } else {
                    outputs[o][y] ^= contribution;
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn input_output_byte<M: Fn(u8, u8) -> u8>(
    mul: M,
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
    k: usize,
) {
    for i in 0..k {
        for (o, row) in matrix_rows.iter().enumerate() {
            let coeff = row[i];
            if i == 0 {
                for y in offset..offset + byte_count {
                    outputs[o][y] = mul(coeff, inputs[i][y]);
                }
            } else {
                for y in offset..offset + byte_count {
                    outputs[o][y] ^= mul(coeff, inputs[i][y]);
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn output_byte_input<M: Fn(u8, u8) -> u8>(
    mul: M,
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
    k: usize,
) {
    for (o, row) in matrix_rows.iter().enumerate() {
        for y in offset..offset + byte_count {
            let mut acc = 0u8;
            for i in 0..k {
                acc ^= mul(row[i], inputs[i][y]);
            }
            outputs[o][y] = acc;
        }
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn output_input_byte<M: Fn(u8, u8) -> u8>(
    mul: M,
    matrix_rows: &[&[u8]],
    inputs: &[&[u8]],
    outputs: &mut [&mut [u8]],
    offset: usize,
    byte_count: usize,
    k: usize,
) {
    for (o, row) in matrix_rows.iter().enumerate() {
        for i in 0..k {
            let coeff = row[i];
            if i == 0 {
                for y in offset..offset + byte_count {
                    outputs[o][y] = mul(coeff, inputs[i][y]);
                }
            } else {
                for y in offset..offset + byte_count {
                    outputs[o][y] ^= mul(coeff, inputs[i][y]);
                }
            }
        }
    }
}
