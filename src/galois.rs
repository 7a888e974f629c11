//! Galois Field GF(2^8) arithmetic for Reed-Solomon erasure coding
//!
//! This module implements 8-bit Galois Field arithmetic using the primitive
//! polynomial 0x11D (x^8 + x^4 + x^3 + x^2 + 1) with generator 2, the
//! standard field used by systematic Reed-Solomon erasure codes (Backblaze,
//! klauspost/reedsolomon, and similar implementations all agree on this
//! field so that generator matrices are portable across them).
//!
//! ## Tables
//!
//! - `log[1..256]` maps a nonzero field element to its discrete logarithm.
//! - `exp[0..510]` maps a logarithm back to a field element; it is twice the
//!   natural length so that `multiply`/`divide` can add or subtract two log
//!   values without a modulo.
//! - `mul[256][256]` is the full multiplication table, materialized once
//!   because the coding-loop kernels dereference it directly on the hot path.
//!
//! Tables are built once behind a [`OnceLock`] and shared read-only across
//! the process; they are safe to use from any number of threads without
//! synchronization.

use std::sync::OnceLock;

const FIELD_SIZE: usize = 256;
const GENERATOR_POLYNOMIAL: u32 = 0x11D;

/// Precomputed log/exp/multiplication tables for GF(2^8).
pub struct GaloisTables {
    log: [u8; FIELD_SIZE],
    exp: [u8; 2 * FIELD_SIZE - 2],
    mul: Box<[[u8; FIELD_SIZE]; FIELD_SIZE]>,
}

impl GaloisTables {
    fn build() -> Self {
        let mut log = [0u8; FIELD_SIZE];
        let mut exp = [0u8; 2 * FIELD_SIZE - 2];

        let mut b: u32 = 1;
        for power in 0..FIELD_SIZE - 1 {
            exp[power] = b as u8;
            log[b as usize] = power as u8;

            b <<= 1;
            if b & FIELD_SIZE as u32 != 0 {
                b ^= GENERATOR_POLYNOMIAL;
            }
        }
        // Duplicate the period so `exp[log(a) + log(b)]` never needs `% 255`.
        for power in FIELD_SIZE - 1..exp.len() {
            exp[power] = exp[power - (FIELD_SIZE - 1)];
        }

        let mut mul = Box::new([[0u8; FIELD_SIZE]; FIELD_SIZE]);
        for a in 1..FIELD_SIZE {
            for b in 1..FIELD_SIZE {
                let sum = log[a] as usize + log[b] as usize;
                mul[a][b] = exp[sum];
            }
        }

        Self { log, exp, mul }
    }
}

static TABLES: OnceLock<GaloisTables> = OnceLock::new();

/// Returns the process-wide, lazily-initialized GF(2^8) tables.
pub fn tables() -> &'static GaloisTables {
    TABLES.get_or_init(GaloisTables::build)
}

/// Addition in GF(2^8): bytewise XOR.
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Subtraction in GF(2^8): identical to addition.
#[inline]
pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiplication in GF(2^8) via the precomputed table.
#[inline]
pub fn multiply(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    tables().mul[a as usize][b as usize]
}

/// Multiplication in GF(2^8) via the log/exp tables, bypassing the 64 KiB
/// `mul` table. Used by the log/exp-backed kernel variants.
#[inline]
pub fn multiply_log_exp(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let t = tables();
    let sum = t.log[a as usize] as usize + t.log[b as usize] as usize;
    t.exp[sum]
}

/// Division in GF(2^8). Fails if `b == 0`.
#[inline]
pub fn divide(a: u8, b: u8) -> crate::error::Result<u8> {
    if b == 0 {
        return Err(crate::error::Error::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }
    let t = tables();
    let diff = t.log[a as usize] as isize - t.log[b as usize] as isize + (FIELD_SIZE as isize - 1);
    Ok(t.exp[diff as usize])
}

/// Repeated multiplication: `base^power` in GF(2^8).
///
/// `exp(base, 0) == 1` for every base, including zero; `exp(0, power) == 0`
/// for `power > 0`.
#[inline]
pub fn exp(base: u8, power: u32) -> u8 {
    if power == 0 {
        return 1;
    }
    if base == 0 {
        return 0;
    }
    let t = tables();
    let log_base = t.log[base as usize] as u64;
    let log_result = (log_base * power as u64) % (FIELD_SIZE as u64 - 1);
    t.exp[log_result as usize]
}
