//! Galois Field (GF(2^8)) arithmetic tests, exercised through the public API.

use reed_solomon_gf8::galois;

#[test]
fn multiply_by_one_is_identity() {
    for a in 0..=255u8 {
        assert_eq!(galois::multiply(a, 1), a);
    }
}

#[test]
fn multiply_by_zero_is_zero() {
    for a in 0..=255u8 {
        assert_eq!(galois::multiply(a, 0), 0);
        assert_eq!(galois::multiply(0, a), 0);
    }
}

#[test]
fn add_is_its_own_inverse() {
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            assert_eq!(galois::add(galois::add(a, b), b), a);
        }
    }
}

#[test]
fn divide_by_zero_is_an_error() {
    assert!(galois::divide(10, 0).is_err());
}

#[test]
fn table_and_log_exp_backends_agree_exhaustively() {
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            assert_eq!(galois::multiply(a, b), galois::multiply_log_exp(a, b));
        }
    }
}

#[test]
fn exp_cycles_through_the_generator() {
    // 2 is the primitive element for polynomial 0x11D, so exp(2, 255) wraps
    // back to exp(2, 0).
    assert_eq!(galois::exp(2, 0), galois::exp(2, 255));
}
