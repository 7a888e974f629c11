//! Shard-set and window validation shared by every codec entry point.

use crate::error::{Error, Result};

/// Validates that `lengths` (one length per shard) are all equal, that
/// there are exactly `expected_count` of them, and that `[offset,
/// offset + byte_count)` fits inside that common length.
///
/// This is the single gate every [`crate::codec::ReedSolomon`] method runs
/// before touching any buffer, so that argument errors are always raised
/// before any coding work begins.
pub(crate) fn validate_window(
    lengths: &[usize],
    expected_count: usize,
    offset: usize,
    byte_count: usize,
) -> Result<()> {
    if lengths.len() != expected_count {
        return Err(Error::ArgumentInvalid {
            reason: format!(
                "expected {expected_count} shards, got {}",
                lengths.len()
            ),
        });
    }
    let shard_len = match lengths.first() {
        Some(&len) => len,
        None => return Ok(()),
    };
    if lengths.iter().any(|&len| len != shard_len) {
        return Err(Error::ArgumentInvalid {
            reason: "all shards must have identical length".to_string(),
        });
    }
    if offset + byte_count > shard_len {
        return Err(Error::ArgumentInvalid {
            reason: format!(
                "window [{offset}, {}) exceeds shard length {shard_len}",
                offset + byte_count
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_fitting_window() {
        assert!(validate_window(&[4, 4, 4], 3, 0, 4).is_ok());
        assert!(validate_window(&[16, 16], 2, 4, 8).is_ok());
    }

    #[test]
    fn rejects_wrong_shard_count() {
        assert!(validate_window(&[4, 4], 3, 0, 4).is_err());
    }

    #[test]
    fn rejects_mismatched_lengths() {
        assert!(validate_window(&[4, 5], 2, 0, 4).is_err());
    }

    #[test]
    fn rejects_window_past_the_end() {
        assert!(validate_window(&[4, 4], 2, 2, 4).is_err());
    }

    #[test]
    fn zero_byte_count_at_the_end_is_fine() {
        assert!(validate_window(&[4, 4], 2, 4, 0).is_ok());
    }
}
