//! End-to-end tests for the systematic Reed-Solomon codec.

use reed_solomon_gf8::{Error, ReedSolomon};

fn as_mut_refs(shards: &mut [Vec<u8>]) -> Vec<&mut [u8]> {
    shards.iter_mut().map(|s| s.as_mut_slice()).collect()
}

fn as_refs(shards: &[Vec<u8>]) -> Vec<&[u8]> {
    shards.iter().map(|s| s.as_slice()).collect()
}

#[test]
fn tiny_k2_m2_round_trips_through_loss_of_any_two_shards() {
    let rs = ReedSolomon::with_default_kernel(2, 2).unwrap();
    let mut shards = vec![vec![10u8, 20], vec![30, 40], vec![0u8; 2], vec![0u8; 2]];
    {
        let mut refs = as_mut_refs(&mut shards);
        rs.encode_parity(&mut refs, 0, 2).unwrap();
    }
    let original = shards.clone();

    // Every 2-of-4 loss pattern should still recover the original data.
    for lost in [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]] {
        let mut trial = shards.clone();
        let mut present = vec![true; 4];
        for &l in &lost {
            trial[l].iter_mut().for_each(|b| *b = 0);
            present[l] = false;
        }
        let mut refs = as_mut_refs(&mut trial);
        rs.decode_missing(&mut refs, &present, 0, 2).unwrap();
        assert_eq!(trial, original, "failed recovering from loss of {lost:?}");
    }
}

#[test]
fn backblaze_canonical_vector_k4_m2() {
    let rs = ReedSolomon::with_default_kernel(4, 2).unwrap();
    let mut shards: Vec<Vec<u8>> = vec![
        vec![0, 1],
        vec![4, 5],
        vec![2, 3],
        vec![6, 7],
        vec![0, 0],
        vec![0, 0],
    ];
    {
        let mut refs = as_mut_refs(&mut shards);
        rs.encode_parity(&mut refs, 0, 2).unwrap();
    }
    assert_eq!(shards[4], vec![12, 13]);
    assert_eq!(shards[5], vec![10, 11]);
}

#[test]
fn recovers_from_two_data_shards_lost_at_once() {
    let rs = ReedSolomon::with_default_kernel(4, 2).unwrap();
    let mut shards: Vec<Vec<u8>> = vec![
        vec![0, 1],
        vec![4, 5],
        vec![2, 3],
        vec![6, 7],
        vec![0, 0],
        vec![0, 0],
    ];
    {
        let mut refs = as_mut_refs(&mut shards);
        rs.encode_parity(&mut refs, 0, 2).unwrap();
    }
    let original = shards.clone();

    shards[1] = vec![0, 0];
    shards[3] = vec![0, 0];
    let present = vec![true, false, true, false, true, true];
    {
        let mut refs = as_mut_refs(&mut shards);
        rs.decode_missing(&mut refs, &present, 0, 2).unwrap();
    }
    assert_eq!(shards, original);
}

#[test]
fn recovers_across_mixed_data_and_parity_loss() {
    let rs = ReedSolomon::with_default_kernel(4, 2).unwrap();
    let mut shards: Vec<Vec<u8>> = vec![
        vec![0, 1],
        vec![4, 5],
        vec![2, 3],
        vec![6, 7],
        vec![0, 0],
        vec![0, 0],
    ];
    {
        let mut refs = as_mut_refs(&mut shards);
        rs.encode_parity(&mut refs, 0, 2).unwrap();
    }
    let original = shards.clone();

    shards[0] = vec![0, 0];
    shards[4] = vec![0, 0];
    let present = vec![false, true, true, true, false, true];
    {
        let mut refs = as_mut_refs(&mut shards);
        rs.decode_missing(&mut refs, &present, 0, 2).unwrap();
    }
    assert_eq!(shards, original);
}

#[test]
fn fewer_than_k_present_shards_is_rejected() {
    let rs = ReedSolomon::with_default_kernel(4, 2).unwrap();
    let mut shards = vec![vec![0u8; 4]; 6];
    let present = vec![true, true, true, false, false, false];
    let mut refs = as_mut_refs(&mut shards);
    assert!(matches!(
        rs.decode_missing(&mut refs, &present, 0, 4),
        Err(Error::InsufficientShards { .. })
    ));
}

#[test]
fn window_isolation_k3_m2_length16() {
    let rs = ReedSolomon::with_default_kernel(3, 2).unwrap();
    let mut shards = vec![vec![0u8; 16]; 5];
    for (i, shard) in shards.iter_mut().take(3).enumerate() {
        for (y, b) in shard.iter_mut().enumerate() {
            *b = (i as u8 + 1).wrapping_mul(13).wrapping_add(y as u8);
        }
    }
    {
        let mut refs = as_mut_refs(&mut shards);
        rs.encode_parity(&mut refs, 0, 8).unwrap();
        rs.encode_parity(&mut refs, 8, 8).unwrap();
    }

    // Encoding in two separate 8-byte windows must match encoding the
    // whole 16-byte shard at once.
    let mut whole = shards.clone();
    for shard in whole.iter_mut().skip(3) {
        shard.iter_mut().for_each(|b| *b = 0);
    }
    {
        let mut refs = as_mut_refs(&mut whole);
        rs.encode_parity(&mut refs, 0, 16).unwrap();
    }
    assert_eq!(shards, whole);

    let refs = as_refs(&shards);
    assert!(rs.is_parity_correct(&refs, 0, 16, None).unwrap());
}

#[test]
fn invalid_shapes_are_rejected_before_any_coding_work() {
    assert!(matches!(
        ReedSolomon::with_default_kernel(0, 3),
        Err(Error::InvalidShape { .. })
    ));
    assert!(matches!(
        ReedSolomon::with_default_kernel(200, 57),
        Err(Error::TooManyShards { .. })
    ));
}
