//! Matrix algebra tests, exercised through the public API.

use reed_solomon_gf8::Matrix;

#[test]
fn vandermonde_top_block_inverts_for_every_k_up_to_field_size() {
    for k in [1usize, 2, 4, 8, 16, 32, 64, 128] {
        let v = Matrix::vandermonde(k + 2, k);
        let top = v.submatrix(0, 0, k, k).unwrap();
        let inv = top.invert().unwrap();
        assert_eq!(top.multiply(&inv).unwrap(), Matrix::identity(k));
    }
}

#[test]
fn identical_rows_are_not_invertible() {
    let m = Matrix::from_rows(&[vec![3, 5], vec![3, 5]]).unwrap();
    assert!(m.invert().is_err());
}

#[test]
fn augment_and_submatrix_round_trip_arbitrary_widths() {
    let a = Matrix::from_rows(&[vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
    let b = Matrix::from_rows(&[vec![7, 8], vec![9, 10]]).unwrap();
    let joined = a.augment(&b).unwrap();
    assert_eq!(joined.submatrix(0, 0, 2, 3).unwrap(), a);
    assert_eq!(joined.submatrix(0, 3, 2, 5).unwrap(), b);
}
