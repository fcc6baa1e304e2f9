//! LU decomposition regression test
//!
//! Test structure:
//!   1. Solve residuals for systems of order 1..=8 that need row swaps
//!   2. Singular systems are reported with the failing column
//!   3. inverse() agrees with the identity and with direct solves
//!   4. Determinants of matrices with known values

use quadwarp_core::{Error, Matrix, decompose, solve};
use quadwarp_test::RegParams;

/// Nonsingular test matrix with small leading entries so pivoting is
/// exercised on every column.
fn swap_heavy(n: usize) -> Matrix {
    let mut m = Matrix::new(n, n).unwrap();
    for i in 0..n {
        for j in 0..n {
            let base = ((i * 7 + j * 3) % 11) as f64 - 5.0;
            m[(i, j)] = if j == (i + 1) % n { base + 4.0 * n as f64 } else { base * 0.25 };
        }
    }
    m
}

#[test]
fn lu_reg_solve_residuals() {
    let mut rp = RegParams::new("lu_solve");

    for n in 1..=8 {
        let a = swap_heavy(n);
        let b: Vec<f64> = (0..n).map(|i| i as f64 * 3.0 - 2.0).collect();

        let x = solve(&a, &b).expect("solve");
        let ax = a.mul_vec(&x).expect("mul_vec");
        for (got, want) in ax.iter().zip(&b) {
            rp.compare_values(*want, *got, 1e-9);
        }

        // Reconstruct P*A from the factors
        let lu = decompose(&a).expect("decompose");
        let prod = lu.lower().mul(&lu.upper()).expect("mul");
        for (i, &src) in lu.permutation().iter().enumerate() {
            for j in 0..n {
                rp.compare_values(a[(src, j)], prod[(i, j)], 1e-9);
            }
        }
    }

    assert!(rp.cleanup(), "lu_solve regression test failed");
}

#[test]
fn lu_reg_singular() {
    let mut rp = RegParams::new("lu_singular");

    // Row 5 duplicates row 2
    let mut a = swap_heavy(8);
    let row2 = a.row(2).to_vec();
    a.row_mut(5).copy_from_slice(&row2);
    rp.check(
        matches!(decompose(&a), Err(Error::SingularMatrix { .. })),
        "duplicated row is singular",
    );

    // Column 3 is zero
    let mut a = swap_heavy(8);
    for i in 0..8 {
        a[(i, 3)] = 0.0;
    }
    rp.check(
        matches!(decompose(&a), Err(Error::SingularMatrix { column: 3 })),
        "zero column reported at its index",
    );

    let b = [1.0; 8];
    rp.check(
        matches!(solve(&a, &b), Err(Error::SingularMatrix { .. })),
        "solve surfaces singularity",
    );

    assert!(rp.cleanup(), "lu_singular regression test failed");
}

#[test]
fn lu_reg_inverse() {
    let mut rp = RegParams::new("lu_inverse");

    for n in [2, 3, 5, 8] {
        let a = swap_heavy(n);
        let lu = decompose(&a).expect("decompose");
        let inv = lu.inverse().expect("inverse");
        let id = a.mul(&inv).expect("mul");
        for i in 0..n {
            for j in 0..n {
                let want = if i == j { 1.0 } else { 0.0 };
                rp.compare_values(want, id[(i, j)], 1e-9);
            }
        }

        let b: Vec<f64> = (0..n).map(|i| 1.0 + i as f64).collect();
        let direct = lu.solve(&b).expect("solve");
        let via_inverse = inv.mul_vec(&b).expect("mul_vec");
        for (d, v) in direct.iter().zip(&via_inverse) {
            rp.compare_values(*d, *v, 1e-9);
        }
    }

    assert!(rp.cleanup(), "lu_inverse regression test failed");
}

#[test]
fn lu_reg_determinant() {
    let mut rp = RegParams::new("lu_determinant");

    let diag = Matrix::from_rows(&[[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]]).unwrap();
    rp.compare_values(24.0, decompose(&diag).expect("diag").determinant(), 1e-12);

    // One row exchange flips the sign
    let swapped = Matrix::from_rows(&[[0.0, 3.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 4.0]]).unwrap();
    rp.compare_values(-24.0, decompose(&swapped).expect("swapped").determinant(), 1e-12);

    let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    rp.compare_values(-2.0, decompose(&a).expect("2x2").determinant(), 1e-12);

    assert!(rp.cleanup(), "lu_determinant regression test failed");
}
