// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dense linear algebra: Gaussian elimination with partial pivoting and 3x3
// inversion by cofactors. No allocation beyond the caller's system.

use drawerscan_core::Singular;

/// Pivot and determinant magnitudes below this are treated as singular.
pub const SINGULAR_EPSILON: f64 = 1e-12;

/// Row-major 3x3 matrix.
pub type Matrix3 = [f64; 9];

/// Solve an `n x (n+1)` augmented system `[A | b]` for `x` in `A x = b`.
///
/// Each column's pivot is the largest-magnitude entry at or below the
/// diagonal; rows are swapped to bring it up before elimination. A pivot
/// below [`SINGULAR_EPSILON`] (or non-finite) makes the whole solve fail.
pub fn solve(mut system: Vec<Vec<f64>>) -> Result<Vec<f64>, Singular> {
    let n = system.len();
    if system.iter().any(|row| row.len() != n + 1) {
        return Err(Singular { pivot: 0.0 });
    }

    // Forward elimination.
    for col in 0..n {
        let mut pivot_row = col;
        let mut pivot_mag = system[col][col].abs();
        for row in (col + 1)..n {
            let mag = system[row][col].abs();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = row;
            }
        }

        if !pivot_mag.is_finite() || pivot_mag < SINGULAR_EPSILON {
            return Err(Singular { pivot: pivot_mag });
        }
        if pivot_row != col {
            system.swap(col, pivot_row);
        }

        let pivot = system[col][col];
        for row in (col + 1)..n {
            let factor = system[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..=n {
                system[row][j] -= factor * system[col][j];
            }
        }
    }

    // Back substitution.
    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let mut acc = system[row][n];
        for j in (row + 1)..n {
            acc -= system[row][j] * x[j];
        }
        x[row] = acc / system[row][row];
    }

    if x.iter().all(|v| v.is_finite()) {
        Ok(x)
    } else {
        Err(Singular { pivot: f64::NAN })
    }
}

/// Determinant of a row-major 3x3 matrix.
pub fn determinant3x3(m: &Matrix3) -> f64 {
    let [a, b, c, d, e, f, g, h, i] = *m;
    a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
}

/// Invert a 3x3 matrix via its adjugate.
pub fn invert3x3(m: &Matrix3) -> Result<Matrix3, Singular> {
    let [a, b, c, d, e, f, g, h, i] = *m;
    let det = determinant3x3(m);
    if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
        return Err(Singular { pivot: det.abs() });
    }
    let inv_det = 1.0 / det;

    // Transposed cofactor matrix, scaled.
    let inv = [
        (e * i - f * h) * inv_det,
        (c * h - b * i) * inv_det,
        (b * f - c * e) * inv_det,
        (f * g - d * i) * inv_det,
        (a * i - c * g) * inv_det,
        (c * d - a * f) * inv_det,
        (d * h - e * g) * inv_det,
        (b * g - a * h) * inv_det,
        (a * e - b * d) * inv_det,
    ];

    if inv.iter().all(|v| v.is_finite()) {
        Ok(inv)
    } else {
        Err(Singular { pivot: det.abs() })
    }
}

/// Row-major 3x3 product `lhs * rhs`.
pub fn multiply3x3(lhs: &Matrix3, rhs: &Matrix3) -> Matrix3 {
    let mut out = [0.0; 9];
    for row in 0..3 {
        for col in 0..3 {
            out[row * 3 + col] = (0..3).map(|k| lhs[row * 3 + k] * rhs[k * 3 + col]).sum();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY: Matrix3 = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

    fn assert_close(a: f64, b: f64, tol: f64) {
        assert!((a - b).abs() < tol, "expected {b}, got {a}");
    }

    #[test]
    fn solves_small_system() {
        // 2x + y = 5, x - y = 1 → x = 2, y = 1
        let x = solve(vec![vec![2.0, 1.0, 5.0], vec![1.0, -1.0, 1.0]]).unwrap();
        assert_close(x[0], 2.0, 1e-12);
        assert_close(x[1], 1.0, 1e-12);
    }

    #[test]
    fn pivoting_handles_zero_leading_entry() {
        // Without a row swap the first pivot would be 0.
        let x = solve(vec![
            vec![0.0, 1.0, 1.0, 3.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![1.0, 1.0, 0.0, 1.0],
        ])
        .unwrap();
        // x = 0, y = 1, z = 2
        assert_close(x[0], 0.0, 1e-12);
        assert_close(x[1], 1.0, 1e-12);
        assert_close(x[2], 2.0, 1e-12);
    }

    #[test]
    fn singular_system_is_reported() {
        let err = solve(vec![vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]]).unwrap_err();
        assert!(err.pivot < SINGULAR_EPSILON);
    }

    #[test]
    fn malformed_system_is_singular() {
        assert!(solve(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn empty_system_has_empty_solution() {
        assert!(solve(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn inverse_times_matrix_is_identity() {
        let m = [2.0, 0.5, 10.0, -0.3, 1.5, 4.0, 0.001, 0.002, 1.0];
        let inv = invert3x3(&m).unwrap();
        let product = multiply3x3(&m, &inv);
        for (got, want) in product.iter().zip(IDENTITY.iter()) {
            assert_close(*got, *want, 1e-10);
        }
    }

    #[test]
    fn singular_matrix_inverse_fails() {
        let m = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0];
        assert!(invert3x3(&m).is_err());
    }

    #[test]
    fn determinant_of_identity() {
        assert_close(determinant3x3(&IDENTITY), 1.0, 1e-15);
    }
}
