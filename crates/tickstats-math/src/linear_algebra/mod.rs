//! Linear algebra utilities.
//!
//! Small dense systems only: the regression module solves normal equations
//! of size `degree + 1`, so an LU decomposition with partial pivoting is
//! all that is needed.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

const PIVOT_TOLERANCE: f64 = 1e-15;

/// Packed LU factorization with partial pivoting: `P * A = L * U`.
///
/// `factors` holds `U` on and above the diagonal and the multipliers of the
/// unit lower-triangular `L` below it.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    factors: DMatrix<f64>,
    /// Row `i` of `P * A` is row `permutation[i]` of `A`.
    pub permutation: Vec<usize>,
}

impl LuDecomposition {
    /// Dimension of the factored matrix.
    pub fn dim(&self) -> usize {
        self.factors.nrows()
    }

    /// The unit lower-triangular factor.
    pub fn l(&self) -> DMatrix<f64> {
        let mut l = self.factors.lower_triangle();
        l.fill_diagonal(1.0);
        l
    }

    /// The upper-triangular factor.
    pub fn u(&self) -> DMatrix<f64> {
        self.factors.upper_triangle()
    }

    /// Solves `A x = b` for the factored `A`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::DimensionMismatch` if `b` has the wrong length.
    pub fn solve(&self, b: &DVector<f64>) -> MathResult<DVector<f64>> {
        let n = self.dim();
        if b.len() != n {
            return Err(MathError::DimensionMismatch {
                rows1: n,
                cols1: n,
                rows2: b.len(),
                cols2: 1,
            });
        }

        let f = &self.factors;
        let mut x = DVector::from_iterator(n, self.permutation.iter().map(|&row| b[row]));

        // forward: L y = P b, unit diagonal
        for row in 1..n {
            let dot: f64 = (0..row).map(|col| f[(row, col)] * x[col]).sum();
            x[row] -= dot;
        }
        // backward: U x = y
        for row in (0..n).rev() {
            let dot: f64 = (row + 1..n).map(|col| f[(row, col)] * x[col]).sum();
            x[row] = (x[row] - dot) / f[(row, row)];
        }
        Ok(x)
    }
}

/// Factors a square matrix with partial pivoting.
///
/// # Errors
///
/// - `MathError::InvalidInput` if the matrix is not square
/// - `MathError::SingularMatrix` if no usable pivot exists in some column
pub fn lu_decomposition(matrix: &DMatrix<f64>) -> MathResult<LuDecomposition> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(MathError::invalid_input(format!(
            "LU needs a square matrix, got {}x{}",
            n,
            matrix.ncols()
        )));
    }

    let mut factors = matrix.clone();
    let mut permutation: Vec<usize> = (0..n).collect();

    for col in 0..n {
        let (pivot, magnitude) = (col..n)
            .map(|row| (row, factors[(row, col)].abs()))
            .fold((col, f64::NEG_INFINITY), |best, cand| {
                if cand.1 > best.1 {
                    cand
                } else {
                    best
                }
            });
        if magnitude < PIVOT_TOLERANCE {
            return Err(MathError::SingularMatrix);
        }
        if pivot != col {
            // swapping whole rows also carries the multipliers already stored
            factors.swap_rows(col, pivot);
            permutation.swap(col, pivot);
        }

        let diagonal = factors[(col, col)];
        for row in col + 1..n {
            let multiplier = factors[(row, col)] / diagonal;
            factors[(row, col)] = multiplier;
            for k in col + 1..n {
                let delta = multiplier * factors[(col, k)];
                factors[(row, k)] -= delta;
            }
        }
    }

    Ok(LuDecomposition {
        factors,
        permutation,
    })
}

/// Solves `A x = b` by LU factorization.
///
/// # Errors
///
/// - `MathError::InvalidInput` if `a` is not square
/// - `MathError::DimensionMismatch` if `b` does not match `a`
/// - `MathError::SingularMatrix` if `a` is singular
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    if b.len() != a.nrows() {
        return Err(MathError::DimensionMismatch {
            rows1: a.nrows(),
            cols1: a.ncols(),
            rows2: b.len(),
            cols2: 1,
        });
    }
    lu_decomposition(a)?.solve(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lu_reconstructs_permuted_matrix() {
        let a = DMatrix::from_row_slice(3, 3, &[2.0, 1.0, 1.0, 4.0, 3.0, 3.0, 8.0, 7.0, 9.0]);

        let lu = lu_decomposition(&a).unwrap();
        let product = lu.l() * lu.u();
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(product[(i, j)], a[(lu.permutation[i], j)], epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_solve_needs_pivoting() {
        // Zero in the top-left corner fails without row exchanges.
        let a = DMatrix::from_row_slice(2, 2, &[0.0, 1.0, 1.0, 1.0]);
        let b = DVector::from_vec(vec![2.0, 5.0]);

        let x = solve_linear_system(&a, &b).unwrap();

        assert_relative_eq!(x[0], 3.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_factor_once_solve_many() {
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 2.0, 1.0, 3.0]);
        let lu = lu_decomposition(&a).unwrap();

        let x = lu.solve(&DVector::from_vec(vec![6.0, 4.0])).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-12);

        let x = lu.solve(&DVector::from_vec(vec![2.0, -2.0])).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], -1.0, epsilon = 1e-12);

        assert!(lu.solve(&DVector::from_vec(vec![1.0])).is_err());
    }

    #[test]
    fn test_singular() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        assert_eq!(solve_linear_system(&a, &b), Err(MathError::SingularMatrix));
    }
}
