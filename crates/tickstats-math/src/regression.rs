//! Least-squares polynomial regression.
//!
//! Coefficients are ordered highest power first, so `[a, b]` is the line
//! `a * x + b`. The fit solves the normal equations `(XᵀX) c = Xᵀy` over the
//! Vandermonde matrix `X`.

use nalgebra::{DMatrix, DVector};

use crate::error::{MathError, MathResult};
use crate::linear_algebra::solve_linear_system;

/// Fits a polynomial of `degree` to `(x, y)` by ordinary least squares.
///
/// # Errors
///
/// - `MathError::LengthMismatch` if `x` and `y` differ in length
/// - `MathError::InsufficientData` for fewer than `degree + 1` points
/// - `MathError::SingularMatrix` if `x` has too few distinct values
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> MathResult<Vec<f64>> {
    MathError::check_paired(x.len(), y.len())?;
    let terms = degree + 1;
    if x.len() < terms {
        return Err(MathError::insufficient_data(terms, x.len()));
    }

    let vandermonde = DMatrix::from_fn(x.len(), terms, |row, col| {
        x[row].powi((degree - col) as i32)
    });
    let rhs = DVector::from_column_slice(y);

    let gram = vandermonde.transpose() * &vandermonde;
    let moment = vandermonde.transpose() * rhs;

    let coefficients = solve_linear_system(&gram, &moment)?;
    Ok(coefficients.iter().copied().collect())
}

/// Evaluates a polynomial (highest power first) at each point using Horner's rule.
pub fn polyval(coefficients: &[f64], points: &[f64]) -> Vec<f64> {
    points
        .iter()
        .map(|&x| coefficients.iter().fold(0.0, |acc, &c| acc * x + c))
        .collect()
}

/// A fitted straight line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Slope of the line.
    pub slope: f64,
    /// Value at `x = 0`.
    pub intercept: f64,
}

impl LinearFit {
    /// Fits a line to `(x, y)` by ordinary least squares.
    pub fn fit(x: &[f64], y: &[f64]) -> MathResult<Self> {
        let coefficients = polyfit(x, y, 1)?;
        Ok(Self {
            slope: coefficients[0],
            intercept: coefficients[1],
        })
    }

    /// Returns the coefficients highest power first: `[slope, intercept]`.
    pub fn coefficients(&self) -> [f64; 2] {
        [self.slope, self.intercept]
    }

    /// Evaluates the line at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Evaluates the line at every point.
    pub fn evaluate_all(&self, points: &[f64]) -> Vec<f64> {
        polyval(&self.coefficients(), points)
    }
}
