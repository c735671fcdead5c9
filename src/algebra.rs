//! Dense-algebra primitives shared across the transformation and assembly
//! layers: zero-preserving reciprocals, diagonal scaling, per-sector totals,
//! and the Leontief inversion.

use nalgebra::{DMatrix, DVector};

use crate::error::{EeioError, Result};

/// Elementwise reciprocal that maps zero entries to zero instead of infinity.
///
/// Sectors with zero recorded output are legal in supply-use data; their
/// reciprocal driver must stay zero so that downstream scalings annihilate the
/// sector rather than flooding the table with infinities.
pub fn safe_inverse(x: &DMatrix<f64>) -> DMatrix<f64> {
    x.map(|v| if v == 0.0 { 0.0 } else { 1.0 / v })
}

/// Vector form of [`safe_inverse`].
pub fn safe_inverse_vector(x: &DVector<f64>) -> DVector<f64> {
    x.map(|v| if v == 0.0 { 0.0 } else { 1.0 / v })
}

/// Computes `diag(factors) * matrix` by scaling each row of `matrix`.
///
/// Identical arithmetic to multiplying by a dense diagonal operator, without
/// materializing an n-by-n matrix for what is a vector of scale factors.
///
/// # Panics
///
/// Panics if `factors` does not carry one entry per row of `matrix`.
pub fn scale_rows(matrix: &DMatrix<f64>, factors: &DVector<f64>) -> DMatrix<f64> {
    assert_eq!(
        matrix.nrows(),
        factors.len(),
        "row scaling requires one factor per row"
    );
    let mut scaled = matrix.clone();
    for (i, mut row) in scaled.row_iter_mut().enumerate() {
        row *= factors[i];
    }
    scaled
}

/// Computes `matrix * diag(factors)` by scaling each column of `matrix`.
///
/// # Panics
///
/// Panics if `factors` does not carry one entry per column of `matrix`.
pub fn scale_cols(matrix: &DMatrix<f64>, factors: &DVector<f64>) -> DMatrix<f64> {
    assert_eq!(
        matrix.ncols(),
        factors.len(),
        "column scaling requires one factor per column"
    );
    let mut scaled = matrix.clone();
    for (j, mut col) in scaled.column_iter_mut().enumerate() {
        col *= factors[j];
    }
    scaled
}

/// Per-sector totals along rows: entry `i` is the sum of row `i`.
pub fn row_totals(matrix: &DMatrix<f64>) -> DVector<f64> {
    matrix.column_sum()
}

/// Per-sector totals down columns: entry `j` is the sum of column `j`.
pub fn column_totals(matrix: &DMatrix<f64>) -> DVector<f64> {
    matrix.row_sum().transpose()
}

/// Leontief inverse `(I - A)^-1` of a technical coefficient matrix.
///
/// A singular `I - A` signals a structurally invalid or inconsistent input
/// table and is surfaced as [`EeioError::SingularMatrix`]; there is no
/// recovery or retry at this level.
pub fn leontief_inverse(coefficients: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let n = coefficients.nrows();
    if coefficients.ncols() != n {
        return Err(EeioError::dimension_mismatch(
            "Leontief inversion",
            n,
            coefficients.ncols(),
        ));
    }
    let identity = DMatrix::<f64>::identity(n, n);
    (identity - coefficients)
        .try_inverse()
        .ok_or_else(|| EeioError::singular("I - A"))
}

/// Replaces NaN entries with zero in place, returning how many were scrubbed.
pub fn scrub_nan(matrix: &mut DMatrix<f64>) -> usize {
    let mut scrubbed = 0;
    for value in matrix.iter_mut() {
        if value.is_nan() {
            *value = 0.0;
            scrubbed += 1;
        }
    }
    scrubbed
}
