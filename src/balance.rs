//! Output-side versus input-side balance verification.

use nalgebra::{DMatrix, DVector};

use crate::algebra::{column_totals, row_totals};
use crate::error::{EeioError, Result};

/// Number of leading primary-input rows counted on the cost side of the
/// balance check.
///
/// Fixed convention inherited from the source accounting framework: the first
/// nine primary-input categories enter the input-side total and the remaining
/// rows are excluded. The exact boundary is unverified domain knowledge; do
/// not redefine it without confirmation from the classification owner.
pub const PRIMARY_INPUT_COST_ROWS: usize = 9;

/// Checks per-sector balance of an assembled table.
///
/// `ver[i] = x_out[i] / x_in[i] * 100` where
/// `x_out = rowsum(S) + rowsum(Y)` and
/// `x_in = colsum(S) + colsum(W[0..9])`. Sectors that are zero on both sides
/// report 0 rather than NaN; values near 100 indicate a balanced table.
pub fn verify_balance(
    intermediates: &DMatrix<f64>,
    final_demand: &DMatrix<f64>,
    primary_inputs: &DMatrix<f64>,
) -> Result<DVector<f64>> {
    let n = intermediates.nrows();
    if intermediates.ncols() != n {
        return Err(EeioError::dimension_mismatch(
            "balance intermediates columns",
            n,
            intermediates.ncols(),
        ));
    }
    if final_demand.nrows() != n {
        return Err(EeioError::dimension_mismatch(
            "balance final demand rows",
            n,
            final_demand.nrows(),
        ));
    }
    if primary_inputs.ncols() != n {
        return Err(EeioError::dimension_mismatch(
            "balance primary input columns",
            n,
            primary_inputs.ncols(),
        ));
    }
    if primary_inputs.nrows() < PRIMARY_INPUT_COST_ROWS {
        return Err(EeioError::dimension_mismatch(
            "balance primary input cost rows",
            PRIMARY_INPUT_COST_ROWS,
            primary_inputs.nrows(),
        ));
    }

    let x_out = row_totals(intermediates) + row_totals(final_demand);
    let cost_rows = primary_inputs.rows(0, PRIMARY_INPUT_COST_ROWS);
    let x_in = column_totals(intermediates) + cost_rows.row_sum().transpose();

    Ok(x_out.zip_map(&x_in, |output, input| {
        if output == 0.0 && input == 0.0 {
            0.0
        } else {
            output / input * 100.0
        }
    }))
}
