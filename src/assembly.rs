//! Model-agnostic IOT assembly: totals, re-derived coefficients, extension
//! propagation, and the analysis pipeline entry point.

use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::algebra::{leontief_inverse, row_totals, safe_inverse_vector, scale_cols};
use crate::balance::verify_balance;
use crate::data::{SatelliteAccounts, SupplyUseSystem};
use crate::error::{EeioError, Result};
use crate::extensions::{extension_pair, ExtensionPair};
use crate::options::AnalysisOptions;
use crate::transform::{SutTransform, TransformMethod};

/// Total product output `x = rowsum(S) + rowsum(Y)`.
pub fn total_output(
    intermediates: &DMatrix<f64>,
    final_demand: &DMatrix<f64>,
) -> Result<DVector<f64>> {
    if intermediates.nrows() != final_demand.nrows() {
        return Err(EeioError::dimension_mismatch(
            "total output final demand rows",
            intermediates.nrows(),
            final_demand.nrows(),
        ));
    }
    Ok(row_totals(intermediates) + row_totals(final_demand))
}

/// Technical coefficients re-derived from assembled intermediates,
/// `A = S * inv(diag(x))`.
pub fn coefficients_from_intermediates(
    intermediates: &DMatrix<f64>,
    total_output: &DVector<f64>,
) -> DMatrix<f64> {
    scale_cols(intermediates, &safe_inverse_vector(total_output))
}

/// Total output recomputed through the multiplier route, `x = L * y`.
///
/// For a self-consistent assembled table this agrees with [`total_output`]
/// within floating tolerance; a discrepancy signals an inconsistent model.
pub fn output_from_demand(leontief: &DMatrix<f64>, demand_totals: &DVector<f64>) -> DVector<f64> {
    leontief * demand_totals
}

/// (intensity, absolute) pair for extension flows embodied in final demand
/// rather than intermediate production.
pub fn final_demand_extension_pair(
    raw: &DMatrix<f64>,
    demand_totals: &DVector<f64>,
) -> Result<ExtensionPair> {
    extension_pair(raw, None, demand_totals)
}

/// Fully assembled symmetric input-output table with extension accounts and
/// balance diagnostics.
///
/// Every field is derived once per analysis run; the aggregate is handed to
/// an external persistence or reporting collaborator unchanged.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IotTable {
    /// Technical coefficient matrix `A`.
    pub coefficients: DMatrix<f64>,
    /// Intermediates matrix `S = A * diag(x)`.
    pub intermediates: DMatrix<f64>,
    /// Leontief inverse `L = (I - A)^-1`.
    pub leontief: DMatrix<f64>,
    /// Final demand `Y`, carried through unchanged.
    pub final_demand: DMatrix<f64>,
    /// Total product output `x = L * y`.
    pub total_output: DVector<f64>,
    /// Primary-input pair (`w`, `W`).
    pub primary_inputs: ExtensionPair,
    /// Environmental pair (`e`, `E`).
    pub environmental: ExtensionPair,
    /// Resource pair (`r`, `R`).
    pub resource: ExtensionPair,
    /// Material pair (`m`, `M`).
    pub material: ExtensionPair,
    /// Per-sector balance ratios; values near 100 indicate a balanced table.
    pub balance: DVector<f64>,
}

impl IotTable {
    /// Assembles the full table from intermediates, final demand, and the raw
    /// satellite accounts, independent of which transform produced them.
    ///
    /// Coefficients and the Leontief inverse are re-derived here from the
    /// assembled intermediates rather than reusing the transform-specific
    /// ones, so the result is internally consistent by construction. Fails
    /// with [`EeioError::SingularMatrix`] when `I - A` cannot be inverted.
    pub fn assemble(
        intermediates: &DMatrix<f64>,
        final_demand: &DMatrix<f64>,
        accounts: &SatelliteAccounts,
    ) -> Result<Self> {
        let x = total_output(intermediates, final_demand)?;
        let demand_totals = row_totals(final_demand);

        let coefficients = coefficients_from_intermediates(intermediates, &x);
        let leontief = leontief_inverse(&coefficients)?;

        // The four satellite blocks are independent of one another; derive
        // their pairs on worker threads.
        let ((primary_inputs, environmental), (resource, material)) = rayon::join(
            || {
                rayon::join(
                    || extension_pair(accounts.primary_inputs(), None, &x),
                    || extension_pair(accounts.environmental(), None, &x),
                )
            },
            || {
                rayon::join(
                    || extension_pair(accounts.resource(), None, &x),
                    || extension_pair(accounts.material(), None, &x),
                )
            },
        );

        let intermediates = scale_cols(&coefficients, &x);
        let total_output = output_from_demand(&leontief, &demand_totals);
        let balance = verify_balance(&intermediates, final_demand, accounts.primary_inputs())?;

        Ok(Self {
            coefficients,
            intermediates,
            leontief,
            final_demand: final_demand.clone(),
            total_output,
            primary_inputs: primary_inputs?,
            environmental: environmental?,
            resource: resource?,
            material: material?,
            balance,
        })
    }

    /// Final demand summed across destinations, `y`.
    pub fn demand_totals(&self) -> DVector<f64> {
        row_totals(&self.final_demand)
    }
}

/// High-level pipeline: one transform model applied to one supply-use system.
#[derive(Clone, Debug)]
pub struct IotProblem {
    sut: SupplyUseSystem,
    method: TransformMethod,
}

impl IotProblem {
    /// Pairs a validated supply-use system with a transformation model.
    pub fn new(sut: SupplyUseSystem, method: TransformMethod) -> Self {
        Self { sut, method }
    }

    /// Accessor for the underlying supply-use system.
    pub fn sut(&self) -> &SupplyUseSystem {
        &self.sut
    }

    /// The selected transformation model.
    pub fn method(&self) -> TransformMethod {
        self.method
    }

    /// Runs the selected transform and assembles the full table.
    pub fn solve(&self, options: &AnalysisOptions) -> Result<IotTable> {
        debug!(
            "solving {:?} problem over {} products",
            self.method,
            self.sut.product_count()
        );
        let transform = SutTransform::new(self.method, &self.sut, options)?;
        IotTable::assemble(
            transform.intermediates(),
            self.sut.final_demand(),
            self.sut.accounts(),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::SupplyUseSystem;

    fn toy_problem() -> IotProblem {
        let mut primary_inputs = DMatrix::zeros(9, 2);
        primary_inputs.row_mut(0).copy_from_slice(&[3.0, 3.0]);
        let sut = SupplyUseSystem::builder(
            DMatrix::from_row_slice(2, 2, &[10.0, 0.0, 0.0, 10.0]),
            DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]),
        )
        .final_demand(DMatrix::from_row_slice(2, 1, &[3.0, 3.0]))
        .industry_output(DVector::from_vec(vec![10.0, 10.0]))
        .product_output(DVector::from_vec(vec![13.0, 13.0]))
        .primary_inputs(primary_inputs)
        .build()
        .expect("valid toy system");
        IotProblem::new(sut, TransformMethod::TechnicalCoefficient)
    }

    #[test]
    fn assembled_table_is_self_consistent() {
        let table = toy_problem().solve(&AnalysisOptions::default()).unwrap();

        let direct = total_output(&table.intermediates, &table.final_demand).unwrap();
        let through_multipliers =
            output_from_demand(&table.leontief, &table.demand_totals());
        assert_relative_eq!(direct, through_multipliers, epsilon = 1e-9);
        assert_relative_eq!(
            table.total_output,
            DVector::from_vec(vec![6.0, 6.0]),
            epsilon = 1e-9
        );
    }

    #[test]
    fn assembly_rederives_coefficients_from_intermediates() {
        let table = toy_problem().solve(&AnalysisOptions::default()).unwrap();

        // x = [6, 6] at assembly time, so A = S / 6 regardless of the
        // transform-level coefficients built over q = [13, 13].
        let expected_a = DMatrix::from_row_slice(
            2,
            2,
            &[1.0 / 3.0, 1.0 / 6.0, 1.0 / 6.0, 1.0 / 3.0],
        );
        let expected_l = DMatrix::from_row_slice(2, 2, &[1.6, 0.4, 0.4, 1.6]);
        assert_relative_eq!(table.coefficients, expected_a, epsilon = 1e-9);
        assert_relative_eq!(table.leontief, expected_l, epsilon = 1e-9);
        assert_relative_eq!(
            table.balance,
            DVector::from_vec(vec![100.0, 100.0]),
            epsilon = 1e-9
        );
    }

    #[test]
    fn extension_pairs_propagate_over_total_output() {
        let table = toy_problem().solve(&AnalysisOptions::default()).unwrap();

        assert_relative_eq!(table.primary_inputs.intensity[(0, 0)], 0.5, epsilon = 1e-9);
        assert_relative_eq!(table.primary_inputs.absolute[(0, 0)], 3.0, epsilon = 1e-9);
        // Unset satellite blocks stay empty but classified.
        assert_eq!(table.environmental.intensity.nrows(), 0);
        assert_eq!(table.environmental.intensity.ncols(), 2);
    }

    #[test]
    fn final_demand_pair_uses_demand_totals_as_driver() {
        let raw = DMatrix::from_row_slice(1, 2, &[12.0, 18.0]);
        let demand_totals = DVector::from_vec(vec![3.0, 6.0]);
        let pair = final_demand_extension_pair(&raw, &demand_totals).unwrap();
        assert_relative_eq!(pair.intensity[(0, 0)], 4.0, epsilon = 1e-12);
        assert_relative_eq!(pair.intensity[(0, 1)], 3.0, epsilon = 1e-12);
        assert_relative_eq!(pair.absolute, raw, epsilon = 1e-12);
    }
}
