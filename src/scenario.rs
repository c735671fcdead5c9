//! Baseline-versus-scenario comparison of assembled tables.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::assembly::IotTable;
use crate::error::{EeioError, Result};

/// Differences between a baseline and an alternative scenario result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioDelta {
    /// `Y - Yalt`, elementwise.
    pub final_demand: DMatrix<f64>,
    /// `(L - Lalt) * y`, with the baseline demand totals held fixed.
    pub total_output: DVector<f64>,
}

/// Elementwise difference in final demand between two scenarios.
pub fn delta_final_demand(
    baseline: &DMatrix<f64>,
    scenario: &DMatrix<f64>,
) -> Result<DMatrix<f64>> {
    if baseline.nrows() != scenario.nrows() {
        return Err(EeioError::dimension_mismatch(
            "final demand delta rows",
            baseline.nrows(),
            scenario.nrows(),
        ));
    }
    if baseline.ncols() != scenario.ncols() {
        return Err(EeioError::dimension_mismatch(
            "final demand delta columns",
            baseline.ncols(),
            scenario.ncols(),
        ));
    }
    Ok(baseline - scenario)
}

/// Change in total output attributable purely to a change in production
/// structure: `(L - Lalt) * y` with final demand held fixed.
///
/// Isolates a scenario's technology effect from its demand effect.
pub fn delta_total_output(
    baseline_leontief: &DMatrix<f64>,
    scenario_leontief: &DMatrix<f64>,
    demand_totals: &DVector<f64>,
) -> Result<DVector<f64>> {
    if baseline_leontief.nrows() != scenario_leontief.nrows()
        || baseline_leontief.ncols() != scenario_leontief.ncols()
    {
        return Err(EeioError::dimension_mismatch(
            "Leontief delta rows",
            baseline_leontief.nrows(),
            scenario_leontief.nrows(),
        ));
    }
    if baseline_leontief.ncols() != demand_totals.len() {
        return Err(EeioError::dimension_mismatch(
            "Leontief delta demand length",
            baseline_leontief.ncols(),
            demand_totals.len(),
        ));
    }
    Ok((baseline_leontief - scenario_leontief) * demand_totals)
}

/// Compares two assembled tables, holding the baseline's demand totals fixed
/// for the output decomposition.
pub fn compare(baseline: &IotTable, scenario: &IotTable) -> Result<ScenarioDelta> {
    let demand_totals = baseline.demand_totals();
    Ok(ScenarioDelta {
        final_demand: delta_final_demand(&baseline.final_demand, &scenario.final_demand)?,
        total_output: delta_total_output(
            &baseline.leontief,
            &scenario.leontief,
            &demand_totals,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    #[test]
    fn final_demand_delta_is_antisymmetric() {
        let mut rng = SmallRng::seed_from_u64(42);
        let y = DMatrix::from_fn(4, 3, |_, _| rng.gen_range(-5.0..5.0));
        let y_alt = DMatrix::from_fn(4, 3, |_, _| rng.gen_range(-5.0..5.0));

        let forward = delta_final_demand(&y, &y_alt).unwrap();
        let backward = delta_final_demand(&y_alt, &y).unwrap();
        assert_relative_eq!(forward, -backward, epsilon = 1e-12);
    }

    #[test]
    fn identical_structures_produce_a_zero_output_delta() {
        let mut rng = SmallRng::seed_from_u64(7);
        let l = DMatrix::from_fn(3, 3, |_, _| rng.gen_range(0.0..2.0));
        let y = DVector::from_fn(3, |_, _| rng.gen_range(0.0..10.0));

        let delta = delta_total_output(&l, &l, &y).unwrap();
        assert_eq!(delta, DVector::zeros(3));
    }

    #[test]
    fn rejects_mismatched_shapes() {
        let y = DMatrix::zeros(2, 2);
        let y_alt = DMatrix::zeros(2, 3);
        assert!(matches!(
            delta_final_demand(&y, &y_alt),
            Err(EeioError::DimensionMismatch { .. })
        ));
    }
}
