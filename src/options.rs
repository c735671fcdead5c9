//! Configuration surface consumed by one analysis run.

use serde::{Deserialize, Serialize};

/// Policy for NaN entries surfacing in the technical coefficient matrix.
///
/// Chained multiplications over sectors with zero recorded output can leave
/// NaN entries in `A` when the raw tables themselves carry non-finite values.
/// The established convention is to scrub those entries to zero; that masking
/// can also hide genuine numerical defects, so it is selectable rather than
/// hardcoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NanPolicy {
    /// Scrub NaN entries to zero and continue. Scrub counts are logged at
    /// warn level.
    #[default]
    ZeroFill,
    /// Abort the run with [`EeioError::NumericalError`](crate::EeioError::NumericalError)
    /// on the first NaN entry.
    FailFast,
}

/// Options governing one SUT to IOT analysis run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// How to treat NaN entries in the derived technical coefficients.
    pub nan_policy: NanPolicy,
}

impl AnalysisOptions {
    /// Overrides the NaN policy while keeping other defaults.
    pub fn with_nan_policy(mut self, policy: NanPolicy) -> Self {
        self.nan_policy = policy;
        self
    }
}
