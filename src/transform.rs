//! SUT to IOT transformation models under the industry technology assumption.

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::algebra::{leontief_inverse, safe_inverse_vector, scale_cols, scale_rows, scrub_nan};
use crate::data::SupplyUseSystem;
use crate::error::{EeioError, Result};
use crate::extensions::{extension_pair, ExtensionPair};
use crate::options::{AnalysisOptions, NanPolicy};

/// Closed set of supported SUT to IOT transformation models.
///
/// Both are product-by-product derivations under the industry technology
/// assumption; they generally yield different technical coefficients from the
/// same table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformMethod {
    /// Technical-coefficient model: `A = U * T * inv(diag(q))` with the
    /// transformation matrix `T = inv(diag(g)) * V'`.
    TechnicalCoefficient,
    /// Market-share model: `A = Z * D` with input requirements
    /// `Z = U * inv(diag(g))` and market shares `D = V' * inv(diag(q))`.
    MarketShare,
}

/// Model-specific operators retained for extension derivation.
#[derive(Clone, Debug)]
enum ModelState {
    TechnicalCoefficient {
        /// Transformation matrix `T = inv(diag(g)) * V'`.
        transformation: DMatrix<f64>,
    },
    MarketShare {
        /// Market-share coefficients `D = V' * inv(diag(q))`.
        market_shares: DMatrix<f64>,
        /// Safe reciprocal of industry output, `inv(diag(g))` as a vector.
        inv_industry_output: DVector<f64>,
    },
}

/// One SUT to IOT transformation run.
///
/// Both variants expose the same capability surface: intermediates `S`,
/// technical coefficients `A`, the Leontief inverse `L`, and per-block
/// extension pairs. Select a variant with [`SutTransform::new`] or call the
/// model constructors directly.
#[derive(Clone, Debug)]
pub struct SutTransform {
    method: TransformMethod,
    intermediates: DMatrix<f64>,
    coefficients: DMatrix<f64>,
    leontief: DMatrix<f64>,
    product_output: DVector<f64>,
    state: ModelState,
}

impl SutTransform {
    /// Runs the model selected by `method` over the supplied system.
    pub fn new(
        method: TransformMethod,
        sut: &SupplyUseSystem,
        options: &AnalysisOptions,
    ) -> Result<Self> {
        match method {
            TransformMethod::TechnicalCoefficient => Self::technical_coefficient(sut, options),
            TransformMethod::MarketShare => Self::market_share(sut),
        }
    }

    /// Technical-coefficient derivation.
    ///
    /// `T = inv(diag(g)) * V'`, `A = U * T * inv(diag(q))`,
    /// `L = (I - A)^-1`, `S = U * T`. NaN entries left in `A` by chained
    /// zero-driver products are handled per [`NanPolicy`].
    pub fn technical_coefficient(
        sut: &SupplyUseSystem,
        options: &AnalysisOptions,
    ) -> Result<Self> {
        let inv_industry_output = safe_inverse_vector(sut.industry_output());
        let inv_product_output = safe_inverse_vector(sut.product_output());

        // The make table arrives industry by product; transposing it yields
        // the supply layout the transformation matrix expects.
        let transformation = scale_rows(&sut.make().transpose(), &inv_industry_output);
        let intermediates = sut.use_table() * &transformation;
        let mut coefficients = scale_cols(&intermediates, &inv_product_output);
        match options.nan_policy {
            NanPolicy::ZeroFill => {
                let scrubbed = scrub_nan(&mut coefficients);
                if scrubbed > 0 {
                    warn!("scrubbed {scrubbed} NaN entries from the technical coefficient matrix");
                }
            }
            NanPolicy::FailFast => {
                if coefficients.iter().any(|v| v.is_nan()) {
                    return Err(EeioError::NumericalError {
                        context: "technical coefficient derivation",
                    });
                }
            }
        }
        let leontief = leontief_inverse(&coefficients)?;
        debug!(
            "technical-coefficient transform over {} products",
            sut.product_count()
        );

        Ok(Self {
            method: TransformMethod::TechnicalCoefficient,
            intermediates,
            coefficients,
            leontief,
            product_output: sut.product_output().clone(),
            state: ModelState::TechnicalCoefficient { transformation },
        })
    }

    /// Market-share derivation.
    ///
    /// `Z = U * inv(diag(g))`, `D = V' * inv(diag(q))`, `A = Z * D`,
    /// `L = (I - A)^-1`, `S = (Z * D) * diag(q)`.
    pub fn market_share(sut: &SupplyUseSystem) -> Result<Self> {
        let inv_industry_output = safe_inverse_vector(sut.industry_output());
        let inv_product_output = safe_inverse_vector(sut.product_output());

        let requirements = scale_cols(sut.use_table(), &inv_industry_output);
        let market_shares = scale_cols(&sut.make().transpose(), &inv_product_output);
        let coefficients = &requirements * &market_shares;
        let leontief = leontief_inverse(&coefficients)?;
        let intermediates = scale_cols(&coefficients, sut.product_output());
        debug!("market-share transform over {} products", sut.product_count());

        Ok(Self {
            method: TransformMethod::MarketShare,
            intermediates,
            coefficients,
            leontief,
            product_output: sut.product_output().clone(),
            state: ModelState::MarketShare {
                market_shares,
                inv_industry_output,
            },
        })
    }

    /// Which model produced this transformation.
    pub fn method(&self) -> TransformMethod {
        self.method
    }

    /// Intermediates matrix `S`.
    pub fn intermediates(&self) -> &DMatrix<f64> {
        &self.intermediates
    }

    /// Technical coefficient matrix `A`.
    pub fn coefficients(&self) -> &DMatrix<f64> {
        &self.coefficients
    }

    /// Leontief inverse `L = (I - A)^-1`.
    pub fn leontief(&self) -> &DMatrix<f64> {
        &self.leontief
    }

    /// Derives the (intensity, absolute) pair for a raw extension block under
    /// this model.
    ///
    /// Technical-coefficient: `B = (raw * T) * inv(diag(q))`. Market-share:
    /// `B = (raw * inv(diag(g))) * D`. Both reconstruct the absolute account
    /// as `B * diag(q)`.
    pub fn extension_pair(&self, raw: &DMatrix<f64>) -> Result<ExtensionPair> {
        match &self.state {
            ModelState::TechnicalCoefficient { transformation } => {
                extension_pair(raw, Some(transformation), &self.product_output)
            }
            ModelState::MarketShare {
                market_shares,
                inv_industry_output,
            } => {
                if raw.ncols() != inv_industry_output.len() {
                    return Err(EeioError::dimension_mismatch(
                        "extension driver length",
                        raw.ncols(),
                        inv_industry_output.len(),
                    ));
                }
                let intensity = scale_cols(raw, inv_industry_output) * market_shares;
                let absolute = scale_cols(&intensity, &self.product_output);
                Ok(ExtensionPair {
                    intensity,
                    absolute,
                })
            }
        }
    }
}
