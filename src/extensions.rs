//! Extension-account coefficient machinery shared by the transform models and
//! the assembly layer.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::algebra::{safe_inverse_vector, scale_cols};
use crate::error::{EeioError, Result};

/// Intensity and absolute views of one extension category.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtensionPair {
    /// Account per unit of driver output (coefficient form).
    pub intensity: DMatrix<f64>,
    /// Account level reconstructed as `intensity * diag(driver)`.
    pub absolute: DMatrix<f64>,
}

/// Derives the (intensity, absolute) pair for one raw extension block.
///
/// `intensity = raw [* bridge] * inv(diag(driver))` and
/// `absolute = intensity * diag(driver)`. The two directions are exact
/// inverses whenever the driver has no zero entries; a zero driver entry
/// annihilates its column in both views.
///
/// The same routine serves the primary-input, environmental, resource, and
/// material blocks, the final-demand embodied extensions, and the bridged
/// technical-coefficient variant.
pub fn extension_pair(
    raw: &DMatrix<f64>,
    bridge: Option<&DMatrix<f64>>,
    driver: &DVector<f64>,
) -> Result<ExtensionPair> {
    let bridged = match bridge {
        Some(bridge) => {
            if raw.ncols() != bridge.nrows() {
                return Err(EeioError::dimension_mismatch(
                    "extension bridge rows",
                    raw.ncols(),
                    bridge.nrows(),
                ));
            }
            raw * bridge
        }
        None => raw.clone(),
    };
    if bridged.ncols() != driver.len() {
        return Err(EeioError::dimension_mismatch(
            "extension driver length",
            bridged.ncols(),
            driver.len(),
        ));
    }

    let intensity = scale_cols(&bridged, &safe_inverse_vector(driver));
    let absolute = scale_cols(&intensity, driver);
    Ok(ExtensionPair {
        intensity,
        absolute,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn round_trips_with_a_zero_free_driver() {
        let raw = DMatrix::from_row_slice(2, 3, &[1.0, -2.0, 3.0, 0.5, 0.0, 4.0]);
        let driver = DVector::from_vec(vec![2.0, 4.0, 8.0]);

        let pair = extension_pair(&raw, None, &driver).unwrap();
        assert_relative_eq!(pair.absolute, raw, epsilon = 1e-12);
        assert_relative_eq!(pair.intensity[(0, 0)], 0.5, epsilon = 1e-12);
        assert_relative_eq!(pair.intensity[(1, 2)], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn zero_driver_entries_annihilate_their_column() {
        let raw = DMatrix::from_row_slice(1, 2, &[5.0, 7.0]);
        let driver = DVector::from_vec(vec![2.0, 0.0]);

        let pair = extension_pair(&raw, None, &driver).unwrap();
        assert_eq!(pair.intensity[(0, 1)], 0.0);
        assert_eq!(pair.absolute[(0, 1)], 0.0);
        assert_relative_eq!(pair.absolute[(0, 0)], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_a_bridge_with_mismatched_rows() {
        let raw = DMatrix::from_row_slice(1, 2, &[1.0, 1.0]);
        let bridge = DMatrix::zeros(3, 2);
        let driver = DVector::from_vec(vec![1.0, 1.0]);
        let result = extension_pair(&raw, Some(&bridge), &driver);
        assert!(matches!(result, Err(EeioError::DimensionMismatch { .. })));
    }
}
