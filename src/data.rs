//! Supply-use data containers and validation used by the transformation
//! pipeline.

use nalgebra::{DMatrix, DVector};

use crate::error::{EeioError, Result};

/// A validated supply-use system: the raw national-accounts matrices for one
/// region and accounting year.
///
/// The make table `V` is stored industry by product, the use table `U`
/// product by industry, both square since only symmetric final tables are
/// supported. Satellite accounts hang off the economic core as rectangular
/// blocks with one column per product.
#[derive(Clone, Debug)]
pub struct SupplyUseSystem {
    make: DMatrix<f64>,
    use_table: DMatrix<f64>,
    final_demand: DMatrix<f64>,
    industry_output: DVector<f64>,
    product_output: DVector<f64>,
    accounts: SatelliteAccounts,
}

impl SupplyUseSystem {
    /// Creates a `SupplyUseSystem` from validated components.
    pub fn new(
        make: DMatrix<f64>,
        use_table: DMatrix<f64>,
        final_demand: DMatrix<f64>,
        industry_output: DVector<f64>,
        product_output: DVector<f64>,
        primary_inputs: DMatrix<f64>,
    ) -> Result<Self> {
        SupplyUseSystemBuilder::new(make, use_table)
            .final_demand(final_demand)
            .industry_output(industry_output)
            .product_output(product_output)
            .primary_inputs(primary_inputs)
            .build()
    }

    /// Starts building a system from the make and use tables.
    pub fn builder(make: DMatrix<f64>, use_table: DMatrix<f64>) -> SupplyUseSystemBuilder {
        SupplyUseSystemBuilder::new(make, use_table)
    }

    /// Number of products (and industries) in the symmetric classification.
    pub fn product_count(&self) -> usize {
        self.make.nrows()
    }

    /// Returns a read-only view of the make table (`V`, industry by product).
    pub fn make(&self) -> &DMatrix<f64> {
        &self.make
    }

    /// Returns a read-only view of the use table (`U`, product by industry).
    pub fn use_table(&self) -> &DMatrix<f64> {
        &self.use_table
    }

    /// Returns a read-only view of final demand (`Y`, product by destination).
    pub fn final_demand(&self) -> &DMatrix<f64> {
        &self.final_demand
    }

    /// Returns a read-only view of industry output (`g`).
    pub fn industry_output(&self) -> &DVector<f64> {
        &self.industry_output
    }

    /// Returns a read-only view of product output (`q`).
    pub fn product_output(&self) -> &DVector<f64> {
        &self.product_output
    }

    /// Provides access to the satellite accounts.
    pub fn accounts(&self) -> &SatelliteAccounts {
        &self.accounts
    }
}

/// Builder that validates dimensions before constructing [`SupplyUseSystem`].
#[derive(Debug)]
pub struct SupplyUseSystemBuilder {
    make: DMatrix<f64>,
    use_table: DMatrix<f64>,
    final_demand: Option<DMatrix<f64>>,
    industry_output: Option<DVector<f64>>,
    product_output: Option<DVector<f64>>,
    primary_inputs: Option<DMatrix<f64>>,
    environmental: Option<DMatrix<f64>>,
    resource: Option<DMatrix<f64>>,
    material: Option<DMatrix<f64>>,
}

impl SupplyUseSystemBuilder {
    /// Start building from the make and use tables.
    pub fn new(make: DMatrix<f64>, use_table: DMatrix<f64>) -> Self {
        Self {
            make,
            use_table,
            final_demand: None,
            industry_output: None,
            product_output: None,
            primary_inputs: None,
            environmental: None,
            resource: None,
            material: None,
        }
    }

    /// Sets the final demand block (`Y`).
    pub fn final_demand(mut self, matrix: DMatrix<f64>) -> Self {
        self.final_demand = Some(matrix);
        self
    }

    /// Sets the industry output vector (`g`).
    pub fn industry_output(mut self, vector: DVector<f64>) -> Self {
        self.industry_output = Some(vector);
        self
    }

    /// Sets the product output vector (`q`).
    pub fn product_output(mut self, vector: DVector<f64>) -> Self {
        self.product_output = Some(vector);
        self
    }

    /// Sets the primary-inputs block (`W`).
    pub fn primary_inputs(mut self, matrix: DMatrix<f64>) -> Self {
        self.primary_inputs = Some(matrix);
        self
    }

    /// Sets the environmental extension block (`E`).
    pub fn environmental(mut self, matrix: DMatrix<f64>) -> Self {
        self.environmental = Some(matrix);
        self
    }

    /// Sets the resource extension block (`R`).
    pub fn resource(mut self, matrix: DMatrix<f64>) -> Self {
        self.resource = Some(matrix);
        self
    }

    /// Sets the material extension block (`M`).
    pub fn material(mut self, matrix: DMatrix<f64>) -> Self {
        self.material = Some(matrix);
        self
    }

    /// Finalizes construction after validating shapes and driver vectors.
    pub fn build(self) -> Result<SupplyUseSystem> {
        let n = self.make.nrows();
        if self.make.ncols() != n {
            return Err(EeioError::dimension_mismatch(
                "make table columns",
                n,
                self.make.ncols(),
            ));
        }
        if self.use_table.nrows() != n {
            return Err(EeioError::dimension_mismatch(
                "use table rows",
                n,
                self.use_table.nrows(),
            ));
        }
        if self.use_table.ncols() != n {
            return Err(EeioError::dimension_mismatch(
                "use table columns",
                n,
                self.use_table.ncols(),
            ));
        }

        let final_demand = self
            .final_demand
            .ok_or_else(|| EeioError::missing_component("final demand"))?;
        if final_demand.nrows() != n {
            return Err(EeioError::dimension_mismatch(
                "final demand rows",
                n,
                final_demand.nrows(),
            ));
        }
        if final_demand.ncols() == 0 {
            return Err(EeioError::dimension_mismatch(
                "final demand destinations",
                1,
                0,
            ));
        }

        let industry_output = self
            .industry_output
            .ok_or_else(|| EeioError::missing_component("industry output"))?;
        validate_driver("industry output", &industry_output, n)?;
        let product_output = self
            .product_output
            .ok_or_else(|| EeioError::missing_component("product output"))?;
        validate_driver("product output", &product_output, n)?;

        let primary_inputs = self
            .primary_inputs
            .ok_or_else(|| EeioError::missing_component("primary inputs block"))?;
        let environmental = self.environmental.unwrap_or_else(|| DMatrix::zeros(0, n));
        let resource = self.resource.unwrap_or_else(|| DMatrix::zeros(0, n));
        let material = self.material.unwrap_or_else(|| DMatrix::zeros(0, n));
        let accounts =
            SatelliteAccounts::new(primary_inputs, environmental, resource, material)?;
        if accounts.product_count() != n {
            return Err(EeioError::dimension_mismatch(
                "satellite account columns",
                n,
                accounts.product_count(),
            ));
        }

        Ok(SupplyUseSystem {
            make: self.make,
            use_table: self.use_table,
            final_demand,
            industry_output,
            product_output,
            accounts,
        })
    }
}

fn validate_driver(context: &'static str, driver: &DVector<f64>, n: usize) -> Result<()> {
    if driver.len() != n {
        return Err(EeioError::dimension_mismatch(context, n, driver.len()));
    }
    for (index, value) in driver.iter().enumerate() {
        // Zero output is legal and handled by the safe inverse; NaN or
        // infinity in a driver poisons every downstream scaling.
        if !value.is_finite() {
            return Err(EeioError::NonFiniteDriver { context, index });
        }
    }
    Ok(())
}

/// Satellite accounts attached to the economic core of a table: primary
/// inputs plus the environmental, resource, and material extensions.
///
/// Each block carries one row per account category and one column per
/// product.
#[derive(Clone, Debug)]
pub struct SatelliteAccounts {
    primary_inputs: DMatrix<f64>,
    environmental: DMatrix<f64>,
    resource: DMatrix<f64>,
    material: DMatrix<f64>,
}

impl SatelliteAccounts {
    /// Bundles the four raw blocks, checking that they agree on the product
    /// classification.
    pub fn new(
        primary_inputs: DMatrix<f64>,
        environmental: DMatrix<f64>,
        resource: DMatrix<f64>,
        material: DMatrix<f64>,
    ) -> Result<Self> {
        let n = primary_inputs.ncols();
        for (context, block) in [
            ("environmental block columns", &environmental),
            ("resource block columns", &resource),
            ("material block columns", &material),
        ] {
            if block.ncols() != n {
                return Err(EeioError::dimension_mismatch(context, n, block.ncols()));
            }
        }
        Ok(Self {
            primary_inputs,
            environmental,
            resource,
            material,
        })
    }

    /// Number of products the accounts are classified over.
    pub fn product_count(&self) -> usize {
        self.primary_inputs.ncols()
    }

    /// Returns a read-only view of the primary-inputs block (`W`).
    pub fn primary_inputs(&self) -> &DMatrix<f64> {
        &self.primary_inputs
    }

    /// Returns a read-only view of the environmental block (`E`).
    pub fn environmental(&self) -> &DMatrix<f64> {
        &self.environmental
    }

    /// Returns a read-only view of the resource block (`R`).
    pub fn resource(&self) -> &DMatrix<f64> {
        &self.resource
    }

    /// Returns a read-only view of the material block (`M`).
    pub fn material(&self) -> &DMatrix<f64> {
        &self.material
    }
}
