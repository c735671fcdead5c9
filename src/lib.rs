//! Supply-use to input-output transformation and environmentally extended
//! multiplier analysis.
//!
//! This crate converts a supply-use table (SUT) into a symmetric
//! product-by-product input-output table (IOT) and derives the accounts used
//! in environmentally extended input-output analysis: technical coefficients,
//! the Leontief inverse, extension intensities, and balance diagnostics. It
//! offers tools to
//!
//! - bundle and validate raw supply-use matrices (`data` module),
//! - run either of two industry-technology transformation models
//!   (`transform` module),
//! - assemble the full table with propagated satellite accounts (`assembly`
//!   module), and
//! - audit balance and compare policy scenarios (`balance` and `scenario`
//!   modules).
//!
//! Every operation is a pure function over immutable inputs, so independent
//! scenario runs can be dispatched across threads freely; within one run the
//! satellite accounts are already propagated in parallel. Loading
//! spreadsheets, resolving rows by label, and persisting results are left to
//! external collaborators; this is an in-process computation library.
//!
//! # Quick start
//!
//! ```no_run
//! use eeiors::data::SupplyUseSystem;
//! use eeiors::{AnalysisOptions, IotProblem, TransformMethod};
//! use nalgebra::{DMatrix, DVector};
//!
//! // Two products, two industries, one final demand destination.
//! let make = DMatrix::from_row_slice(2, 2, &[10.0, 0.0, 0.0, 10.0]);
//! let use_table = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
//!
//! let sut = SupplyUseSystem::builder(make, use_table)
//!     .final_demand(DMatrix::from_row_slice(2, 1, &[3.0, 3.0]))
//!     .industry_output(DVector::from_vec(vec![10.0, 10.0]))
//!     .product_output(DVector::from_vec(vec![13.0, 13.0]))
//!     .primary_inputs(DMatrix::zeros(9, 2))
//!     .build()
//!     .expect("validated supply-use system");
//!
//! let problem = IotProblem::new(sut, TransformMethod::TechnicalCoefficient);
//! let table = problem.solve(&AnalysisOptions::default()).expect("assembled table");
//! println!("Total output: {}", table.total_output);
//! ```
//!
//! Other transformation methods and region-aggregation helpers are tracked on
//! the public roadmap.

pub mod algebra;
pub mod assembly;
pub mod balance;
pub mod data;
pub mod error;
pub mod extensions;
pub mod options;
pub mod scenario;
pub mod transform;

pub use assembly::{IotProblem, IotTable};
pub use error::{EeioError, Result};
pub use extensions::ExtensionPair;
pub use options::{AnalysisOptions, NanPolicy};
pub use scenario::ScenarioDelta;
pub use transform::{SutTransform, TransformMethod};
