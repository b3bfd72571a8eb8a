pub mod fiterror;
pub mod kind;
pub mod linear;
#[allow(clippy::module_inception)]
pub mod model;
pub mod polynomial;
pub mod robust;

pub use fiterror::{FitError, FitResult};
pub use kind::RegressionKind;
pub use linear::LinearModel;
pub use model::{FitStats, RegressionModel};
pub use polynomial::PolynomialModel;
pub use robust::RobustModel;
