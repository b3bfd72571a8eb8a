pub mod linreg;
pub mod polyreg;
pub mod robreg;
#[allow(clippy::module_inception)]
pub mod stats;

pub use linreg::LinReg;
pub use polyreg::PolyReg;
pub use robreg::RobReg;
pub use stats::{
    adjusted_r2, aic_from_rss, mean, mse, r2_from_predictions,
    residual_sum_of_squares, rmse,
};
