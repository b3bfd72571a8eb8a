pub mod cmd;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod model;
pub mod plot;
pub mod report;
pub mod session;
pub mod settings;
pub mod split;
pub mod stats;

pub use dataset::{Dataset, LoadOptions};
pub use error::{ErrorCategory, RegressionError, Result};
pub use model::{FitError, FitStats, RegressionKind, RegressionModel};
pub use plot::{render_comparison, ComparisonSeries, PlotOptions};
pub use report::{AccuracyReport, Prediction};
pub use session::{parse_input, ColumnSelection, RegressionSession, SessionState};
pub use settings::{WorkflowSettings, SETTINGS_FILE};
pub use split::{train_test_split, SplitPartition};
