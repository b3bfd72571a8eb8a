pub mod main_frame;
pub mod plotting_ui;
pub mod regression_ui;
