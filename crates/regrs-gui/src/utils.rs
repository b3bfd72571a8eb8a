use egui::{Color32, RichText};
use regrs_core::{ErrorCategory, RegressionError};

pub fn good_message(msg: &str) -> RichText {
    RichText::new(msg).color(Color32::GREEN)
}

pub fn bad_message(msg: &str) -> RichText {
    RichText::new(msg).color(Color32::RED)
}

pub fn warn_message(msg: &str) -> RichText {
    RichText::new(msg).color(Color32::YELLOW)
}

/// Sequencing mistakes are the user clicking too early, shown as warnings.
pub fn error_message(e: &RegressionError) -> RichText {
    match e.category() {
        ErrorCategory::Sequencing => warn_message(&e.to_string()),
        ErrorCategory::Input | ErrorCategory::DegenerateData => bad_message(&e.to_string()),
    }
}
