#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("x and y have different lengths: {len_x} vs {len_y}")]
    LengthMismatch { len_x: usize, len_y: usize },
    #[error("not enough points: got {len}, need at least {needed}")]
    NotEnoughPoints { len: usize, needed: usize },
    #[error("degenerate x: no variance in x")]
    DegenerateX,
    #[error("normal equations are singular")]
    Singular,
    #[error("non-finite {0} during fit")]
    NonFinite(&'static str),
}

pub type FitResult<T> = Result<T, FitError>;

/// Shared input checks for every strategy.
pub(crate) fn check_inputs(x: &[f64], y: &[f64], needed: usize) -> FitResult<()> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch { len_x: x.len(), len_y: y.len() });
    }
    if x.len() < needed {
        return Err(FitError::NotEnoughPoints { len: x.len(), needed });
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite("input"));
    }
    Ok(())
}
