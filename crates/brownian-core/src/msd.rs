use crate::error::StatsError;
use crate::{State, F};

/// Mean squared displacement of 1D final positions: `Σ xk² / N`.
pub fn mean_squared_displacement(xk: &[F]) -> Result<F, StatsError> {
    if xk.is_empty() {
        return Err(StatsError::EmptyEnsemble);
    }
    let sum: F = xk.iter().map(|x| x * x).sum();
    Ok(sum / xk.len() as F)
}

/// Mean squared displacement of 2D final positions: `Σ (xk² + yk²) / N`.
pub fn mean_squared_displacement_2d(xk: &[F], yk: &[F]) -> Result<F, StatsError> {
    if xk.len() != yk.len() {
        return Err(StatsError::LengthMismatch { x: xk.len(), y: yk.len() });
    }
    if xk.is_empty() {
        return Err(StatsError::EmptyEnsemble);
    }
    let sum: F = xk.iter().zip(yk).map(|(x, y)| x * x + y * y).sum();
    Ok(sum / xk.len() as F)
}

/// Mean squared displacement of states of any dimension.
pub fn ensemble_msd<'a, I>(states: I) -> Result<F, StatsError>
where
    I: IntoIterator<Item = &'a State>,
{
    let (n, sum) = states
        .into_iter()
        .fold((0usize, 0.0), |(n, sum), s| (n + 1, sum + s.squared_displacement()));
    if n == 0 {
        return Err(StatsError::EmptyEnsemble);
    }
    Ok(sum / n as F)
}
