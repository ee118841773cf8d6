use nalgebra::DVector;
use serde::{Serialize, Deserialize};

pub type Time = f64;

/// Particle position: one coordinate for a 1D walk, `(x, y)` for a 2D walk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State(pub DVector<f64>);

impl State {
    pub fn new(values: Vec<f64>) -> Self {
        State(DVector::from_vec(values))
    }

    /// The implicit origin every walk is measured from.
    pub fn origin(dim: usize) -> Self {
        State(DVector::zeros(dim))
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Squared distance from the origin.
    pub fn squared_displacement(&self) -> f64 {
        self.0.norm_squared()
    }
}

impl std::ops::Deref for State {
    type Target = DVector<f64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for State {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<DVector<f64>> for State {
    fn from(v: DVector<f64>) -> Self {
        State(v)
    }
}

impl From<Vec<f64>> for State {
    fn from(v: Vec<f64>) -> Self {
        State::new(v)
    }
}

impl From<(f64, f64)> for State {
    fn from((x, y): (f64, f64)) -> Self {
        State::new(vec![x, y])
    }
}
