use brownian_core::{step_with, Kick, State, Walker, F};
use rand::Rng;
use serde::{Serialize, Deserialize};

/// One-dimensional walk: x_{i+1} = x_i + eps * v * dt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Walk1D {
    pub v: F,
    pub kick: Kick,
}

impl Walk1D {
    pub fn new(v: F) -> Self {
        Self { v, kick: Kick::Sign }
    }

    /// Unit-speed walk
    pub fn standard() -> Self {
        Self::new(1.0)
    }

    pub fn with_kick(mut self, kick: Kick) -> Self {
        self.kick = kick;
        self
    }

    /// Displacement of a single step
    pub fn step_length(&self, dt: F) -> F {
        (self.v * dt).abs()
    }

    /// E[x_n²] = n (v dt)², since E[eps²] = 1 for both kicks
    pub fn exact_msd(&self, n_steps: usize, dt: F) -> F {
        n_steps as F * (self.v * dt).powi(2)
    }
}

impl Walker for Walk1D {
    fn dim(&self) -> usize {
        1
    }

    fn advance<R: Rng + ?Sized>(&self, x: &State, dt: f64, rng: &mut R) -> State {
        State::new(vec![step_with(self.kick, x[0], self.v, dt, rng)])
    }
}
