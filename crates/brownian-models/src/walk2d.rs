use brownian_core::{step_2d_with, Kick, State, WalkError, Walker, F};
use rand::Rng;
use serde::{Serialize, Deserialize};

/// Two-dimensional walk moving along exactly one axis per step.
///
/// X is chosen with probability `prob`, Y otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Walk2D {
    pub v: F,
    pub prob: F,
    pub kick: Kick,
}

impl Walk2D {
    pub fn new(v: F, prob: F) -> Result<Self, WalkError> {
        // NaN fails the range check too
        if !(0.0..=1.0).contains(&prob) {
            return Err(WalkError::ProbabilityOutOfRange(prob));
        }
        Ok(Self { v, prob, kick: Kick::Sign })
    }

    /// Unit speed, both axes equally likely
    pub fn isotropic() -> Self {
        Self { v: 1.0, prob: 0.5, kick: Kick::Sign }
    }

    pub fn with_kick(mut self, kick: Kick) -> Self {
        self.kick = kick;
        self
    }

    pub fn step_length(&self, dt: F) -> F {
        (self.v * dt).abs()
    }

    /// E[x_n² + y_n²] = n (v dt)², independent of `prob`
    pub fn exact_msd(&self, n_steps: usize, dt: F) -> F {
        n_steps as F * (self.v * dt).powi(2)
    }
}

impl Walker for Walk2D {
    fn dim(&self) -> usize {
        2
    }

    fn advance<R: Rng + ?Sized>(&self, x: &State, dt: f64, rng: &mut R) -> State {
        let (xn, yn) = step_2d_with(self.kick, x[0], x[1], self.v, dt, self.prob, rng);
        State::new(vec![xn, yn])
    }
}
