use anyhow::ensure;
use brownian_core::{Kick, F};
use brownian_models::{Walk1D, Walk2D};
use brownian_sampler::{Ensemble, PathSpec, Sampler};
use serde::{Serialize, Deserialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "1d")]
    One,
    #[serde(rename = "2d")]
    Two,
}

impl Dimension {
    pub fn n_coords(self) -> usize {
        match self {
            Dimension::One => 1,
            Dimension::Two => 2,
        }
    }
}

/// Everything needed to reproduce an ensemble run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    pub dim: Dimension,
    pub kick: Kick,
    pub v: F,
    pub dt: F,
    /// Probability of moving along X; unused in 1D
    pub prob: F,
    pub n_steps: usize,
    pub n_paths: usize,
    pub save_stride: usize,
    pub seed: u64,
}

impl WalkConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.n_paths > 0, "at least one path is required");
        ensure!(self.v.is_finite(), "speed must be finite, got {}", self.v);
        ensure!(self.dt.is_finite() && self.dt > 0.0, "time step must be positive and finite, got {}", self.dt);
        if self.dim == Dimension::Two {
            Walk2D::new(self.v, self.prob)?;
        }
        Ok(())
    }

    pub fn spec(&self) -> PathSpec {
        PathSpec::new(self.n_steps, self.dt, self.save_stride)
    }

    pub fn simulate(&self) -> anyhow::Result<Ensemble> {
        self.validate()?;
        let spec = self.spec();

        let ensemble = match self.dim {
            Dimension::One => {
                let walk = Walk1D::new(self.v).with_kick(self.kick);
                Sampler::new(walk).run_from_origin(&spec, self.n_paths, self.seed)
            }
            Dimension::Two => {
                let walk = Walk2D::new(self.v, self.prob)?.with_kick(self.kick);
                Sampler::new(walk).run_from_origin(&spec, self.n_paths, self.seed)
            }
        };
        Ok(ensemble)
    }

    /// Expected MSD after `n_steps`, the same for both dimensions
    pub fn exact_msd(&self, n_steps: usize) -> F {
        Walk1D::new(self.v).exact_msd(n_steps, self.dt)
    }
}
