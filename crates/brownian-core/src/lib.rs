pub mod state;
pub mod noise;
pub mod step;
pub mod walker;
pub mod msd;
pub mod error;

// Core types
pub type F = f64;
pub use state::{State, Time};
pub use noise::{NoiseGenerator, Kick, random_sign};

// Step generators
pub use step::{step, step_with, step_2d, step_2d_with};
pub use walker::Walker;

// Ensemble statistics
pub use msd::{mean_squared_displacement, mean_squared_displacement_2d, ensemble_msd};
pub use error::{WalkError, StatsError};
