use rand::Rng;

use crate::State;

/// A discrete random walk that can advance a [`State`] by one time step.
pub trait Walker: Send + Sync {
    /// Number of coordinates in the walked position.
    fn dim(&self) -> usize;

    fn advance<R: Rng + ?Sized>(&self, x: &State, dt: f64, rng: &mut R) -> State;
}
