use rand::Rng;

use crate::noise::Kick;
use crate::F;

/// Advance a 1D position by `±v*dt`, the sign drawn uniformly.
pub fn step<R: Rng + ?Sized>(x: F, v: F, dt: F, rng: &mut R) -> F {
    step_with(Kick::Sign, x, v, dt, rng)
}

/// 1D step with an explicit kick distribution: `x + eps*v*dt`.
pub fn step_with<R: Rng + ?Sized>(kick: Kick, x: F, v: F, dt: F, rng: &mut R) -> F {
    let eps = kick.sample(rng);
    x + eps * v * dt
}

/// Advance a 2D position along one axis only.
///
/// X moves when a uniform draw in `[0, 1)` is strictly below `prob`,
/// otherwise Y moves. `prob` is not range-checked here; see
/// `Walk2D::new` for the validated entry point.
pub fn step_2d<R: Rng + ?Sized>(x: F, y: F, v: F, dt: F, prob: F, rng: &mut R) -> (F, F) {
    step_2d_with(Kick::Sign, x, y, v, dt, prob, rng)
}

pub fn step_2d_with<R: Rng + ?Sized>(
    kick: Kick,
    x: F,
    y: F,
    v: F,
    dt: F,
    prob: F,
    rng: &mut R,
) -> (F, F) {
    // Kick first, then the axis draw.
    let eps = kick.sample(rng);
    let a: F = rng.gen();

    if a < prob {
        (x + eps * v * dt, y)
    } else {
        (x, y + eps * v * dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoiseGenerator;

    #[test]
    fn zero_speed_leaves_position() {
        let mut rng = NoiseGenerator::new(3);
        assert_eq!(step(1.5, 0.0, 0.1, &mut rng), 1.5);
        assert_eq!(step_2d(1.5, -2.0, 1.0, 0.0, 0.5, &mut rng), (1.5, -2.0));
    }

    #[test]
    fn nan_propagates() {
        let mut rng = NoiseGenerator::new(3);
        assert!(step(f64::NAN, 1.0, 1.0, &mut rng).is_nan());
    }
}
