use brownian_core::{ensemble_msd, NoiseGenerator, State, StatsError, Time, Walker, F};
use nalgebra::DVector;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

/// Path specification for simulation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathSpec {
    pub n_steps: usize,
    pub dt: F,
    pub save_stride: usize,  // Save every nth step
}

/// Single trajectory
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Path {
    pub times: Vec<Time>,
    pub states: Vec<State>,
}

/// Collection of paths (ensemble)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Ensemble {
    pub paths: Vec<Path>,
    pub spec: PathSpec,
}

/// Statistical summary of the final positions of an ensemble
#[derive(Clone, Debug)]
pub struct EnsembleStats {
    pub n_paths: usize,
    pub means: DVector<F>,
    pub variances: DVector<F>,
    pub msd: F,
}

/// Main sampler for path generation
pub struct Sampler<W: Walker> {
    pub walker: W,
}

impl<W: Walker> Sampler<W> {
    pub fn new(walker: W) -> Self {
        Self { walker }
    }

    /// Run one path per initial state, in parallel.
    ///
    /// Path `i` draws from `NoiseGenerator::from_path_id(global_seed, i)`, so
    /// the ensemble does not depend on how rayon schedules the work.
    pub fn run_paths(&self, spec: &PathSpec, x0s: &[State], global_seed: u64) -> Ensemble {
        let paths: Vec<Path> = x0s
            .par_iter()
            .enumerate()
            .map(|(path_id, x0)| {
                let mut rng = NoiseGenerator::from_path_id(global_seed, path_id as u64);
                self.run_single_path(spec, x0.clone(), &mut rng)
            })
            .collect();

        Ensemble {
            paths,
            spec: spec.clone(),
        }
    }

    /// Run `n_paths` paths that all start at the origin.
    pub fn run_from_origin(&self, spec: &PathSpec, n_paths: usize, global_seed: u64) -> Ensemble {
        let x0s = vec![State::origin(self.walker.dim()); n_paths];
        self.run_paths(spec, &x0s, global_seed)
    }

    /// Run a single path (called by run_paths)
    pub fn run_single_path(&self, spec: &PathSpec, mut x: State, rng: &mut NoiseGenerator) -> Path {
        let mut path = Path::with_capacity(spec.saved_steps() + 1);

        for step in 0..spec.n_steps {
            if step % spec.save_stride == 0 {
                path.push(spec.time_at(step), x.clone());
            }
            x = self.walker.advance(&x, spec.dt, rng);
        }

        // Step n_steps is never reached inside the loop
        path.push(spec.total_time(), x);

        path
    }
}

impl PathSpec {
    pub fn new(n_steps: usize, dt: F, save_stride: usize) -> Self {
        Self { n_steps, dt, save_stride: save_stride.max(1) }
    }

    pub fn time_at(&self, step: usize) -> Time {
        step as F * self.dt
    }

    pub fn total_time(&self) -> Time {
        self.time_at(self.n_steps)
    }

    /// Number of states saved on the stride grid, not counting the final one
    pub fn saved_steps(&self) -> usize {
        (self.n_steps + self.save_stride - 1) / self.save_stride
    }

    /// Step number of the `idx`-th saved state of a path
    pub fn saved_step_index(&self, idx: usize) -> usize {
        (idx * self.save_stride).min(self.n_steps)
    }
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, t: Time, state: State) {
        self.times.push(t);
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn final_state(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn final_time(&self) -> Option<Time> {
        self.times.last().copied()
    }

    /// Values of one coordinate along the path
    pub fn coordinate(&self, axis: usize) -> Vec<F> {
        self.states.iter().filter_map(|s| s.get(axis).copied()).collect()
    }
}

impl Ensemble {
    pub fn new(paths: Vec<Path>, spec: PathSpec) -> Self {
        Self { paths, spec }
    }

    pub fn n_paths(&self) -> usize {
        self.paths.len()
    }

    pub fn state_dim(&self) -> Option<usize> {
        self.paths
            .iter()
            .find_map(|p| p.states.first())
            .map(State::dim)
    }

    pub fn final_states(&self) -> Vec<&State> {
        self.paths.iter().filter_map(|p| p.final_state()).collect()
    }

    /// One coordinate of every final position, e.g. for a histogram
    pub fn final_coordinates(&self, axis: usize) -> Vec<F> {
        self.final_states()
            .into_iter()
            .filter_map(|s| s.get(axis).copied())
            .collect()
    }

    pub fn final_statistics(&self) -> Result<EnsembleStats, StatsError> {
        let final_states = self.final_states();
        if final_states.is_empty() {
            return Err(StatsError::EmptyEnsemble);
        }

        let n = final_states.len();
        let dim = final_states[0].dim();
        let mut means: DVector<F> = DVector::zeros(dim);
        let mut variances: DVector<F> = DVector::zeros(dim);

        for state in &final_states {
            means += &state.0;
        }
        means /= n as F;

        for state in &final_states {
            let diff = &state.0 - &means;
            variances += diff.component_mul(&diff);
        }
        variances /= (n - 1).max(1) as F;

        Ok(EnsembleStats {
            n_paths: n,
            means,
            variances,
            msd: ensemble_msd(final_states.iter().copied())?,
        })
    }

    /// MSD across all paths at every saved time
    pub fn msd_curve(&self) -> Result<Vec<(Time, F)>, StatsError> {
        let first = self.paths.first().ok_or(StatsError::EmptyEnsemble)?;

        first
            .times
            .iter()
            .enumerate()
            .map(|(idx, &t)| {
                ensemble_msd(self.paths.iter().filter_map(|p| p.states.get(idx))).map(|msd| (t, msd))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use brownian_models::{Walk1D, Walk2D};

    #[test]
    fn test_path_spec() {
        let spec = PathSpec::new(1000, 0.01, 10);
        assert_relative_eq!(spec.total_time(), 10.0);
        assert_eq!(spec.saved_steps(), 100);
        assert_eq!(PathSpec::new(10, 1.0, 0).save_stride, 1);
    }

    #[test]
    fn test_single_walk_path() {
        let sampler = Sampler::new(Walk1D::standard());
        let spec = PathSpec::new(100, 0.01, 1);

        let ensemble = sampler.run_from_origin(&spec, 1, 42);

        assert_eq!(ensemble.n_paths(), 1);
        let path = &ensemble.paths[0];
        assert_eq!(path.len(), 101);
        assert_eq!(path.states[0], State::origin(1));

        for i in 1..path.len() {
            assert_relative_eq!(path.times[i] - path.times[i - 1], spec.dt, epsilon = 1e-12);
            let dx = path.states[i][0] - path.states[i - 1][0];
            assert_relative_eq!(dx.abs(), 0.01, epsilon = 1e-12);
        }
    }

    #[test]
    fn stride_keeps_final_state() {
        let sampler = Sampler::new(Walk1D::standard());
        let spec = PathSpec::new(10, 1.0, 4);
        let path = &sampler.run_from_origin(&spec, 1, 7).paths[0];

        // steps 0, 4, 8 on the grid plus the final one at 10
        assert_eq!(path.times, vec![0.0, 4.0, 8.0, 10.0]);
        let steps: Vec<usize> = (0..path.len()).map(|i| spec.saved_step_index(i)).collect();
        assert_eq!(steps, vec![0, 4, 8, 10]);
    }

    #[test]
    fn final_state_is_kept_when_dt_is_zero() {
        let sampler = Sampler::new(Walk1D::standard());
        let spec = PathSpec::new(10, 0.0, 4);
        let path = &sampler.run_from_origin(&spec, 1, 7).paths[0];

        assert_eq!(path.len(), 4);
        let steps: Vec<usize> = (0..path.len()).map(|i| spec.saved_step_index(i)).collect();
        assert_eq!(steps, vec![0, 4, 8, 10]);
        assert!(path.times.iter().all(|&t| t == 0.0));
    }

    #[test]
    fn stride_dividing_steps_saves_final_state_once() {
        let sampler = Sampler::new(Walk1D::standard());
        let spec = PathSpec::new(8, 1.0, 4);
        let path = &sampler.run_from_origin(&spec, 1, 7).paths[0];

        assert_eq!(path.times, vec![0.0, 4.0, 8.0]);
    }

    #[test]
    fn zero_steps_saves_initial_state() {
        let sampler = Sampler::new(Walk1D::standard());
        let spec = PathSpec::new(0, 1.0, 1);
        let x0 = State::new(vec![2.5]);
        let ensemble = sampler.run_paths(&spec, &[x0.clone()], 1);

        assert_eq!(ensemble.paths[0].times, vec![0.0]);
        assert_eq!(ensemble.paths[0].states, vec![x0]);
    }

    #[test]
    fn ensemble_is_reproducible() {
        let sampler = Sampler::new(Walk2D::isotropic());
        let spec = PathSpec::new(200, 0.5, 1);

        let a = sampler.run_from_origin(&spec, 64, 99);
        let b = sampler.run_from_origin(&spec, 64, 99);
        let c = sampler.run_from_origin(&spec, 64, 100);

        for (pa, pb) in a.paths.iter().zip(&b.paths) {
            assert_eq!(pa.states, pb.states);
        }
        assert_ne!(a.paths[0].states, c.paths[0].states);
    }

    #[test]
    fn final_statistics_of_known_ensemble() {
        let spec = PathSpec::new(1, 1.0, 1);
        let finals = [State::new(vec![1.0, 2.0]), State::new(vec![3.0, -2.0])];
        let paths = finals
            .iter()
            .map(|s| {
                let mut p = Path::new();
                p.push(1.0, s.clone());
                p
            })
            .collect();
        let ensemble = Ensemble::new(paths, spec);

        let stats = ensemble.final_statistics().unwrap();
        assert_eq!(stats.n_paths, 2);
        assert_relative_eq!(stats.means[0], 2.0);
        assert_relative_eq!(stats.means[1], 0.0);
        assert_relative_eq!(stats.variances[0], 2.0);
        assert_relative_eq!(stats.variances[1], 8.0);
        // (1 + 4 + 9 + 4) / 2
        assert_relative_eq!(stats.msd, 9.0);
        assert_eq!(ensemble.final_coordinates(1), vec![2.0, -2.0]);
    }

    #[test]
    fn empty_ensemble_is_an_error() {
        let ensemble = Ensemble::new(Vec::new(), PathSpec::new(10, 1.0, 1));
        assert_eq!(ensemble.final_statistics().unwrap_err(), StatsError::EmptyEnsemble);
        assert_eq!(ensemble.msd_curve().unwrap_err(), StatsError::EmptyEnsemble);
    }

    #[test]
    fn msd_curve_starts_at_zero_and_tracks_steps() {
        let sampler = Sampler::new(Walk1D::standard());
        let spec = PathSpec::new(50, 1.0, 1);
        let curve = sampler.run_from_origin(&spec, 32, 5).msd_curve().unwrap();

        assert_eq!(curve.len(), 51);
        assert_eq!(curve[0], (0.0, 0.0));
        // after one unit step every path sits at ±1
        assert_relative_eq!(curve[1].1, 1.0);
    }
}
