use brownian_models::{Walk1D, Walk2D};
use brownian_sampler::{Ensemble, PathSpec, Sampler};

fn with_threads<T: Send>(n: usize, f: impl FnOnce() -> T + Send) -> T {
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build()
        .unwrap()
        .install(f)
}

fn assert_same(a: &Ensemble, b: &Ensemble) {
    assert_eq!(a.n_paths(), b.n_paths());
    for (pa, pb) in a.paths.iter().zip(&b.paths) {
        assert_eq!(pa.times, pb.times);
        assert_eq!(pa.states, pb.states);
    }
}

#[test]
fn ensemble_independent_of_thread_count() {
    let sampler = Sampler::new(Walk2D::new(1.0, 0.5).unwrap());
    let spec = PathSpec::new(500, 0.01, 5);

    let single = with_threads(1, || sampler.run_from_origin(&spec, 256, 42));
    let multi = with_threads(4, || sampler.run_from_origin(&spec, 256, 42));

    assert_same(&single, &multi);
}

#[test]
fn msd_statistics_are_reproducible() {
    let sampler = Sampler::new(Walk1D::standard());
    let spec = PathSpec::new(1000, 1.0, 10);

    let a = sampler.run_from_origin(&spec, 128, 7);
    let b = sampler.run_from_origin(&spec, 128, 7);

    assert_same(&a, &b);
    assert_eq!(a.msd_curve().unwrap(), b.msd_curve().unwrap());
    assert_eq!(a.final_statistics().unwrap().msd, b.final_statistics().unwrap().msd);
}
