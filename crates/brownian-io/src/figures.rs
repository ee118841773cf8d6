use brownian_plot::{plot_curve, plot_histogram, Canvas, PlotOptions};
use brownian_sampler::Ensemble;

use crate::config::{Dimension, WalkConfig};

pub const TRAJECTORY_FIGURE: u32 = 0;
pub const HISTOGRAM_FIGURE: u32 = 1;
pub const MSD_FIGURE: u32 = 2;

/// Trajectories, final-position histogram and MSD curve of an ensemble.
pub fn build_figures(
    ensemble: &Ensemble,
    config: &WalkConfig,
    plot_paths: usize,
    bins: usize,
) -> anyhow::Result<Canvas> {
    let mut canvas = Canvas::new();

    for (i, path) in ensemble.paths.iter().take(plot_paths).enumerate() {
        let opts = PlotOptions::default()
            .legend(format!("path {}", i))
            .on_figure(TRAJECTORY_FIGURE);
        match config.dim {
            Dimension::One => {
                let opts = opts.labels("t", "x").title("Brownian trajectories");
                plot_curve(&mut canvas, &path.times, &path.coordinate(0), &opts)?;
            }
            Dimension::Two => {
                let opts = opts.labels("x", "y").title("Brownian trajectories in the plane");
                plot_curve(&mut canvas, &path.coordinate(0), &path.coordinate(1), &opts)?;
            }
        }
    }

    let axes = ["x", "y"];
    for (axis, name) in axes.iter().enumerate().take(config.dim.n_coords()) {
        let opts = PlotOptions::default()
            .labels(*name, "count")
            .legend(format!("final {}", name))
            .title("Final positions")
            .on_figure(HISTOGRAM_FIGURE);
        plot_histogram(&mut canvas, &ensemble.final_coordinates(axis), bins, &opts)?;
    }

    // log-log axes cannot show t = 0
    let mut times = Vec::new();
    let mut msd = Vec::new();
    let mut expected = Vec::new();
    for (idx, (t, value)) in ensemble.msd_curve()?.into_iter().enumerate() {
        if t > 0.0 {
            times.push(t);
            msd.push(value);
            expected.push(config.exact_msd(ensemble.spec.saved_step_index(idx)));
        }
    }

    let opts = PlotOptions::default()
        .labels("t", "mean squared displacement")
        .title("Mean squared displacement")
        .log_log()
        .on_figure(MSD_FIGURE);
    plot_curve(&mut canvas, &times, &msd, &opts.clone().legend("simulated"))?;
    plot_curve(&mut canvas, &times, &expected, &opts.legend("n (v dt)^2"))?;

    Ok(canvas)
}
