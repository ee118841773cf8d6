use brownian_core::{mean_squared_displacement, step, NoiseGenerator};
use brownian_models::Walk1D;
use brownian_plot::{plot_curve, plot_histogram, Canvas, PlotOptions};
use brownian_sampler::{PathSpec, Sampler};
use clap::Parser;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate 1D Brownian walks and their mean squared displacement")]
struct Args {
    #[arg(long, default_value_t = 1000)]
    steps: usize,

    #[arg(long, default_value_t = 1000)]
    paths: usize,

    #[arg(long, default_value_t = 1.0)]
    v: f64,

    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    #[arg(long, default_value = "runs/walk_1d.figures.json")]
    out: PathBuf,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut canvas = Canvas::new();

    // One trajectory driven step by step
    let mut rng = NoiseGenerator::new(args.seed);
    let mut times = Vec::with_capacity(args.steps + 1);
    let mut xs = Vec::with_capacity(args.steps + 1);
    let mut x = 0.0;
    times.push(0.0);
    xs.push(x);
    for i in 1..=args.steps {
        x = step(x, args.v, args.dt, &mut rng);
        times.push(i as f64 * args.dt);
        xs.push(x);
    }
    println!("Single walk: final position {:.3} after {} steps", x, args.steps);

    plot_curve(
        &mut canvas,
        &times,
        &xs,
        &PlotOptions::default().labels("t", "x").title("Brownian trajectory"),
    )?;

    // Ensemble of independent walks
    let walk = Walk1D::new(args.v);
    let spec = PathSpec::new(args.steps, args.dt, 1);
    let ensemble = Sampler::new(walk.clone()).run_from_origin(&spec, args.paths, args.seed);

    let finals = ensemble.final_coordinates(0);
    let msd = mean_squared_displacement(&finals)?;
    println!("Ensemble of {} walks:", args.paths);
    println!("  mean squared displacement: {:.3}", msd);
    println!("  expected n (v dt)^2:       {:.3}", walk.exact_msd(args.steps, args.dt));

    plot_histogram(
        &mut canvas,
        &finals,
        30,
        &PlotOptions::default()
            .labels("x", "count")
            .title("Final positions")
            .on_figure(1),
    )?;

    let (t, sigma2): (Vec<f64>, Vec<f64>) = ensemble
        .msd_curve()?
        .into_iter()
        .filter(|&(t, _)| t > 0.0)
        .unzip();
    plot_curve(
        &mut canvas,
        &t,
        &sigma2,
        &PlotOptions::default()
            .labels("t", "<x^2>")
            .title("Mean squared displacement")
            .log_log()
            .on_figure(2),
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    canvas.save_json(&args.out)?;
    println!("Saved figures to {}", args.out.display());

    Ok(())
}
