use brownian_core::mean_squared_displacement_2d;
use brownian_models::Walk2D;
use brownian_plot::{plot_curve, Canvas, PlotOptions};
use brownian_sampler::{PathSpec, Sampler};
use clap::Parser;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Simulate 2D Brownian walks moving along one axis per step")]
struct Args {
    #[arg(long, default_value_t = 2000)]
    steps: usize,

    #[arg(long, default_value_t = 500)]
    paths: usize,

    #[arg(long, default_value_t = 1.0)]
    v: f64,

    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    /// Probability of moving along X
    #[arg(long, default_value_t = 0.5)]
    prob: f64,

    #[arg(long, default_value_t = 3)]
    plot_paths: usize,

    #[arg(long, default_value = "runs/walk_2d.figures.json")]
    out: PathBuf,

    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let walk = Walk2D::new(args.v, args.prob)?;
    let spec = PathSpec::new(args.steps, args.dt, 1);
    let ensemble = Sampler::new(walk.clone()).run_from_origin(&spec, args.paths, args.seed);

    println!("Simulated {} 2D walks of {} steps (prob = {})", args.paths, args.steps, args.prob);

    let mut canvas = Canvas::new();
    for (i, path) in ensemble.paths.iter().take(args.plot_paths).enumerate() {
        plot_curve(
            &mut canvas,
            &path.coordinate(0),
            &path.coordinate(1),
            &PlotOptions::default()
                .labels("x", "y")
                .legend(format!("particle {}", i))
                .title("2D Brownian trajectories"),
        )?;
    }

    let xk = ensemble.final_coordinates(0);
    let yk = ensemble.final_coordinates(1);
    let msd = mean_squared_displacement_2d(&xk, &yk)?;
    println!("Mean squared displacement: {:.3}", msd);
    println!("Expected n (v dt)^2:       {:.3}", walk.exact_msd(args.steps, args.dt));

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    canvas.save_json(&args.out)?;
    println!("Saved figures to {}", args.out.display());

    Ok(())
}
