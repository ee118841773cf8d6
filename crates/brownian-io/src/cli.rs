use crate::{build_figures, manifest_path_for, write_ensemble_with_manifest, Dimension, RunManifest, WalkConfig};
use brownian_core::Kick;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "brownian")]
#[command(about = "Random-walk simulation of Brownian motion in one and two dimensions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sample walk paths and write them to Parquet
    Sample {
        #[command(flatten)]
        walk: WalkArgs,

        /// Output Parquet file
        #[arg(long)]
        out: PathBuf,

        /// Also write a JSON figure document
        #[arg(long)]
        figures: Option<PathBuf>,

        /// Number of trajectories to draw
        #[arg(long, default_value = "5")]
        plot_paths: usize,

        /// Histogram bins for final positions
        #[arg(long, default_value = "30")]
        bins: usize,
    },

    /// Print the mean squared displacement against time
    Msd {
        #[command(flatten)]
        walk: WalkArgs,

        /// Print every nth saved time
        #[arg(long, default_value = "100")]
        every: usize,

        /// Also write a JSON figure document
        #[arg(long)]
        figures: Option<PathBuf>,
    },

    /// Re-run the configuration recorded in a manifest
    Replay {
        /// Manifest written by `sample`
        #[arg(long)]
        manifest: PathBuf,

        /// Output Parquet file
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args, Clone, Debug)]
pub struct WalkArgs {
    /// Walk dimension
    #[arg(long, value_enum, default_value = "1d")]
    pub dim: DimType,

    /// Distribution of the signed kick
    #[arg(long, value_enum, default_value = "sign")]
    pub kick: KickType,

    /// Particle speed
    #[arg(long, default_value = "1.0")]
    pub v: f64,

    /// Time step size
    #[arg(long, default_value = "1.0")]
    pub dt: f64,

    /// Probability of moving along X (2D only)
    #[arg(long, default_value = "0.5")]
    pub prob: f64,

    /// Number of time steps
    #[arg(long, default_value = "1000")]
    pub steps: usize,

    /// Number of paths to simulate
    #[arg(long, default_value = "100")]
    pub paths: usize,

    /// Save every nth step (default: save all)
    #[arg(long, default_value = "1")]
    pub save_stride: usize,

    /// Random seed
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum DimType {
    #[value(name = "1d")]
    One,
    #[value(name = "2d")]
    Two,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum KickType {
    #[value(name = "sign")]
    Sign,
    #[value(name = "gaussian")]
    Gaussian,
}

impl From<DimType> for Dimension {
    fn from(dim: DimType) -> Self {
        match dim {
            DimType::One => Dimension::One,
            DimType::Two => Dimension::Two,
        }
    }
}

impl From<KickType> for Kick {
    fn from(kick: KickType) -> Self {
        match kick {
            KickType::Sign => Kick::Sign,
            KickType::Gaussian => Kick::Gaussian,
        }
    }
}

impl From<WalkArgs> for WalkConfig {
    fn from(args: WalkArgs) -> Self {
        WalkConfig {
            dim: args.dim.into(),
            kick: args.kick.into(),
            v: args.v,
            dt: args.dt,
            prob: args.prob,
            n_steps: args.steps,
            n_paths: args.paths,
            save_stride: args.save_stride,
            seed: args.seed,
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Sample { walk, out, figures, plot_paths, bins } => {
            run_sample_command(walk.into(), &out, figures.as_deref(), plot_paths, bins)
        }
        Commands::Msd { walk, every, figures } => run_msd_command(walk.into(), every, figures.as_deref()),
        Commands::Replay { manifest, out } => run_replay_command(&manifest, &out),
    }
}

pub fn run_sample_command(
    config: WalkConfig,
    out: &Path,
    figures: Option<&Path>,
    plot_paths: usize,
    bins: usize,
) -> anyhow::Result<()> {
    print_header("Brownian Sampling", &config);
    println!("Output: {:?}", out);

    let ensemble = config.simulate()?;
    let manifest = RunManifest::new(config.clone());

    create_parent_dir(out)?;
    write_ensemble_with_manifest(&ensemble, &manifest, out, &manifest_path_for(out))?;

    if let Some(figures) = figures {
        create_parent_dir(figures)?;
        build_figures(&ensemble, &config, plot_paths, bins)?.save_json(figures)?;
        println!("Wrote figures to {}", figures.display());
    }

    let stats = ensemble.final_statistics()?;
    println!();
    println!("Summary Statistics:");
    println!("==================");
    println!("Paths completed: {}", stats.n_paths);
    println!("Final position means: {:?}", stats.means.as_slice());
    println!("Final position stds: {:?}",
             stats.variances.iter().map(|v| v.sqrt()).collect::<Vec<_>>());
    println!("Mean squared displacement: {:.6} (expected {:.6})",
             stats.msd, config.exact_msd(config.n_steps));

    println!("✓ Simulation completed successfully!");
    Ok(())
}

pub fn run_msd_command(config: WalkConfig, every: usize, figures: Option<&Path>) -> anyhow::Result<()> {
    print_header("Mean Squared Displacement", &config);

    let ensemble = config.simulate()?;
    let curve = ensemble.msd_curve()?;
    let every = every.max(1);
    let last = curve.len().saturating_sub(1);

    println!();
    println!("{:>12} {:>16} {:>16} {:>8}", "t", "msd", "n (v dt)^2", "ratio");
    for (idx, (t, msd)) in curve.iter().enumerate() {
        if idx % every != 0 && idx != last {
            continue;
        }
        let expected = config.exact_msd(ensemble.spec.saved_step_index(idx));
        let ratio = if expected > 0.0 { msd / expected } else { f64::NAN };
        println!("{:>12.4} {:>16.6} {:>16.6} {:>8.4}", t, msd, expected, ratio);
    }

    if let Some(figures) = figures {
        create_parent_dir(figures)?;
        build_figures(&ensemble, &config, 0, 1)?.save_json(figures)?;
        println!("Wrote figures to {}", figures.display());
    }

    Ok(())
}

pub fn run_replay_command(manifest_path: &Path, out: &Path) -> anyhow::Result<()> {
    let original = RunManifest::load_from_file(manifest_path)?;
    println!("Replaying run {} from {}", original.run_id, original.timestamp);
    if original.commit_hash.is_some() && original.commit_hash != crate::get_git_commit() {
        eprintln!("Warning: manifest was recorded at a different commit; output may differ.");
    }

    run_sample_command(original.config, out, None, 0, 1)
}

fn print_header(title: &str, config: &WalkConfig) {
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!("Dimension: {:?}", config.dim);
    println!("Kick: {:?}", config.kick);
    println!("v: {}", config.v);
    println!("dt: {:.6}", config.dt);
    if config.dim == Dimension::Two {
        println!("prob: {}", config.prob);
    }
    println!("Steps: {}", config.n_steps);
    println!("Paths: {}", config.n_paths);
    println!("Save stride: {}", config.save_stride);
    println!("Seed: {}", config.seed);
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::record_batch::RecordBatch;
    use clap::CommandFactory;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_a_2d_sample_command() {
        let cli = Cli::try_parse_from([
            "brownian", "sample", "--dim", "2d", "--prob", "0.25", "--steps", "50",
            "--paths", "10", "--out", "runs/walk.parquet",
        ])
        .unwrap();

        match cli.command {
            Commands::Sample { walk, out, figures, .. } => {
                let config = WalkConfig::from(walk);
                assert_eq!(config.dim, Dimension::Two);
                assert_eq!(config.kick, Kick::Sign);
                assert_eq!(config.prob, 0.25);
                assert_eq!(config.n_steps, 50);
                assert_eq!(config.n_paths, 10);
                assert_eq!(config.seed, 42);
                assert_eq!(out, PathBuf::from("runs/walk.parquet"));
                assert!(figures.is_none());
            }
            _ => panic!("expected sample"),
        }
    }

    #[test]
    fn replay_reproduces_sampled_rows() {
        let dir = std::env::temp_dir().join(format!("brownian-cli-{}", std::process::id()));
        let first = dir.join("first.parquet");
        let second = dir.join("second.parquet");
        let config = WalkConfig {
            dim: Dimension::One,
            kick: Kick::Gaussian,
            v: 1.0,
            dt: 0.1,
            prob: 0.5,
            n_steps: 25,
            n_paths: 4,
            save_stride: 5,
            seed: 3,
        };

        run_sample_command(config, &first, None, 0, 1).unwrap();
        run_replay_command(&manifest_path_for(&first), &second).unwrap();

        let replayed = RunManifest::load_from_file(&manifest_path_for(&second)).unwrap();
        let original = RunManifest::load_from_file(&manifest_path_for(&first)).unwrap();
        assert_eq!(replayed.config, original.config);
        assert_ne!(replayed.run_id, original.run_id);

        let rows_a = read_batches(&first);
        let rows_b = read_batches(&second);
        assert_eq!(rows_a.len(), rows_b.len());
        let mut n_rows = 0;
        for (a, b) in rows_a.iter().zip(&rows_b) {
            assert_eq!(a.schema(), b.schema());
            n_rows += a.num_rows();
            // every column but run_id
            for col in 1..a.num_columns() {
                assert_eq!(a.column(col).to_data(), b.column(col).to_data(), "column {}", a.schema().field(col).name());
            }
        }
        // steps 0, 5, 10, 15, 20 and the final 25 for each of 4 paths
        assert_eq!(n_rows, 24);
    }

    fn read_batches(path: &Path) -> Vec<RecordBatch> {
        ParquetRecordBatchReaderBuilder::try_new(std::fs::File::open(path).unwrap())
            .unwrap()
            .build()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }
}
