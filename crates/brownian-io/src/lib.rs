use brownian_core::F;
use brownian_sampler::Ensemble;
use arrow::array::{Array, Float64Array, UInt64Array, UInt32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::{Serialize, Deserialize};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub mod cli;
pub mod config;
pub mod figures;

pub use cli::*;
pub use config::{Dimension, WalkConfig};
pub use figures::build_figures;

/// Run manifest for complete reproducibility
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub timestamp: String,
    #[serde(flatten)]
    pub config: WalkConfig,
    pub total_time: F,
    pub commit_hash: Option<String>,
    pub rust_version: String,
}

/// Parquet table of trajectories: (run_id, path_id, step, time, x0[, x1])
pub struct ParquetWriter {
    writer: ArrowWriter<File>,
    schema: Arc<Schema>,
    state_dim: usize,
}

impl RunManifest {
    pub fn new(config: WalkConfig) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            total_time: config.spec().total_time(),
            config,
            commit_hash: get_git_commit(),
            rust_version: get_rust_version(),
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&json)?;
        Ok(manifest)
    }
}

impl ParquetWriter {
    pub fn new(file_path: &Path, state_dim: usize) -> anyhow::Result<Self> {
        let file = File::create(file_path)?;

        let mut fields = vec![
            Field::new("run_id", DataType::Utf8, false),
            Field::new("path_id", DataType::UInt64, false),
            Field::new("step", DataType::UInt32, false),
            Field::new("time", DataType::Float64, false),
        ];

        // One column per coordinate
        for i in 0..state_dim {
            fields.push(Field::new(format!("x{}", i), DataType::Float64, false));
        }

        let schema = Arc::new(Schema::new(fields));
        let writer = ArrowWriter::try_new(file, schema.clone(), None)?;

        Ok(Self {
            writer,
            schema,
            state_dim,
        })
    }

    pub fn write_ensemble(&mut self, ensemble: &Ensemble, manifest: &RunManifest) -> anyhow::Result<()> {
        let n_rows: usize = ensemble.paths.iter().map(|p| p.len()).sum();
        if n_rows == 0 {
            return Ok(());
        }

        let mut path_ids = Vec::with_capacity(n_rows);
        let mut steps = Vec::with_capacity(n_rows);
        let mut times = Vec::with_capacity(n_rows);
        let mut coords = vec![Vec::with_capacity(n_rows); self.state_dim];

        for (path_id, path) in ensemble.paths.iter().enumerate() {
            for (idx, (time, state)) in path.times.iter().zip(&path.states).enumerate() {
                path_ids.push(path_id as u64);
                steps.push(ensemble.spec.saved_step_index(idx) as u32);
                times.push(*time);
                for (axis, column) in coords.iter_mut().enumerate() {
                    column.push(state.get(axis).copied().unwrap_or(0.0));
                }
            }
        }

        let mut arrays: Vec<Arc<dyn Array>> = vec![
            Arc::new(StringArray::from(vec![manifest.run_id.as_str(); n_rows])),
            Arc::new(UInt64Array::from(path_ids)),
            Arc::new(UInt32Array::from(steps)),
            Arc::new(Float64Array::from(times)),
        ];
        for column in coords {
            arrays.push(Arc::new(Float64Array::from(column)));
        }

        let batch = RecordBatch::try_new(self.schema.clone(), arrays)?;
        self.writer.write(&batch)?;
        Ok(())
    }

    pub fn close(self) -> anyhow::Result<()> {
        self.writer.close()?;
        Ok(())
    }
}

/// Write ensemble to Parquet with manifest
pub fn write_ensemble_with_manifest(
    ensemble: &Ensemble,
    manifest: &RunManifest,
    parquet_path: &Path,
    manifest_path: &Path,
) -> anyhow::Result<()> {
    let state_dim = ensemble.state_dim().unwrap_or(manifest.config.dim.n_coords());

    let mut writer = ParquetWriter::new(parquet_path, state_dim)?;
    writer.write_ensemble(ensemble, manifest)?;
    writer.close()?;

    manifest.save_to_file(manifest_path)?;

    println!("Wrote {} paths to {}", ensemble.n_paths(), parquet_path.display());
    println!("Wrote manifest to {}", manifest_path.display());

    Ok(())
}

/// Manifest file written next to a Parquet output
pub fn manifest_path_for(out: &Path) -> std::path::PathBuf {
    out.with_extension("manifest.json")
}

pub(crate) fn get_git_commit() -> Option<String> {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
}

fn get_rust_version() -> String {
    std::process::Command::new("rustc")
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout).ok()
            } else {
                None
            }
        })
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brownian_core::Kick;
    use parquet::file::reader::{FileReader, SerializedFileReader};

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("brownian-io-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config() -> WalkConfig {
        WalkConfig {
            dim: Dimension::Two,
            kick: Kick::Sign,
            v: 2.0,
            dt: 0.25,
            prob: 0.3,
            n_steps: 10,
            n_paths: 3,
            save_stride: 4,
            seed: 5,
        }
    }

    #[test]
    fn manifest_round_trips_config() {
        let dir = scratch_dir("manifest");
        let manifest = RunManifest::new(config());
        let path = dir.join("run.manifest.json");
        manifest.save_to_file(&path).unwrap();

        let loaded = RunManifest::load_from_file(&path).unwrap();
        assert_eq!(loaded.config, config());
        assert_eq!(loaded.run_id, manifest.run_id);
        assert_eq!(loaded.total_time, 2.5);
    }

    #[test]
    fn parquet_has_one_row_per_saved_state() {
        let dir = scratch_dir("parquet");
        let cfg = config();
        let ensemble = cfg.simulate().unwrap();
        let manifest = RunManifest::new(cfg);

        let out = dir.join("walk.parquet");
        let manifest_path = manifest_path_for(&out);
        write_ensemble_with_manifest(&ensemble, &manifest, &out, &manifest_path).unwrap();

        let reader = SerializedFileReader::new(File::open(&out).unwrap()).unwrap();
        let meta = reader.metadata().file_metadata();
        // steps 0, 4, 8 and the final 10 for each of 3 paths
        assert_eq!(meta.num_rows(), 12);
        let columns: Vec<&str> = meta.schema_descr().columns().iter().map(|c| c.name()).collect();
        assert_eq!(columns, vec!["run_id", "path_id", "step", "time", "x0", "x1"]);
        assert!(manifest_path.ends_with("walk.manifest.json"));
        assert!(manifest_path.exists());
    }
}
