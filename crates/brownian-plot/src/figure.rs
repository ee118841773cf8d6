use std::collections::BTreeMap;
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::histogram::Histogram;

/// Figure size used for curves, in inches.
pub const CURVE_FIGSIZE: (f64, f64) = (10.0, 5.714);
/// Figure size used for histograms, in inches.
pub const HISTOGRAM_FIGSIZE: (f64, f64) = (7.0, 5.0);
pub const HISTOGRAM_LINEWIDTH: f64 = 2.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    #[default]
    Linear,
    Log,
}

/// One drawn element of a figure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Series {
    /// Line through the points with a marker on each one
    Curve {
        x: Vec<f64>,
        y: Vec<f64>,
        label: Option<String>,
        linewidth: f64,
    },
    /// Unfilled outline of a histogram
    StepHistogram {
        histogram: Histogram,
        label: Option<String>,
        linewidth: f64,
    },
}

impl Series {
    pub fn label(&self) -> Option<&str> {
        match self {
            Series::Curve { label, .. } | Series::StepHistogram { label, .. } => label.as_deref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub id: u32,
    pub size: (f64, f64),
    pub title: Option<String>,
    pub xlabel: String,
    pub ylabel: String,
    pub xscale: Scale,
    pub yscale: Scale,
    pub legend: bool,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new(id: u32, size: (f64, f64)) -> Self {
        Self {
            id,
            size,
            title: None,
            xlabel: String::new(),
            ylabel: String::new(),
            xscale: Scale::Linear,
            yscale: Scale::Linear,
            legend: false,
            series: Vec::new(),
        }
    }

    /// Drop everything drawn so far, keeping the figure's identity and size.
    pub fn clear(&mut self) {
        *self = Self::new(self.id, self.size);
    }

    pub fn push(&mut self, series: Series) {
        if series.label().is_some() {
            self.legend = true;
        }
        self.series.push(series);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Owner of every figure drawn in a session, addressed by figure number.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Canvas {
    figures: BTreeMap<u32, Figure>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select figure `id`, creating it with `size` if it does not exist yet.
    pub fn figure(&mut self, id: u32, size: (f64, f64)) -> &mut Figure {
        self.figures.entry(id).or_insert_with(|| Figure::new(id, size))
    }

    pub fn get(&self, id: u32) -> Option<&Figure> {
        self.figures.get(&id)
    }

    pub fn figures(&self) -> impl Iterator<Item = &Figure> {
        self.figures.values()
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load_json(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
