use serde::{Serialize, Deserialize};

use crate::PlotError;

/// Equal-width binning of a sample set.
///
/// `edges` has `counts.len() + 1` entries; the last bin is closed on both
/// sides so the maximum sample is counted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn from_samples(samples: &[f64], nbins: usize) -> Result<Self, PlotError> {
        if nbins == 0 {
            return Err(PlotError::ZeroBins);
        }
        if samples.is_empty() {
            return Err(PlotError::EmptySamples);
        }
        if let Some(&bad) = samples.iter().find(|s| !s.is_finite()) {
            return Err(PlotError::NonFiniteSample(bad));
        }

        let mut lo = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / nbins as f64;
        let mut edges: Vec<f64> = (0..nbins).map(|i| lo + i as f64 * width).collect();
        edges.push(hi);

        let mut counts = vec![0u64; nbins];
        for &s in samples {
            let idx = (((s - lo) / width) as usize).min(nbins - 1);
            counts[idx] += 1;
        }

        Ok(Self { edges, counts })
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect()
    }
}
