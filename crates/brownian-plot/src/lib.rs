//! Figure building for random-walk trajectories, histograms and MSD curves.
//!
//! Figures are plain data owned by a [`Canvas`]; drawing appends series to
//! the selected figure and the canvas is exported as a JSON document for an
//! external renderer.

pub mod figure;
pub mod histogram;

pub use figure::{Canvas, Figure, Scale, Series, CURVE_FIGSIZE, HISTOGRAM_FIGSIZE, HISTOGRAM_LINEWIDTH};
pub use histogram::Histogram;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PlotError {
    #[error("x and y differ in length: {x} vs {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("a histogram needs at least one bin")]
    ZeroBins,

    #[error("cannot bin an empty sample set")]
    EmptySamples,

    #[error("cannot bin non-finite sample {0}")]
    NonFiniteSample(f64),
}

/// Decorations and target figure for a drawing call.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotOptions {
    pub xlabel: String,
    pub ylabel: String,
    /// Series label; an empty legend draws the series unlabeled
    pub legend: String,
    pub title: String,
    pub xlog: bool,
    pub ylog: bool,
    pub figure: u32,
    /// Clear the figure before drawing
    pub clear: bool,
    /// Curve line width, default 1; histograms always use 2
    pub linewidth: Option<f64>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            xlabel: String::new(),
            ylabel: String::new(),
            legend: String::new(),
            title: String::new(),
            xlog: false,
            ylog: false,
            figure: 0,
            clear: false,
            linewidth: None,
        }
    }
}

impl PlotOptions {
    pub fn labels(mut self, xlabel: impl Into<String>, ylabel: impl Into<String>) -> Self {
        self.xlabel = xlabel.into();
        self.ylabel = ylabel.into();
        self
    }

    pub fn legend(mut self, legend: impl Into<String>) -> Self {
        self.legend = legend.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn log_log(mut self) -> Self {
        self.xlog = true;
        self.ylog = true;
        self
    }

    pub fn on_figure(mut self, figure: u32) -> Self {
        self.figure = figure;
        self
    }

    pub fn cleared(mut self) -> Self {
        self.clear = true;
        self
    }

    fn label(&self) -> Option<String> {
        (!self.legend.is_empty()).then(|| self.legend.clone())
    }

    fn decorate(&self, fig: &mut Figure) {
        if !self.title.is_empty() {
            fig.title = Some(self.title.clone());
        }
        if self.xlog {
            fig.xscale = Scale::Log;
        }
        if self.ylog {
            fig.yscale = Scale::Log;
        }
        fig.xlabel = self.xlabel.clone();
        fig.ylabel = self.ylabel.clone();
    }
}

/// Draw `y` against `x` as a line with point markers.
pub fn plot_curve(canvas: &mut Canvas, x: &[f64], y: &[f64], opts: &PlotOptions) -> Result<(), PlotError> {
    if x.len() != y.len() {
        return Err(PlotError::LengthMismatch { x: x.len(), y: y.len() });
    }

    let fig = canvas.figure(opts.figure, CURVE_FIGSIZE);
    if opts.clear {
        fig.clear();
    }
    fig.push(Series::Curve {
        x: x.to_vec(),
        y: y.to_vec(),
        label: opts.label(),
        linewidth: opts.linewidth.unwrap_or(1.0),
    });
    opts.decorate(fig);
    Ok(())
}

/// Draw a step histogram of `samples` with `nbins` equal-width bins.
///
/// Histograms are always drawn with line width 2; `opts.linewidth` is ignored.
pub fn plot_histogram(canvas: &mut Canvas, samples: &[f64], nbins: usize, opts: &PlotOptions) -> Result<(), PlotError> {
    let histogram = Histogram::from_samples(samples, nbins)?;

    let fig = canvas.figure(opts.figure, HISTOGRAM_FIGSIZE);
    if opts.clear {
        fig.clear();
    }
    fig.push(Series::StepHistogram {
        histogram,
        label: opts.label(),
        linewidth: HISTOGRAM_LINEWIDTH,
    });
    opts.decorate(fig);
    Ok(())
}
