//! One end-to-end recoloring job: load, recolor, save.

use image::ImageFormat;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;

use shepard_recolor::{Palette, ProcessingConfig, ProgressSink, RecolorError, Recolorer};

use crate::imaging::{default_output_path, load_image, save_image, ImageIoError};
use crate::themes::{ThemeError, ThemeRegistry};

#[derive(Debug, Error)]
pub enum JobError {
    #[error("theme validation failed: {0}")]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Image(#[from] ImageIoError),

    #[error("recoloring failed: {0}")]
    Recolor(#[from] RecolorError),
}

/// What to recolor and how.
#[derive(Debug, Clone)]
pub struct RecolorJob {
    pub input: PathBuf,
    /// `theme` or `theme-flavor`
    pub theme: String,
    /// Explicit output path; derived from the input when `None`
    pub output: Option<PathBuf>,
    pub config: ProcessingConfig,
    /// Worker thread cap; one per execution unit when `None`
    pub max_workers: Option<usize>,
    /// Minimum time between progress updates
    pub progress_interval: Option<Duration>,
}

/// Result of a finished job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub output: PathBuf,
    pub format: ImageFormat,
    pub width: usize,
    pub height: usize,
}

impl RecolorJob {
    pub fn new(input: impl Into<PathBuf>, theme: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            theme: theme.into(),
            output: None,
            config: ProcessingConfig::default(),
            max_workers: None,
            progress_interval: None,
        }
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn config(mut self, config: ProcessingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_workers(mut self, workers: usize) -> Self {
        self.max_workers = Some(workers);
        self
    }

    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = Some(interval);
        self
    }

    /// Run the job, reporting progress to `sink`.
    ///
    /// The theme is resolved before the image is touched, so an unknown
    /// theme fails fast.
    pub fn run(
        &self,
        registry: &ThemeRegistry,
        sink: &dyn ProgressSink,
    ) -> Result<JobOutcome, JobError> {
        let palette = registry.palette(&self.theme)?;
        let (image, input_format) = load_image(&self.input)?;

        tracing::info!("Theme: {}", self.theme.trim().to_lowercase());
        tracing::info!(
            "Shepard's Method: nearest = {}, power = {:.1}, luminosity = {:.1}",
            self.config.nearest(),
            self.config.power(),
            self.config.luminosity()
        );
        tracing::info!("Processing: '{}'", self.input.display());

        let started = Instant::now();
        let recolored = self.recolorer(palette).recolor_with_progress(&image, sink)?;
        tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Recolored image");

        let output = self.output_path(input_format);
        let format = save_image(&recolored, &output, input_format)?;
        tracing::info!("Saved image: '{}'", output.display());

        Ok(JobOutcome {
            output,
            format,
            width: recolored.width(),
            height: recolored.height(),
        })
    }

    fn recolorer(&self, palette: Palette) -> Recolorer {
        let mut recolorer = Recolorer::new(palette)
            .luminosity(self.config.luminosity())
            .nearest(self.config.nearest())
            .power(self.config.power());
        if let Some(workers) = self.max_workers {
            recolorer = recolorer.max_workers(workers);
        }
        if let Some(interval) = self.progress_interval {
            recolorer = recolorer.progress_interval(interval);
        }
        recolorer
    }

    fn output_path(&self, input_format: ImageFormat) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => default_output_path(&self.input, &self.theme, input_format),
        }
    }
}
