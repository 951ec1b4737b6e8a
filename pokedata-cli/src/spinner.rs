//! Spinner for a running pipeline step, fed by [`PipelineEvent`]s.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use pokedata_lib::PipelineEvent;

/// Single spinner line tracking one step.
pub(crate) struct StepSpinner {
    pb: ProgressBar,
    total: usize,
}

impl StepSpinner {
    /// When `hidden` is true nothing is drawn, but events are still accepted.
    pub(crate) fn new(hidden: bool) -> Self {
        let pb = if hidden {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
                pb.set_style(style.tick_chars("/-\\|"));
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        };
        Self { pb, total: 0 }
    }

    pub(crate) fn handle(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::Started { step } => {
                self.pb.set_message(format!("Running {step}..."));
            }
            PipelineEvent::Listing { resource } => {
                self.pb.set_message(format!("Listing {resource}..."));
            }
            PipelineEvent::Listed { total } => {
                self.total = *total;
            }
            PipelineEvent::Processing { index, total, name } => {
                self.total = *total;
                self.pb
                    .set_message(format!("[{}/{}] {}", index + 1, total, name));
            }
            PipelineEvent::Skipped { name, reason } => {
                self.pb.set_message(format!("Skipped {name}: {reason}"));
            }
            PipelineEvent::Writing { path } => {
                self.pb.set_message(format!("Writing {}", path.display()));
            }
            PipelineEvent::Completed { .. } => {
                self.finish();
            }
        }
    }

    /// Entities announced by the last listing or processing event.
    pub(crate) fn total(&self) -> usize {
        self.total
    }

    pub(crate) fn finish(&self) {
        self.pb.disable_steady_tick();
        self.pb.finish_and_clear();
    }
}
