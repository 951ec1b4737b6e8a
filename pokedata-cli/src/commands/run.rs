use std::sync::mpsc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use pokedata_api::Transport;
use pokedata_lib::{Pipeline, PipelineConfig, PipelineEvent, RunReport, Step};

use crate::CliError;
use crate::spinner::StepSpinner;

/// Run one step against the live catalog service.
pub(crate) fn run_step(config: PipelineConfig, step: Step, quiet: bool) -> Result<(), CliError> {
    log::info!(
        "{} {}",
        "Running".if_supports_color(Stdout, |t| t.bold()),
        step.if_supports_color(Stdout, |t| t.cyan()),
    );
    if step.uses_network() {
        log::debug!("Catalog: {}", config.api.base_url);
    }
    log::debug!("Data directory: {}", config.paths.data_dir.display());

    let pipeline = Pipeline::connect(config)?;
    let report = run_with_spinner(pipeline, step, quiet || !step.uses_network())?;
    print_report(&report);
    Ok(())
}

/// Run the pipeline on a worker thread, draining its events into a spinner.
pub(crate) fn run_with_spinner<T>(
    pipeline: Pipeline<T>,
    step: Step,
    hidden: bool,
) -> Result<RunReport, CliError>
where
    T: Transport + Send + 'static,
{
    let (event_tx, event_rx) = mpsc::channel::<PipelineEvent>();
    let pipeline = pipeline.with_events(event_tx);
    let worker = std::thread::spawn(move || pipeline.run(step));

    let mut spinner = StepSpinner::new(hidden);
    for event in event_rx {
        spinner.handle(&event);
    }
    spinner.finish();
    log::debug!("{step}: {} entities announced", spinner.total());

    let result = worker
        .join()
        .map_err(|_| CliError::runtime(format!("{step} worker panicked")))?;
    Ok(result?)
}

fn print_report(report: &RunReport) {
    for output in &report.outputs {
        log::info!(
            "  {} {} {} -> {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            output.records,
            output.kind.label(),
            output.path.display().if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    if report.skipped > 0 {
        log::info!(
            "  {}",
            format!("{} skipped", report.skipped).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}
