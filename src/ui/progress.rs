use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::pipeline::{PipelineOutcome, ProgressEvent};
use crate::ui::icons::{CHECK, CROSS};

/// Number of working steps in a pipeline run.
pub const PIPELINE_STEPS: u64 = 6;

/// Terminal rendering of a pipeline run's progress events.
///
/// A single bar advances once per step and shows the current step message.
/// When stderr is not a terminal the bar is hidden and nothing is drawn, so
/// callers print the final outcome themselves.
pub struct ProjectUI {
    bar: ProgressBar,
    verbose: bool,
    started: bool,
}

impl ProjectUI {
    pub fn new(verbose: bool) -> Self {
        let bar_style = ProgressStyle::default_bar()
            .template("{spinner} {prefix:.bold.dim} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is a valid static string")
            .progress_chars("█▓▒░");

        let bar = ProgressBar::new(PIPELINE_STEPS);
        bar.set_style(bar_style);
        bar.set_prefix("droidkit");

        Self {
            bar,
            verbose,
            started: false,
        }
    }

    /// Update the bar for one event from the progress channel.
    pub fn handle_event(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Step { message, .. } => {
                if self.started {
                    self.bar.inc(1);
                } else {
                    self.started = true;
                    self.bar.enable_steady_tick(Duration::from_millis(100));
                }
                self.bar.set_message(message.clone());
                if self.verbose {
                    self.bar
                        .println(format!("  {} {}", style("→").dim(), style(message).dim()));
                }
            }
            ProgressEvent::Error { .. } => {
                self.bar
                    .abandon_with_message(format!("{}{}", CROSS, style("failed").red()));
            }
            ProgressEvent::Finished(PipelineOutcome::Succeeded { .. }) => {
                self.bar.set_position(PIPELINE_STEPS);
                self.bar.finish_with_message(format!("{}done", CHECK));
            }
            ProgressEvent::Finished(PipelineOutcome::Failed { .. }) => {
                if !self.bar.is_finished() {
                    self.bar.abandon();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineState;
    use std::path::PathBuf;

    fn step(state: PipelineState) -> ProgressEvent {
        ProgressEvent::Step {
            message: state.progress_message().unwrap().to_string(),
            state,
        }
    }

    #[test]
    fn test_bar_advances_once_per_step_after_first() {
        let mut ui = ProjectUI::new(false);
        ui.handle_event(&step(PipelineState::Downloading));
        assert_eq!(ui.bar.position(), 0);
        ui.handle_event(&step(PipelineState::Extracting));
        ui.handle_event(&step(PipelineState::Scaffolding));
        assert_eq!(ui.bar.position(), 2);
        assert_eq!(ui.bar.message(), "Creating Android structure...");
    }

    #[test]
    fn test_success_fills_and_finishes_bar() {
        let mut ui = ProjectUI::new(false);
        ui.handle_event(&step(PipelineState::Downloading));
        ui.handle_event(&ProgressEvent::Finished(PipelineOutcome::Succeeded {
            location: PathBuf::from("/tmp/Demo"),
        }));
        assert_eq!(ui.bar.position(), PIPELINE_STEPS);
        assert!(ui.bar.is_finished());
    }

    #[test]
    fn test_error_abandons_bar() {
        let mut ui = ProjectUI::new(true);
        ui.handle_event(&step(PipelineState::Downloading));
        ui.handle_event(&ProgressEvent::Error {
            message: "HTTP 404".to_string(),
        });
        ui.handle_event(&ProgressEvent::Finished(PipelineOutcome::Failed {
            message: "HTTP 404".to_string(),
        }));
        assert!(ui.bar.is_finished());
        // The cause is printed once by the caller, not repeated on the bar
        assert!(ui.bar.message().contains("failed"));
        assert!(!ui.bar.message().contains("HTTP 404"));
    }
}
