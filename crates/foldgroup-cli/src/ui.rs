use foldgroup::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Renders core progress events as a terminal progress bar.
///
/// The engine drives the reporter synchronously from the worker running the
/// workflow, so a mutex around the bar state is all the coordination needed.
pub struct ProgressRenderer {
    state: Mutex<BarState>,
}

#[derive(Default)]
struct BarState {
    active_bar: Option<ProgressBar>,
    phase: String,
}

impl ProgressRenderer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BarState::default()),
        }
    }

    /// Builds the callback to hand to a core `ProgressReporter`.
    pub fn callback(&self) -> ProgressCallback<'_> {
        Box::new(move |event| self.handle(event))
    }

    fn handle(&self, event: Progress) {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match event {
            Progress::PhaseStart { name } => {
                state.phase = name.to_string();
            }
            Progress::PhaseFinish => {
                state.phase.clear();
            }
            Progress::TaskStart { total_steps } => {
                let bar = ProgressBar::new(total_steps);
                bar.set_style(bar_style());
                bar.set_message(state.phase.clone());
                bar.enable_steady_tick(Duration::from_millis(120));
                state.active_bar = Some(bar);
            }
            Progress::TaskIncrement => {
                if let Some(bar) = &state.active_bar {
                    bar.inc(1);
                }
            }
            Progress::TaskFinish => {
                if let Some(bar) = state.active_bar.take() {
                    bar.finish_and_clear();
                }
            }
            Progress::Message(text) => match &state.active_bar {
                Some(bar) => bar.println(text),
                None => eprintln!("{}", text),
            },
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg:<18} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}
