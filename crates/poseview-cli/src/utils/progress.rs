use indicatif::{MultiProgress, ProgressBar, ProgressState, ProgressStyle};
use poseview::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    phase: Arc<Mutex<String>>,
}

impl CliProgressHandler {
    /// Adds the handler's bar to `mp`, which also carries the log output.
    pub fn new(mp: &MultiProgress) -> Self {
        let pb = mp.add(
            ProgressBar::new(0)
                .with_style(Self::spinner_style())
                .with_message("Initializing..."),
        );
        pb.disable_steady_tick();
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            phase: Arc::new(Mutex::new(String::new())),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let phase_clone = self.phase.clone();

        Box::new(move |progress: Progress| {
            let (Ok(pb_guard), Ok(mut phase)) = (pb_clone.lock(), phase_clone.lock()) else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    pb_guard.reset();
                    pb_guard.set_length(0);
                    pb_guard.set_style(Self::spinner_style());
                    pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb_guard.set_message(name);
                    *phase = name.to_string();
                }
                Progress::PhaseFinish => {
                    pb_guard.disable_steady_tick();
                    pb_guard.finish_with_message(format!("✓ {}", phase));
                }
                Progress::StatusUpdate { text } => {
                    pb_guard.set_message(format!("{} ({})", phase, text));
                }
                Progress::DownloadStart { total_bytes } => {
                    pb_guard.set_position(0);
                    if let Some(total) = total_bytes {
                        pb_guard.disable_steady_tick();
                        pb_guard.set_length(total);
                        pb_guard.set_style(Self::bar_style());
                    }
                }
                Progress::DownloadProgress { downloaded } => {
                    pb_guard.set_position(downloaded);
                }
                Progress::DownloadFinish => {
                    if let Some(total) = pb_guard.length() {
                        if pb_guard.position() < total {
                            pb_guard.set_position(total);
                        }
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{msg:<24} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
        )
        .expect("Failed to create bar style template")
        .with_key(
            "eta",
            |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
            },
        )
        .progress_chars("#>-")
    }
}
